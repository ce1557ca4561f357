use crate::app::AppState;
use crate::config;
use crate::theme;
use crate::wifi::{SignalQuality, WifiNetwork, rssi_to_percent};
use ratatui::{
    prelude::*,
    widgets::{
        Block, BorderType, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap,
    },
};

pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BACKGROUND).fg(theme::FOREGROUND)),
        area,
    );

    // Match the parity of the terminal so the window sits dead centre
    let height = match_parity(config::MAIN_WINDOW_HEIGHT, area.height);
    let width = match_parity(config::MAIN_WINDOW_WIDTH, area.width);

    let vertical_layout = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    let horizontal_layout = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .split(vertical_layout[1]);

    let main_area = horizontal_layout[1];

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::DIMMED))
        .title(format!(" WIFISCOUT v{} ", env!("CARGO_PKG_VERSION")))
        .title_alignment(Alignment::Center)
        .title_style(Style::default().fg(theme::CYAN).add_modifier(Modifier::BOLD));

    frame.render_widget(main_block, main_area);

    let inner_area = main_area.inner(Margin {
        vertical: 1,
        horizontal: 2,
    });

    let needs_permission = state.location_permission().needs_permission();
    let content_layout = Layout::vertical([
        Constraint::Length(1),                                  // Status
        Constraint::Length(if needs_permission { 2 } else { 0 }), // Permission notice
        Constraint::Min(10),                                    // Network list
        Constraint::Length(8),                                  // Details
        Constraint::Length(1),                                  // Help
    ])
    .split(inner_area);

    render_status(frame, state, content_layout[0]);
    if needs_permission {
        let notice = Paragraph::new(
            "Location access is required to see network names. Grant it in your system privacy settings.",
        )
        .style(Style::default().fg(theme::BRIGHT_YELLOW))
        .wrap(Wrap { trim: true });
        frame.render_widget(notice, content_layout[1]);
    }
    render_networks(frame, state, content_layout[2]);
    render_details(frame, state, content_layout[3]);
    render_help(frame, content_layout[4]);

    if let Some((notification, _)) = &state.banner {
        let banner_area = Rect::new(
            main_area.x + 2,
            main_area.y + 1,
            main_area.width.saturating_sub(4),
            4,
        )
        .intersection(area);
        let banner = Paragraph::new(notification.body.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme::BRIGHT_PURPLE))
                    .title(format!(" {} {} ", state.icons.bell(), notification.title)),
            )
            .style(Style::default().fg(theme::FOREGROUND).bg(theme::BACKGROUND))
            .wrap(Wrap { trim: true });
        frame.render_widget(Clear, banner_area);
        frame.render_widget(banner, banner_area);
    }

    if let Some(error) = &state.error_message {
        let error_area = Rect::new(
            area.x + 2,
            area.height.saturating_sub(4),
            area.width.saturating_sub(4),
            3,
        )
        .intersection(area);
        let error_paragraph = Paragraph::new(error.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(theme::RED))
                    .title(" ERROR "),
            )
            .style(Style::default().fg(theme::RED).bg(theme::BACKGROUND))
            .wrap(Wrap { trim: true });
        frame.render_widget(Clear, error_area);
        frame.render_widget(error_paragraph, error_area);
    }
}

fn match_parity(target: u16, available: u16) -> u16 {
    if target % 2 == available % 2 {
        target
    } else {
        target + 1
    }
}

fn render_status(frame: &mut Frame, state: &AppState, area: Rect) {
    let label = Style::default().fg(theme::DIMMED);
    let mut spans = Vec::new();

    if state.is_initial_loading {
        let spinner = config::LOADING_CHARS[state.loading_frame % config::LOADING_CHARS.len()];
        spans.push(Span::styled(format!("{spinner} Scanning…"), Style::default().fg(theme::CYAN)));
    } else if let Some(updated) = state.display.updated_at {
        spans.push(Span::styled("Updated ", label));
        spans.push(Span::raw(updated.format("%H:%M:%S").to_string()));
    }

    spans.push(Span::styled(" • ", label));
    match state.current_network() {
        Some(current) => {
            spans.push(Span::styled("On ", label));
            spans.push(Span::styled(
                format!("{} ({} dBm)", current.ssid, current.rssi),
                Style::default().fg(theme::GREEN),
            ));
        }
        None => spans.push(Span::styled("Not connected", label)),
    }
    spans.push(Span::styled(
        format!(" • threshold {} dB", state.threshold),
        label,
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_networks(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BLUE))
        .title(" Networks ")
        .title_style(Style::default().fg(theme::BLUE).add_modifier(Modifier::BOLD));

    let groups = &state.display.groups;
    if groups.is_empty() {
        let text = if state.is_initial_loading {
            "Scanning for networks…"
        } else {
            "No networks found"
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(theme::DIMMED))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header_style = Style::default()
        .fg(theme::PURPLE)
        .add_modifier(Modifier::BOLD);

    let mut items = Vec::with_capacity(groups.len() + 2);
    items.push(ListItem::new(Line::styled(
        format!("Known networks ({})", groups.known.len()),
        header_style,
    )));
    items.extend(groups.known.iter().map(|n| network_item(state, n)));
    items.push(ListItem::new(Line::styled(
        format!("Other networks ({})", groups.other.len()),
        header_style,
    )));
    items.extend(groups.other.iter().map(|n| network_item(state, n)));

    // Rows include the two group headers
    let row = state.l_state.selected().map(|i| {
        if i < groups.known.len() {
            i + 1
        } else {
            i + 2
        }
    });
    let mut list_state = ListState::default().with_selected(row);

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme::SELECTION_BG))
        .highlight_symbol(state.icons.highlight());

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn network_item<'a>(state: &AppState, network: &'a WifiNetwork) -> ListItem<'a> {
    let quality = SignalQuality::from_rssi(network.rssi);
    let icons = state.icons;

    let mut spans = vec![
        Span::styled(
            icons.bars(quality.bars()),
            Style::default().fg(theme::signal_color(quality)),
        ),
        Span::raw(format!(" {:>3}% ", rssi_to_percent(network.rssi))),
        Span::raw(if network.security_label() == "Open" {
            icons.open()
        } else {
            icons.locked()
        }),
        Span::styled(
            format!("{:<26}", truncate(network.display_ssid(), 26)),
            if network.is_hidden() {
                Style::default().fg(theme::DIMMED)
            } else {
                Style::default()
            },
        ),
        Span::styled(
            format!(" ch {:>3} {:<5}", network.channel, network.security_label()),
            Style::default().fg(theme::DIMMED),
        ),
    ];

    if state.is_connected_to(network) {
        spans.push(Span::styled(icons.connected(), Style::default().fg(theme::GREEN)));
    } else if state
        .advantage_over_current(network)
        .is_some_and(|gain| gain > state.threshold)
    {
        spans.push(Span::styled(
            icons.stronger(),
            Style::default().fg(theme::BRIGHT_YELLOW),
        ));
    }

    ListItem::new(Line::from(spans))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn render_details(frame: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default()
        .title(" Details ")
        .title_style(Style::default().fg(theme::PURPLE).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::PURPLE))
        .padding(Padding::new(1, 1, 0, 0));

    let Some(network) = state.selected_network() else {
        frame.render_widget(block, area);
        return;
    };

    let label = Style::default().fg(theme::CYAN);
    let quality = SignalQuality::from_rssi(network.rssi);
    let is_known = state
        .display
        .groups
        .known
        .iter()
        .any(|n| n.ssid == network.ssid);

    let status = if state.is_connected_to(network) {
        "Connected".to_string()
    } else if let Some(gain) = state.advantage_over_current(network) {
        format!("{gain} dB stronger than current")
    } else if is_known {
        "Known".to_string()
    } else {
        "-".to_string()
    };

    let info = vec![
        Line::from(vec![
            Span::styled("SSID: ", label),
            Span::raw(network.display_ssid().to_string()),
            Span::styled(
                if is_known { format!(" {}", state.icons.known()) } else { String::new() },
                Style::default().fg(theme::DIMMED),
            ),
        ]),
        Line::from(vec![
            Span::styled("Signal: ", label),
            Span::raw(format!(
                "{} dBm  {}%  ",
                network.rssi,
                rssi_to_percent(network.rssi)
            )),
            Span::styled(
                format!("{} {}", state.icons.bars(quality.bars()), quality.label()),
                Style::default().fg(theme::signal_color(quality)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Channel: ", label),
            Span::raw(network.channel.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Security: ", label),
            Span::raw(network.security_label().to_string()),
        ]),
        Line::from(vec![Span::styled("Status: ", label), Span::raw(status)]),
    ];

    frame.render_widget(Paragraph::new(info).block(block), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(theme::FOREGROUND);
    let text = Style::default().fg(theme::DIMMED);
    let help = Line::from(vec![
        Span::styled("j/k", key),
        Span::styled(" move • ", text),
        Span::styled("g/G", key),
        Span::styled(" top/bottom • ", text),
        Span::styled("r", key),
        Span::styled(" rescan • ", text),
        Span::styled("q", key),
        Span::styled(" quit", text),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(Paragraph::new(help), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_follows_terminal() {
        assert_eq!(match_parity(77, 120), 78);
        assert_eq!(match_parity(77, 121), 77);
        assert_eq!(match_parity(32, 40), 32);
        assert_eq!(match_parity(32, 41), 33);
    }

    #[test]
    fn long_ssids_are_truncated_with_ellipsis() {
        assert_eq!(truncate("short", 26), "short");
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
        assert_eq!(truncate("ネットワーク名前", 4), "ネット…");
    }
}
