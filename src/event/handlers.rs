use crate::app::AppState;
use crossterm::event::{self, KeyEvent, KeyModifiers};

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Refresh,
    Quit,
}

/// Handle keyboard events for the network list
pub fn handle_main_view(key: KeyEvent, state: &mut AppState) -> Action {
    match key.code {
        event::KeyCode::Char('q') | event::KeyCode::Esc => return Action::Quit,
        event::KeyCode::Char('[') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Action::Quit;
        }
        event::KeyCode::Char('j') | event::KeyCode::Down => state.next(),
        event::KeyCode::Char('k') | event::KeyCode::Up => state.previous(),
        event::KeyCode::Char('g') | event::KeyCode::Home => state.go_to_top(),
        event::KeyCode::Char('G') | event::KeyCode::End => state.go_to_bottom(),
        event::KeyCode::Char('r') => return Action::Refresh,
        _ => {}
    }
    Action::None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::IconSet;
    use crate::monitor::{CycleReport, DisplayState};
    use crate::wifi::{ScanResult, WifiNetwork, categorize_networks};
    use crossterm::event::KeyCode;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with(ssids: &[&str]) -> AppState {
        let networks: Vec<_> = ssids
            .iter()
            .enumerate()
            .map(|(i, ssid)| WifiNetwork::new(*ssid, -40 - i as i32, 6, "WPA2"))
            .collect();
        let groups = categorize_networks(&networks, std::iter::empty::<&str>());
        let mut state = AppState::new(IconSet::Ascii, 10);
        state.apply_report(CycleReport {
            display: DisplayState {
                scan: Some(ScanResult {
                    networks,
                    ..ScanResult::default()
                }),
                groups,
                error: None,
                updated_at: None,
            },
            scan_error: None,
            notified: None,
            notify_error: None,
        });
        state
    }

    #[test]
    fn quit_keys() {
        let mut state = state_with(&["A"]);
        assert_eq!(handle_main_view(press(KeyCode::Char('q')), &mut state), Action::Quit);
        assert_eq!(handle_main_view(press(KeyCode::Esc), &mut state), Action::Quit);
        assert_eq!(
            handle_main_view(
                KeyEvent::new(KeyCode::Char('['), KeyModifiers::CONTROL),
                &mut state
            ),
            Action::Quit
        );
    }

    #[test]
    fn r_requests_refresh() {
        let mut state = state_with(&["A"]);
        assert_eq!(handle_main_view(press(KeyCode::Char('r')), &mut state), Action::Refresh);
    }

    #[test]
    fn vim_keys_move_selection() {
        let mut state = state_with(&["A", "B", "C"]);

        handle_main_view(press(KeyCode::Char('j')), &mut state);
        assert_eq!(state.selected_network().unwrap().ssid, "B");
        handle_main_view(press(KeyCode::Char('G')), &mut state);
        assert_eq!(state.selected_network().unwrap().ssid, "C");
        handle_main_view(press(KeyCode::Up), &mut state);
        assert_eq!(state.selected_network().unwrap().ssid, "B");
        handle_main_view(press(KeyCode::Char('g')), &mut state);
        assert_eq!(state.selected_network().unwrap().ssid, "A");
    }
}
