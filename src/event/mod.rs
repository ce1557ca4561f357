//! Event handling for wifiscout
//!
//! Drives the terminal: drains cycle reports and notifications from the
//! monitor task, then routes key presses.

mod handlers;

use crate::{app::AppState, config, monitor::CycleReport, notify::Notification, ui::render};
use color_eyre::eyre::Result;
use crossterm::{
    cursor::SetCursorStyle,
    event::{self, Event, KeyModifiers},
};
use handlers::{Action, handle_main_view};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

pub async fn run(
    mut terminal: DefaultTerminal,
    state: &mut AppState,
    mut reports: mpsc::Receiver<CycleReport>,
    mut notifications: mpsc::UnboundedReceiver<Notification>,
    refresh: mpsc::Sender<()>,
) -> Result<()> {
    crossterm::execute!(std::io::stdout(), SetCursorStyle::BlinkingBlock)?;

    loop {
        terminal.draw(|frame| render(frame, state))?;

        while let Ok(report) = reports.try_recv() {
            if let Some(network) = &report.notified {
                debug!(ssid = %network.ssid, "stronger network announced");
            }
            state.apply_report(report);
        }

        while let Ok(notification) = notifications.try_recv() {
            state.show_notification(notification);
        }

        state.expire_banner();

        if event::poll(Duration::from_millis(config::EVENT_POLL_MS))? {
            if let Event::Key(key) = event::read()?
                && key.kind == event::KeyEventKind::Press
            {
                // Clear error message on any key press
                if state.error_message.is_some() {
                    state.error_message = None;
                }

                if key.code == event::KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }

                match handle_main_view(key, state) {
                    Action::Quit => break,
                    Action::Refresh => {
                        // A full queue already has a refresh pending
                        if refresh.try_send(()).is_ok() {
                            debug!("refresh requested");
                        }
                    }
                    Action::None => {}
                }
            }
        } else if state.is_initial_loading {
            state.loading_frame = (state.loading_frame + 1) % config::LOADING_CHARS.len();
        }
    }
    Ok(())
}
