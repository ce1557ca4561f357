use crate::config::{self, IconSet};
use crate::monitor::{CycleReport, DisplayState};
use crate::notify::Notification;
use crate::wifi::{CurrentNetwork, LocationPermission, WifiNetwork};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

/// Everything the TUI needs to draw a frame
#[derive(Debug)]
pub struct AppState {
    pub display: DisplayState,
    pub l_state: ListState,
    pub icons: IconSet,
    pub threshold: i32,
    pub is_initial_loading: bool,
    pub loading_frame: usize,
    pub error_message: Option<String>,
    pub banner: Option<(Notification, Instant)>,
    pub scans_completed: u64,
}

impl AppState {
    pub fn new(icons: IconSet, threshold: i32) -> AppState {
        AppState {
            display: DisplayState::default(),
            l_state: ListState::default().with_selected(Some(0)),
            icons,
            threshold,
            is_initial_loading: true,
            loading_frame: 0,
            error_message: None,
            banner: None,
            scans_completed: 0,
        }
    }

    /// Take in a finished cycle, keeping the selection on the same SSID when possible
    pub fn apply_report(&mut self, report: CycleReport) {
        self.is_initial_loading = false;
        self.scans_completed += 1;

        if let Some(e) = &report.notify_error {
            self.error_message = Some(e.to_string());
        }
        if report.scan_error.is_some() {
            // Display state already carries the previous scan plus the error.
            self.error_message = report.display.error.clone();
            self.display = report.display;
            return;
        }

        let selected_ssid = self.selected_network().map(|n| n.ssid.clone());
        self.display = report.display;
        if report.notify_error.is_none() {
            self.error_message = None;
        }

        let position = selected_ssid.and_then(|ssid| {
            (0..self.display.groups.len())
                .find(|&i| self.display.groups.get(i).is_some_and(|n| n.ssid == ssid))
        });
        match position {
            Some(pos) => self.l_state.select(Some(pos)),
            None => self.clamp_selection(),
        }
    }

    pub fn show_notification(&mut self, notification: Notification) {
        self.banner = Some((notification, Instant::now()));
    }

    /// Drop the banner once it has been up long enough
    pub fn expire_banner(&mut self) {
        if let Some((_, shown_at)) = &self.banner {
            if shown_at.elapsed() >= Duration::from_secs(config::NOTIFICATION_BANNER_SECS) {
                self.banner = None;
            }
        }
    }

    pub fn current_network(&self) -> Option<&CurrentNetwork> {
        self.display.scan.as_ref()?.current_network.as_ref()
    }

    pub fn location_permission(&self) -> LocationPermission {
        self.display
            .scan
            .as_ref()
            .map(|s| s.location_permission)
            .unwrap_or_default()
    }

    pub fn selected_network(&self) -> Option<&WifiNetwork> {
        self.display.groups.get(self.l_state.selected()?)
    }

    pub fn is_connected_to(&self, network: &WifiNetwork) -> bool {
        self.current_network()
            .is_some_and(|c| !network.ssid.is_empty() && c.ssid == network.ssid)
    }

    /// dB by which `network` beats the current connection, if it does
    pub fn advantage_over_current(&self, network: &WifiNetwork) -> Option<i32> {
        let current = self.current_network()?;
        (network.ssid != current.ssid && network.rssi > current.rssi)
            .then(|| network.rssi.saturating_sub(current.rssi))
    }

    pub fn next(&mut self) {
        let i = match self.l_state.selected() {
            Some(i) => {
                if i >= self.display.groups.len().saturating_sub(1) {
                    i
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.l_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = match self.l_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.l_state.select(Some(i));
    }

    pub fn go_to_top(&mut self) {
        if !self.display.groups.is_empty() {
            self.l_state.select(Some(0));
        }
    }

    pub fn go_to_bottom(&mut self) {
        if !self.display.groups.is_empty() {
            self.l_state.select(Some(self.display.groups.len() - 1));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.display.groups.len();
        match self.l_state.selected() {
            Some(i) if i >= len => self.l_state.select(Some(len.saturating_sub(1))),
            None => self.l_state.select(Some(0)),
            _ => {}
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{NotifyError, WifiError};
    use crate::wifi::{ScanResult, categorize_networks};
    use pretty_assertions::assert_eq;

    fn net(ssid: &str, rssi: i32) -> WifiNetwork {
        WifiNetwork::new(ssid, rssi, 6, "WPA2")
    }

    fn ok_report(networks: Vec<WifiNetwork>, known: &[&str], current: Option<(&str, i32)>) -> CycleReport {
        let groups = categorize_networks(&networks, known.iter().copied());
        let scan = ScanResult {
            networks,
            current_network: current.map(|(ssid, rssi)| CurrentNetwork::new(ssid, rssi)),
            known_ssids: known.iter().map(|s| s.to_string()).collect(),
            location_permission: LocationPermission::Authorized,
        };
        CycleReport {
            display: DisplayState {
                scan: Some(scan),
                groups,
                error: None,
                updated_at: None,
            },
            scan_error: None,
            notified: None,
            notify_error: None,
        }
    }

    fn failed_report(previous: &DisplayState, error: WifiError) -> CycleReport {
        let mut display = previous.clone();
        display.error = Some(error.to_string());
        CycleReport {
            display,
            scan_error: Some(error),
            notified: None,
            notify_error: None,
        }
    }

    #[test]
    fn first_report_ends_loading() {
        let mut state = AppState::new(IconSet::Ascii, 10);
        assert!(state.is_initial_loading);

        state.apply_report(ok_report(vec![net("A", -50)], &[], None));
        assert!(!state.is_initial_loading);
        assert_eq!(state.scans_completed, 1);
        assert_eq!(state.selected_network().unwrap().ssid, "A");
    }

    #[test]
    fn selection_follows_ssid_across_reorders() {
        let mut state = AppState::new(IconSet::Ascii, 10);
        state.apply_report(ok_report(vec![net("A", -40), net("B", -50), net("C", -60)], &[], None));
        state.next();
        assert_eq!(state.selected_network().unwrap().ssid, "B");

        state.apply_report(ok_report(vec![net("B", -35), net("C", -45), net("A", -70)], &[], None));
        assert_eq!(state.l_state.selected(), Some(0));
        assert_eq!(state.selected_network().unwrap().ssid, "B");
    }

    #[test]
    fn selection_is_clamped_when_list_shrinks() {
        let mut state = AppState::new(IconSet::Ascii, 10);
        state.apply_report(ok_report(vec![net("A", -40), net("B", -50), net("C", -60)], &[], None));
        state.go_to_bottom();
        assert_eq!(state.l_state.selected(), Some(2));

        state.apply_report(ok_report(vec![net("X", -40)], &[], None));
        assert_eq!(state.l_state.selected(), Some(0));
    }

    #[test]
    fn failed_scan_keeps_networks_and_shows_error() {
        let mut state = AppState::new(IconSet::Ascii, 10);
        state.apply_report(ok_report(vec![net("A", -40), net("B", -50)], &["B"], Some(("B", -50))));
        let before = state.display.groups.clone();

        let failed = failed_report(&state.display, WifiError::NoInterface);
        state.apply_report(failed);

        assert_eq!(state.display.groups, before);
        assert_eq!(state.error_message.as_deref(), Some("No WiFi interface found"));

        state.apply_report(ok_report(vec![net("A", -40)], &[], None));
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn notification_failure_is_surfaced() {
        let mut state = AppState::new(IconSet::Ascii, 10);
        let mut report = ok_report(vec![net("A", -40)], &[], Some(("B", -60)));
        report.notify_error = Some(NotifyError::PermissionDenied);

        state.apply_report(report);
        assert_eq!(state.error_message.as_deref(), Some("Notification permission denied"));
    }

    #[test]
    fn advantage_only_for_other_stronger_networks() {
        let mut state = AppState::new(IconSet::Ascii, 10);
        state.apply_report(ok_report(
            vec![net("A", -40), net("B", -55), net("C", -70)],
            &["B"],
            Some(("B", -55)),
        ));

        assert_eq!(state.advantage_over_current(&net("A", -40)), Some(15));
        assert_eq!(state.advantage_over_current(&net("B", -40)), None);
        assert_eq!(state.advantage_over_current(&net("C", -70)), None);
        assert!(state.is_connected_to(&net("B", -55)));
        assert!(!state.is_connected_to(&net("", -55)));
    }

    #[test]
    fn navigation_walks_known_then_other() {
        let mut state = AppState::new(IconSet::Ascii, 10);
        state.apply_report(ok_report(vec![net("A", -40), net("B", -50)], &["B"], None));

        assert_eq!(state.selected_network().unwrap().ssid, "B");
        state.next();
        assert_eq!(state.selected_network().unwrap().ssid, "A");
        state.next();
        assert_eq!(state.selected_network().unwrap().ssid, "A");
        state.previous();
        state.previous();
        assert_eq!(state.selected_network().unwrap().ssid, "B");
    }
}
