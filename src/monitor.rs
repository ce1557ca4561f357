//! Scan loop and notification bookkeeping.
//!
//! [`Monitor`] runs one scan per cycle, keeps the latest display state, and
//! remembers which network it last told the user about so the same stronger
//! network is announced only once per session.

use crate::error::{NotifyError, WifiError};
use crate::notify::{Notifier, Permission};
use crate::wifi::{
    CategorizedNetworks, CurrentNetwork, ScanResult, Scanner, WifiNetwork, categorize_networks,
    find_stronger_networks, rssi_to_percent, should_notify,
};
use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// What the presentation layer shows between cycles
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DisplayState {
    /// Last successful scan, networks strongest first
    pub scan: Option<ScanResult>,
    pub groups: CategorizedNetworks,
    /// Error from the most recent cycle, if it failed
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Local>>,
}

/// SSID of the last network the user was told about
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NotificationMemory {
    last_notified_ssid: Option<String>,
}

impl NotificationMemory {
    pub fn last_notified(&self) -> Option<&str> {
        self.last_notified_ssid.as_deref()
    }

    pub fn is_repeat(&self, ssid: &str) -> bool {
        self.last_notified_ssid.as_deref() == Some(ssid)
    }

    fn record(&mut self, ssid: &str) {
        self.last_notified_ssid = Some(ssid.to_string());
    }
}

/// Result of a single cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub display: DisplayState,
    pub scan_error: Option<WifiError>,
    /// Network announced in this cycle
    pub notified: Option<WifiNetwork>,
    pub notify_error: Option<NotifyError>,
}

/// Drives the scan, classify, notify cycle
#[derive(Debug)]
pub struct Monitor<S, N> {
    scanner: S,
    notifier: N,
    threshold: i32,
    display: DisplayState,
    memory: NotificationMemory,
}

impl<S: Scanner, N: Notifier> Monitor<S, N> {
    pub fn new(scanner: S, notifier: N, threshold: i32) -> Self {
        Self {
            scanner,
            notifier,
            threshold,
            display: DisplayState::default(),
            memory: NotificationMemory::default(),
        }
    }

    /// Run exactly one scan cycle.
    ///
    /// State is only committed after the scan resolves, so dropping this
    /// future mid-scan leaves the monitor untouched.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let mut scan = match self.scanner.scan().await {
            Ok(scan) => scan,
            Err(e) => {
                warn!(error = %e, "scan failed");
                self.display.error = Some(e.to_string());
                return CycleReport {
                    display: self.display.clone(),
                    scan_error: Some(e),
                    notified: None,
                    notify_error: None,
                };
            }
        };

        // "First stronger network" must mean the strongest one.
        scan.sort_by_signal();

        let groups = categorize_networks(&scan.networks, &scan.known_ssids);
        debug!(
            networks = scan.networks.len(),
            known = groups.known.len(),
            current = ?scan.current_network.as_ref().map(|c| &c.ssid),
            permission = scan.location_permission.as_str(),
            "scan complete"
        );

        let candidate = find_stronger_networks(&scan.networks, scan.current_network.as_ref())
            .into_iter()
            .next();

        self.display = DisplayState {
            groups,
            error: None,
            updated_at: Some(Local::now()),
            scan: Some(scan),
        };

        let current = self
            .display
            .scan
            .as_ref()
            .and_then(|s| s.current_network.clone());

        let (notified, notify_error) = match candidate {
            Some(candidate)
                if should_notify(Some(&candidate), current.as_ref(), self.threshold)
                    && !self.memory.is_repeat(&candidate.ssid) =>
            {
                if !self.notifier.is_enabled() {
                    debug!(ssid = %candidate.ssid, "notifications off, not announcing");
                    (None, None)
                } else {
                    match self.announce(&candidate, current.as_ref()).await {
                        Ok(()) => (Some(candidate), None),
                        Err(e) => {
                            warn!(error = %e, ssid = %candidate.ssid, "notification failed");
                            (None, Some(e))
                        }
                    }
                }
            }
            _ => (None, None),
        };
        debug!(last_notified = ?self.memory.last_notified(), "cycle complete");

        CycleReport {
            display: self.display.clone(),
            scan_error: None,
            notified,
            notify_error,
        }
    }

    async fn announce(
        &mut self,
        candidate: &WifiNetwork,
        current: Option<&CurrentNetwork>,
    ) -> Result<(), NotifyError> {
        if !self.notifier.is_permission_granted().await
            && self.notifier.request_permission().await == Permission::Denied
        {
            return Err(NotifyError::PermissionDenied);
        }

        let (title, body) = compose_notification(candidate, current);
        self.notifier.send_notification(&title, &body).await?;
        self.memory.record(&candidate.ssid);
        info!(ssid = %candidate.ssid, rssi = candidate.rssi, "announced stronger network");
        Ok(())
    }

    /// Run cycles until either channel closes.
    ///
    /// The first cycle starts immediately. A message on `refresh` runs a
    /// cycle right away and restarts the timer.
    pub async fn run(
        mut self,
        interval: Duration,
        reports: mpsc::Sender<CycleReport>,
        mut refresh: mpsc::Receiver<()>,
    ) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                request = refresh.recv() => {
                    if request.is_none() {
                        break;
                    }
                    debug!("manual refresh");
                    ticker.reset();
                }
            }

            let report = self.run_cycle().await;
            if reports.send(report).await.is_err() {
                break;
            }
        }
        debug!("monitor stopped");
    }
}

fn compose_notification(
    candidate: &WifiNetwork,
    current: Option<&CurrentNetwork>,
) -> (String, String) {
    let title = "Stronger Wi-Fi network available".to_string();
    let body = match current {
        Some(current) => format!(
            "{} ({} dBm, {}%) is {} dB stronger than {} ({} dBm)",
            candidate.display_ssid(),
            candidate.rssi,
            rssi_to_percent(candidate.rssi),
            i64::from(candidate.rssi) - i64::from(current.rssi),
            current.ssid,
            current.rssi,
        ),
        None => format!("{} ({} dBm)", candidate.display_ssid(), candidate.rssi),
    };
    (title, body)
}
