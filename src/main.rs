mod app;
mod config;
mod error;
mod event;
mod monitor;
mod notify;
mod theme;
mod ui;
mod wifi;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::AppState,
    config::{IconSet, ScanSource, Settings},
    monitor::{CycleReport, Monitor},
    notify::{ChannelNotifier, LogNotifier},
    wifi::{AnyScanner, ReplayScanner, SimulatedScanner},
};

/// Watches nearby Wi-Fi networks and tells you when a clearly stronger one shows up
#[derive(Parser, Debug)]
#[command(
    name = "wifiscout",
    author = "Soham Waghmare",
    about = "Watches nearby Wi-Fi networks and tells you when a clearly stronger one shows up.\n\nAuthor: Soham Waghmare",
    long_about = None,
    version = env!("CARGO_PKG_VERSION"),
    disable_version_flag = true
)]
struct Args {
    /// Print version information
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: (),

    /// Time between scans in milliseconds
    #[arg(long = "interval-ms", default_value_t = config::SCAN_INTERVAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// Minimum dB advantage over the current network before notifying
    #[arg(long, default_value_t = config::STRONGER_THRESHOLD_DBM)]
    threshold: i32,

    /// Treat SSID as known (repeatable)
    #[arg(long = "known", value_name = "SSID")]
    known: Vec<String>,

    /// Use a simulated scanner instead of the wireless adapter
    #[arg(long, conflicts_with = "replay")]
    simulate: bool,

    /// Replay scans from a JSON file
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Never send notifications
    #[arg(long = "no-notify")]
    no_notify: bool,

    /// Print one line per scan instead of drawing the TUI
    #[arg(long)]
    headless: bool,

    /// Use ASCII icons (no Nerd Fonts required)
    #[arg(long)]
    ascii: bool,

    /// Increase log verbosity (once info, twice debug, three times trace)
    #[arg(long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log file used while the TUI is running
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn into_settings(self) -> Settings {
        let mut settings = Settings::default();
        settings.interval = Duration::from_millis(self.interval_ms);
        settings.threshold = self.threshold;
        settings.known_ssids = self.known.into_iter().filter(|s| !s.is_empty()).collect();
        settings.source = match (self.simulate, self.replay) {
            (_, Some(path)) => ScanSource::Replay(path),
            (true, None) => ScanSource::Simulated,
            (false, None) => ScanSource::Native,
        };
        settings.notifications = !self.no_notify;
        settings.headless = self.headless;
        settings.icons = if self.ascii {
            IconSet::Ascii
        } else {
            IconSet::Nerd
        };
        settings.verbose = self.verbose;
        if let Some(log_file) = self.log_file {
            settings.log_file = log_file;
        }
        settings
    }
}

fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("wifiscout={level}")))
}

/// File-based tracing for the TUI. Anything on stdout or stderr would
/// corrupt the screen. Hold the guard until exit so logs get flushed.
fn setup_file_tracing(settings: &Settings) -> WorkerGuard {
    let log_dir = settings
        .log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);
    let log_filename = settings
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("wifiscout.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(log_filter(settings.verbose))
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

fn setup_stderr_tracing(settings: &Settings) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(settings.verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_scanner(settings: &Settings) -> Result<AnyScanner> {
    let known = settings.known_ssids.clone();
    let scanner = match &settings.source {
        ScanSource::Simulated => AnyScanner::Simulated(SimulatedScanner::new(known)),
        ScanSource::Replay(path) => AnyScanner::Replay(ReplayScanner::open(path, known)?),
        #[cfg(windows)]
        ScanSource::Native => AnyScanner::Native(crate::wifi::NativeScanner::new(known)),
        #[cfg(not(windows))]
        ScanSource::Native => return Err(crate::error::WifiError::Unsupported.into()),
    };
    Ok(scanner)
}

/// One status line per cycle for headless runs
fn summarize(report: &CycleReport) -> String {
    let stamp = report
        .display
        .updated_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());

    if let Some(e) = &report.scan_error {
        return format!("[{stamp}] scan failed: {e}");
    }

    let groups = &report.display.groups;
    let current = report
        .display
        .scan
        .as_ref()
        .and_then(|s| s.current_network.as_ref())
        .map(|c| format!("connected to {} ({} dBm)", c.ssid, c.rssi))
        .unwrap_or_else(|| "not connected".to_string());

    let mut line = format!(
        "[{stamp}] {} networks ({} known), {current}",
        groups.len(),
        groups.known.len()
    );
    if let Some(e) = &report.notify_error {
        line.push_str(&format!(", notification failed: {e}"));
    }
    line
}

async fn run_headless(settings: Settings, scanner: AnyScanner) -> Result<()> {
    let (report_tx, mut report_rx) = mpsc::channel(4);
    // Nothing ever asks for a manual refresh, but the loop stops when this closes.
    let (_refresh_tx, refresh_rx) = mpsc::channel(1);

    let monitor = Monitor::new(
        scanner,
        LogNotifier::new(settings.notifications),
        settings.threshold,
    );
    let task = tokio::spawn(monitor.run(settings.interval, report_tx, refresh_rx));

    while let Some(report) = report_rx.recv().await {
        println!("{}", summarize(&report));
    }

    task.await?;
    Ok(())
}

async fn run_tui(settings: Settings, scanner: AnyScanner) -> Result<()> {
    let mut state = AppState::new(settings.icons, settings.threshold);

    let (report_tx, report_rx) = mpsc::channel(4);
    let (refresh_tx, refresh_rx) = mpsc::channel(1);
    let (notification_tx, notification_rx) = mpsc::unbounded_channel();

    let monitor = Monitor::new(
        scanner,
        ChannelNotifier::new(notification_tx, settings.notifications),
        settings.threshold,
    );
    let task = tokio::spawn(monitor.run(settings.interval, report_tx, refresh_rx));

    let terminal = ratatui::init();
    enable_raw_mode()?;
    let result = event::run(terminal, &mut state, report_rx, notification_rx, refresh_tx).await;
    disable_raw_mode()?;

    ratatui::restore();
    task.abort();
    result
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Args::parse().into_settings();

    color_eyre::install()?;

    // Keep the guard alive until the app exits.
    let _guard = if settings.headless {
        setup_stderr_tracing(&settings);
        None
    } else {
        Some(setup_file_tracing(&settings))
    };

    info!(
        source = ?settings.source,
        interval_ms = settings.interval.as_millis() as u64,
        threshold = settings.threshold,
        known = settings.known_ssids.len(),
        "starting wifiscout"
    );

    let scanner = build_scanner(&settings)?;

    if settings.headless {
        run_headless(settings, scanner).await
    } else {
        run_tui(settings, scanner).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{NotifyError, WifiError};
    use crate::monitor::DisplayState;
    use crate::wifi::{CurrentNetwork, ScanResult, WifiNetwork, categorize_networks};

    fn report(scan_error: Option<WifiError>) -> CycleReport {
        let networks = vec![
            WifiNetwork::new("Home", -55, 36, "WPA2"),
            WifiNetwork::new("Cafe", -70, 6, "Open"),
        ];
        let groups = categorize_networks(&networks, ["Home"]);
        CycleReport {
            display: DisplayState {
                scan: Some(ScanResult {
                    networks,
                    current_network: Some(CurrentNetwork::new("Home", -55)),
                    ..ScanResult::default()
                }),
                groups,
                error: None,
                updated_at: None,
            },
            scan_error,
            notified: None,
            notify_error: None,
        }
    }

    #[test]
    fn args_fold_into_settings() {
        let args = Args::try_parse_from([
            "wifiscout",
            "--interval-ms",
            "500",
            "--threshold",
            "15",
            "--known",
            "Home",
            "--known",
            "Office",
            "--simulate",
            "--no-notify",
            "--ascii",
        ])
        .unwrap();
        let settings = args.into_settings();

        assert_eq!(settings.interval, Duration::from_millis(500));
        assert_eq!(settings.threshold, 15);
        assert_eq!(settings.known_ssids.len(), 2);
        assert_eq!(settings.source, ScanSource::Simulated);
        assert!(!settings.notifications);
        assert_eq!(settings.icons, IconSet::Ascii);
    }

    #[test]
    fn replay_and_simulate_conflict() {
        assert!(Args::try_parse_from(["wifiscout", "--simulate", "--replay", "scans.json"]).is_err());
        assert!(Args::try_parse_from(["wifiscout", "--interval-ms", "0"]).is_err());
    }

    #[test]
    fn summary_line_reports_counts_and_connection() {
        assert_eq!(
            summarize(&report(None)),
            "[--:--:--] 2 networks (1 known), connected to Home (-55 dBm)"
        );
    }

    #[test]
    fn summary_line_reports_failures() {
        assert_eq!(
            summarize(&report(Some(WifiError::NoInterface))),
            "[--:--:--] scan failed: No WiFi interface found"
        );

        let mut with_notify_error = report(None);
        with_notify_error.notify_error = Some(NotifyError::PermissionDenied);
        assert!(summarize(&with_notify_error).ends_with("notification failed: Notification permission denied"));
    }
}
