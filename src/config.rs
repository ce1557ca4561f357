/// Centralized configuration for wifiscout
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

// UI Dimensions
pub const MAIN_WINDOW_HEIGHT: u16 = 32;
pub const MAIN_WINDOW_WIDTH: u16 = 77;

// Timing
pub const SCAN_INTERVAL_MS: u64 = 3000;
pub const EVENT_POLL_MS: u64 = 100;
pub const NOTIFICATION_BANNER_SECS: u64 = 8;

// Decision
pub const STRONGER_THRESHOLD_DBM: i32 = 10;

// Loading animation frames
pub const LOADING_CHARS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// Icons - Nerd Fonts
pub mod icons {
    pub mod nerd {
        pub const KNOWN: &str = "󰆓 "; // nf-md-content_save
        pub const OPEN: &str = " "; // nf-fa-rss
        pub const LOCKED: &str = " "; // nf-fa-lock
        pub const CONNECTED: &str = " 󰖩"; // nf-md-wifi_check
        pub const STRONGER: &str = " 󰁝"; // nf-md-arrow_up_bold
        pub const BELL: &str = "󰁪"; // nf-md-bell
        pub const HIGHLIGHT: &str = "  ";
        pub const BAR_ON: &str = "▮";
        pub const BAR_OFF: &str = "▯";
    }

    pub mod ascii {
        pub const KNOWN: &str = "[K] ";
        pub const OPEN: &str = "[O] ";
        pub const LOCKED: &str = "[*] ";
        pub const CONNECTED: &str = " <-";
        pub const STRONGER: &str = " ^";
        pub const BELL: &str = "(!)";
        pub const HIGHLIGHT: &str = "> ";
        pub const BAR_ON: &str = "#";
        pub const BAR_OFF: &str = ".";
    }
}

/// Icon set to use based on configuration
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum IconSet {
    #[default]
    Nerd,
    Ascii,
}

impl IconSet {
    pub fn known(&self) -> &'static str {
        match self {
            IconSet::Nerd => icons::nerd::KNOWN,
            IconSet::Ascii => icons::ascii::KNOWN,
        }
    }

    pub fn open(&self) -> &'static str {
        match self {
            IconSet::Nerd => icons::nerd::OPEN,
            IconSet::Ascii => icons::ascii::OPEN,
        }
    }

    pub fn locked(&self) -> &'static str {
        match self {
            IconSet::Nerd => icons::nerd::LOCKED,
            IconSet::Ascii => icons::ascii::LOCKED,
        }
    }

    pub fn connected(&self) -> &'static str {
        match self {
            IconSet::Nerd => icons::nerd::CONNECTED,
            IconSet::Ascii => icons::ascii::CONNECTED,
        }
    }

    pub fn stronger(&self) -> &'static str {
        match self {
            IconSet::Nerd => icons::nerd::STRONGER,
            IconSet::Ascii => icons::ascii::STRONGER,
        }
    }

    pub fn bell(&self) -> &'static str {
        match self {
            IconSet::Nerd => icons::nerd::BELL,
            IconSet::Ascii => icons::ascii::BELL,
        }
    }

    pub fn highlight(&self) -> &'static str {
        match self {
            IconSet::Nerd => icons::nerd::HIGHLIGHT,
            IconSet::Ascii => icons::ascii::HIGHLIGHT,
        }
    }

    /// Four-slot signal meter with `lit` slots filled
    pub fn bars(&self, lit: u8) -> String {
        let (on, off) = match self {
            IconSet::Nerd => (icons::nerd::BAR_ON, icons::nerd::BAR_OFF),
            IconSet::Ascii => (icons::ascii::BAR_ON, icons::ascii::BAR_OFF),
        };
        (0..4u8).map(|i| if i < lit { on } else { off }).collect()
    }
}

/// Which scanner backend to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanSource {
    Native,
    Simulated,
    Replay(PathBuf),
}

/// Runtime settings assembled from the command line
#[derive(Debug, Clone)]
pub struct Settings {
    pub interval: Duration,
    pub threshold: i32,
    pub known_ssids: BTreeSet<String>,
    pub source: ScanSource,
    pub notifications: bool,
    pub headless: bool,
    pub icons: IconSet,
    pub verbose: u8,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(SCAN_INTERVAL_MS),
            threshold: STRONGER_THRESHOLD_DBM,
            known_ssids: BTreeSet::new(),
            source: ScanSource::Native,
            notifications: true,
            headless: false,
            icons: IconSet::Nerd,
            verbose: 0,
            log_file: default_log_file(),
        }
    }
}

pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("wifiscout.log")
}
