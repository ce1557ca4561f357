/// Typed errors for wifiscout scan and notification operations
use thiserror::Error;

/// Result type alias for WiFi operations
pub type WifiResult<T> = Result<T, WifiError>;

/// Errors that can occur while enumerating networks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WifiError {
    #[error("Failed to open WLAN handle (code: {code})")]
    HandleOpenFailed { code: u32 },

    #[error("Failed to enumerate interfaces (code: {code})")]
    InterfaceEnumFailed { code: u32 },

    #[error("No WiFi interface found")]
    NoInterface,

    #[error("Failed to scan networks (code: {code})")]
    ScanFailed { code: u32 },

    #[error("Failed to get available networks (code: {code})")]
    NetworkListFailed { code: u32 },

    #[error("No native scanner on this platform, use --simulate or --replay <FILE>")]
    Unsupported,

    #[error("Failed to read replay file {path}: {reason}")]
    ReplayRead { path: String, reason: String },

    #[error("Invalid replay file {path}: {reason}")]
    ReplayParse { path: String, reason: String },

    #[error("Replay file {path} contains no scans")]
    ReplayEmpty { path: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors that can occur while delivering a notification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Failed to deliver notification: {0}")]
    Dispatch(String),
}
