//! WiFi module for wifiscout
//!
//! Pure decision logic (signal quantization, classification, stronger-network
//! detection) plus the scanner backends that feed it.

mod classify;
#[cfg(windows)]
mod native;
#[cfg_attr(not(windows), allow(dead_code))]
mod profile_xml;
mod replay;
mod scanner;
mod signal;
mod simulated;
mod stronger;
mod types;

// Re-export public API
pub use classify::categorize_networks;
#[cfg(windows)]
pub use native::NativeScanner;
pub use replay::ReplayScanner;
pub use scanner::{AnyScanner, Scanner};
pub use signal::{SignalQuality, rssi_to_percent};
pub use simulated::SimulatedScanner;
pub use stronger::{find_stronger_networks, should_notify};
pub use types::{CategorizedNetworks, CurrentNetwork, LocationPermission, ScanResult, WifiNetwork};
