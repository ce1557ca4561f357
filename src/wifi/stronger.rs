use crate::wifi::types::{CurrentNetwork, WifiNetwork};

/// Networks strictly stronger than the current connection, in input order.
///
/// Entries sharing the current SSID are skipped whatever their strength,
/// scans often list the associated network again with a slightly different
/// reading.
pub fn find_stronger_networks(
    networks: &[WifiNetwork],
    current: Option<&CurrentNetwork>,
) -> Vec<WifiNetwork> {
    let Some(current) = current else {
        return Vec::new();
    };

    networks
        .iter()
        .filter(|network| network.ssid != current.ssid && network.rssi > current.rssi)
        .cloned()
        .collect()
}

/// Whether `strongest` beats `current` by more than `threshold` dBm.
///
/// A difference of exactly `threshold` does not count.
pub fn should_notify(
    strongest: Option<&WifiNetwork>,
    current: Option<&CurrentNetwork>,
    threshold: i32,
) -> bool {
    match (strongest, current) {
        (Some(strongest), Some(current)) => {
            i64::from(strongest.rssi) > i64::from(current.rssi) + i64::from(threshold)
        }
        _ => false,
    }
}
