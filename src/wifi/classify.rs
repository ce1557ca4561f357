use crate::wifi::types::{CategorizedNetworks, WifiNetwork};
use std::collections::HashSet;

/// Split networks into known and other, keeping scan order within each group.
///
/// Hidden networks (empty SSID) always land in `other`.
pub fn categorize_networks<S: AsRef<str>>(
    networks: &[WifiNetwork],
    known_ssids: impl IntoIterator<Item = S>,
) -> CategorizedNetworks {
    let known_set: HashSet<String> = known_ssids
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();

    let (known, other): (Vec<_>, Vec<_>) = networks
        .iter()
        .cloned()
        .partition(|network| !network.ssid.is_empty() && known_set.contains(&network.ssid));

    CategorizedNetworks { known, other }
}
