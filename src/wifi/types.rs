use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single network seen in one scan
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiNetwork {
    /// Empty for hidden networks
    pub ssid: String,
    /// Signal strength in dBm
    pub rssi: i32,
    pub channel: i32,
    pub security: String,
}

impl WifiNetwork {
    pub fn new(ssid: impl Into<String>, rssi: i32, channel: i32, security: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            rssi,
            channel,
            security: security.into(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.ssid.is_empty()
    }

    /// SSID for display, with a placeholder for hidden networks
    pub fn display_ssid(&self) -> &str {
        if self.is_hidden() {
            "(hidden network)"
        } else {
            &self.ssid
        }
    }

    /// Short security label, e.g. "Wpa2Personal" -> "WPA2"
    pub fn security_label(&self) -> &str {
        let lower = self.security.to_lowercase();
        if lower.contains("wpa3") {
            "WPA3"
        } else if lower.contains("wpa2") {
            "WPA2"
        } else if lower.contains("wpa") {
            "WPA"
        } else if lower.contains("wep") {
            "WEP"
        } else if lower.is_empty() || lower == "none" || lower == "open" {
            "Open"
        } else {
            &self.security
        }
    }
}

/// The network the device is associated with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentNetwork {
    pub ssid: String,
    pub rssi: i32,
}

impl CurrentNetwork {
    pub fn new(ssid: impl Into<String>, rssi: i32) -> Self {
        Self {
            ssid: ssid.into(),
            rssi,
        }
    }
}

/// Location authorization as reported by the scanner.
///
/// Some platforms hide SSIDs until location access is granted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPermission {
    Authorized,
    Denied,
    Restricted,
    NotDetermined,
    NotSupported,
    #[default]
    #[serde(other)]
    Unknown,
}

impl LocationPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationPermission::Authorized => "authorized",
            LocationPermission::Denied => "denied",
            LocationPermission::Restricted => "restricted",
            LocationPermission::NotDetermined => "not_determined",
            LocationPermission::NotSupported => "not_supported",
            LocationPermission::Unknown => "unknown",
        }
    }

    /// Whether the user should be asked to grant location access
    pub fn needs_permission(&self) -> bool {
        matches!(
            self,
            LocationPermission::Denied | LocationPermission::NotDetermined
        )
    }
}

/// Everything one scan cycle produced
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub networks: Vec<WifiNetwork>,
    #[serde(default)]
    pub current_network: Option<CurrentNetwork>,
    #[serde(default)]
    pub known_ssids: BTreeSet<String>,
    #[serde(default)]
    pub location_permission: LocationPermission,
}

impl ScanResult {
    /// Stable sort by descending signal strength, strongest first
    pub fn sort_by_signal(&mut self) {
        self.networks.sort_by(|a, b| b.rssi.cmp(&a.rssi));
    }
}

/// Networks split by familiarity, each group in scan order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CategorizedNetworks {
    pub known: Vec<WifiNetwork>,
    pub other: Vec<WifiNetwork>,
}

impl CategorizedNetworks {
    pub fn len(&self) -> usize {
        self.known.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.other.is_empty()
    }

    /// Network at a flat index, known group first
    pub fn get(&self, index: usize) -> Option<&WifiNetwork> {
        self.known
            .get(index)
            .or_else(|| self.other.get(index.checked_sub(self.known.len())?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn security_label_normalises_vendor_strings() {
        let label = |s: &str| WifiNetwork::new("x", -50, 1, s).security_label().to_string();
        assert_eq!(label("Wpa3Personal"), "WPA3");
        assert_eq!(label("Wpa2Enterprise"), "WPA2");
        assert_eq!(label("WPA"), "WPA");
        assert_eq!(label("DynamicWEP"), "WEP");
        assert_eq!(label("None"), "Open");
        assert_eq!(label(""), "Open");
        assert_eq!(label("OWE"), "OWE");
    }

    #[test]
    fn hidden_network_has_placeholder_ssid() {
        let hidden = WifiNetwork::new("", -50, 1, "WPA2");
        assert!(hidden.is_hidden());
        assert_eq!(hidden.display_ssid(), "(hidden network)");
        assert_eq!(WifiNetwork::new("Cafe", -50, 1, "WPA2").display_ssid(), "Cafe");
    }

    #[test]
    fn location_permission_parses_wire_strings() {
        let parse = |s: &str| -> LocationPermission {
            serde_json::from_str(&format!("\"{s}\"")).unwrap()
        };
        assert_eq!(parse("authorized"), LocationPermission::Authorized);
        assert_eq!(parse("not_determined"), LocationPermission::NotDetermined);
        assert_eq!(parse("something_new"), LocationPermission::Unknown);
        assert!(parse("denied").needs_permission());
        assert!(parse("not_determined").needs_permission());
        assert!(!parse("restricted").needs_permission());
        assert_eq!(LocationPermission::NotSupported.as_str(), "not_supported");
    }

    #[test]
    fn scan_result_reads_scanner_json() {
        let json = r#"{
            "networks": [
                { "ssid": "Office", "rssi": -61, "channel": 11, "security": "WPA2" },
                { "ssid": "Home", "rssi": -48, "channel": 6, "security": "WPA3" }
            ],
            "locationPermission": "authorized",
            "currentNetwork": { "ssid": "Office", "rssi": -61 }
        }"#;
        let result: ScanResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.networks.len(), 2);
        assert_eq!(result.current_network, Some(CurrentNetwork::new("Office", -61)));
        assert_eq!(result.location_permission, LocationPermission::Authorized);
        assert!(result.known_ssids.is_empty());
    }

    #[test]
    fn sort_by_signal_is_stable() {
        let mut result = ScanResult {
            networks: vec![
                WifiNetwork::new("a", -70, 1, ""),
                WifiNetwork::new("b", -40, 1, ""),
                WifiNetwork::new("c", -70, 1, ""),
            ],
            ..ScanResult::default()
        };
        result.sort_by_signal();
        let order: Vec<_> = result.networks.iter().map(|n| n.ssid.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn categorized_get_walks_known_then_other() {
        let groups = CategorizedNetworks {
            known: vec![WifiNetwork::new("k", -50, 1, "")],
            other: vec![WifiNetwork::new("o1", -60, 1, ""), WifiNetwork::new("o2", -70, 1, "")],
        };
        assert_eq!(groups.len(), 3);
        assert_eq!(groups.get(0).unwrap().ssid, "k");
        assert_eq!(groups.get(2).unwrap().ssid, "o2");
        assert!(groups.get(3).is_none());
    }
}
