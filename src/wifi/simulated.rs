//! Fake but plausible radio environment for development and demos.
//!
//! Readings drift deterministically from one scan to the next so a stronger
//! network periodically pulls ahead of the associated one.

use crate::error::WifiResult;
use crate::wifi::scanner::{Scanner, merge_known};
use crate::wifi::types::{CurrentNetwork, LocationPermission, ScanResult, WifiNetwork};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

const CONNECTED_SSID: &str = "HomeNet";

struct SimulatedAp {
    ssid: &'static str,
    base_rssi: i32,
    swing: i32,
    period: u64,
    channel: i32,
    security: &'static str,
    saved: bool,
}

const ACCESS_POINTS: &[SimulatedAp] = &[
    SimulatedAp { ssid: CONNECTED_SSID, base_rssi: -66, swing: 4, period: 12, channel: 6, security: "Wpa2Personal", saved: true },
    SimulatedAp { ssid: "HomeNet-5G", base_rssi: -60, swing: 12, period: 16, channel: 36, security: "Wpa3Personal", saved: true },
    SimulatedAp { ssid: "Office", base_rssi: -78, swing: 5, period: 10, channel: 11, security: "Wpa2Enterprise", saved: true },
    SimulatedAp { ssid: "CoffeeShop_Guest", base_rssi: -63, swing: 9, period: 22, channel: 1, security: "None", saved: false },
    SimulatedAp { ssid: "", base_rssi: -71, swing: 3, period: 8, channel: 149, security: "Wpa2Personal", saved: false },
    SimulatedAp { ssid: "Neighbor_2.4", base_rssi: -82, swing: 6, period: 14, channel: 6, security: "Wpa2Personal", saved: false },
];

/// Scanner that invents its results
#[derive(Debug, Default)]
pub struct SimulatedScanner {
    tick: AtomicU64,
    extra_known: BTreeSet<String>,
}

impl SimulatedScanner {
    pub fn new(extra_known: BTreeSet<String>) -> Self {
        Self {
            tick: AtomicU64::new(0),
            extra_known,
        }
    }

    fn snapshot(&self, tick: u64) -> ScanResult {
        let networks: Vec<WifiNetwork> = ACCESS_POINTS
            .iter()
            .map(|ap| {
                WifiNetwork::new(
                    ap.ssid,
                    ap.base_rssi + triangle(tick, ap.period, ap.swing),
                    ap.channel,
                    ap.security,
                )
            })
            .collect();

        let current_network = networks
            .iter()
            .find(|n| n.ssid == CONNECTED_SSID)
            .map(|n| CurrentNetwork::new(n.ssid.clone(), n.rssi));

        let mut result = ScanResult {
            networks,
            current_network,
            known_ssids: ACCESS_POINTS
                .iter()
                .filter(|ap| ap.saved)
                .map(|ap| ap.ssid.to_string())
                .collect(),
            location_permission: LocationPermission::Authorized,
        };
        result.sort_by_signal();
        merge_known(&mut result, &self.extra_known);
        result
    }
}

impl Scanner for SimulatedScanner {
    async fn scan(&self) -> WifiResult<ScanResult> {
        let tick = self.tick.fetch_add(1, Ordering::Relaxed);
        trace!(tick, "simulated scan");
        Ok(self.snapshot(tick))
    }
}

/// Triangle wave in `-swing..=swing` with the given period in ticks
fn triangle(tick: u64, period: u64, swing: i32) -> i32 {
    if period < 2 || swing == 0 {
        return 0;
    }
    let phase = tick % period;
    let rising = if phase <= period / 2 { phase } else { period - phase };
    let span = i64::from(swing) * 2;
    let offset = (rising as i64) * span / (period as i64 / 2) - i64::from(swing);
    offset.clamp(-i64::from(swing), i64::from(swing)) as i32
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn triangle_stays_within_swing() {
        for tick in 0..100 {
            let value = triangle(tick, 16, 12);
            assert!((-12..=12).contains(&value), "tick {tick} gave {value}");
        }
        assert_eq!(triangle(0, 16, 12), -12);
        assert_eq!(triangle(8, 16, 12), 12);
        assert_eq!(triangle(16, 16, 12), -12);
    }

    #[tokio::test]
    async fn scans_are_sorted_and_report_current_network() {
        let scanner = SimulatedScanner::new(BTreeSet::new());
        for _ in 0..20 {
            let result = scanner.scan().await.unwrap();
            assert!(result.networks.windows(2).all(|w| w[0].rssi >= w[1].rssi));
            let current = result.current_network.unwrap();
            assert_eq!(current.ssid, CONNECTED_SSID);
            assert!(result.known_ssids.contains(CONNECTED_SSID));
        }
    }

    #[tokio::test]
    async fn extra_known_ssids_are_merged() {
        let scanner = SimulatedScanner::new(["CoffeeShop_Guest".to_string()].into());
        let result = scanner.scan().await.unwrap();
        assert!(result.known_ssids.contains("CoffeeShop_Guest"));
    }

    #[test]
    fn a_stronger_network_eventually_clears_the_default_threshold() {
        let scanner = SimulatedScanner::new(BTreeSet::new());
        let found = (0..64).any(|tick| {
            let result = scanner.snapshot(tick);
            let current = result.current_network.clone().unwrap();
            result
                .networks
                .iter()
                .any(|n| n.ssid != current.ssid && n.rssi > current.rssi + 10)
        });
        assert!(found);
    }
}
