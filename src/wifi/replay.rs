//! Replays recorded scan snapshots from a JSON file.
//!
//! The file holds either one scan object or an array of them, in the same
//! shape the scan helper prints:
//!
//! ```json
//! [
//!   {
//!     "networks": [{ "ssid": "Home", "rssi": -48, "channel": 6, "security": "WPA2" }],
//!     "currentNetwork": { "ssid": "Home", "rssi": -48 },
//!     "locationPermission": "authorized"
//!   },
//!   { "error": "interface went away" }
//! ]
//! ```
//!
//! An `{ "error": ... }` entry makes that cycle fail. Entries are replayed in
//! order and wrap around at the end.

use crate::error::{WifiError, WifiResult};
use crate::wifi::scanner::{Scanner, merge_known};
use crate::wifi::types::ScanResult;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ReplayEntry {
    Scan(ScanResult),
    Failure { error: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReplayFile {
    Many(Vec<ReplayEntry>),
    One(ReplayEntry),
}

/// Scanner backed by a recording
#[derive(Debug)]
pub struct ReplayScanner {
    entries: Vec<ReplayEntry>,
    cursor: AtomicUsize,
    extra_known: BTreeSet<String>,
}

impl ReplayScanner {
    pub fn open(path: &Path, extra_known: BTreeSet<String>) -> WifiResult<Self> {
        let shown = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|e| WifiError::ReplayRead {
            path: shown.clone(),
            reason: e.to_string(),
        })?;
        let scanner = Self::from_json(&contents, extra_known).map_err(|e| match e {
            WifiError::ReplayParse { reason, .. } => WifiError::ReplayParse {
                path: shown.clone(),
                reason,
            },
            WifiError::ReplayEmpty { .. } => WifiError::ReplayEmpty {
                path: shown.clone(),
            },
            other => other,
        })?;
        debug!(path = %shown, entries = scanner.entries.len(), "loaded replay file");
        Ok(scanner)
    }

    fn from_json(json: &str, extra_known: BTreeSet<String>) -> WifiResult<Self> {
        let file: ReplayFile =
            serde_json::from_str(json).map_err(|e| WifiError::ReplayParse {
                path: String::new(),
                reason: e.to_string(),
            })?;
        let entries = match file {
            ReplayFile::Many(entries) => entries,
            ReplayFile::One(entry) => vec![entry],
        };
        if entries.is_empty() {
            return Err(WifiError::ReplayEmpty {
                path: String::new(),
            });
        }
        Ok(Self {
            entries,
            cursor: AtomicUsize::new(0),
            extra_known,
        })
    }
}

impl Scanner for ReplayScanner {
    async fn scan(&self) -> WifiResult<ScanResult> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.entries.len();
        trace!(index, "replaying scan");
        match &self.entries[index] {
            ReplayEntry::Scan(result) => {
                let mut result = result.clone();
                merge_known(&mut result, &self.extra_known);
                Ok(result)
            }
            ReplayEntry::Failure { error } => Err(WifiError::Internal(error.clone())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::wifi::types::LocationPermission;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const RECORDING: &str = r#"[
        {
            "networks": [
                { "ssid": "Home", "rssi": -48, "channel": 6, "security": "WPA2" },
                { "ssid": "Cafe", "rssi": -70, "channel": 1, "security": "None" }
            ],
            "currentNetwork": { "ssid": "Cafe", "rssi": -70 },
            "knownSsids": ["Home"],
            "locationPermission": "denied"
        },
        { "error": "interface went away" }
    ]"#;

    #[tokio::test]
    async fn replays_entries_in_order_and_wraps() {
        let scanner = ReplayScanner::from_json(RECORDING, BTreeSet::new()).unwrap();

        let first = scanner.scan().await.unwrap();
        assert_eq!(first.networks.len(), 2);
        assert_eq!(first.location_permission, LocationPermission::Denied);
        assert!(first.known_ssids.contains("Home"));

        let second = scanner.scan().await.unwrap_err();
        assert_eq!(second, WifiError::Internal("interface went away".into()));

        let third = scanner.scan().await.unwrap();
        assert_eq!(third, first);
    }

    #[tokio::test]
    async fn single_object_file_is_accepted() {
        let json = r#"{ "networks": [], "locationPermission": "authorized" }"#;
        let scanner = ReplayScanner::from_json(json, ["Home".to_string()].into()).unwrap();
        let result = scanner.scan().await.unwrap();
        assert!(result.networks.is_empty());
        assert!(result.known_ssids.contains("Home"));
    }

    #[test]
    fn empty_array_is_rejected() {
        let err = ReplayScanner::from_json("[]", BTreeSet::new()).unwrap_err();
        assert!(matches!(err, WifiError::ReplayEmpty { .. }));
    }

    #[test]
    fn open_reports_path_on_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = ReplayScanner::open(file.path(), BTreeSet::new()).unwrap_err();
        match err {
            WifiError::ReplayParse { path, .. } => {
                assert_eq!(path, file.path().display().to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn open_loads_recording_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{RECORDING}").unwrap();

        let scanner = ReplayScanner::open(file.path(), ["Cafe".to_string()].into()).unwrap();
        let result = scanner.scan().await.unwrap();
        assert_eq!(result.networks.len(), 2);
        assert!(result.known_ssids.contains("Cafe"));
    }

    #[test]
    fn open_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReplayScanner::open(&dir.path().join("nope.json"), BTreeSet::new()).unwrap_err();
        assert!(matches!(err, WifiError::ReplayRead { .. }));
    }
}
