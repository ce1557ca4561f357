//! Windows scanner built on the Native Wifi (WLAN) API.

mod query;
mod session;

use crate::error::{WifiError, WifiResult};
use crate::wifi::scanner::{Scanner, merge_known};
use crate::wifi::types::ScanResult;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Scanner talking to the local wireless interface
#[derive(Debug, Default)]
pub struct NativeScanner {
    extra_known: BTreeSet<String>,
}

impl NativeScanner {
    pub fn new(extra_known: BTreeSet<String>) -> Self {
        Self { extra_known }
    }
}

impl Scanner for NativeScanner {
    async fn scan(&self) -> WifiResult<ScanResult> {
        let mut result = tokio::task::spawn_blocking(|| {
            let session = session::WlanSession::open()?;

            // WlanScan only queues a scan; the lists below hold the previous results.
            if let Err(e) = query::trigger_scan(&session) {
                warn!(error = %e, "could not queue a fresh scan");
            }

            query::collect(&session)
        })
        .await
        .map_err(|e| WifiError::Internal(e.to_string()))??;

        merge_known(&mut result, &self.extra_known);
        debug!(networks = result.networks.len(), "native scan complete");
        Ok(result)
    }
}
