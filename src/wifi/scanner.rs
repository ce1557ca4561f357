use crate::error::WifiResult;
#[cfg(windows)]
use crate::wifi::native::NativeScanner;
use crate::wifi::replay::ReplayScanner;
use crate::wifi::simulated::SimulatedScanner;
use crate::wifi::types::ScanResult;
use std::collections::BTreeSet;
use std::future::Future;

/// Source of scan results.
///
/// Implementations own all platform work: talking to the wireless stack,
/// location permission, and the list of known SSIDs.
pub trait Scanner: Send + Sync {
    fn scan(&self) -> impl Future<Output = WifiResult<ScanResult>> + Send;
}

/// The scanner selected on the command line
#[derive(Debug)]
pub enum AnyScanner {
    #[cfg(windows)]
    Native(NativeScanner),
    Simulated(SimulatedScanner),
    Replay(ReplayScanner),
}

impl Scanner for AnyScanner {
    async fn scan(&self) -> WifiResult<ScanResult> {
        match self {
            #[cfg(windows)]
            AnyScanner::Native(scanner) => scanner.scan().await,
            AnyScanner::Simulated(scanner) => scanner.scan().await,
            AnyScanner::Replay(scanner) => scanner.scan().await,
        }
    }
}

/// Add user-supplied known SSIDs to whatever the backend reported
pub fn merge_known(result: &mut ScanResult, extra: &BTreeSet<String>) {
    result
        .known_ssids
        .extend(extra.iter().filter(|ssid| !ssid.is_empty()).cloned());
}
