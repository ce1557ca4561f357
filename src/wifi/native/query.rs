use crate::error::{WifiError, WifiResult};
use crate::wifi::native::session::WlanSession;
use crate::wifi::profile_xml::ssid_from_profile_xml;
use crate::wifi::types::{CurrentNetwork, LocationPermission, ScanResult, WifiNetwork};
use std::collections::{BTreeSet, HashMap};
use windows::{
    Win32::{Foundation::ERROR_SUCCESS, NetworkManagement::WiFi::*},
    core::{PCWSTR, PWSTR},
};

/// Queue a background scan on the interface
pub fn trigger_scan(session: &WlanSession) -> WifiResult<()> {
    unsafe {
        let result = WlanScan(session.raw(), session.interface(), None, None, None);
        if result != ERROR_SUCCESS.0 {
            return Err(WifiError::ScanFailed { code: result });
        }
    }
    Ok(())
}

/// Read the current BSS list, connection and saved profiles into one result
pub fn collect(session: &WlanSession) -> WifiResult<ScanResult> {
    let security = security_by_ssid(session)?;
    let bss = bss_entries(session)?;

    let mut networks: Vec<WifiNetwork> = Vec::new();
    let mut index_by_ssid: HashMap<String, usize> = HashMap::new();

    for entry in &bss {
        let network = WifiNetwork::new(
            entry.ssid.clone(),
            entry.rssi,
            frequency_to_channel(entry.frequency_khz),
            security
                .get(&entry.ssid)
                .cloned()
                .unwrap_or_else(|| fallback_security(entry.privacy).to_string()),
        );

        // Hidden BSSes stay separate; named ones keep the strongest reading.
        if network.is_hidden() {
            networks.push(network);
            continue;
        }
        match index_by_ssid.get(&network.ssid) {
            Some(&i) => {
                if network.rssi > networks[i].rssi {
                    networks[i] = network;
                }
            }
            None => {
                index_by_ssid.insert(network.ssid.clone(), networks.len());
                networks.push(network);
            }
        }
    }

    let mut result = ScanResult {
        networks,
        current_network: current_network(session, &bss),
        known_ssids: saved_ssids(session),
        location_permission: LocationPermission::NotSupported,
    };
    result.sort_by_signal();
    Ok(result)
}

struct BssReading {
    ssid: String,
    bssid: [u8; 6],
    rssi: i32,
    frequency_khz: u32,
    privacy: bool,
}

/// Privacy bit of the 802.11 capability field
const CAPABILITY_PRIVACY: u16 = 0x0010;

/// Security for a BSS the available-network list said nothing about
/// (hidden networks, mostly)
fn fallback_security(privacy: bool) -> &'static str {
    if privacy { "Unknown" } else { "Open" }
}

fn bss_entries(session: &WlanSession) -> WifiResult<Vec<BssReading>> {
    let mut readings = Vec::new();
    unsafe {
        let mut bss_list: *mut WLAN_BSS_LIST = std::ptr::null_mut();
        let result = WlanGetNetworkBssList(
            session.raw(),
            session.interface(),
            None,
            dot11_BSS_type_any,
            false,
            None,
            &mut bss_list,
        );
        if result != ERROR_SUCCESS.0 || bss_list.is_null() {
            return Err(WifiError::NetworkListFailed { code: result });
        }

        let entries = std::slice::from_raw_parts(
            (*bss_list).wlanBssEntries.as_ptr(),
            (*bss_list).dwNumberOfItems as usize,
        );
        for entry in entries {
            let ssid_len = (entry.dot11Ssid.uSSIDLength as usize).min(entry.dot11Ssid.ucSSID.len());
            readings.push(BssReading {
                ssid: String::from_utf8_lossy(&entry.dot11Ssid.ucSSID[..ssid_len]).to_string(),
                bssid: entry.dot11Bssid,
                rssi: entry.lRssi,
                frequency_khz: entry.ulChCenterFrequency,
                privacy: entry.usCapabilityInformation & CAPABILITY_PRIVACY != 0,
            });
        }
        WlanFreeMemory(bss_list as *mut _);
    }
    Ok(readings)
}

#[allow(non_upper_case_globals)]
fn security_by_ssid(session: &WlanSession) -> WifiResult<HashMap<String, String>> {
    let mut security = HashMap::new();
    unsafe {
        let mut list: *mut WLAN_AVAILABLE_NETWORK_LIST = std::ptr::null_mut();
        let result = WlanGetAvailableNetworkList(
            session.raw(),
            session.interface(),
            WLAN_AVAILABLE_NETWORK_INCLUDE_ALL_MANUAL_HIDDEN_PROFILES,
            None,
            &mut list,
        );
        if result != ERROR_SUCCESS.0 {
            return Err(WifiError::NetworkListFailed { code: result });
        }

        let items = std::slice::from_raw_parts(
            (*list).Network.as_ptr(),
            (*list).dwNumberOfItems as usize,
        );
        for item in items {
            let ssid_len = (item.dot11Ssid.uSSIDLength as usize).min(item.dot11Ssid.ucSSID.len());
            if ssid_len == 0 {
                continue;
            }
            let ssid = String::from_utf8_lossy(&item.dot11Ssid.ucSSID[..ssid_len]).to_string();
            let label = match item.dot11DefaultAuthAlgorithm {
                DOT11_AUTH_ALGO_80211_OPEN => "Open",
                DOT11_AUTH_ALGO_80211_SHARED_KEY => "WEP",
                DOT11_AUTH_ALGO_WPA | DOT11_AUTH_ALGO_WPA_PSK | DOT11_AUTH_ALGO_WPA_NONE => "WPA",
                DOT11_AUTH_ALGO_RSNA | DOT11_AUTH_ALGO_RSNA_PSK => "WPA2",
                DOT11_AUTH_ALGO_WPA3 | DOT11_AUTH_ALGO_WPA3_SAE => "WPA3",
                _ => "Unknown",
            };
            security.entry(ssid).or_insert_with(|| label.to_string());
        }
        WlanFreeMemory(list as *mut _);
    }
    Ok(security)
}

fn current_network(session: &WlanSession, bss: &[BssReading]) -> Option<CurrentNetwork> {
    unsafe {
        let mut data_size = 0;
        let mut data_ptr: *mut std::ffi::c_void = std::ptr::null_mut();
        let mut opcode_value_type = wlan_opcode_value_type_invalid;

        let result = WlanQueryInterface(
            session.raw(),
            session.interface(),
            wlan_intf_opcode_current_connection,
            None,
            &mut data_size,
            &mut data_ptr,
            Some(&mut opcode_value_type),
        );
        if result != ERROR_SUCCESS.0 || data_ptr.is_null() {
            return None;
        }

        let attributes = &*(data_ptr as *const WLAN_CONNECTION_ATTRIBUTES);
        let mut current = None;
        if attributes.isState == wlan_interface_state_connected {
            let assoc = &attributes.wlanAssociationAttributes;
            let ssid_len = (assoc.dot11Ssid.uSSIDLength as usize).min(assoc.dot11Ssid.ucSSID.len());
            let ssid = String::from_utf8_lossy(&assoc.dot11Ssid.ucSSID[..ssid_len]).to_string();

            // Prefer the measured RSSI of the associated BSS over the quality estimate.
            let rssi = bss
                .iter()
                .find(|b| b.bssid == assoc.dot11Bssid)
                .map(|b| b.rssi)
                .unwrap_or_else(|| quality_to_rssi(assoc.wlanSignalQuality));
            current = Some(CurrentNetwork::new(ssid, rssi));
        }
        WlanFreeMemory(data_ptr);
        current
    }
}

/// SSIDs of saved profiles. Failures here only cost the "known" grouping.
fn saved_ssids(session: &WlanSession) -> BTreeSet<String> {
    let mut ssids = BTreeSet::new();
    unsafe {
        let mut profile_list: *mut WLAN_PROFILE_INFO_LIST = std::ptr::null_mut();
        let result = WlanGetProfileList(session.raw(), session.interface(), None, &mut profile_list);
        if result != ERROR_SUCCESS.0 {
            return ssids;
        }

        let items = std::slice::from_raw_parts(
            (*profile_list).ProfileInfo.as_ptr(),
            (*profile_list).dwNumberOfItems as usize,
        );
        for item in items {
            let name = String::from_utf16_lossy(&item.strProfileName)
                .trim_matches(char::from(0))
                .to_string();
            if name.is_empty() {
                continue;
            }
            let ssid = profile_xml(session, &name)
                .and_then(|xml| ssid_from_profile_xml(&xml))
                .unwrap_or(name);
            ssids.insert(ssid);
        }
        WlanFreeMemory(profile_list as *mut _);
    }
    ssids
}

fn profile_xml(session: &WlanSession, profile_name: &str) -> Option<String> {
    unsafe {
        let name_wide: Vec<u16> = profile_name.encode_utf16().chain(std::iter::once(0)).collect();
        let mut p_profile_xml = PWSTR::null();
        let mut flags = 0;

        let result = WlanGetProfile(
            session.raw(),
            session.interface(),
            PCWSTR(name_wide.as_ptr()),
            None,
            &mut p_profile_xml,
            Some(&mut flags),
            None,
        );
        if result != ERROR_SUCCESS.0 || p_profile_xml.is_null() {
            return None;
        }
        let xml = p_profile_xml.to_string().ok();
        WlanFreeMemory(p_profile_xml.as_ptr() as *mut _);
        xml
    }
}

/// Windows reports link quality 0..=100 linearly over -100..=-50 dBm
fn quality_to_rssi(quality: u32) -> i32 {
    (quality.min(100) as i32) / 2 - 100
}

fn frequency_to_channel(khz: u32) -> i32 {
    let channel = match khz {
        2_484_000 => 14,
        2_412_000..=2_472_000 => (khz - 2_407_000) / 5_000,
        5_000_000..=5_900_000 => (khz - 5_000_000) / 5_000,
        5_925_000..=7_125_000 => (khz.saturating_sub(5_950_000)) / 5_000,
        _ => 0,
    };
    channel as i32
}
