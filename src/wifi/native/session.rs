use crate::error::{WifiError, WifiResult};
use tracing::debug;
use windows::{
    Win32::{
        Foundation::{ERROR_SUCCESS, HANDLE},
        NetworkManagement::WiFi::*,
    },
    core::GUID,
};

/// An open WLAN client bound to the wireless interface being watched.
///
/// The client handle is released when the session drops.
#[derive(Debug)]
pub struct WlanSession {
    handle: HANDLE,
    interface: GUID,
}

impl WlanSession {
    /// Open a client and pick the interface to scan on, preferring one that
    /// is already associated.
    pub fn open() -> WifiResult<Self> {
        let mut negotiated_version = 0;
        let mut handle = HANDLE::default();
        let result = unsafe { WlanOpenHandle(2, None, &mut negotiated_version, &mut handle) };
        if result != ERROR_SUCCESS.0 {
            return Err(WifiError::HandleOpenFailed { code: result });
        }

        // Owned from here on, so early returns still close the handle.
        let mut session = Self {
            handle,
            interface: GUID::zeroed(),
        };
        session.interface = session.pick_interface()?;
        Ok(session)
    }

    pub fn raw(&self) -> HANDLE {
        self.handle
    }

    pub fn interface(&self) -> &GUID {
        &self.interface
    }

    fn pick_interface(&self) -> WifiResult<GUID> {
        unsafe {
            let mut list: *mut WLAN_INTERFACE_INFO_LIST = std::ptr::null_mut();
            let result = WlanEnumInterfaces(self.handle, None, &mut list);
            if result != ERROR_SUCCESS.0 || list.is_null() {
                return Err(WifiError::InterfaceEnumFailed { code: result });
            }

            let interfaces = std::slice::from_raw_parts(
                (*list).InterfaceInfo.as_ptr(),
                (*list).dwNumberOfItems as usize,
            );
            let chosen = interfaces
                .iter()
                .find(|info| info.isState == wlan_interface_state_connected)
                .or_else(|| interfaces.first())
                .map(|info| info.InterfaceGuid);
            debug!(interfaces = interfaces.len(), "enumerated wireless interfaces");
            WlanFreeMemory(list as *mut _);

            chosen.ok_or(WifiError::NoInterface)
        }
    }
}

impl Drop for WlanSession {
    fn drop(&mut self) {
        unsafe {
            let _ = WlanCloseHandle(self.handle, None);
        }
    }
}
