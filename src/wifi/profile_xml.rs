//! Reading the SSID out of a saved WLAN profile.
//!
//! A profile's name is user-editable and need not match the network it
//! describes, so the SSID is taken from `SSIDConfig/SSID/name`.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

const SSID_NAME_PATH: [&[u8]; 3] = [b"SSIDConfig", b"SSID", b"name"];

/// Extract the SSID from a WLAN profile XML document
pub fn ssid_from_profile_xml(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut ssid = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => path.push(e.local_name().as_ref().to_vec()),
            Ok(Event::End(_)) => {
                if at_ssid_name(&path) {
                    return (!ssid.is_empty()).then_some(ssid);
                }
                path.pop();
            }
            Ok(Event::Text(text)) if at_ssid_name(&path) => {
                ssid.push_str(&String::from_utf8_lossy(&text));
            }
            Ok(Event::GeneralRef(reference)) if at_ssid_name(&path) => {
                match reference.resolve_char_ref().ok()? {
                    Some(ch) => ssid.push(ch),
                    None => {
                        let name = reference.decode().ok()?;
                        ssid.push_str(resolve_predefined_entity(&name)?);
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

fn at_ssid_name(path: &[Vec<u8>]) -> bool {
    path.len() >= SSID_NAME_PATH.len()
        && path[path.len() - SSID_NAME_PATH.len()..]
            .iter()
            .map(Vec::as_slice)
            .eq(SSID_NAME_PATH)
}
