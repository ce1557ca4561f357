//! Signal strength quantization.
//!
//! Turns raw RSSI readings (dBm) into a display percentage and a coarse
//! quality tier.

/// RSSI at or below this reads as 0%
pub const RSSI_MIN: i32 = -90;
/// RSSI at or above this reads as 100%
pub const RSSI_MAX: i32 = -30;

/// Map an RSSI value to a percentage in `0..=100`.
///
/// Values outside `RSSI_MIN..=RSSI_MAX` saturate.
pub fn rssi_to_percent(rssi: i32) -> u8 {
    let clamped = rssi.clamp(RSSI_MIN, RSSI_MAX);
    let span = f64::from(RSSI_MAX - RSSI_MIN);
    let percent = (f64::from(clamped - RSSI_MIN) / span * 100.0).round();
    percent as u8
}

/// Discrete signal quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignalQuality {
    Weak,
    Fair,
    Good,
    Excellent,
}

impl SignalQuality {
    pub fn from_rssi(rssi: i32) -> Self {
        if rssi >= -50 {
            SignalQuality::Excellent
        } else if rssi >= -60 {
            SignalQuality::Good
        } else if rssi >= -70 {
            SignalQuality::Fair
        } else {
            SignalQuality::Weak
        }
    }

    /// Number of lit bars out of 4
    pub fn bars(&self) -> u8 {
        match self {
            SignalQuality::Excellent => 4,
            SignalQuality::Good => 3,
            SignalQuality::Fair => 2,
            SignalQuality::Weak => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignalQuality::Excellent => "Excellent",
            SignalQuality::Good => "Good",
            SignalQuality::Fair => "Fair",
            SignalQuality::Weak => "Weak",
        }
    }
}
