//! Downlink (ADS-B) fixture record

use super::types::{AltitudeType, CallsignType, HeadingType, TrackType};

/// Width of the mode-status callsign field
pub const CALLSIGN_LEN: usize = 8;

/// Decoded downlink message as stored in a fixture
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DownlinkRecord {
    pub mdb_type: u8,
    pub address_qualifier: u8,
    /// 24-bit address
    pub address: u32,

    pub state_vector: Option<StateVector>,
    pub mode_status: Option<ModeStatus>,
    pub aux_state_vector: Option<AuxStateVector>,
}

/// SV element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateVector {
    pub nic: u8,
    pub position_valid: bool,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    pub altitude_type: AltitudeType,
    /// Altitude in feet
    pub altitude: i32,
    pub airground_state: u8,
    pub ns_vel_valid: bool,
    /// North/south velocity in knots
    pub ns_vel: i16,
    pub ew_vel_valid: bool,
    /// East/west velocity in knots
    pub ew_vel: i16,
    pub track_type: TrackType,
    pub track: u16,
    pub speed_valid: bool,
    /// Ground speed in knots
    pub speed: u16,
    pub vert_rate_source: AltitudeType,
    /// Vertical rate in ft/min
    pub vert_rate: i16,
    pub dimensions_valid: bool,
    /// Length in meters
    pub length: f64,
    /// Width in meters
    pub width: f64,
    pub position_offset: bool,
    pub utc_coupled: bool,
    /// TIS-B site id, zero for ADS-B
    pub tisb_site_id: u8,
}

/// MS element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModeStatus {
    pub emitter_category: u8,
    pub callsign: Callsign,
    pub callsign_type: CallsignType,
    pub emergency_status: u8,
    pub uat_version: u8,
    pub sil: u8,
    pub transmit_mso: u8,
    pub nac_p: u8,
    pub nac_v: u8,
    pub nic_baro: u8,
    pub has_cdti: bool,
    pub has_acas: bool,
    pub acas_ra_active: bool,
    pub ident_active: bool,
    pub atc_services: bool,
    pub heading_type: HeadingType,
}

/// AUXSV element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuxStateVector {
    pub sec_altitude_type: AltitudeType,
    /// Secondary altitude in feet
    pub sec_altitude: i32,
}

/// Fixed-width callsign, at most [`CALLSIGN_LEN`] ASCII bytes
///
/// Padding spaces are kept as reported; everything from the first NUL on is
/// dropped. Characters outside printable ASCII become spaces so the text
/// always fits the emitted `char[CALLSIGN_LEN + 1]` field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Callsign(String);

impl Callsign {
    pub fn new(raw: &str) -> Self {
        let text = raw.split('\0').next().unwrap_or_default();
        Self(
            text.chars()
                .take(CALLSIGN_LEN)
                .map(|ch| if ch.is_ascii_graphic() { ch } else { ' ' })
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Callsign {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl DownlinkRecord {
    /// Fixture name, unique within the downlink collection via `ordinal`
    pub fn fixture_name(&self, ordinal: usize) -> String {
        format!(
            "Downlink_MDB{}_Addr{:06X}_{}",
            self.mdb_type, self.address, ordinal
        )
    }
}
