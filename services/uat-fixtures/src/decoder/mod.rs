//! External decoder interface
//!
//! The generator never decodes frames itself. A decoder is plugged in through
//! [`Decoder`] and hands back its output in the flat shapes below, which follow
//! the dump978 `uat_adsb_mdb` / `uat_uplink_mdb` layouts. Fields behind an
//! unset presence flag may hold anything; capture ignores them.

use serde::Deserialize;
use thiserror::Error;

use crate::reader::{FrameKind, RawFrame};

/// Decoder rejected a frame
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("decode failed: {0}")]
pub struct DecodeError(pub String);

/// Something that turns raw frames into decoded messages
pub trait Decoder {
    fn decode(&mut self, frame: &RawFrame) -> Result<DecodedMessage, DecodeError>;
}

impl<F> Decoder for F
where
    F: FnMut(&RawFrame) -> Result<DecodedMessage, DecodeError>,
{
    fn decode(&mut self, frame: &RawFrame) -> Result<DecodedMessage, DecodeError> {
        self(frame)
    }
}

/// Decoder output for either message kind
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedMessage {
    Downlink(Box<AdsbMdb>),
    Uplink(Box<UplinkMdb>),
}

impl DecodedMessage {
    pub fn kind(&self) -> FrameKind {
        match self {
            Self::Downlink(_) => FrameKind::Downlink,
            Self::Uplink(_) => FrameKind::Uplink,
        }
    }
}

impl From<AdsbMdb> for DecodedMessage {
    fn from(mdb: AdsbMdb) -> Self {
        Self::Downlink(Box::new(mdb))
    }
}

impl From<UplinkMdb> for DecodedMessage {
    fn from(mdb: UplinkMdb) -> Self {
        Self::Uplink(Box::new(mdb))
    }
}

/// Decoded ADS-B message data block
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AdsbMdb {
    // presence bits
    pub has_sv: bool,
    pub has_ms: bool,
    pub has_auxsv: bool,

    pub position_valid: bool,
    pub ns_vel_valid: bool,
    pub ew_vel_valid: bool,
    pub speed_valid: bool,
    pub dimensions_valid: bool,

    // HDR
    pub mdb_type: u8,
    pub address_qualifier: u8,
    pub address: u32,

    // SV
    pub lat: f64,
    pub lon: f64,
    pub altitude_type: u8,
    pub altitude: i32,
    pub nic: u8,
    pub airground_state: u8,
    pub ns_vel: i16,
    pub ew_vel: i16,
    pub track_type: u8,
    pub track: u16,
    pub speed: u16,
    pub vert_rate_source: u8,
    pub vert_rate: i16,
    pub length: f64,
    pub width: f64,
    pub position_offset: bool,
    pub utc_coupled: bool,
    pub tisb_site_id: u8,

    // MS
    pub emitter_category: u8,
    pub callsign_type: u8,
    pub callsign: String,
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
    /// 0 = invalid, 1 = magnetic, 2 = true
    pub heading_type: u8,

    // AUXSV
    pub sec_altitude_type: u8,
    pub sec_altitude: i32,
}

/// Decoded uplink message data block
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct UplinkMdb {
    pub position_valid: bool,
    pub utc_coupled: bool,
    pub app_data_valid: bool,

    pub lat: f64,
    pub lon: f64,

    pub slot_id: u8,
    pub tisb_site_id: u8,

    /// Reported count; `info_frames` may hold fewer entries
    pub num_info_frames: u32,
    pub info_frames: Vec<UplinkInfoFrame>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct UplinkInfoFrame {
    pub is_fisb: bool,
    pub length: u16,
    #[serde(rename = "type")]
    pub frame_type: u8,
    pub fisb: FisbApdu,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FisbApdu {
    pub a_flag: bool,
    pub g_flag: bool,
    pub p_flag: bool,
    pub s_flag: bool,
    pub monthday_valid: bool,
    pub seconds_valid: bool,

    pub product_id: u16,
    pub month: u8,
    pub day: u8,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}
