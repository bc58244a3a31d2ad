//! Uplink (ground station) fixture record

use crate::store::Bounded;

/// Info frames retained per uplink record
///
/// The decoder can report more; the excess is dropped at capture time while
/// `num_info_frames` keeps the reported count.
pub const MAX_INFO_FRAMES: usize = 8;

/// Decoded uplink message as stored in a fixture
#[derive(Debug, Clone, PartialEq)]
pub struct UplinkRecord {
    pub position_valid: bool,
    /// Ground station latitude in degrees
    pub lat: f64,
    /// Ground station longitude in degrees
    pub lon: f64,
    pub utc_coupled: bool,
    pub app_data_valid: bool,
    pub slot_id: u8,
    pub tisb_site_id: u8,
    /// Count reported by the decoder, may exceed `info_frames.len()`
    pub num_info_frames: u32,
    pub info_frames: Bounded<InfoFrame>,
}

/// One information frame of the uplink application data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InfoFrame {
    pub length: u16,
    pub frame_type: u8,
    /// Present iff the frame carries a FIS-B APDU
    pub fisb: Option<FisbProduct>,
}

/// FIS-B APDU header
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FisbProduct {
    pub product_id: u16,
    pub a_flag: bool,
    pub g_flag: bool,
    pub p_flag: bool,
    pub s_flag: bool,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub seconds_valid: bool,
    pub month: u8,
    pub day: u8,
    pub monthday_valid: bool,
}

impl Default for UplinkRecord {
    fn default() -> Self {
        Self {
            position_valid: false,
            lat: 0.0,
            lon: 0.0,
            utc_coupled: false,
            app_data_valid: false,
            slot_id: 0,
            tisb_site_id: 0,
            num_info_frames: 0,
            info_frames: Bounded::new(MAX_INFO_FRAMES),
        }
    }
}

impl UplinkRecord {
    /// Fixture name, unique within the uplink collection via `ordinal`
    pub fn fixture_name(&self, ordinal: usize) -> String {
        format!(
            "Uplink_Site{}_Slot{}_{}",
            self.tisb_site_id, self.slot_id, ordinal
        )
    }

    /// Info frames reported by the decoder but not retained
    pub fn truncated_info_frames(&self) -> usize {
        (self.num_info_frames as usize).saturating_sub(self.info_frames.len())
    }
}
