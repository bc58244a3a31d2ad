//! Decoded UAT record model

mod downlink;
mod types;
mod uplink;

pub use downlink::{AuxStateVector, Callsign, DownlinkRecord, ModeStatus, StateVector, CALLSIGN_LEN};
pub use types::{AltitudeType, CallsignType, HeadingType, TrackType};
pub use uplink::{FisbProduct, InfoFrame, UplinkRecord, MAX_INFO_FRAMES};
