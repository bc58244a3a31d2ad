//! UAT enumerated field domains
//!
//! Discriminants are the values written into the fixtures and published as
//! `#define` constants in the generated header.

/// Altitude source, shared by primary altitude, vertical rate and secondary altitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AltitudeType {
    #[default]
    Invalid = 0,
    Baro = 1,
    Geo = 2,
}

impl From<u8> for AltitudeType {
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Baro,
            2 => Self::Geo,
            _ => Self::Invalid,
        }
    }
}

/// Meaning of the track/heading field in a state vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TrackType {
    #[default]
    Invalid = 0,
    Track = 1,
    MagHeading = 2,
    TrueHeading = 3,
}

impl From<u8> for TrackType {
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Track,
            2 => Self::MagHeading,
            3 => Self::TrueHeading,
            _ => Self::Invalid,
        }
    }
}

/// Content of the mode-status callsign field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CallsignType {
    #[default]
    Invalid = 0,
    Callsign = 1,
    Squawk = 2,
}

impl From<u8> for CallsignType {
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Callsign,
            2 => Self::Squawk,
            _ => Self::Invalid,
        }
    }
}

/// Heading reference direction
///
/// The decoder reports 0 = invalid, 1 = magnetic, 2 = true. Fixtures only
/// keep a single bit, so anything other than magnetic collapses to `True`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum HeadingType {
    #[default]
    True = 0,
    Magnetic = 1,
}

/// Decoder code for a magnetic heading reference
pub const DECODER_HEADING_MAGNETIC: u8 = 1;

impl From<u8> for HeadingType {
    fn from(code: u8) -> Self {
        if code == DECODER_HEADING_MAGNETIC {
            Self::Magnetic
        } else {
            Self::True
        }
    }
}
