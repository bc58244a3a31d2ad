//! Recorded decoder output, one JSON object per line
//!
//! ```text
//! {"type":"downlink","frame":"<hex>","mdb":{"mdb_type":0,"address":11259375,...}}
//! {"type":"uplink","frame":"<hex>","mdb":{"slot_id":3,"info_frames":[...]}}
//! {"type":"downlink","frame":"<hex>","error":"bad FEC"}
//! ```
//!
//! Each line pairs the raw frame with what the external decoder made of it, so
//! a capture run can be replayed without linking the decoder.

use serde::Deserialize;

use super::{FrameKind, RawFrame, SourceError};
use crate::codec;
use crate::decoder::{AdsbMdb, DecodeError, DecodedMessage, UplinkMdb};

/// A raw frame together with the decoder's verdict on it
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedFrame {
    pub raw: RawFrame,
    pub decoded: Result<DecodedMessage, DecodeError>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum LogLine {
    Downlink {
        frame: String,
        #[serde(default)]
        mdb: Option<AdsbMdb>,
        #[serde(default)]
        error: Option<String>,
    },
    Uplink {
        frame: String,
        #[serde(default)]
        mdb: Option<UplinkMdb>,
        #[serde(default)]
        error: Option<String>,
    },
}

/// Parse one log line
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_log_line(line: &str) -> Result<Option<LoggedFrame>, SourceError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let logged = match serde_json::from_str::<LogLine>(line)? {
        LogLine::Downlink { frame, mdb, error } => LoggedFrame {
            raw: RawFrame::new(FrameKind::Downlink, codec::decode(&frame)?),
            decoded: verdict(mdb, error),
        },
        LogLine::Uplink { frame, mdb, error } => LoggedFrame {
            raw: RawFrame::new(FrameKind::Uplink, codec::decode(&frame)?),
            decoded: verdict(mdb, error),
        },
    };

    Ok(Some(logged))
}

fn verdict<M: Into<DecodedMessage>>(
    mdb: Option<M>,
    error: Option<String>,
) -> Result<DecodedMessage, DecodeError> {
    match (mdb, error) {
        (_, Some(reason)) => Err(DecodeError(reason)),
        (Some(mdb), None) => Ok(mdb.into()),
        (None, None) => Err(DecodeError("no decoder output recorded".to_string())),
    }
}
