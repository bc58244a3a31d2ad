//! dump978 text frame format
//!
//! One frame per line: `-<hex>;` for downlink, `+<hex>;` for uplink, optionally
//! followed by `key=value;` metadata (`rs=`, `ss=`, ...) which is ignored.

use super::{FrameKind, RawFrame};

/// Basic UAT downlink frame length in bytes
pub const DOWNLINK_SHORT_BYTES: usize = 18;
/// Long UAT downlink frame length in bytes
pub const DOWNLINK_LONG_BYTES: usize = 34;
/// Uplink frame length in bytes (after deinterleaving)
pub const UPLINK_BYTES: usize = 432;

/// Parse a dump978 frame line
/// Returns the raw frame if the line holds a well-formed frame
pub fn parse_frame_line(line: &str) -> Option<RawFrame> {
    let line = line.trim();

    let kind = match line.chars().next()? {
        '-' => FrameKind::Downlink,
        '+' => FrameKind::Uplink,
        _ => return None,
    };

    let end_idx = line.find(';')?;
    let bytes = hex::decode(&line[1..end_idx]).ok()?;

    let valid_len = match kind {
        FrameKind::Downlink => {
            bytes.len() == DOWNLINK_SHORT_BYTES || bytes.len() == DOWNLINK_LONG_BYTES
        }
        FrameKind::Uplink => bytes.len() == UPLINK_BYTES,
    };
    if !valid_len {
        return None;
    }

    Some(RawFrame::new(kind, bytes))
}
