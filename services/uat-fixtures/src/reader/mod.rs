//! Raw frame sources

mod dump978;
mod jsonl;

pub use dump978::parse_frame_line;
pub use jsonl::{parse_log_line, LoggedFrame};

use std::fmt;

use thiserror::Error;

/// Downlink (aircraft) or uplink (ground station) frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Downlink,
    Uplink,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Downlink => f.write_str("downlink"),
            Self::Uplink => f.write_str("uplink"),
        }
    }
}

/// Raw frame bytes as received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub kind: FrameKind,
    pub bytes: Vec<u8>,
}

impl RawFrame {
    pub fn new(kind: FrameKind, bytes: Vec<u8>) -> Self {
        Self { kind, bytes }
    }
}

/// A source line that could not be turned into a frame
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid frame data: {0}")]
    Hex(#[from] crate::codec::HexError),
}
