//! Error types for capture and emission

use std::path::PathBuf;

use thiserror::Error;

use crate::reader::FrameKind;

/// Frame could not be added to the fixture store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Collection already holds its maximum number of fixtures
    #[error("{kind} fixture capacity of {capacity} exceeded")]
    CapacityExceeded { kind: FrameKind, capacity: usize },
}

/// Fixture artifact could not be produced
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to format fixture source")]
    Format(#[from] std::fmt::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
