//! Fixture store - bounded per-kind collections of captured frames

mod bounded;

pub use bounded::Bounded;

use crate::reader::FrameKind;
use crate::uat::{DownlinkRecord, UplinkRecord};

/// Default number of fixtures kept per message kind
pub const DEFAULT_CAPACITY: usize = 1000;

/// One captured frame: name, raw bytes, their hex text and the decoded record
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureEntry<R> {
    pub name: String,
    pub raw: Vec<u8>,
    pub hex: String,
    pub record: R,
}

/// Downlink and uplink fixtures in capture order
#[derive(Debug, Clone)]
pub struct FixtureStore {
    pub downlink: Bounded<FixtureEntry<DownlinkRecord>>,
    pub uplink: Bounded<FixtureEntry<UplinkRecord>>,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Same capacity for both collections
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            downlink: Bounded::new(capacity),
            uplink: Bounded::new(capacity),
        }
    }

    pub fn count(&self, kind: FrameKind) -> usize {
        match kind {
            FrameKind::Downlink => self.downlink.len(),
            FrameKind::Uplink => self.uplink.len(),
        }
    }

    pub fn capacity(&self, kind: FrameKind) -> usize {
        match kind {
            FrameKind::Downlink => self.downlink.capacity(),
            FrameKind::Uplink => self.uplink.capacity(),
        }
    }

    pub fn is_full(&self, kind: FrameKind) -> bool {
        match kind {
            FrameKind::Downlink => self.downlink.is_full(),
            FrameKind::Uplink => self.uplink.is_full(),
        }
    }
}

impl Default for FixtureStore {
    fn default() -> Self {
        Self::new()
    }
}
