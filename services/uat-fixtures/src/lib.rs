//! UAT fixture generator
//!
//! Captures decoded 978 MHz UAT frames, downlink ADS-B messages and uplink
//! ground station broadcasts, into bounded in-memory collections and freezes
//! them into a self-contained C source/header pair for decoder unit tests.

pub mod capture;
pub mod codec;
pub mod config;
pub mod decoder;
pub mod emit;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod store;
pub mod uat;

pub use capture::capture;
pub use config::Config;
pub use decoder::{DecodeError, DecodedMessage, Decoder};
pub use emit::{render, Artifact};
pub use error::{CaptureError, EmitError};
pub use pipeline::{Pipeline, PipelineStats, RunOutcome};
pub use reader::{FrameKind, RawFrame};
pub use store::FixtureStore;
