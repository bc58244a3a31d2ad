//! Capture pipeline - source lines through capture into the fixture store
//!
//! Per-frame problems (malformed lines, decoder rejections, full collections)
//! are logged, counted and skipped. Only reader I/O errors end a run early.

use std::collections::HashSet;
use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::capture::capture;
use crate::decoder::{DecodeError, DecodedMessage, Decoder};
use crate::error::CaptureError;
use crate::reader::{parse_frame_line, parse_log_line, FrameKind, RawFrame};
use crate::store::FixtureStore;

/// Run statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Frames handed to capture, captured or not
    pub frames: u64,
    pub downlink_captured: u64,
    pub uplink_captured: u64,
    pub decode_failures: u64,
    /// Source lines that could not be parsed
    pub malformed: u64,
    pub dropped_capacity: u64,
}

impl PipelineStats {
    pub fn captured(&self) -> u64 {
        self.downlink_captured + self.uplink_captured
    }
}

impl std::fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Frames: {} total, {} downlink + {} uplink captured, {} decode failures, {} malformed, {} dropped at capacity",
            self.frames,
            self.downlink_captured,
            self.uplink_captured,
            self.decode_failures,
            self.malformed,
            self.dropped_capacity
        )
    }
}

/// How a run over a line source ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Source reached end of input
    Exhausted,
    /// Shutdown signal arrived first
    Cancelled,
}

pub struct Pipeline {
    store: FixtureStore,
    stats: PipelineStats,
    full_reported: HashSet<FrameKind>,
}

impl Pipeline {
    pub fn new(capacity: usize) -> Self {
        Self {
            store: FixtureStore::with_capacity(capacity),
            stats: PipelineStats::default(),
            full_reported: HashSet::new(),
        }
    }

    pub fn store(&self) -> &FixtureStore {
        &self.store
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    pub fn into_store(self) -> FixtureStore {
        self.store
    }

    /// Capture one frame given the decoder's verdict on it
    ///
    /// Returns the fixture name when the frame was stored.
    pub fn handle(
        &mut self,
        raw: &RawFrame,
        decoded: Result<DecodedMessage, DecodeError>,
    ) -> Option<String> {
        self.stats.frames += 1;

        let decoded = match decoded {
            Ok(decoded) if decoded.kind() == raw.kind => decoded,
            Ok(decoded) => {
                self.stats.decode_failures += 1;
                warn!(
                    "Dropping {} frame: decoder produced a {} message",
                    raw.kind,
                    decoded.kind()
                );
                return None;
            }
            Err(e) => {
                self.stats.decode_failures += 1;
                warn!("Dropping {} frame ({} bytes): {}", raw.kind, raw.bytes.len(), e);
                return None;
            }
        };

        match capture(&mut self.store, raw, &decoded) {
            Ok(name) => {
                debug!("Captured {}", name);
                match raw.kind {
                    FrameKind::Downlink => self.stats.downlink_captured += 1,
                    FrameKind::Uplink => {
                        self.stats.uplink_captured += 1;
                        if let Some(entry) = self.store.uplink.as_slice().last() {
                            let dropped = entry.record.truncated_info_frames();
                            if dropped > 0 {
                                debug!(
                                    "{}: kept {} of {} info frames",
                                    name,
                                    entry.record.info_frames.len(),
                                    entry.record.num_info_frames
                                );
                            }
                        }
                    }
                }
                Some(name)
            }
            Err(e @ CaptureError::CapacityExceeded { kind, .. }) => {
                self.stats.dropped_capacity += 1;
                if self.full_reported.insert(kind) {
                    warn!("{}, further {} frames are dropped", e, kind);
                } else {
                    debug!("Dropping {} frame: {}", kind, e);
                }
                None
            }
        }
    }

    /// Decode a raw frame with `decoder` and capture the result
    pub fn ingest_with<D: Decoder>(&mut self, decoder: &mut D, raw: &RawFrame) -> Option<String> {
        let decoded = decoder.decode(raw);
        self.handle(raw, decoded)
    }

    /// Parse one recorded decoder output line and capture it
    pub fn ingest_line(&mut self, line_no: u64, line: &str) -> Option<String> {
        match parse_log_line(line) {
            Ok(Some(logged)) => self.handle(&logged.raw, logged.decoded),
            Ok(None) => None,
            Err(e) => {
                self.stats.malformed += 1;
                warn!("Skipping malformed line {}: {}", line_no, e);
                None
            }
        }
    }

    /// Parse one dump978 frame line, decode it with `decoder` and capture it
    ///
    /// Blank lines are skipped; any other line that is not a well-formed frame
    /// counts as malformed.
    pub fn ingest_frame_line<D: Decoder>(
        &mut self,
        decoder: &mut D,
        line_no: u64,
        line: &str,
    ) -> Option<String> {
        if line.trim().is_empty() {
            return None;
        }
        match parse_frame_line(line) {
            Some(raw) => self.ingest_with(decoder, &raw),
            None => {
                self.stats.malformed += 1;
                warn!("Skipping line {}: not a dump978 frame", line_no);
                None
            }
        }
    }

    /// Read recorded decoder output until end of input or `shutdown` resolves
    ///
    /// Frames captured before cancellation stay in the store.
    pub async fn run<R, F>(&mut self, reader: R, shutdown: F) -> std::io::Result<RunOutcome>
    where
        R: AsyncBufRead + Unpin,
        F: Future,
    {
        self.drive(reader, shutdown, |pipeline, line_no, line| {
            pipeline.ingest_line(line_no, line);
        })
        .await
    }

    /// Read raw dump978 frame lines and decode each with `decoder`
    pub async fn run_frames<R, F, D>(
        &mut self,
        reader: R,
        decoder: &mut D,
        shutdown: F,
    ) -> std::io::Result<RunOutcome>
    where
        R: AsyncBufRead + Unpin,
        F: Future,
        D: Decoder,
    {
        self.drive(reader, shutdown, |pipeline, line_no, line| {
            pipeline.ingest_frame_line(decoder, line_no, line);
        })
        .await
    }

    async fn drive<R, F, H>(
        &mut self,
        reader: R,
        shutdown: F,
        mut on_line: H,
    ) -> std::io::Result<RunOutcome>
    where
        R: AsyncBufRead + Unpin,
        F: Future,
        H: FnMut(&mut Self, u64, &str),
    {
        let mut lines = reader.lines();
        let mut line_no = 0u64;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("Shutdown requested after {} lines", line_no);
                    return Ok(RunOutcome::Cancelled);
                }
                line = lines.next_line() => match line? {
                    Some(line) => {
                        line_no += 1;
                        on_line(self, line_no, &line);
                    }
                    None => {
                        debug!("Input exhausted after {} lines", line_no);
                        return Ok(RunOutcome::Exhausted);
                    }
                },
            }
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(crate::store::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{AdsbMdb, UplinkMdb};
    use std::future::{pending, ready};

    const DOWNLINK_LINE: &str =
        r#"{"type":"downlink","frame":"00abcdef","mdb":{"address":11259375,"has_sv":true,"lat":40.0,"lon":-80.0}}"#;
    const UPLINK_LINE: &str =
        r#"{"type":"uplink","frame":"ff00","mdb":{"slot_id":1,"tisb_site_id":7}}"#;

    fn downlink_frame() -> RawFrame {
        RawFrame::new(FrameKind::Downlink, vec![0; 18])
    }

    #[test]
    fn test_handle_captures() {
        let mut pipeline = Pipeline::new(10);
        let decoded = AdsbMdb {
            address: 0x123456,
            ..Default::default()
        };
        let name = pipeline.handle(&downlink_frame(), Ok(decoded.into()));
        assert_eq!(name.as_deref(), Some("Downlink_MDB0_Addr123456_0"));
        assert_eq!(pipeline.stats().downlink_captured, 1);
        assert_eq!(pipeline.store().downlink.len(), 1);
    }

    #[test]
    fn test_decode_failure_counted_not_stored() {
        let mut pipeline = Pipeline::new(10);
        let name = pipeline.handle(&downlink_frame(), Err(DecodeError("bad FEC".into())));
        assert!(name.is_none());
        assert_eq!(pipeline.stats().decode_failures, 1);
        assert_eq!(pipeline.stats().frames, 1);
        assert!(pipeline.store().downlink.is_empty());
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let mut pipeline = Pipeline::new(10);
        let name = pipeline.handle(&downlink_frame(), Ok(UplinkMdb::default().into()));
        assert!(name.is_none());
        assert_eq!(pipeline.stats().decode_failures, 1);
        assert!(pipeline.store().uplink.is_empty());
    }

    #[test]
    fn test_capacity_drops_counted() {
        let mut pipeline = Pipeline::new(2);
        for _ in 0..5 {
            pipeline.handle(&downlink_frame(), Ok(AdsbMdb::default().into()));
        }
        assert_eq!(pipeline.stats().downlink_captured, 2);
        assert_eq!(pipeline.stats().dropped_capacity, 3);
        assert_eq!(pipeline.store().downlink.len(), 2);
        // The other collection is unaffected
        let uplink = RawFrame::new(FrameKind::Uplink, vec![0; 4]);
        assert!(pipeline.handle(&uplink, Ok(UplinkMdb::default().into())).is_some());
    }

    #[test]
    fn test_ingest_with_closure_decoder() {
        let mut pipeline = Pipeline::new(10);
        let mut decoder = |frame: &RawFrame| -> Result<DecodedMessage, DecodeError> {
            match frame.kind {
                FrameKind::Uplink => Ok(UplinkMdb {
                    slot_id: 9,
                    ..Default::default()
                }
                .into()),
                FrameKind::Downlink => Err(DecodeError("unsupported".into())),
            }
        };
        let uplink = RawFrame::new(FrameKind::Uplink, vec![1, 2, 3]);
        assert_eq!(
            pipeline.ingest_with(&mut decoder, &uplink).as_deref(),
            Some("Uplink_Site0_Slot9_0")
        );
        assert!(pipeline.ingest_with(&mut decoder, &downlink_frame()).is_none());
        assert_eq!(pipeline.stats().decode_failures, 1);
    }

    #[test]
    fn test_ingest_malformed_line() {
        let mut pipeline = Pipeline::new(10);
        assert!(pipeline.ingest_line(1, "not json").is_none());
        assert!(pipeline.ingest_line(2, "# comment").is_none());
        assert_eq!(pipeline.stats().malformed, 1);
        assert_eq!(pipeline.stats().frames, 0);
    }

    #[tokio::test]
    async fn test_run_to_end_of_input() {
        let input = format!("{}\n\nnot json\n{}\n{}\n", DOWNLINK_LINE, UPLINK_LINE, DOWNLINK_LINE);
        let mut pipeline = Pipeline::new(10);

        let outcome = pipeline.run(input.as_bytes(), pending::<()>()).await.unwrap();
        assert_eq!(outcome, RunOutcome::Exhausted);

        let stats = pipeline.stats();
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.downlink_captured, 2);
        assert_eq!(stats.uplink_captured, 1);
        assert_eq!(stats.malformed, 1);

        let store = pipeline.store();
        assert_eq!(store.downlink.as_slice()[1].name, "Downlink_MDB0_AddrABCDEF_1");
        assert_eq!(store.uplink.as_slice()[0].name, "Uplink_Site7_Slot1_0");
        assert_eq!(store.uplink.as_slice()[0].hex, "ff00");
    }

    #[tokio::test]
    async fn test_run_frames_through_decoder() {
        let input = format!(
            "-{};rs=1;\n\n+{};\nnoise\n-{};\n",
            "00".repeat(18),
            "11".repeat(432),
            "22".repeat(34)
        );
        let mut decoded = 0u32;
        let mut decoder = |frame: &RawFrame| -> Result<DecodedMessage, DecodeError> {
            decoded += 1;
            match frame.kind {
                FrameKind::Downlink if frame.bytes.len() == 34 => {
                    Err(DecodeError("uncorrectable".into()))
                }
                FrameKind::Downlink => Ok(AdsbMdb {
                    address: 0x00A1B2,
                    ..Default::default()
                }
                .into()),
                FrameKind::Uplink => Ok(UplinkMdb {
                    tisb_site_id: 6,
                    slot_id: 2,
                    ..Default::default()
                }
                .into()),
            }
        };
        let mut pipeline = Pipeline::new(10);

        let outcome = pipeline
            .run_frames(input.as_bytes(), &mut decoder, pending::<()>())
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::Exhausted);
        assert_eq!(decoded, 3);

        let stats = pipeline.stats();
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.decode_failures, 1);
        assert_eq!(pipeline.store().downlink.as_slice()[0].name, "Downlink_MDB0_Addr00A1B2_0");
        assert_eq!(pipeline.store().uplink.as_slice()[0].raw.len(), 432);
    }

    #[test]
    fn test_truncated_uplink_still_captured() {
        let mut pipeline = Pipeline::new(10);
        let mdb = UplinkMdb {
            num_info_frames: 10,
            info_frames: vec![Default::default(); 10],
            ..Default::default()
        };
        let uplink = RawFrame::new(FrameKind::Uplink, vec![0; 432]);
        assert!(pipeline.handle(&uplink, Ok(mdb.into())).is_some());
        let record = &pipeline.store().uplink.as_slice()[0].record;
        assert_eq!(record.truncated_info_frames(), 2);
    }

    #[tokio::test]
    async fn test_run_cancelled() {
        let (_writer, reader) = tokio::io::duplex(64);
        let mut pipeline = Pipeline::new(10);

        let outcome = pipeline
            .run(tokio::io::BufReader::new(reader), ready(()))
            .await
            .unwrap();
        assert_eq!(outcome, RunOutcome::Cancelled);
        assert_eq!(pipeline.stats().frames, 0);
    }

    #[test]
    fn test_stats_display() {
        let stats = PipelineStats {
            frames: 10,
            downlink_captured: 4,
            uplink_captured: 3,
            decode_failures: 2,
            malformed: 0,
            dropped_capacity: 1,
        };
        assert_eq!(stats.captured(), 7);
        assert_eq!(
            stats.to_string(),
            "Frames: 10 total, 4 downlink + 3 uplink captured, 2 decode failures, 0 malformed, 1 dropped at capacity"
        );
    }
}
