//! Vehicle counting over recorded blob detections
//!
//! Reads per-frame blob lists produced by an external segmentation stage,
//! filters them the way the detector would (area floor, region of interest)
//! and runs them through the `blobtrack` engine, optionally writing a
//! JSON-lines report of every frame.

pub mod config;
pub mod error;
pub mod replay;
pub mod report;

pub use config::{CounterConfig, DetectorConfig, Roi};
pub use error::{CounterError, Result};
pub use replay::{RecordedBlob, RecordedFrame, RecordingReader, ReplayDetector};
pub use report::ReportWriter;

use blobtrack::{FrameCycle, PolicyCounts};
use std::io::Write;

/// Totals after a replay
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub tracks_created: u32,
    pub blobs_dropped: u64,
    pub counts: Vec<PolicyCounts>,
}

/// Replay every frame through a fresh engine built from `config`
pub fn run<I, W>(
    config: &CounterConfig,
    frames: I,
    mut report: Option<&mut ReportWriter<W>>,
) -> Result<RunSummary>
where
    I: IntoIterator<Item = Result<RecordedFrame>>,
    W: Write,
{
    config.validate()?;
    let mut detector = ReplayDetector::new(config.detector.clone());
    let mut engine = FrameCycle::new(&config.engine)?;

    for frame in frames {
        let frame = frame?;
        let frame_report = engine.process(&mut detector, &frame)?;
        if let Some(writer) = report.as_mut() {
            writer.write_report(&frame_report)?;
        }
    }
    if let Some(writer) = report.as_mut() {
        writer.flush()?;
    }

    let summary = RunSummary {
        frames: engine.frames_processed(),
        tracks_created: engine.registry().next_id() - 1,
        blobs_dropped: detector.dropped(),
        counts: engine.counts(),
    };
    log::info!(
        "Replay finished: {} frames, {} tracks, {} blobs dropped",
        summary.frames,
        summary.tracks_created,
        summary.blobs_dropped
    );
    Ok(summary)
}
