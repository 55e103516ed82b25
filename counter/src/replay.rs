//! Replay of recorded blob detections
//!
//! A recording is a JSON-lines file with one frame per line:
//!
//! ```text
//! {"blobs": [{"x": 100, "y": 340, "w": 40, "h": 30, "area": 1012.5}]}
//! {"blobs": []}
//! ```
//!
//! `area` is the contour area reported by the segmentation stage; when it is
//! missing the box area is used. Blank lines are skipped.

use crate::config::DetectorConfig;
use crate::error::{CounterError, Result};
use blobtrack::{BlobDetector, BoundingBox, TrackError};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedBlob {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
}

impl RecordedBlob {
    pub fn area(&self) -> f64 {
        self.area
            .unwrap_or_else(|| f64::from(self.w) * f64::from(self.h))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub blobs: Vec<RecordedBlob>,
}

/// Detector that replays recorded blobs, applying the area floor and the
/// region of interest. Surviving blobs keep their recorded order.
#[derive(Debug, Clone)]
pub struct ReplayDetector {
    config: DetectorConfig,
    dropped: u64,
}

impl ReplayDetector {
    pub fn new(config: DetectorConfig) -> Self {
        log::info!(
            "Initializing replay detector: min_area={:.1}, roi={:?}",
            config.min_area,
            config.roi
        );
        Self { config, dropped: 0 }
    }

    /// Blobs filtered out so far
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl BlobDetector for ReplayDetector {
    type Frame = RecordedFrame;

    fn detect(&mut self, frame: &RecordedFrame) -> blobtrack::Result<Vec<BoundingBox>> {
        let mut boxes = Vec::with_capacity(frame.blobs.len());
        for blob in &frame.blobs {
            let bbox = BoundingBox::checked(blob.x, blob.y, blob.w, blob.h)?;
            let area = blob.area();
            if !area.is_finite() || area < 0.0 {
                return Err(TrackError::detector(format!(
                    "invalid contour area {} for {}",
                    area, bbox
                )));
            }

            if area <= self.config.min_area {
                self.dropped += 1;
                continue;
            }
            if let Some(roi) = &self.config.roi {
                let center = bbox.centroid();
                if !roi.contains(center.x, center.y) {
                    self.dropped += 1;
                    continue;
                }
            }
            boxes.push(bbox);
        }
        Ok(boxes)
    }

    fn name(&self) -> &str {
        "replay"
    }
}

/// Iterator over the frames of a recording
pub struct RecordingReader<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> RecordingReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for RecordingReader<R> {
    type Item = Result<RecordedFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(CounterError::Io(e))),
            }
            self.line += 1;

            let trimmed = self.buf.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Some(
                serde_json::from_str(trimmed)
                    .map_err(|e| CounterError::recording(self.line, e.to_string())),
            );
        }
    }
}
