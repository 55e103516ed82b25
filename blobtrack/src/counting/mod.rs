//! Counting policies
//!
//! Two interchangeable strategies share the same track and box data:
//! - DwellTimePolicy: credits a track once it has been seen for enough frames
//! - LineCrossingPolicy: credits centroids entering per-lane crossing zones
//!
//! Several policies may run side by side over one stream; each keeps its
//! own counts and is never merged with the others.

use crate::bbox::BoundingBox;
use crate::config::PolicyConfig;
use crate::lane::LaneCount;
use crate::registry::TrackRegistry;
use serde::Serialize;

mod dwell;
mod line_crossing;

pub use dwell::DwellTimePolicy;
pub use line_crossing::LineCrossingPolicy;

/// What a policy sees of the current frame
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub frame_index: u64,
    /// Boxes in detector order
    pub boxes: &'a [BoundingBox],
    /// Ids of tracks updated or created this frame
    pub touched: &'a [u32],
}

/// Counts reported by one policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Counts {
    Total(u64),
    PerLane(Vec<LaneCount>),
}

impl Counts {
    /// Sum over all lanes, or the global total
    pub fn total(&self) -> u64 {
        match self {
            Self::Total(total) => *total,
            Self::PerLane(lanes) => lanes.iter().map(|lane| lane.count).sum(),
        }
    }

    pub fn lane(&self, name: &str) -> Option<u64> {
        match self {
            Self::Total(_) => None,
            Self::PerLane(lanes) => lanes
                .iter()
                .find(|lane| lane.name == name)
                .map(|lane| lane.count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyCounts {
    pub policy: String,
    pub counts: Counts,
}

/// Common interface for counting strategies
pub trait CountingPolicy: Send {
    /// Policy name (for logging and reports)
    fn name(&self) -> &str;

    /// Credit counts for the current frame. Runs after association, so the
    /// registry already reflects this frame's boxes. Returns the number of
    /// counts added.
    fn apply(&mut self, frame: &FrameContext<'_>, registry: &mut TrackRegistry) -> u64;

    /// Per-frame housekeeping, run once every frame after `apply`
    fn end_frame(&mut self) {}

    fn counts(&self) -> Counts;

    /// Zero all counts and forget any suppression memory
    fn reset(&mut self);
}

impl PolicyConfig {
    /// Create the policy described by this configuration
    pub fn build(&self) -> Box<dyn CountingPolicy> {
        match self {
            PolicyConfig::DwellTime { frames_threshold } => {
                Box::new(DwellTimePolicy::new(*frames_threshold))
            }
            PolicyConfig::LineCrossing {
                offset,
                dist_min,
                suppression_frames,
                lanes,
            } => Box::new(
                LineCrossingPolicy::new(
                    lanes.iter().map(Into::into).collect(),
                    *offset,
                    *dist_min,
                )
                .with_suppression_frames(*suppression_frames),
            ),
        }
    }
}
