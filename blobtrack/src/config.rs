//! Configuration for the tracking engine and its counting policies.
//!
//! All thresholds are expressed in pixels or frames, never wall-clock time.

use crate::error::{Result, TrackError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Frames a registered crossing keeps suppressing nearby crossings
pub const DEFAULT_SUPPRESSION_FRAMES: u32 = 15;

/// Configuration for the association and pruning stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum centroid distance (exclusive) for a box to continue a track
    pub dist_threshold: f64,
    /// Frames a track may go unmatched before it is pruned
    pub max_lost: u32,
    /// Counting policies, each run independently over the same stream
    pub policies: Vec<PolicyConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dist_threshold: 75.0,
            max_lost: 15,
            policies: vec![PolicyConfig::default()],
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        validate_dist_threshold(self.dist_threshold)?;
        // Dwell-time policies share the tracks' counted flag
        let dwell_policies = self
            .policies
            .iter()
            .filter(|policy| matches!(policy, PolicyConfig::DwellTime { .. }))
            .count();
        if dwell_policies > 1 {
            return Err(TrackError::config(
                "at most one dwell_time policy may be configured",
            ));
        }
        for policy in &self.policies {
            policy.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    /// Count a track once it has been seen in `frames_threshold` frames
    DwellTime {
        #[serde(default = "default_frames_threshold")]
        frames_threshold: u32,
    },
    /// Count centroids entering the crossing zone of each lane
    LineCrossing {
        /// Vertical tolerance around each segment's position
        #[serde(default = "default_offset")]
        offset: i32,
        /// Minimum distance from a recent crossing for a new one to count
        #[serde(default = "default_dist_min")]
        dist_min: f64,
        #[serde(default = "default_suppression_frames")]
        suppression_frames: u32,
        #[serde(default)]
        lanes: Vec<LaneConfig>,
    },
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::DwellTime {
            frames_threshold: default_frames_threshold(),
        }
    }
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::DwellTime { .. } => Ok(()),
            Self::LineCrossing {
                offset,
                dist_min,
                suppression_frames,
                lanes,
            } => {
                if *offset < 0 {
                    return Err(TrackError::config(format!(
                        "offset must be non-negative, got {}",
                        offset
                    )));
                }
                if !dist_min.is_finite() || *dist_min < 0.0 {
                    return Err(TrackError::config(format!(
                        "dist_min must be a non-negative number, got {}",
                        dist_min
                    )));
                }
                if *suppression_frames == 0 {
                    return Err(TrackError::config("suppression_frames must be at least 1"));
                }

                let mut names = HashSet::new();
                for lane in lanes {
                    if !names.insert(lane.name.as_str()) {
                        return Err(TrackError::config(format!(
                            "duplicate lane name '{}'",
                            lane.name
                        )));
                    }
                    for segment in &lane.segments {
                        if segment.start > segment.end {
                            return Err(TrackError::config(format!(
                                "lane '{}': segment start {} is past end {}",
                                lane.name, segment.start, segment.end
                            )));
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

/// A named zone with one or more detection segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneConfig {
    pub name: String,
    pub segments: Vec<SegmentConfig>,
    /// Display color for the renderer (BGR)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// y coordinate of the line
    pub position: i32,
    pub start: i32,
    pub end: i32,
}

pub(crate) fn validate_dist_threshold(dist_threshold: f64) -> Result<()> {
    if !dist_threshold.is_finite() || dist_threshold < 0.0 {
        return Err(TrackError::config(format!(
            "dist_threshold must be a non-negative number, got {}",
            dist_threshold
        )));
    }
    Ok(())
}

fn default_frames_threshold() -> u32 {
    10
}

fn default_offset() -> i32 {
    10
}

fn default_dist_min() -> f64 {
    30.0
}

fn default_suppression_frames() -> u32 {
    DEFAULT_SUPPRESSION_FRAMES
}
