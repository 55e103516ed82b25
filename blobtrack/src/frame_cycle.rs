//! Per-frame orchestration: associate, count, age and prune

use crate::association::AssociationEngine;
use crate::bbox::BoundingBox;
use crate::config::{validate_dist_threshold, EngineConfig};
use crate::counting::{CountingPolicy, FrameContext, PolicyCounts};
use crate::detector::BlobDetector;
use crate::error::Result;
use crate::registry::TrackRegistry;
use crate::track::Track;
use log::{debug, info};
use serde::Serialize;
use std::fmt;

/// Everything the renderer needs after one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame_index: u64,
    pub tracks: Vec<Track>,
    pub created: Vec<u32>,
    pub pruned: Vec<u32>,
    pub active_tracks: usize,
    pub counts: Vec<PolicyCounts>,
}

impl FrameReport {
    /// Counts of the named policy, if configured
    pub fn policy(&self, name: &str) -> Option<&PolicyCounts> {
        self.counts.iter().find(|counts| counts.policy == name)
    }
}

/// Drives the engine one frame at a time.
///
/// Owns all state for one stream. Frames are processed strictly in the
/// order `step` is called; there is no rollback.
pub struct FrameCycle {
    registry: TrackRegistry,
    association: AssociationEngine,
    policies: Vec<Box<dyn CountingPolicy>>,
    max_lost: u32,
    frames_processed: u64,
}

impl FrameCycle {
    /// Build the engine described by `config`
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "Creating FrameCycle: dist_threshold={:.1}, max_lost={}, policies={}",
            config.dist_threshold,
            config.max_lost,
            config.policies.len()
        );
        Self::with_policies(
            config.dist_threshold,
            config.max_lost,
            config.policies.iter().map(|policy| policy.build()).collect(),
        )
    }

    /// Build an engine around already constructed policies
    pub fn with_policies(
        dist_threshold: f64,
        max_lost: u32,
        policies: Vec<Box<dyn CountingPolicy>>,
    ) -> Result<Self> {
        validate_dist_threshold(dist_threshold)?;
        Ok(Self {
            registry: TrackRegistry::new(),
            association: AssociationEngine::new(dist_threshold),
            policies,
            max_lost,
            frames_processed: 0,
        })
    }

    /// Process one frame of boxes, in detector order.
    ///
    /// Every box is validated before any state changes, so a rejected frame
    /// leaves the engine as it was.
    pub fn step(&mut self, boxes: &[BoundingBox]) -> Result<FrameReport> {
        for bbox in boxes {
            bbox.validate()?;
        }

        let frame_index = self.frames_processed;
        let outcome = self.association.update(&mut self.registry, boxes);

        let touched: Vec<u32> = outcome.touched().collect();
        let frame = FrameContext {
            frame_index,
            boxes,
            touched: &touched,
        };
        for policy in self.policies.iter_mut() {
            policy.apply(&frame, &mut self.registry);
            policy.end_frame();
        }

        let pruned: Vec<u32> = self
            .registry
            .prune(self.max_lost)
            .iter()
            .map(Track::id)
            .collect();

        debug!(
            "frame {}: {} boxes, {} updated, {} created, {} pruned, {} active",
            frame_index,
            boxes.len(),
            outcome.updated.len(),
            outcome.created.len(),
            pruned.len(),
            self.registry.len()
        );

        self.frames_processed += 1;
        Ok(FrameReport {
            frame_index,
            tracks: self.registry.all_tracks(),
            created: outcome.created,
            pruned,
            active_tracks: self.registry.len(),
            counts: self.counts(),
        })
    }

    /// Run `detector` on `frame` and process the boxes it reports
    pub fn process<D: BlobDetector>(
        &mut self,
        detector: &mut D,
        frame: &D::Frame,
    ) -> Result<FrameReport> {
        let boxes = detector.detect(frame)?;
        self.step(&boxes)
    }

    pub fn counts(&self) -> Vec<PolicyCounts> {
        self.policies
            .iter()
            .map(|policy| PolicyCounts {
                policy: policy.name().to_string(),
                counts: policy.counts(),
            })
            .collect()
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn max_lost(&self) -> u32 {
        self.max_lost
    }

    /// Drop all tracks and counts. Track ids keep increasing.
    pub fn reset(&mut self) {
        self.registry.clear();
        for policy in self.policies.iter_mut() {
            policy.reset();
        }
        self.frames_processed = 0;
    }
}

impl fmt::Debug for FrameCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let policies: Vec<&str> = self.policies.iter().map(|policy| policy.name()).collect();
        f.debug_struct("FrameCycle")
            .field("registry", &self.registry)
            .field("association", &self.association)
            .field("policies", &policies)
            .field("max_lost", &self.max_lost)
            .field("frames_processed", &self.frames_processed)
            .finish()
    }
}
