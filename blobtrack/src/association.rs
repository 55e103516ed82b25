//! Greedy nearest-centroid association of detected boxes to live tracks
//!
//! Boxes are visited in detector order. Each box takes the closest track
//! that no earlier box of the same frame has claimed, provided the centroid
//! distance is strictly below the threshold. Ties go to the lowest track id.
//! The pass never revisits a decision, so the outcome depends on box order;
//! it is not a globally optimal assignment.

use crate::bbox::{centroid_distance, BoundingBox};
use crate::registry::TrackRegistry;
use log::trace;
use std::collections::HashSet;

/// Result of matching one frame's boxes against the registry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Association {
    /// (box index, track id) pairs
    pub matches: Vec<(usize, u32)>,
    /// Indices of boxes that matched no track
    pub unmatched: Vec<usize>,
}

/// Track ids touched while applying an association
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationOutcome {
    pub updated: Vec<u32>,
    pub created: Vec<u32>,
    pub lost: Vec<u32>,
}

impl AssociationOutcome {
    /// Updated ids followed by created ids
    pub fn touched(&self) -> impl Iterator<Item = u32> + '_ {
        self.updated.iter().chain(self.created.iter()).copied()
    }
}

#[derive(Debug, Clone)]
pub struct AssociationEngine {
    dist_threshold: f64,
}

impl AssociationEngine {
    pub fn new(dist_threshold: f64) -> Self {
        Self { dist_threshold }
    }

    pub fn dist_threshold(&self) -> f64 {
        self.dist_threshold
    }

    /// Match boxes to tracks without mutating anything
    pub fn associate(&self, registry: &TrackRegistry, boxes: &[BoundingBox]) -> Association {
        let mut claimed: HashSet<u32> = HashSet::with_capacity(boxes.len());
        let mut association = Association::default();

        for (det_idx, bbox) in boxes.iter().enumerate() {
            let center = bbox.centroid();
            let mut best: Option<(u32, f64)> = None;

            for track in registry.iter() {
                if claimed.contains(&track.id()) {
                    continue;
                }
                let dist = centroid_distance(&track.centroid(), &center);
                if dist < self.dist_threshold && best.map_or(true, |(_, d)| dist < d) {
                    best = Some((track.id(), dist));
                }
            }

            match best {
                Some((track_id, dist)) => {
                    trace!(
                        "box {} {} -> track {} (distance {:.2})",
                        det_idx,
                        bbox,
                        track_id,
                        dist
                    );
                    claimed.insert(track_id);
                    association.matches.push((det_idx, track_id));
                }
                None => {
                    trace!("box {} {} unmatched", det_idx, bbox);
                    association.unmatched.push(det_idx);
                }
            }
        }

        association
    }

    /// Associate `boxes`, then update matched tracks, age unmatched tracks
    /// and spawn a track for every unmatched box.
    ///
    /// Tracks spawned here are not candidates for other boxes of the same
    /// frame.
    pub fn update(&self, registry: &mut TrackRegistry, boxes: &[BoundingBox]) -> AssociationOutcome {
        let association = self.associate(registry, boxes);
        let mut outcome = AssociationOutcome::default();

        for &(det_idx, track_id) in &association.matches {
            if let Some(track) = registry.get_mut(track_id) {
                track.update(boxes[det_idx]);
                outcome.updated.push(track_id);
            }
        }

        let claimed: HashSet<u32> = outcome.updated.iter().copied().collect();
        for track in registry.iter_mut() {
            if !claimed.contains(&track.id()) {
                track.mark_lost();
                outcome.lost.push(track.id());
            }
        }

        for det_idx in association.unmatched {
            outcome.created.push(registry.add(boxes[det_idx]).id());
        }

        outcome
    }
}
