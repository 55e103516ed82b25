use super::{CountingPolicy, Counts, FrameContext};
use crate::registry::TrackRegistry;
use log::debug;

/// Credits each track exactly once, as soon as it has been seen in
/// `frames_threshold` frames.
#[derive(Debug, Clone)]
pub struct DwellTimePolicy {
    frames_threshold: u32,
    total: u64,
}

impl DwellTimePolicy {
    pub fn new(frames_threshold: u32) -> Self {
        Self {
            frames_threshold,
            total: 0,
        }
    }

    pub fn frames_threshold(&self) -> u32 {
        self.frames_threshold
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

impl CountingPolicy for DwellTimePolicy {
    fn name(&self) -> &str {
        "dwell_time"
    }

    fn apply(&mut self, frame: &FrameContext<'_>, registry: &mut TrackRegistry) -> u64 {
        let mut added = 0;
        for &track_id in frame.touched {
            let Some(track) = registry.get_mut(track_id) else {
                continue;
            };
            if track.counted() || track.age_seen() < self.frames_threshold {
                continue;
            }
            if track.mark_counted() {
                added += 1;
                debug!(
                    "frame {}: track {} counted after {} frames",
                    frame.frame_index,
                    track_id,
                    track.age_seen()
                );
            }
        }
        self.total += added;
        added
    }

    fn counts(&self) -> Counts {
        Counts::Total(self.total)
    }

    fn reset(&mut self) {
        self.total = 0;
    }
}
