use super::{CountingPolicy, Counts, FrameContext};
use crate::config::DEFAULT_SUPPRESSION_FRAMES;
use crate::lane::Lane;
use crate::registry::TrackRegistry;
use log::debug;

/// Counts geometric crossing events per lane.
///
/// Works on the raw boxes of each frame, so a blob is counted whether or not
/// it was ever associated into a track. A crossing within `dist_min` of one
/// registered in the last `suppression_frames` frames of the same lane is
/// treated as the same event.
#[derive(Debug, Clone)]
pub struct LineCrossingPolicy {
    lanes: Vec<Lane>,
    offset: i32,
    dist_min: f64,
    suppression_frames: u32,
}

impl LineCrossingPolicy {
    pub fn new(lanes: Vec<Lane>, offset: i32, dist_min: f64) -> Self {
        Self {
            lanes,
            offset,
            dist_min,
            suppression_frames: DEFAULT_SUPPRESSION_FRAMES,
        }
    }

    pub fn with_suppression_frames(mut self, frames: u32) -> Self {
        self.suppression_frames = frames;
        self
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, name: &str) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.name() == name)
    }
}

impl CountingPolicy for LineCrossingPolicy {
    fn name(&self) -> &str {
        "line_crossing"
    }

    fn apply(&mut self, frame: &FrameContext<'_>, _registry: &mut TrackRegistry) -> u64 {
        let mut added = 0;
        for bbox in frame.boxes {
            let centroid = bbox.centroid();
            for lane in self.lanes.iter_mut() {
                let accepted =
                    lane.register(&centroid, self.offset, self.dist_min, self.suppression_frames);
                if accepted > 0 {
                    debug!(
                        "frame {}: lane {} crossing at ({}, {}), count {}",
                        frame.frame_index,
                        lane.name(),
                        centroid.x,
                        centroid.y,
                        lane.count()
                    );
                }
                added += u64::from(accepted);
            }
        }
        added
    }

    fn end_frame(&mut self) {
        for lane in self.lanes.iter_mut() {
            lane.age_points();
        }
    }

    fn counts(&self) -> Counts {
        Counts::PerLane(self.lanes.iter().map(Lane::snapshot).collect())
    }

    fn reset(&mut self) {
        for lane in self.lanes.iter_mut() {
            lane.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::BoundingBox;
    use crate::lane::Segment;

    /// 10x10 box centered on (cx, cy)
    fn centered(cx: i32, cy: i32) -> BoundingBox {
        BoundingBox::new(cx - 5, cy - 5, 10, 10)
    }

    fn three_lanes() -> LineCrossingPolicy {
        LineCrossingPolicy::new(
            vec![
                Lane::new(
                    "Lane 1",
                    vec![Segment::new(400, 425, 430), Segment::new(420, 350, 500)],
                ),
                Lane::new("Lane 2", vec![Segment::new(450, 100, 300)]),
                Lane::new("Lane 3", vec![Segment::new(350, 460, 600)]),
            ],
            10,
            30.0,
        )
    }

    fn run_frame(policy: &mut LineCrossingPolicy, boxes: &[BoundingBox]) -> u64 {
        let mut registry = TrackRegistry::new();
        let frame = FrameContext {
            frame_index: 0,
            boxes,
            touched: &[],
        };
        let added = policy.apply(&frame, &mut registry);
        policy.end_frame();
        added
    }

    #[test]
    fn test_same_centroid_next_frame_suppressed() {
        let mut policy = LineCrossingPolicy::new(
            vec![Lane::new("Lane 1", vec![Segment::new(400, 425, 430)])],
            10,
            30.0,
        );
        assert_eq!(run_frame(&mut policy, &[centered(427, 405)]), 1);
        assert_eq!(run_frame(&mut policy, &[centered(427, 405)]), 0);
        assert_eq!(policy.counts().lane("Lane 1"), Some(1));
    }

    #[test]
    fn test_lanes_count_independently() {
        let mut policy = three_lanes();
        run_frame(&mut policy, &[centered(200, 450), centered(500, 350)]);

        let counts = policy.counts();
        assert_eq!(counts.lane("Lane 1"), Some(0));
        assert_eq!(counts.lane("Lane 2"), Some(1));
        assert_eq!(counts.lane("Lane 3"), Some(1));
        assert!(policy.lane("Lane 1").unwrap().registered_points().is_empty());
    }

    #[test]
    fn test_one_centroid_may_count_in_two_lanes() {
        let mut policy = three_lanes();
        // Only Lane 1's wide segment covers (480, 415)
        assert_eq!(run_frame(&mut policy, &[centered(480, 415)]), 1);

        let mut overlapping = LineCrossingPolicy::new(
            vec![
                Lane::new("north", vec![Segment::new(100, 0, 200)]),
                Lane::new("south", vec![Segment::new(105, 0, 200)]),
            ],
            10,
            30.0,
        );
        assert_eq!(run_frame(&mut overlapping, &[centered(50, 102)]), 2);
    }

    #[test]
    fn test_suppression_expires() {
        let mut policy = LineCrossingPolicy::new(
            vec![Lane::new("Lane 1", vec![Segment::new(400, 425, 430)])],
            10,
            30.0,
        )
        .with_suppression_frames(2);

        assert_eq!(run_frame(&mut policy, &[centered(427, 405)]), 1);
        assert_eq!(run_frame(&mut policy, &[centered(427, 405)]), 0);
        assert_eq!(run_frame(&mut policy, &[centered(427, 405)]), 1);
    }

    #[test]
    fn test_default_suppression_window() {
        let mut policy = LineCrossingPolicy::new(
            vec![Lane::new("Lane 1", vec![Segment::new(420, 350, 500)])],
            10,
            30.0,
        );
        let parked = [centered(400, 420)];

        assert_eq!(run_frame(&mut policy, &parked), 1);
        for frame in 1..=14 {
            assert_eq!(run_frame(&mut policy, &parked), 0, "frame {}", frame);
        }
        assert_eq!(run_frame(&mut policy, &parked), 1);
        assert_eq!(policy.counts().lane("Lane 1"), Some(2));
    }

    #[test]
    fn test_crossing_on_radius_counts() {
        let mut policy = LineCrossingPolicy::new(
            vec![Lane::new("Lane 1", vec![Segment::new(420, 350, 500)])],
            10,
            30.0,
        );
        assert_eq!(run_frame(&mut policy, &[centered(400, 420)]), 1);
        assert_eq!(run_frame(&mut policy, &[centered(429, 420)]), 0);
        assert_eq!(run_frame(&mut policy, &[centered(430, 420)]), 1);
        assert_eq!(policy.counts().lane("Lane 1"), Some(2));
    }

    #[test]
    fn test_empty_frame_ages_points() {
        let mut policy = three_lanes();
        run_frame(&mut policy, &[centered(200, 450)]);
        let life = policy.lane("Lane 2").unwrap().registered_points()[0].remaining_life;

        run_frame(&mut policy, &[]);
        let aged = policy.lane("Lane 2").unwrap().registered_points()[0].remaining_life;
        assert_eq!(aged, life - 1);
    }

    #[test]
    fn test_no_lanes() {
        let mut policy = LineCrossingPolicy::new(Vec::new(), 10, 30.0);
        assert_eq!(run_frame(&mut policy, &[centered(10, 10)]), 0);
        assert_eq!(policy.counts(), Counts::PerLane(Vec::new()));
    }
}
