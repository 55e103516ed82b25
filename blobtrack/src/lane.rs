//! Counting lanes: detection segments, per-lane counters and the memory of
//! recent crossings used to suppress re-counts.

use crate::bbox::{centroid_distance, Centroid};
use crate::config::{LaneConfig, SegmentConfig};
use serde::Serialize;

/// Horizontal detection line at `position`, spanning `start..=end` on x
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub position: i32,
    pub start: i32,
    pub end: i32,
}

impl Segment {
    pub fn new(position: i32, start: i32, end: i32) -> Self {
        Self {
            position,
            start,
            end,
        }
    }

    /// True when the centroid sits inside the crossing zone, bounds inclusive
    pub fn contains(&self, centroid: &Centroid, offset: i32) -> bool {
        let (position, offset, y) = (
            i64::from(self.position),
            i64::from(offset),
            i64::from(centroid.y),
        );
        let inside_x = self.start <= centroid.x && centroid.x <= self.end;
        let inside_y = position - offset <= y && y <= position + offset;
        inside_x && inside_y
    }
}

impl From<&SegmentConfig> for Segment {
    fn from(config: &SegmentConfig) -> Self {
        Self::new(config.position, config.start, config.end)
    }
}

/// Where a counted crossing happened and for how many more frames it
/// suppresses nearby crossings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredPoint {
    pub centroid: Centroid,
    pub remaining_life: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter(u64);

impl Counter {
    pub fn increment(&mut self) {
        self.0 += 1;
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Count of one lane as handed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneCount {
    pub name: String,
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
}

/// An independently counted zone. Counts and suppression memory are never
/// shared between lanes.
#[derive(Debug, Clone)]
pub struct Lane {
    name: String,
    segments: Vec<Segment>,
    color: Option<[u8; 3]>,
    counter: Counter,
    points: Vec<RegisteredPoint>,
}

impl Lane {
    pub fn new(name: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            name: name.into(),
            segments,
            color: None,
            counter: Counter::default(),
            points: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = Some(color);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn count(&self) -> u64 {
        self.counter.get()
    }

    pub fn registered_points(&self) -> &[RegisteredPoint] {
        &self.points
    }

    pub fn snapshot(&self) -> LaneCount {
        LaneCount {
            name: self.name.clone(),
            count: self.counter.get(),
            color: self.color,
        }
    }

    /// True when `centroid` is at least `dist_min` away from every
    /// registered crossing
    fn is_new_crossing(&self, centroid: &Centroid, dist_min: f64) -> bool {
        self.points
            .iter()
            .all(|point| centroid_distance(&point.centroid, centroid) >= dist_min)
    }

    /// Test the centroid against every segment. Each accepted crossing bumps
    /// the counter and is remembered for `lifetime` frames. Returns the number
    /// of crossings accepted.
    pub(crate) fn register(
        &mut self,
        centroid: &Centroid,
        offset: i32,
        dist_min: f64,
        lifetime: u32,
    ) -> u32 {
        let mut accepted = 0;
        for idx in 0..self.segments.len() {
            if !self.segments[idx].contains(centroid, offset) {
                continue;
            }
            if self.is_new_crossing(centroid, dist_min) {
                self.counter.increment();
                self.points.push(RegisteredPoint {
                    centroid: *centroid,
                    remaining_life: lifetime,
                });
                accepted += 1;
            } else {
                log::trace!(
                    "lane {}: crossing at ({}, {}) suppressed",
                    self.name,
                    centroid.x,
                    centroid.y
                );
            }
        }
        accepted
    }

    /// Drop points at the end of their life and decrement the rest
    pub(crate) fn age_points(&mut self) {
        self.points.retain_mut(|point| {
            if point.remaining_life > 1 {
                point.remaining_life -= 1;
                true
            } else {
                false
            }
        });
    }

    pub(crate) fn reset(&mut self) {
        self.counter.reset();
        self.points.clear();
    }
}

impl From<&LaneConfig> for Lane {
    fn from(config: &LaneConfig) -> Self {
        Self {
            name: config.name.clone(),
            segments: config.segments.iter().map(Segment::from).collect(),
            color: config.color,
            counter: Counter::default(),
            points: Vec::new(),
        }
    }
}
