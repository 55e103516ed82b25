//! A single object hypothesis followed across frames

use crate::bbox::{BoundingBox, Centroid};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    /// track id, never reused within a stream
    id: u32,
    #[serde(rename = "box")]
    bbox: BoundingBox,
    #[serde(serialize_with = "serialize_centroid")]
    centroid: Centroid,
    /// number of frames with a matching box, including the first
    pub(crate) age_seen: u32,
    /// number of consecutive frames without a matching box
    pub(crate) frames_lost: u32,
    counted: bool,
}

impl Track {
    pub(crate) fn new(id: u32, bbox: BoundingBox) -> Self {
        Self {
            id,
            bbox,
            centroid: bbox.centroid(),
            age_seen: 1,
            frames_lost: 0,
            counted: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn centroid(&self) -> Centroid {
        self.centroid
    }

    pub fn age_seen(&self) -> u32 {
        self.age_seen
    }

    pub fn frames_lost(&self) -> u32 {
        self.frames_lost
    }

    pub fn counted(&self) -> bool {
        self.counted
    }

    /// Absorb the box matched to this track in the current frame
    pub(crate) fn update(&mut self, bbox: BoundingBox) {
        self.bbox = bbox;
        self.centroid = bbox.centroid();
        self.frames_lost = 0;
        self.age_seen += 1;
    }

    pub(crate) fn mark_lost(&mut self) {
        self.frames_lost += 1;
    }

    /// Flag the track as counted. Returns false if it already was.
    pub(crate) fn mark_counted(&mut self) -> bool {
        if self.counted {
            return false;
        }
        self.counted = true;
        true
    }
}

fn serialize_centroid<S: serde::Serializer>(
    centroid: &Centroid,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    [centroid.x, centroid.y].serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn test_new_track() {
        let track = Track::new(7, BoundingBox::new(10, 20, 30, 40));
        assert_eq!(track.id(), 7);
        assert_eq!(track.centroid(), Point2::new(25, 40));
        assert_eq!(track.age_seen(), 1);
        assert_eq!(track.frames_lost(), 0);
        assert!(!track.counted());
    }

    #[test]
    fn test_update_resets_lost() {
        let mut track = Track::new(1, BoundingBox::new(0, 0, 10, 10));
        track.mark_lost();
        track.mark_lost();
        assert_eq!(track.frames_lost(), 2);

        track.update(BoundingBox::new(4, 2, 10, 10));
        assert_eq!(track.frames_lost(), 0);
        assert_eq!(track.age_seen(), 2);
        assert_eq!(track.centroid(), Point2::new(9, 7));
    }

    #[test]
    fn test_counted_is_monotonic() {
        let mut track = Track::new(1, BoundingBox::new(0, 0, 10, 10));
        assert!(track.mark_counted());
        assert!(!track.mark_counted());
        track.update(BoundingBox::new(1, 1, 10, 10));
        assert!(track.counted());
    }

    #[test]
    fn test_serialize_shape() {
        let track = Track::new(3, BoundingBox::new(100, 100, 20, 20));
        let value = serde_json::to_value(&track).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["box"]["w"], 20);
        assert_eq!(value["centroid"], serde_json::json!([110, 110]));
        assert_eq!(value["counted"], false);
    }
}
