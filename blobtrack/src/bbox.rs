//! Bounding box geometry and centroid distances

use crate::error::{Result, TrackError};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer pixel position of a box center
pub type Centroid = Point2<i32>;

/// Axis-aligned box in pixel coordinates, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a box, rejecting negative extents and corners past `i32::MAX`
    pub fn checked(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        let bbox = Self::new(x, y, w, h);
        bbox.validate()?;
        Ok(bbox)
    }

    pub fn validate(&self) -> Result<()> {
        let overflows =
            self.x.checked_add(self.w).is_none() || self.y.checked_add(self.h).is_none();
        if self.w < 0 || self.h < 0 || overflows {
            return Err(TrackError::InvalidGeometry {
                x: self.x,
                y: self.y,
                w: self.w,
                h: self.h,
            });
        }
        Ok(())
    }

    /// Center of the box, truncated toward the top-left
    pub fn centroid(&self) -> Centroid {
        Point2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn area(&self) -> i64 {
        i64::from(self.w) * i64::from(self.h)
    }

    /// Convert to bounds array [xmin, ymin, xmax, ymax]
    pub fn to_bounds(&self) -> [i32; 4] {
        [self.x, self.y, self.x + self.w, self.y + self.h]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Box({}, {}, {}x{})", self.x, self.y, self.w, self.h)
    }
}

/// Euclidean distance between two centroids
pub fn centroid_distance(a: &Centroid, b: &Centroid) -> f64 {
    nalgebra::distance(&a.cast::<f64>(), &b.cast::<f64>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_centroid_truncates() {
        let bbox = BoundingBox::new(100, 100, 20, 20);
        assert_eq!(bbox.centroid(), Point2::new(110, 110));

        let odd = BoundingBox::new(10, 3, 5, 7);
        assert_eq!(odd.centroid(), Point2::new(12, 6));
    }

    #[test]
    fn test_bbox_properties() {
        let bbox = BoundingBox::new(0, 0, 10, 5);
        assert_eq!(bbox.area(), 50);
        assert_eq!(bbox.to_bounds(), [0, 0, 10, 5]);
        assert_eq!(bbox.to_string(), "Box(0, 0, 10x5)");
    }

    #[test]
    fn test_negative_extent_rejected() {
        let err = BoundingBox::checked(5, 5, -1, 10).unwrap_err();
        assert!(matches!(err, TrackError::InvalidGeometry { w: -1, .. }));
        assert!(BoundingBox::checked(5, 5, 0, 0).is_ok());
    }

    #[test]
    fn test_far_corner_overflow_rejected() {
        let err = BoundingBox::checked(i32::MAX - 10, 0, 100, 100).unwrap_err();
        assert!(matches!(err, TrackError::InvalidGeometry { w: 100, .. }));
        assert!(BoundingBox::checked(0, i32::MAX, 10, 1).is_err());

        let edge = BoundingBox::checked(i32::MAX - 100, i32::MAX - 100, 100, 100).unwrap();
        assert_eq!(edge.centroid(), Point2::new(i32::MAX - 50, i32::MAX - 50));
        assert_eq!(edge.to_bounds()[2], i32::MAX);

        let negative = BoundingBox::checked(i32::MIN, i32::MIN, 10, 10).unwrap();
        assert_eq!(negative.centroid(), Point2::new(i32::MIN + 5, i32::MIN + 5));
    }

    #[test]
    fn test_centroid_distance() {
        let a = Point2::new(50, 50);
        let b = Point2::new(55, 52);
        assert_abs_diff_eq!(centroid_distance(&a, &b), 29f64.sqrt(), epsilon = 1e-9);
        assert_abs_diff_eq!(centroid_distance(&a, &a), 0.0);
    }
}
