/// Blob detector seam
///
/// The engine never looks at pixels. Whatever produces boxes for a frame
/// (background subtraction, a recorded trace, a neural detector) implements
/// this trait and hands over the boxes in its own output order, which the
/// association stage relies on for tie-breaking.
use crate::bbox::BoundingBox;
use crate::error::Result;

/// Common interface for blob detectors
pub trait BlobDetector {
    /// Input the detector consumes for one frame
    type Frame;

    /// Detect blobs in a single frame
    fn detect(&mut self, frame: &Self::Frame) -> Result<Vec<BoundingBox>>;

    /// Get the detector name (for logging/debugging)
    fn name(&self) -> &str;
}

/// Detector whose frames already are box lists. Boxes pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughDetector;

impl BlobDetector for PassthroughDetector {
    type Frame = Vec<BoundingBox>;

    fn detect(&mut self, frame: &Self::Frame) -> Result<Vec<BoundingBox>> {
        Ok(frame.clone())
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}
