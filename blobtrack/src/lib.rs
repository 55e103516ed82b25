//! Centroid tracking and counting engine for per-frame bounding boxes
//!
//! This crate follows objects seen as a stream of per-frame boxes and counts
//! them without crediting the same object twice. Pixel work (background
//! subtraction, thresholding, contour extraction) belongs to a `BlobDetector`
//! outside the engine; rendering belongs to whoever reads the `FrameReport`.
//!
//! # Frame cycle
//!
//! Each call to `FrameCycle::step` runs, in order:
//! 1. greedy nearest-centroid association of boxes to live tracks
//! 2. every configured `CountingPolicy`
//! 3. suppression memory aging
//! 4. pruning of tracks lost for more than `max_lost` frames
//!
//! ```rust,ignore
//! use blobtrack::{BoundingBox, EngineConfig, FrameCycle};
//!
//! let mut engine = FrameCycle::new(&EngineConfig::default())?;
//! let report = engine.step(&[BoundingBox::new(100, 100, 20, 20)])?;
//! println!("{} active tracks", report.active_tracks);
//! ```

pub mod association;
pub mod bbox;
pub mod config;
pub mod convert;
pub mod counting;
pub mod detector;
pub mod error;
pub mod frame_cycle;
pub mod lane;
pub mod registry;
pub mod track;

pub use association::{Association, AssociationEngine, AssociationOutcome};
pub use bbox::{centroid_distance, BoundingBox, Centroid};
pub use config::{EngineConfig, LaneConfig, PolicyConfig, SegmentConfig};
pub use counting::{
    CountingPolicy, Counts, DwellTimePolicy, FrameContext, LineCrossingPolicy, PolicyCounts,
};
pub use detector::{BlobDetector, PassthroughDetector};
pub use error::{Result, TrackError};
pub use frame_cycle::{FrameCycle, FrameReport};
pub use lane::{Lane, LaneCount, RegisteredPoint, Segment};
pub use registry::TrackRegistry;
pub use track::Track;
