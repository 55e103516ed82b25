/// Conversions between engine types and ndarray matrices
///
/// Detections arrive as Nx4 rows of [x, y, w, h]; tracks leave as Nx6 rows of
/// [x, y, w, h, track_id, counted].
use crate::bbox::BoundingBox;
use crate::error::{Result, TrackError};
use crate::track::Track;
use ndarray::{Array2, ArrayView2};
use num::cast;

/// Convert an Nx4 [x, y, w, h] matrix to boxes, preserving row order
pub fn boxes_from_array(detections: ArrayView2<i32>) -> Result<Vec<BoundingBox>> {
    if detections.nrows() > 0 && detections.ncols() < 4 {
        return Err(TrackError::Shape(format!(
            "expected 4 columns [x, y, w, h], got {}",
            detections.ncols()
        )));
    }

    detections
        .outer_iter()
        .map(|row| BoundingBox::checked(row[0], row[1], row[2], row[3]))
        .collect()
}

/// Convert tracks to an Nx6 [x, y, w, h, track_id, counted] matrix
pub fn tracks_to_array(tracks: &[Track]) -> Result<Array2<f32>> {
    let mut data = Vec::with_capacity(tracks.len() * 6);
    for track in tracks {
        let bbox = track.bbox();
        for value in [bbox.x, bbox.y, bbox.w, bbox.h] {
            data.push(cast::<i32, f32>(value).unwrap_or(f32::NAN));
        }
        data.push(cast::<u32, f32>(track.id()).unwrap_or(f32::NAN));
        data.push(if track.counted() { 1.0 } else { 0.0 });
    }

    Array2::from_shape_vec((tracks.len(), 6), data).map_err(|e| TrackError::Shape(e.to_string()))
}
