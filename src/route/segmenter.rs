//! Pairwise segmentation of a polyline

use serde::{Deserialize, Serialize};

use super::coordinate::{GeoCoordinate, GeoPoint};

/// Shorter segments are degenerate, meters. Haversine leaves residues of
/// this order on coincident points, eg.: two longitudes of the same pole.
pub const DEGENERATE_DISTANCE: f64 = 1e-6;

/// The piece of a route between two consecutive coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub start: GeoPoint,
    pub end: GeoPoint,
    /// Horizontal distance in meters
    pub distance: f64,
    /// Degrees clockwise from the true north, [0, 360)
    pub bearing: f64,
}

impl PathSegment {
    /// Measure the segment between two points.
    ///
    /// The bearing of a zero length segment is undefined, so a segment
    /// shorter than `DEGENERATE_DISTANCE` has distance 0 and bearing 0 (true
    /// north).
    pub fn between(start: GeoPoint, end: GeoPoint) -> Self {
        let distance = start.distance(&end);
        let (distance, bearing) = if distance < DEGENERATE_DISTANCE {
            (0.0, 0.0)
        } else {
            (distance, start.bearing(&end))
        };

        Self {
            start,
            end,
            distance,
            bearing,
        }
    }
}

/// Splits coordinate sequences into measured segments
pub struct GeoSegmenter {}

impl GeoSegmenter {
    /// One segment per adjacent pair of coordinates, all of them at the
    /// same altitude. Less than two coordinates produce no segments.
    pub fn segment(coordinates: &[GeoCoordinate], altitude: f64) -> Vec<PathSegment> {
        coordinates
            .windows(2)
            .map(|pair| {
                PathSegment::between(
                    GeoPoint::new(pair[0], altitude),
                    GeoPoint::new(pair[1], altitude),
                )
            })
            .collect()
    }
}
