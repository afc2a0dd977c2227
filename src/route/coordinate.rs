//! Coordinate definitions

use geo::geometry::Point;
use geo::{Bearing, HaversineDistance};
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in degrees, WGS84
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check the ranges: latitude in [-90, 90] and longitude in [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// The `geo` point of this coordinate, x is the longitude
    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

impl From<Point> for GeoCoordinate {
    fn from(point: Point) -> Self {
        Self::new(point.y(), point.x())
    }
}

/// A coordinate placed at some altitude
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(flatten)]
    pub coordinate: GeoCoordinate,
    /// Meters
    pub altitude: f64,
}

impl GeoPoint {
    pub fn new(coordinate: GeoCoordinate, altitude: f64) -> Self {
        Self {
            coordinate,
            altitude,
        }
    }

    /// Horizontal great-circle distance in meters. The altitude is ignored.
    pub fn distance(&self, other: &GeoPoint) -> f64 {
        self.coordinate
            .point()
            .haversine_distance(&other.coordinate.point())
    }

    /// Initial bearing towards `other`, degrees clockwise from the true north
    /// in the range [0, 360)
    pub fn bearing(&self, other: &GeoPoint) -> f64 {
        let bearing = self
            .coordinate
            .point()
            .bearing(other.coordinate.point())
            .rem_euclid(360.0);

        // rem_euclid may round a tiny negative up to 360
        if bearing >= 360.0 {
            0.0
        } else {
            bearing
        }
    }
}

/// Ordered coordinates of a path, the order defines the travel direction
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub name: Option<String>,
    pub coordinates: Vec<GeoCoordinate>,
}

impl Polyline {
    pub fn new(name: Option<String>, coordinates: Vec<GeoCoordinate>) -> Self {
        Self { name, coordinates }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use geo::Point;

    use super::{GeoCoordinate, GeoPoint};

    #[test]
    fn point_axis_order() {
        let coord = GeoCoordinate::new(28.602184, -81.200129);
        let point = coord.point();

        assert_eq!(-81.200129, point.x());
        assert_eq!(28.602184, point.y());
        assert_eq!(coord, GeoCoordinate::from(Point::new(-81.200129, 28.602184)));
    }

    #[test]
    fn validity() {
        assert!(GeoCoordinate::new(-90.0, 180.0).is_valid());
        assert!(!GeoCoordinate::new(90.5, 0.0).is_valid());
        assert!(!GeoCoordinate::new(0.0, -180.1).is_valid());
        assert!(!GeoCoordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn cardinal_bearings() {
        let origin = GeoPoint::new(GeoCoordinate::new(0.0, 0.0), 0.0);
        let north = GeoPoint::new(GeoCoordinate::new(1.0, 0.0), 0.0);
        let east = GeoPoint::new(GeoCoordinate::new(0.0, 1.0), 0.0);
        let south = GeoPoint::new(GeoCoordinate::new(-1.0, 0.0), 0.0);
        let west = GeoPoint::new(GeoCoordinate::new(0.0, -1.0), 0.0);

        assert_abs_diff_eq!(0.0, origin.bearing(&north), epsilon = 1e-9);
        assert_abs_diff_eq!(90.0, origin.bearing(&east), epsilon = 1e-9);
        assert_abs_diff_eq!(180.0, origin.bearing(&south), epsilon = 1e-9);
        assert_abs_diff_eq!(270.0, origin.bearing(&west), epsilon = 1e-9);
    }

    #[test]
    fn altitude_does_not_change_distance() {
        let low = GeoPoint::new(GeoCoordinate::new(0.0, 0.0), 0.0);
        let high = GeoPoint::new(GeoCoordinate::new(0.0, 0.001), 500.0);
        let level = GeoPoint::new(GeoCoordinate::new(0.0, 0.001), 0.0);

        assert_eq!(low.distance(&level), low.distance(&high));
    }
}
