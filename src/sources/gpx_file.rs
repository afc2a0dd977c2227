//! GPX file source integration

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use gpx::{Gpx, Waypoint};

use super::{checked_coordinate, CoordinatesSource, SourceError};
use crate::{GeoCoordinate, Polyline};

/// GPX routes source. Each track segment and each route of the document is
/// a polyline; elevations are ignored since routes have a uniform altitude.
pub struct GpxSource {
    gpx: Gpx,
}

impl GpxSource {
    /// Parse a GPX document
    pub fn new<R>(reader: R) -> Result<Self, SourceError>
    where
        R: Read,
    {
        let gpx = gpx::read(reader)?;

        Ok(Self::from_gpx(gpx))
    }

    /// Read and parse a GPX file
    pub fn open<P>(path: P) -> Result<Self, SourceError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;

        Self::new(BufReader::new(file))
    }

    pub fn from_gpx(gpx: Gpx) -> Self {
        Self { gpx }
    }
}

impl CoordinatesSource for GpxSource {
    fn fetch(&mut self) -> Result<Vec<Polyline>, SourceError> {
        let mut polylines = vec![];

        for track in &self.gpx.tracks {
            for segment in &track.segments {
                let coordinates = to_coordinates(&segment.points)?;
                polylines.push(Polyline::new(track.name.clone(), coordinates));
            }
        }

        for route in &self.gpx.routes {
            let coordinates = to_coordinates(&route.points)?;
            polylines.push(Polyline::new(route.name.clone(), coordinates));
        }

        Ok(polylines)
    }
}

fn to_coordinates(points: &[Waypoint]) -> Result<Vec<GeoCoordinate>, SourceError> {
    points
        .iter()
        .map(|wp| {
            let point = wp.point();
            checked_coordinate(point.y(), point.x())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::Point;
    use gpx::{Gpx, Route, Track, TrackSegment, Waypoint};

    use super::GpxSource;
    use crate::sources::{CoordinatesSource, SourceError};
    use crate::GeoCoordinate;

    #[test]
    fn read_document() -> Result<(), String> {
        let data = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="route2scene" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>campus</name>
    <trkseg>
      <trkpt lat="28.602184" lon="-81.200129"></trkpt>
      <trkpt lat="28.600000" lon="-81.200050"></trkpt>
      <trkpt lat="28.597187" lon="-81.199963"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

        let mut source = GpxSource::new(data.as_bytes()).map_err(|e| e.to_string())?;
        let polylines = source.fetch().map_err(|e| e.to_string())?;

        assert_eq!(1, polylines.len());
        assert_eq!(Some("campus".to_string()), polylines[0].name);
        assert_eq!(3, polylines[0].coordinates.len());
        assert_eq!(
            GeoCoordinate::new(28.602184, -81.200129),
            polylines[0].coordinates[0]
        );
        assert_eq!(
            GeoCoordinate::new(28.597187, -81.199963),
            polylines[0].coordinates[2]
        );

        Ok(())
    }

    #[test]
    fn segments_and_routes() -> Result<(), String> {
        let mut first = TrackSegment::new();
        first.points.push(Waypoint::new(Point::new(-48.8702222, -26.31832)));
        first.points.push(Waypoint::new(Point::new(-48.8619776, -26.3185919)));
        let mut second = TrackSegment::new();
        second.points.push(Waypoint::new(Point::new(-48.8619871, -26.3185861)));

        let mut track = Track::new();
        track.name = Some("joinville".to_string());
        track.segments.push(first);
        track.segments.push(second);

        let mut route = Route::default();
        route.name = Some("return".to_string());
        route.points.push(Waypoint::new(Point::new(-48.8619871, -26.3185861)));
        route.points.push(Waypoint::new(Point::new(-48.8702222, -26.31832)));

        let mut gpx: Gpx = Default::default();
        gpx.tracks.push(track);
        gpx.routes.push(route);

        let polylines = GpxSource::from_gpx(gpx)
            .fetch()
            .map_err(|e| e.to_string())?;

        assert_eq!(3, polylines.len());
        assert_eq!(Some("joinville".to_string()), polylines[0].name);
        assert_eq!(2, polylines[0].coordinates.len());
        assert_eq!(Some("joinville".to_string()), polylines[1].name);
        assert_eq!(1, polylines[1].coordinates.len());
        assert_eq!(Some("return".to_string()), polylines[2].name);
        assert_eq!(
            GeoCoordinate::new(-26.31832, -48.8702222),
            polylines[2].coordinates[1]
        );

        Ok(())
    }

    #[test]
    fn missing_file() {
        let res = GpxSource::open("/nonexistent/route2scene/walk.gpx");

        assert!(matches!(res, Err(SourceError::Io(_))));
    }

    #[test]
    fn malformed_document() {
        let res = GpxSource::new("<gpx><trk>".as_bytes());

        assert!(matches!(res, Err(SourceError::Gpx(_))));
    }
}
