//! Route to scene graph API

use tracing::debug;

use super::coordinate::GeoCoordinate;
use super::segmenter::GeoSegmenter;
use crate::scene::assembler::{RouteNodeSet, SceneGraphAssembler};
use crate::scene::geometry::{PolylineAttributes, SegmentGeometryBuilder};

pub struct RouteBuilder {
    /// Uniform altitude of the whole route, meters
    pub altitude: f64,
    /// Location prepended to every route, eg.: the user position
    pub origin: Option<GeoCoordinate>,
    /// Look used by `build`
    pub attributes: PolylineAttributes,
}

impl RouteBuilder {
    /// Start a new route builder instance
    pub fn new(altitude: f64) -> Self {
        Self {
            altitude,
            origin: None,
            attributes: PolylineAttributes::default(),
        }
    }

    pub fn origin(&mut self, origin: GeoCoordinate) -> &mut Self {
        self.origin = Some(origin);

        self
    }

    pub fn attributes(&mut self, attributes: PolylineAttributes) -> &mut Self {
        self.attributes = attributes;

        self
    }

    /// Build the route nodes with the default look
    pub fn build(&self, coordinates: &[GeoCoordinate]) -> RouteNodeSet {
        self.build_with(coordinates, &self.attributes)
    }

    /// Build the route nodes with a custom geometry builder
    pub fn build_with<B>(&self, coordinates: &[GeoCoordinate], builder: &B) -> RouteNodeSet
    where
        B: SegmentGeometryBuilder + ?Sized,
    {
        let coordinates = self.with_origin(coordinates);
        let segments = GeoSegmenter::segment(&coordinates, self.altitude);

        debug!(
            coordinates = coordinates.len(),
            segments = segments.len(),
            altitude = self.altitude,
            "building route nodes"
        );

        SceneGraphAssembler::assemble(&segments, builder)
    }

    /// The route starts at the origin, unless it already does
    fn with_origin(&self, coordinates: &[GeoCoordinate]) -> Vec<GeoCoordinate> {
        let mut coords = Vec::with_capacity(coordinates.len() + 1);

        if let Some(origin) = self.origin {
            if coordinates.first() != Some(&origin) {
                coords.push(origin);
            }
        }
        coords.extend_from_slice(coordinates);

        coords
    }
}
