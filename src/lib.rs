//! route2scene - AR scene graph generator from GPS routes
//!
//! A route, an ordered list of coordinates at a uniform altitude, becomes
//! one anchored box node per segment. Each box starts at its segment start
//! and points towards the next coordinate, so the boxes chain along the path
//! once an AR host places the anchors in the camera view.

mod config;
mod route;
mod scene;
pub mod sources;

pub use config::{ConfigError, SceneConfig};
pub use route::builder::RouteBuilder;
pub use route::coordinate::{GeoCoordinate, GeoPoint, Polyline};
pub use route::segmenter::{GeoSegmenter, PathSegment};
pub use scene::assembler::{AnchoredNode, RouteNodeSet, SceneGraphAssembler, SceneSegmentNode};
pub use scene::document::{RouteScene, SceneSettings, SourceToScene};
pub use scene::geometry::{
    BlendMode, Color, Material, PolylineAttributes, SegmentGeometry, SegmentGeometryBuilder,
};
pub use sources::{CoordinatesSource, FieldsConfiguration, SourceError};
