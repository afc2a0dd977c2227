//! Placement of segment geometries in the AR world

use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use super::geometry::{SegmentGeometry, SegmentGeometryBuilder};
use crate::route::coordinate::GeoPoint;
use crate::route::segmenter::PathSegment;

/// Shape node holding the geometry of one segment and its local pose.
///
/// The local frame follows the AR host: +y is up, -z points to the true
/// north and +x to the east.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneSegmentNode {
    pub geometry: SegmentGeometry,
    /// Local origin of the node, half of the segment ahead of the anchor
    pub pivot: DVec3,
    /// Rotation around the vertical axis, radians
    pub yaw: f64,
    /// Meters
    pub distance: f64,
    /// Degrees from the true north
    pub bearing: f64,
    /// Draw order hint, boxes overlapping at the route joints flicker when
    /// the host draws them in an arbitrary order
    pub rendering_order: i32,
}

impl SceneSegmentNode {
    pub fn new(geometry: SegmentGeometry, distance: f64, bearing: f64) -> Self {
        Self {
            geometry,
            pivot: DVec3::new(0.0, 0.0, 0.5 * distance),
            yaw: (-bearing).to_radians(),
            distance,
            bearing,
            rendering_order: 0,
        }
    }

    pub fn rotation(&self) -> DQuat {
        DQuat::from_rotation_y(self.yaw)
    }

    pub fn pivot_matrix(&self) -> DMat4 {
        DMat4::from_translation(self.pivot)
    }

    /// Geometry space to anchor space. The box is centered on its geometry
    /// origin, after the pivot it runs from the anchor towards the bearing.
    pub fn transform(&self) -> DMat4 {
        DMat4::from_quat(self.rotation()) * self.pivot_matrix().inverse()
    }
}

/// Node fixed to a geographic location, the host keeps it synced with the
/// real world every frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchoredNode {
    pub anchor: GeoPoint,
    /// Where the segment ends, the next anchor of the route
    pub target: GeoPoint,
    pub child: SceneSegmentNode,
}

impl AnchoredNode {
    pub fn new(anchor: GeoPoint, target: GeoPoint, child: SceneSegmentNode) -> Self {
        Self {
            anchor,
            target,
            child,
        }
    }

    /// The measured segment this node stands for
    pub fn segment(&self) -> PathSegment {
        PathSegment {
            start: self.anchor,
            end: self.target,
            distance: self.child.distance,
            bearing: self.child.bearing,
        }
    }
}

/// Ordered nodes of a whole route, one per segment
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteNodeSet {
    nodes: Vec<AnchoredNode>,
}

impl RouteNodeSet {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnchoredNode> {
        self.nodes.iter()
    }

    pub fn get(&self, index: usize) -> Option<&AnchoredNode> {
        self.nodes.get(index)
    }

    /// Segments of the route, in order
    pub fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
        self.nodes.iter().map(AnchoredNode::segment)
    }

    /// Sum of the segment distances in meters
    pub fn total_distance(&self) -> f64 {
        self.nodes.iter().map(|n| n.child.distance).sum()
    }

    pub fn into_nodes(self) -> Vec<AnchoredNode> {
        self.nodes
    }
}

impl<'a> IntoIterator for &'a RouteNodeSet {
    type Item = &'a AnchoredNode;
    type IntoIter = std::slice::Iter<'a, AnchoredNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl IntoIterator for RouteNodeSet {
    type Item = AnchoredNode;
    type IntoIter = std::vec::IntoIter<AnchoredNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

/// Turns measured segments into anchored scene nodes
pub struct SceneGraphAssembler {}

impl SceneGraphAssembler {
    /// Node of a single segment, anchored at the segment start
    pub fn node<B>(segment: &PathSegment, builder: &B) -> AnchoredNode
    where
        B: SegmentGeometryBuilder + ?Sized,
    {
        let geometry = builder.build(segment.distance);
        let shape = SceneSegmentNode::new(geometry, segment.distance, segment.bearing);

        AnchoredNode::new(segment.start, segment.end, shape)
    }

    /// One node per segment, in the segments order. Later segments draw
    /// over the earlier ones where they overlap.
    pub fn assemble<B>(segments: &[PathSegment], builder: &B) -> RouteNodeSet
    where
        B: SegmentGeometryBuilder + ?Sized,
    {
        let nodes = segments
            .iter()
            .zip(1..)
            .map(|(segment, order)| {
                let mut node = Self::node(segment, builder);
                node.child.rendering_order = order;
                node
            })
            .collect();

        RouteNodeSet { nodes }
    }
}
