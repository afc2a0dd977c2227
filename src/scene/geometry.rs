//! Segment geometry and the builders producing it

use serde::{Deserialize, Serialize};
use tracing::warn;

/// RGBA color, components in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// How the host composites the material over the camera image
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    Alpha,
    Add,
    Subtract,
    Multiply,
    Screen,
    Replace,
    Max,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color
    pub diffuse: Color,
    /// Secondary layer blended over the base
    pub reflective: Option<Color>,
    pub blend_mode: BlendMode,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Color::WHITE,
            reflective: None,
            blend_mode: BlendMode::Alpha,
        }
    }
}

/// Solid box standing for one route segment, sizes in meters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentGeometry {
    pub width: f64,
    pub height: f64,
    /// Extent along the travel direction
    pub length: f64,
    pub chamfer_radius: f64,
    pub material: Material,
}

impl SegmentGeometry {
    pub fn new(width: f64, height: f64, length: f64, chamfer_radius: f64) -> Self {
        Self {
            width,
            height,
            length,
            chamfer_radius,
            material: Material::default(),
        }
    }

    pub fn material(mut self, material: Material) -> Self {
        self.material = material;

        self
    }
}

/// Builds the geometry of a segment from its horizontal distance.
///
/// Any `Fn(f64) -> SegmentGeometry` closure is a builder, so callers can
/// fully replace the look of the route.
pub trait SegmentGeometryBuilder {
    /// `distance` is non-negative, in meters
    fn build(&self, distance: f64) -> SegmentGeometry;
}

impl<F> SegmentGeometryBuilder for F
where
    F: Fn(f64) -> SegmentGeometry,
{
    fn build(&self, distance: f64) -> SegmentGeometry {
        self(distance)
    }
}

/// Look of the default route line: a thin dark box screen blended with
/// `blend_color`, so it glows and fades out with the scene fog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolylineAttributes {
    pub width: f64,
    pub height: f64,
    /// Trimmed from every segment length, consecutive boxes are separated
    /// by this gap
    pub length_offset: f64,
    pub chamfer_radius: f64,
    /// The rendered color is not exact since it blends with the world
    pub blend_color: Color,
}

impl Default for PolylineAttributes {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 0.2,
            length_offset: 0.0,
            chamfer_radius: 0.0,
            blend_color: Color::GREEN,
        }
    }
}

impl SegmentGeometryBuilder for PolylineAttributes {
    fn build(&self, distance: f64) -> SegmentGeometry {
        debug_assert!(
            distance.is_finite() && distance >= 0.0,
            "segment distance must be a non-negative number, got {}",
            distance
        );

        let mut length = distance - self.length_offset;
        if length < 0.0 {
            warn!(
                distance,
                length_offset = self.length_offset,
                "segment shorter than the length offset, clamping its length to zero"
            );
            length = 0.0;
        }

        SegmentGeometry::new(self.width, self.height, length, self.chamfer_radius).material(
            Material {
                diffuse: Color::BLACK,
                reflective: Some(self.blend_color),
                blend_mode: BlendMode::Screen,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{BlendMode, Color, PolylineAttributes, SegmentGeometry, SegmentGeometryBuilder};

    #[test]
    fn default_attributes() {
        let geometry = PolylineAttributes::default().build(12.5);

        assert_eq!(1.0, geometry.width);
        assert_eq!(0.2, geometry.height);
        assert_eq!(12.5, geometry.length);
        assert_eq!(0.0, geometry.chamfer_radius);
        assert_eq!(Color::BLACK, geometry.material.diffuse);
        assert_eq!(Some(Color::GREEN), geometry.material.reflective);
        assert_eq!(BlendMode::Screen, geometry.material.blend_mode);
    }

    #[test]
    fn length_offset() {
        let attributes = PolylineAttributes {
            length_offset: 1.5,
            width: 0.5,
            chamfer_radius: 0.1,
            ..Default::default()
        };

        let geometry = attributes.build(10.0);
        assert_eq!(10.0 - 1.5, geometry.length);
        assert_eq!(0.5, geometry.width);
        assert_eq!(0.2, geometry.height);
        assert_eq!(0.1, geometry.chamfer_radius);

        let geometry = attributes.build(1.5);
        assert_eq!(0.0, geometry.length);
    }

    #[test]
    fn shorter_than_offset_is_clamped() {
        let attributes = PolylineAttributes {
            length_offset: 2.0,
            ..Default::default()
        };

        assert_eq!(0.0, attributes.build(0.5).length);
        assert_eq!(0.0, attributes.build(0.0).length);
    }

    #[test]
    fn closure_builder() {
        let builder = |distance: f64| SegmentGeometry::new(0.3, 0.3, distance * 0.5, 0.05);

        let geometry = builder.build(8.0);
        assert_eq!(4.0, geometry.length);
        assert_eq!(0.3, geometry.width);
        assert_eq!(BlendMode::Alpha, geometry.material.blend_mode);
    }
}
