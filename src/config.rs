//! Scene generation configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::document::SceneSettings;
use crate::scene::geometry::PolylineAttributes;
use crate::sources::FieldsConfiguration;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid `{field}` value: {value}")]
    Invalid { field: &'static str, value: f64 },
}

/// Everything needed to turn a source into scenes
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Uniform altitude of the routes, meters
    pub altitude: f64,
    pub polyline: PolylineAttributes,
    pub scene: SceneSettings,
    pub fields: FieldsConfiguration,
}

impl SceneConfig {
    /// Parse and validate a YAML document, missing keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;

        Ok(config)
    }

    /// Sizes must be non-negative and every number finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("altitude", self.altitude, false),
            ("polyline.width", self.polyline.width, true),
            ("polyline.height", self.polyline.height, true),
            ("polyline.length_offset", self.polyline.length_offset, false),
            ("polyline.chamfer_radius", self.polyline.chamfer_radius, true),
            ("scene.z_far", self.scene.z_far, true),
            ("scene.scene_radius", self.scene.scene_radius, true),
        ];

        for (field, value, non_negative) in checks {
            if !value.is_finite() || (non_negative && value < 0.0) {
                return Err(ConfigError::Invalid { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SceneConfig};
    use crate::scene::geometry::Color;

    #[test]
    fn empty_is_default() -> Result<(), String> {
        let config = SceneConfig::from_yaml("{}").map_err(|e| e.to_string())?;

        assert_eq!(SceneConfig::default(), config);
        assert_eq!(0.0, config.altitude);
        assert_eq!(1.0, config.polyline.width);
        assert_eq!(Color::GREEN, config.polyline.blend_color);
        assert_eq!(1000.0, config.scene.z_far);
        assert_eq!(30.0, config.scene.scene_radius);
        assert_eq!("coordinates", config.fields.coordinates);

        Ok(())
    }

    #[test]
    fn partial_overrides() -> Result<(), String> {
        let yaml = "
altitude: -2.5
polyline:
  length_offset: 1
  blend_color: { r: 0.0, g: 0.5, b: 1.0 }
scene:
  z_far: 250
fields:
  flip_coordinates: true
";
        let config = SceneConfig::from_yaml(yaml).map_err(|e| e.to_string())?;

        assert_eq!(-2.5, config.altitude);
        assert_eq!(1.0, config.polyline.length_offset);
        assert_eq!(0.2, config.polyline.height);
        assert_eq!(Color::rgb(0.0, 0.5, 1.0), config.polyline.blend_color);
        assert_eq!(250.0, config.scene.z_far);
        assert_eq!(30.0, config.scene.scene_radius);
        assert!(config.fields.flip_coordinates);
        assert_eq!("route", config.fields.route);

        Ok(())
    }

    #[test]
    fn negative_sizes_are_rejected() {
        let res = SceneConfig::from_yaml("polyline:\n  width: -1");

        match res {
            Err(ConfigError::Invalid { field, value }) => {
                assert_eq!("polyline.width", field);
                assert_eq!(-1.0, value);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn malformed_yaml() {
        let res = SceneConfig::from_yaml("polyline: [1, 2");

        assert!(matches!(res, Err(ConfigError::Yaml(_))));
    }
}
