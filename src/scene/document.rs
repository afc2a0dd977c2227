//! Scene documents handed to the AR host

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::assembler::RouteNodeSet;
use crate::route::builder::RouteBuilder;
use crate::route::coordinate::GeoCoordinate;
use crate::sources::{CoordinatesSource, SourceError};
use crate::SceneConfig;

/// Rendering bounds owned by the host, passed through untouched
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Far plane, contents beyond it are not loaded. Meters
    pub z_far: f64,
    /// Distance where the scene starts fading out. Meters
    pub scene_radius: f64,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            z_far: 1000.0,
            scene_radius: 30.0,
        }
    }
}

/// A route ready to be placed by the host
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteScene {
    pub name: Option<String>,
    pub scene: SceneSettings,
    pub nodes: RouteNodeSet,
}

/// Default scenes generator from source
pub struct SourceToScene {}

impl SourceToScene {
    /// Fetch every polyline of the source and build one scene per polyline.
    ///
    /// With an `origin`, usually the user's current location, each route
    /// starts there.
    pub fn build<SU>(
        mut source: SU,
        config: &SceneConfig,
        origin: Option<GeoCoordinate>,
    ) -> Result<Vec<RouteScene>, SourceError>
    where
        SU: CoordinatesSource,
    {
        let polylines = source.fetch()?;
        debug!(routes = polylines.len(), "fetched polylines");

        let mut builder = RouteBuilder::new(config.altitude);
        builder.attributes(config.polyline.clone());
        if let Some(origin) = origin {
            builder.origin(origin);
        }

        let scenes = polylines
            .into_iter()
            .map(|polyline| RouteScene {
                nodes: builder.build(&polyline.coordinates),
                name: polyline.name,
                scene: config.scene.clone(),
            })
            .collect();

        Ok(scenes)
    }
}
