//! Route coordinates sources API

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{GeoCoordinate, Polyline};

/// Coordinates source
pub trait CoordinatesSource {
    /// Fetch every polyline the source holds, in the source order
    fn fetch(&mut self) -> Result<Vec<Polyline>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed on open the source: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "csv")]
    #[error("Failed on read the CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed on read the GPX: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
    #[error("{0} header not found")]
    MissingHeader(&'static str),
    #[error("Invalid {field} `{value}`")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Coordinate out of range: {latitude}, {longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// Column names of tabular sources
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfiguration {
    /// Optional column grouping the rows into routes
    pub route: String,
    /// Single column holding both values, `lon, lat` unless flipped
    pub coordinates: String,
    pub latitude: String,
    pub longitude: String,
    /// Read the `coordinates` column as `lat, lon`
    pub flip_coordinates: bool,
}

impl Default for FieldsConfiguration {
    fn default() -> Self {
        Self {
            route: "route".to_string(),
            coordinates: "coordinates".to_string(),
            latitude: "latitude".to_string(),
            longitude: "longitude".to_string(),
            flip_coordinates: false,
        }
    }
}

/// Build a coordinate, rejecting values outside of the WGS84 ranges
pub(crate) fn checked_coordinate(
    latitude: f64,
    longitude: f64,
) -> Result<GeoCoordinate, SourceError> {
    let coord = GeoCoordinate::new(latitude, longitude);
    if !coord.is_valid() {
        return Err(SourceError::OutOfRange {
            latitude,
            longitude,
        });
    }

    Ok(coord)
}

#[cfg(feature = "csv")]
mod csv_file;

#[cfg(feature = "csv")]
pub use csv_file::CsvSource;

mod gpx_file;

pub use gpx_file::GpxSource;
