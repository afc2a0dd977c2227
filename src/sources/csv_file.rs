//! CSV file source integration

use std::collections::HashMap;
use std::io::Read;

use csv::{Reader, StringRecord};
use tracing::debug;

use super::{checked_coordinate, CoordinatesSource, FieldsConfiguration, SourceError};
use crate::{GeoCoordinate, Polyline};

/// CSV routes source
pub struct CsvSource<T>
where
    T: Read,
{
    rdr: Reader<T>,
    fields: FieldsConfiguration,
}

impl<T> CsvSource<T>
where
    T: Read,
{
    pub fn new(rdr: Reader<T>, fields: Option<FieldsConfiguration>) -> Self {
        Self {
            rdr,
            fields: fields.unwrap_or_default(),
        }
    }
}

impl<T> CoordinatesSource for CsvSource<T>
where
    T: Read,
{
    fn fetch(&mut self) -> Result<Vec<Polyline>, SourceError> {
        let mut polylines: Vec<Polyline> = vec![];
        let mut by_route: HashMap<Option<String>, usize> = HashMap::new();

        let mut header = self.rdr.headers()?.clone();
        let header_idx = parse_header(&self.fields, &mut header)?;

        for row in self.rdr.records() {
            let mut rec = row?;

            let coord = match parse_row(&header_idx, &self.fields, &mut rec)? {
                Some(c) => c,
                None => {
                    debug!(row = ?rec, "skipping row without a coordinate pair");
                    continue;
                }
            };

            let route = header_idx
                .route
                .and_then(|i| rec.get(i))
                .filter(|r| !r.is_empty())
                .map(|r| r.to_string());

            let idx = *by_route.entry(route.clone()).or_insert_with(|| {
                polylines.push(Polyline::new(route, vec![]));
                polylines.len() - 1
            });
            polylines[idx].coordinates.push(coord);
        }

        Ok(polylines)
    }
}

/// Where the coordinate values are
#[derive(Debug)]
enum CoordinatesIndex {
    Joined(usize),
    Split { latitude: usize, longitude: usize },
}

/// Field to index map
#[derive(Debug)]
struct FieldsIndex {
    coordinates: CoordinatesIndex,
    route: Option<usize>,
}

fn parse_header(
    fields: &FieldsConfiguration,
    header: &mut StringRecord,
) -> Result<FieldsIndex, SourceError> {
    header.trim();

    let position = |name: &str| header.iter().position(|h| h.to_lowercase() == name);

    let coordinates = match position(fields.coordinates.as_str()) {
        Some(p) => CoordinatesIndex::Joined(p),
        None => {
            let latitude = position(fields.latitude.as_str())
                .ok_or(SourceError::MissingHeader("Latitude"))?;
            let longitude = position(fields.longitude.as_str())
                .ok_or(SourceError::MissingHeader("Longitude"))?;

            CoordinatesIndex::Split {
                latitude,
                longitude,
            }
        }
    };

    let route = position(fields.route.as_str());

    Ok(FieldsIndex { coordinates, route })
}

fn parse_row(
    header: &FieldsIndex,
    fields: &FieldsConfiguration,
    row: &mut StringRecord,
) -> Result<Option<GeoCoordinate>, SourceError> {
    row.trim();

    let (raw_lat, raw_lng) = match header.coordinates {
        CoordinatesIndex::Joined(i) => {
            let raw = row.get(i).unwrap_or_default();
            let separator = match raw {
                s if s.contains(',') => ',',
                s if s.contains(';') => ';',
                _ => ' ',
            };
            let parts: Vec<&str> = raw
                .split(separator)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect();
            if parts.len() != 2 {
                return Ok(None);
            }

            if fields.flip_coordinates {
                (parts[0], parts[1])
            } else {
                (parts[1], parts[0])
            }
        }
        CoordinatesIndex::Split {
            latitude,
            longitude,
        } => {
            let lat = row.get(latitude).unwrap_or_default();
            let lng = row.get(longitude).unwrap_or_default();
            if lat.is_empty() || lng.is_empty() {
                return Ok(None);
            }

            (lat, lng)
        }
    };

    let lat = parse_number("latitude", raw_lat)?;
    let lng = parse_number("longitude", raw_lng)?;

    checked_coordinate(lat, lng).map(Some)
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, SourceError> {
    raw.parse::<f64>()
        .map_err(|_| SourceError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}
