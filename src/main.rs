//! route2scene cli - AR scene graph generator from GPS routes

use std::fs::{self, File};
use std::io::BufWriter;

use argopt::{cmd_group, subcmd};
use csv::{ReaderBuilder, Trim};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use route2scene::sources::{CsvSource, GpxSource};
use route2scene::{CoordinatesSource, GeoCoordinate, RouteScene, SceneConfig, SourceToScene};

/// CLI of route2scene - Convert your GPS routes into AR scene nodes
#[cmd_group(commands = [csv, gpx])]
fn main() -> Result<(), String> {}

/// Generate the scene nodes from a CSV file source
#[subcmd]
fn csv(
    /// CSV file source
    csv_path: String,
    /// Scene YAML path file destination
    destination: String,
    /// Scene configuration. Default: .route2scene.yaml, ~/.route2scene.yaml
    #[opt(long)]
    config: Option<String>,
    /// Start every route at this `lat,lon`, eg.: the current location
    #[opt(long)]
    origin: Option<String>,
) -> Result<(), String> {
    init_logging()?;

    let config = load_configs(config)?;
    let origin = origin.map(|o| parse_origin(&o)).transpose()?;

    let csv = File::open(csv_path)
        .map_err(|e| format!("Failed on open the CSV file: {}", e))?;
    let rcsv = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(csv);

    let source = CsvSource::new(rcsv, Some(config.fields.clone()));

    write_scenes(source, &config, origin, destination)
}

/// Generate the scene nodes from the tracks and routes of a GPX file
#[subcmd]
fn gpx(
    /// GPX file source
    gpx_path: String,
    /// Scene YAML path file destination
    destination: String,
    /// Scene configuration. Default: .route2scene.yaml, ~/.route2scene.yaml
    #[opt(long)]
    config: Option<String>,
    /// Start every route at this `lat,lon`, eg.: the current location
    #[opt(long)]
    origin: Option<String>,
) -> Result<(), String> {
    init_logging()?;

    let config = load_configs(config)?;
    let origin = origin.map(|o| parse_origin(&o)).transpose()?;

    let source = GpxSource::open(gpx_path)
        .map_err(|e| format!("Failed on load the GPX file: {}", e))?;

    write_scenes(source, &config, origin, destination)
}

fn write_scenes<SU>(
    source: SU,
    config: &SceneConfig,
    origin: Option<GeoCoordinate>,
    destination: String,
) -> Result<(), String>
where
    SU: CoordinatesSource,
{
    let scenes: Vec<RouteScene> =
        SourceToScene::build(source, config, origin).map_err(|e| e.to_string())?;

    for scene in &scenes {
        if scene.nodes.is_empty() {
            warn!(route = ?scene.name, "route with less than two coordinates, no nodes");
        }
    }

    let destination_file = File::create(&destination)
        .map_err(|e| format!("Failed on create the destination file: {}", e))?;

    let writer = BufWriter::new(destination_file);
    serde_yaml::to_writer(writer, &scenes).map_err(|e| e.to_string())?;

    info!(routes = scenes.len(), destination = %destination, "scenes written");

    Ok(())
}

fn init_logging() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed on set the logger: {}", e))
}

/// Load the current config. A provided path must exist, the default
/// locations are optional.
fn load_configs(provided: Option<String>) -> Result<SceneConfig, String> {
    if let Some(sprovided) = provided {
        let s = fs::read_to_string(&sprovided)
            .map_err(|e| format!("Failed on read the config `{}`: {}", sprovided, e))?;

        return parse_config(&sprovided, &s);
    }

    let mut options = vec![".route2scene.yaml".to_string()];

    if let Some(home) = dirs::home_dir() {
        if let Some(shome) = home.to_str() {
            options.push(format!("{}/.route2scene.yaml", shome));
        }
    }

    for fi in options {
        if let Ok(s) = fs::read_to_string(&fi) {
            return parse_config(&fi, &s);
        }
    }

    Ok(SceneConfig::default())
}

fn parse_config(path: &str, yaml: &str) -> Result<SceneConfig, String> {
    let config = SceneConfig::from_yaml(yaml)
        .map_err(|e| format!("Failed on load the config `{}`: {}", path, e))?;
    info!(path = %path, "config loaded");

    Ok(config)
}

/// Parse a `lat,lon` pair
fn parse_origin(raw: &str) -> Result<GeoCoordinate, String> {
    let parts: Vec<&str> = raw.split(',').map(|s| s.trim()).collect();
    if parts.len() != 2 {
        return Err(format!("Invalid origin `{}`, expected `lat,lon`", raw));
    }

    let lat = parts[0]
        .parse::<f64>()
        .map_err(|e| format!("Invalid origin latitude: {}", e))?;
    let lon = parts[1]
        .parse::<f64>()
        .map_err(|e| format!("Invalid origin longitude: {}", e))?;

    let coord = GeoCoordinate::new(lat, lon);
    if !coord.is_valid() {
        return Err(format!("Origin out of range: {}", raw));
    }

    Ok(coord)
}

#[test]
fn parse_origins() -> Result<(), String> {
    assert_eq!(
        GeoCoordinate::new(28.602184, -81.200129),
        parse_origin("28.602184, -81.200129")?
    );
    assert_eq!(
        GeoCoordinate::new(-26.31832, -48.8702222),
        parse_origin("-26.31832,-48.8702222")?
    );

    assert!(parse_origin("28.602184").is_err());
    assert!(parse_origin("28.6,-81.2,3").is_err());
    assert!(parse_origin("north,-81.2").is_err());
    assert!(parse_origin("91.0,0.0").is_err());

    Ok(())
}

#[test]
fn provided_config_must_exist() {
    let res = load_configs(Some("/nonexistent/route2scene/config.yaml".to_string()));

    match res {
        Err(e) => assert!(e.contains("/nonexistent/route2scene/config.yaml")),
        Ok(config) => panic!("unexpected config: {:?}", config),
    }
}
