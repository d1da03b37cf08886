//! One-shot projection command.
//!
//! Reads a marker file, projects it from a fixed position and heading, and
//! prints the classified frame - the quickest way to sanity-check marker
//! placement without driving a live session.

use clap::Args;

use geolens::classify::MarkerPartition;
use geolens::geodesy::{normalize_degrees, GeoPoint};
use geolens::media::MediaItem;
use geolens::projection::{ProjectedMarker, ProjectionConfig, ProjectionEngine};

use crate::error::CliError;
use crate::scenario;

/// Arguments for `geolens project`.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Path to a JSON file with the media items (array of {id, media, location})
    #[arg(long)]
    pub markers: String,

    /// Latitude in decimal degrees
    #[arg(long)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long)]
    pub lon: f64,

    /// Device heading in degrees (0 = north, clockwise)
    #[arg(long)]
    pub heading: f64,

    /// Camera horizontal field of view in degrees
    #[arg(long, default_value = "60.0")]
    pub fov: f64,

    /// Viewport width in pixels
    #[arg(long, default_value = "1080.0")]
    pub width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value = "1920.0")]
    pub height: f64,

    /// Print the raw frame as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Run the one-shot projection.
pub fn run(args: ProjectArgs) -> Result<(), CliError> {
    let items = scenario::load_markers(&args.markers).map_err(CliError::Scenario)?;
    let position = GeoPoint::new(args.lat, args.lon).map_err(CliError::InvalidCoordinate)?;
    let heading = normalize_degrees(args.heading);

    let config = ProjectionConfig {
        fov_degrees: args.fov,
        viewport_width: args.width,
        viewport_height: args.height,
        ..Default::default()
    };
    let engine = ProjectionEngine::new(config);

    let candidates: Vec<_> = items.into_iter().filter_map(MediaItem::into_marker).collect();
    tracing::info!(
        candidates = candidates.len(),
        lat = args.lat,
        lon = args.lon,
        heading,
        "Projecting marker file"
    );

    let projected = engine.project(&position, heading, &candidates);

    if args.json {
        let rendered = serde_json::to_string_pretty(&projected).map_err(CliError::Serialize)?;
        println!("{}", rendered);
    } else {
        print_frame(&position, heading, &projected);
    }

    Ok(())
}

/// Print a classified frame as a human-readable table.
fn print_frame(position: &GeoPoint, heading: f64, projected: &[ProjectedMarker]) {
    println!("Position: {}   Heading: {:.1}°", position, heading);
    println!();

    let partition = MarkerPartition::partition(projected);

    println!("Close by ({}):", partition.near.len());
    for marker in &partition.near {
        println!(
            "  {:<16} {:>7.1} m",
            marker.marker.id, marker.distance_meters
        );
    }

    println!();
    println!("In view ({}):", partition.visible.len());
    for marker in &partition.visible {
        println!(
            "  {:<16} {:>7.1} m  bearing {:>5.1}°  offset {:>+6.1}°  x {:>7.1}  scale {:.2}",
            marker.marker.id,
            marker.distance_meters,
            marker.bearing_degrees,
            marker.angular_offset_degrees,
            marker.screen_x,
            marker.scale,
        );
    }

    let hidden = projected.len() - partition.near.len() - partition.visible.len();
    if hidden > 0 {
        println!();
        println!("({} more out of view)", hidden);
    }
}
