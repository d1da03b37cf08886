//! Scenario playback command.
//!
//! Drives a live overlay session from a scenario file: the marker set is
//! delivered once, then the timed position/heading steps play back as if
//! the platform sensors were pushing them. Every broadcast frame is printed
//! as a summary line. Ctrl-C cancels the session cleanly.

use std::process;
use std::time::Duration;

use clap::Args;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use geolens::classify::MarkerPartition;
use geolens::geodesy::GeoPoint;
use geolens::heading::HeadingReading;
use geolens::media::MediaItem;
use geolens::projection::ProjectionConfig;
use geolens::session::{OverlayBroadcaster, OverlayEngine, OverlaySession};

use crate::error::CliError;
use crate::scenario::{self, Scenario, Step};

/// Arguments for `geolens simulate`.
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Path to the scenario JSON file
    #[arg(long)]
    pub scenario: String,

    /// Camera horizontal field of view in degrees
    #[arg(long, default_value = "60.0")]
    pub fov: f64,

    /// Viewport width in pixels
    #[arg(long, default_value = "1080.0")]
    pub width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value = "1920.0")]
    pub height: f64,

    /// Playback speed multiplier (2.0 = twice as fast)
    #[arg(long, default_value = "1.0")]
    pub speed: f64,
}

/// Run scenario playback.
pub fn run(args: SimulateArgs) -> Result<(), CliError> {
    if args.speed <= 0.0 {
        eprintln!("Error: --speed must be positive");
        process::exit(1);
    }

    let scenario = scenario::load_scenario(&args.scenario).map_err(CliError::Scenario)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(format!("Failed to build async runtime: {}", e)))?;

    runtime.block_on(play(args, scenario))
}

async fn play(args: SimulateArgs, scenario: Scenario) -> Result<(), CliError> {
    let config = ProjectionConfig {
        fov_degrees: args.fov,
        viewport_width: args.width,
        viewport_height: args.height,
        ..Default::default()
    };

    let session = OverlaySession::new(OverlayEngine::new(config));
    let shared = session.shared();
    let cancel = CancellationToken::new();

    // Ctrl-C cancels the session so sensor feeds stop cleanly
    let ctrlc_cancel = cancel.clone();
    ctrlc::set_handler(move || ctrlc_cancel.cancel())
        .map_err(|e| CliError::Runtime(format!("Failed to install Ctrl-C handler: {}", e)))?;

    let (position_tx, position_rx) = mpsc::channel(16);
    let (heading_tx, heading_rx) = mpsc::channel(16);
    let (marker_tx, marker_rx) = mpsc::channel(16);

    let handle = session.spawn(position_rx, heading_rx, marker_rx, cancel.clone());

    // Printer: one summary line per broadcast frame
    let mut frames = shared.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(frame) = frames.recv().await {
            let partition = MarkerPartition::partition(&frame.markers);
            let visible: Vec<&str> = partition
                .visible
                .iter()
                .map(|p| p.marker.id.as_str())
                .collect();
            println!(
                "[{}] heading {:>5.1}°  near {}  visible {}  [{}]",
                frame.position,
                frame.heading_degrees,
                partition.near.len(),
                partition.visible.len(),
                visible.join(", "),
            );
        }
    });

    let candidates: Vec<_> = scenario
        .markers
        .into_iter()
        .filter_map(MediaItem::into_marker)
        .collect();
    info!(
        candidates = candidates.len(),
        steps = scenario.steps.len(),
        "Starting scenario playback"
    );

    if marker_tx.send(candidates).await.is_err() {
        // Session already gone (cancelled before playback started)
        handle.await.ok();
        printer.abort();
        return Ok(());
    }

    for step in scenario.steps {
        let wait = Duration::from_millis((step.wait_ms() as f64 / args.speed) as u64);

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(wait) => {}
        }

        let sent = match step {
            Step::Position {
                latitude,
                longitude,
                ..
            } => match GeoPoint::new(latitude, longitude) {
                Ok(position) => position_tx.send(position).await.is_ok(),
                Err(e) => return Err(CliError::InvalidCoordinate(e)),
            },
            Step::Heading { degrees, .. } => heading_tx
                .send(HeadingReading::Degrees { degrees })
                .await
                .is_ok(),
            Step::Magnetic { x, y, .. } => heading_tx
                .send(HeadingReading::Vector { x, y })
                .await
                .is_ok(),
        };

        if !sent {
            break; // Session stopped (cancelled)
        }
    }

    // Playback done: tear down the providers and let the session drain
    drop(position_tx);
    drop(heading_tx);
    drop(marker_tx);
    handle.await.ok();
    printer.abort();

    info!("Scenario playback finished");
    Ok(())
}
