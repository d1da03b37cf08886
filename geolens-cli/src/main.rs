//! GeoLens CLI - Command-line interface
//!
//! This binary provides a command-line interface to the GeoLens library:
//! one-shot projection of a marker file, and scenario playback against a
//! live overlay session.

mod commands;
mod error;
mod scenario;

use clap::{Parser, Subcommand};

use error::CliError;

#[derive(Parser)]
#[command(name = "geolens")]
#[command(version = geolens::VERSION)]
#[command(about = "Project geotagged media markers onto a camera viewport", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project a marker file once from a fixed position and heading
    Project(commands::project::ProjectArgs),
    /// Play back a scenario file against a live overlay session
    Simulate(commands::simulate::SimulateArgs),
}

fn main() {
    let cli = Cli::parse();

    let _guard = match geolens::logging::init_logging(
        geolens::logging::default_log_dir(),
        geolens::logging::default_log_file(),
    ) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    let result = match cli.command {
        Command::Project(args) => commands::project::run(args),
        Command::Simulate(args) => commands::simulate::run(args),
    };

    if let Err(e) = result {
        e.exit();
    }
}
