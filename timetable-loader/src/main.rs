use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use timetable_loader::hubs::{DEFAULT_HUB_STOP, HubStops, HubStopsBuilder, wakefield_bus_station};
use timetable_loader::loader::{LoaderConfig, LogProgress, run};
use timetable_loader::network::RoadNetwork;
use timetable_loader::output::write_lines;

/// Read a required environment variable, or explain what is missing.
fn required_var(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("{name} not set"))
}

/// Hub codes from `TIMETABLE_HUB_STOPS`, or the Wakefield stands by default.
fn hub_stops() -> Result<HubStops, String> {
    let Ok(codes) = std::env::var("TIMETABLE_HUB_STOPS") else {
        return Ok(wakefield_bus_station());
    };
    let hub = std::env::var("TIMETABLE_HUB_STOP").unwrap_or_else(|_| DEFAULT_HUB_STOP.to_string());

    HubStopsBuilder::new(&hub)
        .add_all(codes.split(',').map(str::trim).filter(|code| !code.is_empty()))
        .build()
        .ok_or_else(|| format!("invalid hub stop id '{hub}'"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Get paths from environment
    let (trip_dir, network_path) =
        match (required_var("TIMETABLE_TRIP_DIR"), required_var("TIMETABLE_NETWORK")) {
            (Ok(trips), Ok(network)) => (PathBuf::from(trips), PathBuf::from(network)),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        };
    let output_path = std::env::var("TIMETABLE_OUTPUT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("lines.json"));
    let log_dir = std::env::var("TIMETABLE_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| trip_dir.clone());

    let hubs = match hub_stops() {
        Ok(hubs) => hubs,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Load the network once, it is shared read-only by every trip
    println!("Loading road network...");
    let network = match RoadNetwork::load(&network_path) {
        Ok(network) => network,
        Err(e) => {
            eprintln!("Failed to load network {}: {e}", network_path.display());
            return ExitCode::FAILURE;
        }
    };
    println!(
        "Loaded {} links and {} stops",
        network.link_count(),
        network.stop_count()
    );

    let config = LoaderConfig::default();
    let mut progress = LogProgress::new();
    let output = match run(
        &trip_dir,
        &network,
        &hubs,
        &config,
        &log_dir,
        &mut progress,
        Local::now().naive_local(),
    ) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Failed to load timetables from {}: {e}", trip_dir.display());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = write_lines(&output_path, &output.lines, Local::now().naive_local()) {
        eprintln!("Failed to write {}: {e}", output_path.display());
        return ExitCode::FAILURE;
    }

    println!(
        "Created {} lines with {} departures from {} trip files",
        output.summary.lines_created,
        output.summary.departures_added,
        output.summary.files
    );
    println!("{}", output.summary);
    ExitCode::SUCCESS
}
