//! Batch driver.
//!
//! Runs every trip of every trip file through the loader pipeline. A
//! failure abandons the rest of its file and is recorded at the front of
//! the error log; the next file is processed as normal. Lines and
//! departures created before the failure are kept.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::domain::{Leg, TransitLine};
use crate::hubs::HubStops;
use crate::network::Network;
use crate::trips::{Trip, TripFile, list_trip_files};

use super::config::LoaderConfig;
use super::dwell::normalize_dwell_times;
use super::log::ErrorLog;
use super::progress::Progress;
use super::registry::{LineRegistry, LineUpdate};
use super::resolve::resolve_stops;
use super::stitch::stitch_legs;
use super::LoadError;

/// Counters and outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub trips: usize,
    pub lines_created: usize,
    pub departures_added: usize,
    /// Legs dropped for serving fewer than two stops, or for having no
    /// route when routeless legs are not promoted.
    pub legs_discarded: usize,
    /// Messages in the error log, whether or not it was written.
    pub messages: usize,
    pub log_path: Option<PathBuf>,
    /// Why the error log could not be written, if it could not.
    pub log_error: Option<String>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.log_path, &self.log_error) {
            (Some(path), _) => write!(f, "{} warnings output to {}", self.messages, path.display()),
            (None, Some(e)) => write!(f, "{} warnings not written: {e}", self.messages),
            (None, None) => write!(f, "No warnings reported."),
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunOutput {
    pub lines: Vec<TransitLine>,
    pub summary: RunSummary,
}

/// Loads trip files into a line registry.
pub struct BatchLoader<'a, N: Network> {
    network: &'a N,
    hubs: &'a HubStops,
    config: &'a LoaderConfig,
    registry: LineRegistry,
    log: ErrorLog,
    summary: RunSummary,
}

impl<'a, N: Network> BatchLoader<'a, N> {
    pub fn new(network: &'a N, hubs: &'a HubStops, config: &'a LoaderConfig) -> Self {
        Self {
            network,
            hubs,
            config,
            registry: LineRegistry::new(),
            log: ErrorLog::new(),
            summary: RunSummary::default(),
        }
    }

    /// The lines built so far.
    pub fn registry(&self) -> &LineRegistry {
        &self.registry
    }

    /// The messages collected so far.
    pub fn log(&self) -> &ErrorLog {
        &self.log
    }

    /// Load several trip files in order, reporting progress after each.
    pub fn load_files(&mut self, files: &[PathBuf], progress: &mut impl Progress) {
        progress.start(files.len());
        for (index, path) in files.iter().enumerate() {
            let started = Instant::now();
            self.load_file(path);
            progress.step(index, started.elapsed());
        }
        progress.finish();
    }

    /// Load one trip file.
    ///
    /// Never fails: a file that cannot be processed is recorded in the
    /// error log instead.
    pub fn load_file(&mut self, path: &Path) {
        self.summary.files += 1;

        if let Err(e) = self.process_file(path) {
            let file = file_name(path);
            warn!(file = %file, error = %e, "abandoning trip file");
            self.log
                .push_front(format!("CSV FILE ERROR: Could not parse {file}. {e}."));
        }
    }

    fn process_file(&mut self, path: &Path) -> Result<(), LoadError> {
        let name = file_name(path);
        let mut file = TripFile::open(path)?;
        let source = file.source().to_string();
        debug!(file = %name, "loading trip file");

        for trip in file.trips() {
            self.process_trip(&source, &name, &trip?)?;
        }
        Ok(())
    }

    fn process_trip(&mut self, source: &str, file: &str, trip: &Trip) -> Result<(), LoadError> {
        self.summary.trips += 1;

        let stops = resolve_stops(trip.visits(), self.network, self.hubs)?;
        if stops.is_empty() {
            if self.config.report_routes_outside_network
                && let Some(start) = trip.start_time()
            {
                self.log.push_unique(format!(
                    "ROUTE NOT IN MODEL: {file} beginning at {start} has no stops within the \
                     model area. Skipping."
                ));
            }
            return Ok(());
        }

        let stitched = stitch_legs(&stops, self.network, self.config)?;
        for warning in &stitched.warnings {
            self.log.push_unique(warning.to_string());
        }

        self.register_legs(source, &stitched.legs)
    }

    fn register_legs(&mut self, source: &str, legs: &[Leg]) -> Result<(), LoadError> {
        for leg in legs {
            let routeless = leg.route().is_empty() && !self.config.promote_routeless_legs;
            if !leg.is_addressable() || routeless {
                self.summary.legs_discarded += 1;
                continue;
            }

            if self.registry.add_leg(source, leg, self.config.vehicle())? == LineUpdate::Created {
                self.summary.lines_created += 1;
            }
            self.summary.departures_added += 1;
        }
        Ok(())
    }

    /// Normalize dwell times, write the error log and hand back the lines.
    ///
    /// A log that cannot be written is reported in the summary; the lines
    /// are returned either way.
    pub fn finish(mut self, log_dir: &Path, now: NaiveDateTime) -> RunOutput {
        let slots = normalize_dwell_times(self.registry.lines_mut(), self.config.default_dwell());
        debug!(slots, "normalized dwell times");

        self.summary.messages = self.log.len();
        match self
            .log
            .write_if_needed(log_dir, &self.config.error_log_name, now)
        {
            Ok(path) => self.summary.log_path = path,
            Err(e) => {
                warn!(dir = %log_dir.display(), error = %e, "failed to write error log");
                self.summary.log_error = Some(e.to_string());
            }
        }

        info!(
            files = self.summary.files,
            trips = self.summary.trips,
            lines = self.registry.len(),
            departures = self.registry.departure_count(),
            "run complete"
        );

        RunOutput {
            lines: self.registry.into_lines(),
            summary: self.summary,
        }
    }
}

/// Load every trip file in `trip_dir` and finish the run.
///
/// # Errors
///
/// Returns `Err` only if the directory cannot be listed. Problems inside
/// trip files end up in the log.
pub fn run<N: Network>(
    trip_dir: &Path,
    network: &N,
    hubs: &HubStops,
    config: &LoaderConfig,
    log_dir: &Path,
    progress: &mut impl Progress,
    now: NaiveDateTime,
) -> Result<RunOutput, LoadError> {
    let files = list_trip_files(trip_dir)?;
    let mut loader = BatchLoader::new(network, hubs, config);
    loader.load_files(&files, progress);
    Ok(loader.finish(log_dir, now))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
