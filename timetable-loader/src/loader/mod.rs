//! Timetable loader.
//!
//! This module implements the core of a run: turning each trip's stop
//! visits into contiguous legs over the road network, merging legs that
//! share a name into one transit line with many departures, and finally
//! normalizing dwell times across every line.
//!
//! Per trip the pipeline is resolve → stitch → project → register. Failures
//! are isolated per trip file and collected in an `ErrorLog` together with
//! the warnings produced along the way.

mod batch;
mod config;
mod dwell;
mod log;
mod progress;
mod project;
mod registry;
mod resolve;
mod stitch;

pub use batch::{BatchLoader, RunOutput, RunSummary, run};
pub use config::LoaderConfig;
pub use dwell::normalize_dwell_times;
pub use log::ErrorLog;
pub use progress::{LogProgress, Progress};
pub use project::project_stops;
pub use registry::{LineRegistry, LineUpdate, line_name};
pub use resolve::resolve_stops;
pub use stitch::{StitchResult, Warning, stitch_legs};

use crate::domain::{DomainError, StopId};
use crate::trips::TripError;

/// Errors that abandon a trip file or a whole run.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The trip file could not be read or parsed
    #[error(transparent)]
    Trip(#[from] TripError),

    /// A leg or line violated a domain invariant
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A hub code was visited but the hub stop itself is not in the network
    #[error("hub stop '{0}' is not in the network")]
    HubStopMissing(StopId),

    /// Listing trip files or writing the error log failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
