//! Trip file input.
//!
//! A trip file holds a header line followed by one row per vehicle trip.
//! Each row is a comma-separated list of `StopId(HH:MM:SS)` tokens.

mod file;
mod parse;

pub use file::{TripFile, list_trip_files};
pub use parse::{RawVisit, Trip, parse_row, parse_visit};

use crate::domain::{InvalidStopId, TimeError};

/// Errors that can occur while reading trips.
#[derive(Debug, thiserror::Error)]
pub enum TripError {
    /// Opening or reading the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not readable as comma-separated rows
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A token has no `(HH:MM:SS)` part
    #[error("no visit time in token '{token}'")]
    MissingTime { token: String },

    /// A token's time is malformed
    #[error("invalid time in token '{token}': {source}")]
    InvalidTime { token: String, source: TimeError },

    /// A token has no stop id
    #[error(transparent)]
    InvalidStop(#[from] InvalidStopId),
}
