//! Domain types for the timetable loader.
//!
//! This module contains the core domain model types: stop visits read from
//! trip files, the network entities they resolve to, the legs stitched from
//! them, and the transit lines that are the output of a run. Types enforce
//! their invariants at construction time.

mod error;
mod leg;
mod line;
mod link;
mod stop;
mod time;

pub use error::DomainError;
pub use leg::Leg;
pub use line::{
    Departure, DepartureType, DwellStat, Schedule, StopSlot, Timetable, TransitLine, VehicleClass,
};
pub use link::LinkId;
pub use stop::{InvalidStopId, NetworkStop, ResolvedStop, StopId, StopVisit};
pub use time::{DayDuration, TimeError, VisitTime};
