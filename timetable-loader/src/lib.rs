//! Bus timetable loader.
//!
//! Reconstructs the road-network route of every scheduled bus trip from
//! its sequence of timed stop visits, and consolidates trips that share
//! end stops into transit lines with one full-day timetable each.

pub mod domain;
pub mod hubs;
pub mod loader;
pub mod network;
pub mod output;
pub mod trips;
