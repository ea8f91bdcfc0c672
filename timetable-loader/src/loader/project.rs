//! Projection of a leg's stops onto its route.

use crate::domain::{Leg, StopSlot};

/// Align a leg's stops with its route, one slot per route link.
///
/// Each slot holds the first stop of the leg that sits on that link, or
/// `None` if no stop does.
pub fn project_stops(leg: &Leg) -> Vec<StopSlot> {
    leg.route()
        .iter()
        .map(|link| {
            leg.stops()
                .iter()
                .find(|stop| stop.link() == *link)
                .map(|stop| stop.stop.clone())
        })
        .collect()
}
