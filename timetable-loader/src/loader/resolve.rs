//! Stop resolution.
//!
//! Matches each visit in a trip to the network stop it happened at. Visits
//! to stops outside the modelled area are dropped; visits to a hub stand
//! fold into the shared hub stop. Visit times are validated only for the
//! visits that are kept.

use tracing::trace;

use crate::domain::ResolvedStop;
use crate::hubs::HubStops;
use crate::network::Network;
use crate::trips::RawVisit;

use super::LoadError;

/// Resolve visits to network stops, keeping their relative order.
///
/// The result is a subsequence of `visits`. An empty result means the trip
/// lies entirely outside the network; that is not an error.
///
/// # Errors
///
/// Returns `LoadError::HubStopMissing` if a hub code is visited but the hub
/// stop is not in the network, or `LoadError::Trip` if a kept visit has a
/// malformed time.
pub fn resolve_stops<N: Network>(
    visits: &[RawVisit],
    network: &N,
    hubs: &HubStops,
) -> Result<Vec<ResolvedStop>, LoadError> {
    let mut resolved = Vec::with_capacity(visits.len());

    for visit in visits {
        if let Some(stop) = network.stop(visit.stop()) {
            resolved.push(ResolvedStop::new(visit.to_visit()?, stop.clone()));
        } else if hubs.contains(visit.stop()) {
            let hub = network
                .stop(hubs.hub())
                .ok_or_else(|| LoadError::HubStopMissing(hubs.hub().clone()))?;
            resolved.push(ResolvedStop::new(visit.to_visit()?, hub.clone()));
        } else {
            trace!(stop = %visit.stop(), "stop outside network, dropped");
        }
    }

    Ok(resolved)
}
