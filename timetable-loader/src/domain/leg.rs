//! Route leg type.
//!
//! A `Leg` is a maximal contiguous stretch of a trip over the road network,
//! bounded by the points where no network path could be found between
//! consecutive stops.

use super::{DomainError, LinkId, ResolvedStop};

/// A contiguous network path plus the stops served along it.
///
/// # Invariants
///
/// - At least one stop
/// - `route` never contains the same link twice in a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    route: Vec<LinkId>,
    stops: Vec<ResolvedStop>,
}

impl Leg {
    /// Construct a leg, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `stops` is empty or `route` repeats a link in
    /// consecutive positions.
    pub fn new(route: Vec<LinkId>, stops: Vec<ResolvedStop>) -> Result<Self, DomainError> {
        if stops.is_empty() {
            return Err(DomainError::InvalidLeg("leg must serve at least one stop"));
        }

        if let Some(pair) = route.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(DomainError::RepeatedLink(pair[0]));
        }

        Ok(Leg { route, stops })
    }

    /// Returns the network links traversed, in order.
    pub fn route(&self) -> &[LinkId] {
        &self.route
    }

    /// Returns the stops served, in visit order.
    pub fn stops(&self) -> &[ResolvedStop] {
        &self.stops
    }

    /// Returns the first stop served.
    pub fn first_stop(&self) -> &ResolvedStop {
        // Safe: validated at construction
        &self.stops[0]
    }

    /// Returns the last stop served.
    pub fn last_stop(&self) -> &ResolvedStop {
        // Safe: validated at construction
        &self.stops[self.stops.len() - 1]
    }

    /// Returns true if the leg serves enough stops to become a line.
    pub fn is_addressable(&self) -> bool {
        self.stops.len() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NetworkStop, StopId, StopVisit, VisitTime};

    fn stop(id: &str, link: u64, time: &str) -> ResolvedStop {
        let stop_id = StopId::parse(id).unwrap();
        ResolvedStop::new(
            StopVisit::new(stop_id.clone(), VisitTime::parse_hhmmss(time).unwrap()),
            NetworkStop {
                id: stop_id,
                name: format!("Stop {id}"),
                link: LinkId(link),
            },
        )
    }

    #[test]
    fn leg_construction_valid() {
        let leg = Leg::new(
            vec![LinkId(1), LinkId(2), LinkId(3)],
            vec![stop("A", 1, "08:00:00"), stop("B", 3, "08:05:00")],
        )
        .unwrap();

        assert_eq!(leg.route().len(), 3);
        assert_eq!(leg.first_stop().id().as_str(), "A");
        assert_eq!(leg.last_stop().id().as_str(), "B");
        assert!(leg.is_addressable());
    }

    #[test]
    fn single_stop_leg_is_not_addressable() {
        let leg = Leg::new(vec![], vec![stop("A", 1, "08:00:00")]).unwrap();

        assert!(!leg.is_addressable());
        assert_eq!(leg.first_stop(), leg.last_stop());
    }

    #[test]
    fn routeless_leg_with_two_stops_is_addressable() {
        let leg = Leg::new(
            vec![],
            vec![stop("B", 3, "08:05:00"), stop("C", 9, "08:10:00")],
        )
        .unwrap();

        assert!(leg.route().is_empty());
        assert!(leg.is_addressable());
    }

    #[test]
    fn leg_without_stops_rejected() {
        let result = Leg::new(vec![LinkId(1)], vec![]);
        assert!(matches!(result, Err(DomainError::InvalidLeg(_))));
    }

    #[test]
    fn repeated_link_rejected() {
        let result = Leg::new(
            vec![LinkId(1), LinkId(2), LinkId(2)],
            vec![stop("A", 1, "08:00:00")],
        );
        assert!(matches!(result, Err(DomainError::RepeatedLink(LinkId(2)))));
    }

    #[test]
    fn revisiting_a_link_later_is_allowed() {
        let leg = Leg::new(
            vec![LinkId(1), LinkId(2), LinkId(1)],
            vec![stop("A", 1, "08:00:00")],
        );
        assert!(leg.is_ok());
    }
}
