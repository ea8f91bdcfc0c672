//! Path stitching.
//!
//! Turns a trip's resolved stops into legs: the shortest network path is
//! queried between each consecutive pair of stop links and the paths are
//! joined into one route. Where no path exists the current leg ends and a
//! new one begins.

use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::domain::{DomainError, Leg, LinkId, ResolvedStop, StopId};
use crate::network::{Network, PathQuery};

use super::config::LoaderConfig;

/// A non-fatal diagnostic raised while stitching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The path between two consecutive stops is suspiciously long.
    LongPath {
        from: StopId,
        to: StopId,
        links: usize,
    },
    /// The path query between two consecutive stops failed.
    QueryFailed {
        from: StopId,
        to: StopId,
        reason: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::LongPath { from, to, links } => write!(
                f,
                "PATH LENGTH WARNING: A calculated path between stop {from} and stop {to} \
                 is {links} sections long. This could be inaccurate."
            ),
            Warning::QueryFailed { from, to, reason } => write!(
                f,
                "PATH QUERY ERROR: Could not calculate a path between stop {from} and stop \
                 {to}. {reason}."
            ),
        }
    }
}

/// Legs stitched from one trip, with the warnings raised on the way.
#[derive(Debug, Clone, Default)]
pub struct StitchResult {
    pub legs: Vec<Leg>,
    pub warnings: Vec<Warning>,
}

/// Accumulator threaded through the pairwise fold.
#[derive(Debug, Default)]
struct Stitch {
    done: StitchResult,
    route: Vec<LinkId>,
    stops: Vec<ResolvedStop>,
}

impl Stitch {
    fn step<N: Network>(
        mut self,
        from: &ResolvedStop,
        to: &ResolvedStop,
        network: &N,
        config: &LoaderConfig,
    ) -> Result<Self, DomainError> {
        match network.shortest_path(from.link(), to.link()) {
            PathQuery::QueryError(reason) => {
                // The pair contributes nothing, not even its first stop
                trace!(from = %from.id(), to = %to.id(), reason = reason.as_str(), "path query failed");
                if config.report_query_errors {
                    self.done.warnings.push(Warning::QueryFailed {
                        from: from.id().clone(),
                        to: to.id().clone(),
                        reason,
                    });
                }
            }
            PathQuery::Found(path) if !path.is_empty() => {
                self.stops.push(from.clone());
                if path.len() > config.max_path_links {
                    self.done.warnings.push(Warning::LongPath {
                        from: from.id().clone(),
                        to: to.id().clone(),
                        links: path.len(),
                    });
                }
                for link in path {
                    if self.route.last() != Some(&link) {
                        self.route.push(link);
                    }
                }
            }
            PathQuery::Found(_) | PathQuery::NoPath => {
                self.stops.push(from.clone());
                debug!(from = %from.id(), to = %to.id(), "no path, splitting leg");
                self.close_leg()?;
            }
        }
        Ok(self)
    }

    fn close_leg(&mut self) -> Result<(), DomainError> {
        let leg = Leg::new(mem::take(&mut self.route), mem::take(&mut self.stops))?;
        self.done.legs.push(leg);
        Ok(())
    }

    fn finish(mut self, last: &ResolvedStop) -> Result<StitchResult, DomainError> {
        self.stops.push(last.clone());
        self.close_leg()?;
        Ok(self.done)
    }
}

/// Stitch a trip's resolved stops into legs.
///
/// The final leg always ends with the last stop, whatever it holds; callers
/// discard legs that serve fewer than two stops. An empty input yields no
/// legs.
pub fn stitch_legs<N: Network>(
    stops: &[ResolvedStop],
    network: &N,
    config: &LoaderConfig,
) -> Result<StitchResult, DomainError> {
    let Some(last) = stops.last() else {
        return Ok(StitchResult::default());
    };

    stops
        .windows(2)
        .try_fold(Stitch::default(), |acc, pair| {
            acc.step(&pair[0], &pair[1], network, config)
        })?
        .finish(last)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{NetworkStop, StopVisit, VisitTime};
    use crate::network::{RoadNetwork, RoadNetworkBuilder};
    use proptest::prelude::*;

    const LINKS: u64 = 30;

    /// A one-way chain of links 0 -> 1 -> ... -> LINKS-1.
    fn chain() -> RoadNetwork {
        (0..LINKS)
            .fold(RoadNetworkBuilder::new(), |b, i| b.link(i, i, i + 1, 10.0))
            .build()
            .unwrap()
    }

    fn stops_on(links: &[u64]) -> Vec<ResolvedStop> {
        links
            .iter()
            .enumerate()
            .map(|(i, &link)| {
                let id = StopId::parse(&format!("S{i}")).unwrap();
                ResolvedStop::new(
                    StopVisit::new(id.clone(), VisitTime::from_hms(8, 0, 0).unwrap()),
                    NetworkStop {
                        id,
                        name: format!("Stop {i}"),
                        link: LinkId(link),
                    },
                )
            })
            .collect()
    }

    proptest! {
        /// Routes are contiguous and never repeat a link back to back
        #[test]
        fn legs_are_contiguous(links in prop::collection::vec(0..LINKS, 1..12)) {
            let net = chain();
            let stops = stops_on(&links);
            let result = stitch_legs(&stops, &net, &LoaderConfig::default()).unwrap();

            for leg in &result.legs {
                for pair in leg.route().windows(2) {
                    prop_assert_ne!(pair[0], pair[1]);
                    prop_assert!(net.connects(pair[0], pair[1]));
                }
            }
        }

        /// Every stop ends up in exactly one leg when no query fails
        #[test]
        fn stops_are_partitioned(links in prop::collection::vec(0..LINKS, 1..12)) {
            let net = chain();
            let stops = stops_on(&links);
            let result = stitch_legs(&stops, &net, &LoaderConfig::default()).unwrap();

            let flattened: Vec<&ResolvedStop> =
                result.legs.iter().flat_map(|leg| leg.stops()).collect();
            prop_assert_eq!(flattened.len(), stops.len());
            for (a, b) in flattened.iter().zip(stops.iter()) {
                prop_assert_eq!(*a, b);
            }
        }

        /// Each leg's stops sit on links of its route when the route exists
        #[test]
        fn stops_lie_on_route(links in prop::collection::vec(0..LINKS, 1..12)) {
            let net = chain();
            let stops = stops_on(&links);
            let result = stitch_legs(&stops, &net, &LoaderConfig::default()).unwrap();

            for leg in result.legs.iter().filter(|leg| !leg.route().is_empty()) {
                for stop in leg.stops() {
                    prop_assert!(leg.route().contains(&stop.link()));
                }
            }
        }
    }
}
