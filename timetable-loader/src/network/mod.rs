//! Road network access.
//!
//! The loader only needs three things from the network: stop lookup by
//! external id, stop lookup by name, and a shortest-path query between two
//! links. The `Network` trait captures that seam so the loader can be driven
//! by the bundled petgraph implementation or by test doubles.

mod error;
mod graph;

pub use error::NetworkError;
pub use graph::{RoadNetwork, RoadNetworkBuilder};

use crate::domain::{LinkId, NetworkStop, StopId};

/// Outcome of a shortest-path query between two links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathQuery {
    /// A path exists. Both endpoint links are included.
    Found(Vec<LinkId>),
    /// The network has no path between the links.
    NoPath,
    /// The query itself could not be answered.
    QueryError(String),
}

/// Trait for providing network lookups.
///
/// This abstraction allows the loader to be tested with mock networks.
pub trait Network {
    /// Look up a stop by its external identifier.
    fn stop(&self, id: &StopId) -> Option<&NetworkStop>;

    /// Look up a stop by its display name.
    fn stop_by_name(&self, name: &str) -> Option<&NetworkStop>;

    /// Find the shortest path, by network distance, from one link to another.
    ///
    /// A query from a link to itself yields `PathQuery::NoPath`.
    fn shortest_path(&self, from: LinkId, to: LinkId) -> PathQuery;
}
