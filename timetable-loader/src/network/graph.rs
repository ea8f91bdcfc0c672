//! Petgraph-backed road network.
//!
//! Links are the graph's nodes. Link A has an edge to link B when A ends at
//! the node B starts from, weighted by B's length, so a shortest path over
//! this graph is the sequence of links a vehicle drives through.

use std::collections::HashMap;
use std::path::Path;

use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{LinkId, NetworkStop, StopId};

use super::error::NetworkError;
use super::{Network, PathQuery};

/// A link as stored in the network file.
#[derive(Debug, Clone, Deserialize)]
struct LinkRecord {
    id: LinkId,
    from: u64,
    to: u64,
    length: f64,
}

/// A stop as stored in the network file.
#[derive(Debug, Clone, Deserialize)]
struct StopRecord {
    id: String,
    name: String,
    link: LinkId,
}

#[derive(Debug, Deserialize)]
struct NetworkFile {
    links: Vec<LinkRecord>,
    #[serde(default)]
    stops: Vec<StopRecord>,
}

/// A directed road network with stops placed on its links.
///
/// Built once, then only read.
#[derive(Debug)]
pub struct RoadNetwork {
    graph: DiGraph<LinkId, f64>,
    links: HashMap<LinkId, NodeIndex>,
    stops: HashMap<StopId, NetworkStop>,
    names: HashMap<String, StopId>,
}

impl RoadNetwork {
    /// Load a network from a JSON file.
    ///
    /// The file holds `links` (`id`, `from`, `to`, `length`) and `stops`
    /// (`id`, `name`, `link`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a network from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let file: NetworkFile = serde_json::from_str(json)?;
        RoadNetworkBuilder {
            links: file.links,
            stops: file.stops,
        }
        .build()
    }

    /// Returns the number of links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Returns the number of stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if a vehicle can drive straight from `from` onto `to`.
    pub fn connects(&self, from: LinkId, to: LinkId) -> bool {
        match (self.links.get(&from), self.links.get(&to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    fn node(&self, link: LinkId) -> Result<NodeIndex, String> {
        self.links
            .get(&link)
            .copied()
            .ok_or_else(|| format!("link {link} is not in the network"))
    }
}

impl Network for RoadNetwork {
    fn stop(&self, id: &StopId) -> Option<&NetworkStop> {
        self.stops.get(id)
    }

    fn stop_by_name(&self, name: &str) -> Option<&NetworkStop> {
        self.names.get(name).and_then(|id| self.stops.get(id))
    }

    fn shortest_path(&self, from: LinkId, to: LinkId) -> PathQuery {
        let (start, goal) = match (self.node(from), self.node(to)) {
            (Ok(start), Ok(goal)) => (start, goal),
            (Err(reason), _) | (_, Err(reason)) => return PathQuery::QueryError(reason),
        };

        if start == goal {
            return PathQuery::NoPath;
        }

        match astar(
            &self.graph,
            start,
            |node| node == goal,
            |edge| *edge.weight(),
            |_| 0.0,
        ) {
            Some((_, nodes)) => PathQuery::Found(nodes.into_iter().map(|n| self.graph[n]).collect()),
            None => PathQuery::NoPath,
        }
    }
}

/// Builder for creating road networks in code.
///
/// Validation happens in `build`.
#[derive(Debug, Default)]
pub struct RoadNetworkBuilder {
    links: Vec<LinkRecord>,
    stops: Vec<StopRecord>,
}

impl RoadNetworkBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link running from node `from` to node `to`.
    pub fn link(mut self, id: u64, from: u64, to: u64, length: f64) -> Self {
        self.links.push(LinkRecord {
            id: LinkId(id),
            from,
            to,
            length,
        });
        self
    }

    /// Add a stop on a link.
    pub fn stop(mut self, id: &str, name: &str, link: u64) -> Self {
        self.stops.push(StopRecord {
            id: id.to_string(),
            name: name.to_string(),
            link: LinkId(link),
        });
        self
    }

    /// Validate the records and build the network graph.
    pub fn build(self) -> Result<RoadNetwork, NetworkError> {
        let mut graph = DiGraph::with_capacity(self.links.len(), self.links.len());
        let mut links = HashMap::with_capacity(self.links.len());
        let mut starting_at: HashMap<u64, Vec<NodeIndex>> = HashMap::new();

        for record in &self.links {
            if !record.length.is_finite() || record.length < 0.0 {
                return Err(NetworkError::InvalidLength {
                    link: record.id,
                    length: record.length,
                });
            }
            if links.contains_key(&record.id) {
                return Err(NetworkError::DuplicateLink(record.id));
            }
            let node = graph.add_node(record.id);
            links.insert(record.id, node);
            starting_at.entry(record.from).or_default().push(node);
        }

        for record in &self.links {
            let Some(successors) = starting_at.get(&record.to) else {
                continue;
            };
            let from = links[&record.id];
            for &to in successors {
                let length = self.links[to.index()].length;
                graph.add_edge(from, to, length);
            }
        }

        let mut stops = HashMap::with_capacity(self.stops.len());
        let mut names = HashMap::with_capacity(self.stops.len());

        for record in self.stops {
            let id = StopId::parse(&record.id)?;
            if !links.contains_key(&record.link) {
                return Err(NetworkError::UnknownLink {
                    stop: id,
                    link: record.link,
                });
            }
            if stops.contains_key(&id) {
                return Err(NetworkError::DuplicateStop(id));
            }
            names.entry(record.name.clone()).or_insert_with(|| id.clone());
            stops.insert(
                id.clone(),
                NetworkStop {
                    id,
                    name: record.name,
                    link: record.link,
                },
            );
        }

        debug!(
            links = links.len(),
            connections = graph.edge_count(),
            stops = stops.len(),
            "built road network"
        );

        Ok(RoadNetwork {
            graph,
            links,
            stops,
            names,
        })
    }
}
