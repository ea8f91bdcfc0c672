//! Hub stop folding.
//!
//! Some transfer hubs appear in trip files under many access-point codes,
//! one per stand, while the network models them as a single stop. This
//! module holds the closed list of codes to fold and the id of the network
//! stop they fold into.

use std::collections::HashSet;

use crate::domain::StopId;

/// Default network id of the shared hub stop.
pub const DEFAULT_HUB_STOP: &str = "Bus Station";

/// A closed set of stop ids folded into one network hub stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubStops {
    hub: StopId,
    members: HashSet<StopId>,
}

impl HubStops {
    /// Create an empty set folding into the given hub stop.
    pub fn new(hub: StopId) -> Self {
        Self {
            hub,
            members: HashSet::new(),
        }
    }

    /// Add a member id.
    pub fn add(&mut self, member: StopId) {
        self.members.insert(member);
    }

    /// The network id of the shared hub stop.
    pub fn hub(&self) -> &StopId {
        &self.hub
    }

    /// Check if an id folds into the hub.
    pub fn contains(&self, id: &StopId) -> bool {
        self.members.contains(id)
    }

    /// Returns the number of member ids.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if no ids fold into the hub.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Builder for creating hub stop sets.
///
/// Provides a fluent API for adding member codes.
#[derive(Debug)]
pub struct HubStopsBuilder {
    inner: Option<HubStops>,
}

impl HubStopsBuilder {
    /// Create a builder folding into the hub stop with the given id.
    ///
    /// An invalid hub id makes `build` return `None`.
    pub fn new(hub: &str) -> Self {
        Self {
            inner: StopId::parse(hub).ok().map(HubStops::new),
        }
    }

    /// Add a member code. Invalid codes are skipped.
    pub fn add(mut self, member: &str) -> Self {
        if let (Some(inner), Ok(id)) = (self.inner.as_mut(), StopId::parse(member)) {
            inner.add(id);
        }
        self
    }

    /// Add several member codes.
    pub fn add_all<'a>(self, members: impl IntoIterator<Item = &'a str>) -> Self {
        members.into_iter().fold(self, |builder, member| builder.add(member))
    }

    /// Build the hub stop set.
    pub fn build(self) -> Option<HubStops> {
        self.inner
    }
}

/// Stand codes of Wakefield bus station.
const WAKEFIELD_STANDS: [&str; 24] = [
    "450030204", "450030188", "450030189", "450030190", "450030182", "450030183", "450030184",
    "450030185", "450030186", "450030196", "450030197", "450030191", "450030192", "450030187",
    "450030194", "450030193", "450030195", "450030202", "450030203", "450030198", "450030199",
    "450030200", "450030201", "450030331",
];

/// The Wakefield bus station stands, folded into `DEFAULT_HUB_STOP`.
pub fn wakefield_bus_station() -> HubStops {
    let mut hubs = HubStops::new(StopId::from_static(DEFAULT_HUB_STOP));
    for code in WAKEFIELD_STANDS {
        hubs.add(StopId::from_static(code));
    }
    hubs
}
