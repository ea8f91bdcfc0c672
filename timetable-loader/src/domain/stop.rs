//! Stop identifiers and stop entities.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{LinkId, VisitTime};

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// An external stop identifier, such as an ATCO code.
///
/// Identifiers are opaque strings. This type guarantees they are non-empty
/// and carry no surrounding whitespace.
///
/// # Examples
///
/// ```
/// use timetable_loader::domain::StopId;
///
/// let id = StopId::parse(" 450030204 ").unwrap();
/// assert_eq!(id.as_str(), "450030204");
///
/// assert!(StopId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }
        Ok(StopId(trimmed.to_string()))
    }

    /// Build an id from a literal known to be non-empty and trimmed.
    pub(crate) fn from_static(s: &'static str) -> Self {
        debug_assert!(!s.is_empty() && s.trim() == s);
        StopId(s.to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = InvalidStopId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StopId::parse(&value)
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One visit of a vehicle to a stop, as read from a trip file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopVisit {
    /// The external identifier of the stop visited.
    pub stop: StopId,
    /// When the stop was visited.
    pub time: VisitTime,
}

impl StopVisit {
    /// Creates a new stop visit.
    pub fn new(stop: StopId, time: VisitTime) -> Self {
        Self { stop, time }
    }
}

/// A stop entity that exists in the road network.
///
/// Every network stop sits on exactly one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStop {
    /// External identifier.
    pub id: StopId,
    /// Display name.
    pub name: String,
    /// The link hosting this stop.
    pub link: LinkId,
}

/// A stop visit matched to the network stop it happened at.
///
/// For hub-folded visits, `stop` is the shared hub stop while `visit`
/// retains the identifier and time that appeared in the trip file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStop {
    /// The visit as read from the trip file.
    pub visit: StopVisit,
    /// The network stop the visit resolved to.
    pub stop: NetworkStop,
}

impl ResolvedStop {
    /// Creates a resolved stop.
    pub fn new(visit: StopVisit, stop: NetworkStop) -> Self {
        Self { visit, stop }
    }

    /// The network identifier of the resolved stop.
    pub fn id(&self) -> &StopId {
        &self.stop.id
    }

    /// The display name of the resolved stop.
    pub fn name(&self) -> &str {
        &self.stop.name
    }

    /// The link hosting the resolved stop.
    pub fn link(&self) -> LinkId {
        self.stop.link
    }

    /// When the stop was visited.
    pub fn time(&self) -> VisitTime {
        self.visit.time
    }
}
