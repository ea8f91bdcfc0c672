//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from file and network errors.

use super::LinkId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Invalid leg construction (e.g., no stops)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// A route lists the same link twice in a row
    #[error("route repeats link {0} in consecutive positions")]
    RepeatedLink(LinkId),

    /// Stop slots don't line up with the route they annotate
    #[error("{slots} stop slots do not match a route of {route} links")]
    MisalignedStops { route: usize, slots: usize },

    /// Line names identify lines and cannot be blank
    #[error("line name must not be empty")]
    EmptyLineName,
}
