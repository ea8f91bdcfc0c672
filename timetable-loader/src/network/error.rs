//! Network loading error types.

use crate::domain::{InvalidStopId, LinkId, StopId};

/// Errors that can occur when loading or building a road network.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Reading the network file failed
    #[error("failed to read network file: {0}")]
    Io(#[from] std::io::Error),

    /// The network file is not valid JSON for the expected layout
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two links share an id
    #[error("duplicate link {0}")]
    DuplicateLink(LinkId),

    /// A stop record carries an unusable id
    #[error(transparent)]
    InvalidStop(#[from] InvalidStopId),

    /// Two stops share an external id
    #[error("duplicate stop {0}")]
    DuplicateStop(StopId),

    /// A stop sits on a link the network doesn't contain
    #[error("stop {stop} references unknown link {link}")]
    UnknownLink { stop: StopId, link: LinkId },

    /// Link lengths must be finite and non-negative
    #[error("link {link} has invalid length {length}")]
    InvalidLength { link: LinkId, length: f64 },
}
