//! Error types.

use crate::models::NodeId;

/// Errors raised while building or querying the evacuation model.
///
/// Expected "no route" outcomes inside table construction are not errors:
/// they are recorded with an infinite distance instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed network, district, or assembly-point input.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The two nodes are not connected in the road network.
    #[error("no path between node {from} and node {to}")]
    NoPath {
        /// Start node.
        from: NodeId,
        /// End node.
        to: NodeId,
    },

    /// Reading an input file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An input document is not valid JSON for the expected schema.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;
