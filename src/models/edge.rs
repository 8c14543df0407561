//! Road edges and their classification.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Classification of a road segment.
///
/// Crossing a primary road is tracked as a safety metric on every route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadClass {
    /// Major thoroughfare.
    Primary,
    /// Any other walkable road.
    #[default]
    Secondary,
}

/// An undirected, weighted road segment between two nodes.
///
/// # Examples
///
/// ```
/// use u_evac::models::{Edge, RoadClass};
///
/// let e = Edge::new(7, 3, 150.0, RoadClass::Primary);
/// assert_eq!(e.key(), (3, 7));
/// assert!(e.is_primary());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    a: NodeId,
    b: NodeId,
    weight: f64,
    class: RoadClass,
}

impl Edge {
    /// Creates an edge. Validation happens when the network is built.
    pub fn new(a: NodeId, b: NodeId, weight: f64, class: RoadClass) -> Self {
        Self { a, b, weight, class }
    }

    /// Endpoints as given.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    /// Normalized `(min, max)` endpoint pair.
    pub fn key(&self) -> (NodeId, NodeId) {
        normalize(self.a, self.b)
    }

    /// Walking length of the segment.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Road classification.
    pub fn class(&self) -> RoadClass {
        self.class
    }

    /// Returns `true` for primary roads.
    pub fn is_primary(&self) -> bool {
        self.class == RoadClass::Primary
    }
}

/// Orders an endpoint pair as `(min, max)`.
pub(crate) fn normalize(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
