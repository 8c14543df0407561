//! Dijkstra shortest-path search.

use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::trace;

use super::queue::QueueEntry;
use crate::error::{Error, Result};
use crate::models::NodeId;
use crate::network::RoadNetwork;

/// Result of a shortest-path query.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Node sequence from start to end, `None` if unreachable.
    pub path: Option<Vec<NodeId>>,
    /// Total weight, `+∞` if unreachable.
    pub distance: f64,
    /// Number of primary-road edges along the path.
    pub crossings: u32,
}

impl PathResult {
    /// Sentinel for a disconnected pair.
    pub fn unreachable() -> Self {
        Self {
            path: None,
            distance: f64::INFINITY,
            crossings: 0,
        }
    }

    /// Returns `true` if a path exists.
    pub fn is_reachable(&self) -> bool {
        self.path.is_some()
    }
}

/// Exact shortest paths over non-negative edge weights.
///
/// Tie-break: among frontier nodes at equal distance the lowest node id is
/// settled first, and a node's predecessor only changes on a strict
/// improvement. For a fixed network every query is reproducible.
///
/// # Examples
///
/// ```
/// use u_evac::config::{EdgeSpec, NodeSpec};
/// use u_evac::models::RoadClass;
/// use u_evac::network::RoadNetwork;
/// use u_evac::routing::RoutingEngine;
///
/// let nodes: Vec<_> = (1..=3).map(|i| NodeSpec::new(i, i as f64, 0.0)).collect();
/// let edges = vec![
///     EdgeSpec::new(1, 2, 1.0, RoadClass::Primary),
///     EdgeSpec::new(2, 3, 2.0, RoadClass::Secondary),
/// ];
/// let network = RoadNetwork::new(&nodes, &edges).unwrap();
/// let engine = RoutingEngine::new(&network);
///
/// let result = engine.shortest_path(1, 3).unwrap();
/// assert_eq!(result.path, Some(vec![1, 2, 3]));
/// assert!((result.distance - 3.0).abs() < 1e-10);
/// assert_eq!(result.crossings, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RoutingEngine<'a> {
    network: &'a RoadNetwork,
}

impl<'a> RoutingEngine<'a> {
    /// Creates an engine over the given network.
    pub fn new(network: &'a RoadNetwork) -> Self {
        Self { network }
    }

    /// The underlying network.
    pub fn network(&self) -> &'a RoadNetwork {
        self.network
    }

    /// Computes the shortest path from `start` to `end`.
    ///
    /// Fails with [`Error::NoPath`] when the nodes are disconnected and with
    /// [`Error::Configuration`] when either node is unknown.
    pub fn shortest_path(&self, start: NodeId, end: NodeId) -> Result<PathResult> {
        for id in [start, end] {
            if !self.network.contains(id) {
                return Err(Error::config(format!("unknown node {id}")));
            }
        }

        let mut dist: HashMap<NodeId, f64> = HashMap::new();
        let mut prev: HashMap<NodeId, NodeId> = HashMap::new();
        let mut settled: HashSet<NodeId> = HashSet::new();
        let mut heap = BinaryHeap::new();

        dist.insert(start, 0.0);
        heap.push(QueueEntry {
            cost: 0.0,
            node: start,
        });

        while let Some(QueueEntry { cost, node }) = heap.pop() {
            if !settled.insert(node) {
                continue;
            }
            if node == end {
                let path = self.unwind(&prev, start, end);
                let crossings = self.count_crossings(&path);
                trace!(start, end, distance = cost, crossings, "shortest path found");
                return Ok(PathResult {
                    path: Some(path),
                    distance: cost,
                    crossings,
                });
            }
            for &(next, weight) in self.network.neighbors(node).unwrap_or_default() {
                if settled.contains(&next) {
                    continue;
                }
                let candidate = cost + weight;
                let improves = match dist.get(&next) {
                    Some(&current) => candidate < current,
                    None => true,
                };
                if improves {
                    dist.insert(next, candidate);
                    prev.insert(next, node);
                    heap.push(QueueEntry {
                        cost: candidate,
                        node: next,
                    });
                }
            }
        }

        Err(Error::NoPath {
            from: start,
            to: end,
        })
    }

    /// Like [`shortest_path`](Self::shortest_path), but reports a disconnected
    /// pair as [`PathResult::unreachable`] instead of an error.
    pub fn route(&self, start: NodeId, end: NodeId) -> Result<PathResult> {
        match self.shortest_path(start, end) {
            Err(Error::NoPath { .. }) => Ok(PathResult::unreachable()),
            other => other,
        }
    }

    /// Shortest distance, `+∞` when disconnected or unknown.
    pub fn distance(&self, start: NodeId, end: NodeId) -> f64 {
        self.shortest_path(start, end)
            .map(|r| r.distance)
            .unwrap_or(f64::INFINITY)
    }

    /// Number of consecutive path edges that are primary roads.
    pub fn count_crossings(&self, path: &[NodeId]) -> u32 {
        path.windows(2)
            .filter(|w| self.network.is_primary(w[0], w[1]))
            .count() as u32
    }

    fn unwind(&self, prev: &HashMap<NodeId, NodeId>, start: NodeId, end: NodeId) -> Vec<NodeId> {
        let mut path = vec![end];
        let mut current = end;
        while current != start {
            match prev.get(&current) {
                Some(&p) => {
                    path.push(p);
                    current = p;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EdgeSpec, NodeSpec};
    use crate::models::RoadClass;

    /// Diamond 1-2-4 / 1-3-4 with equal lengths, plus an isolated node 5.
    fn diamond() -> RoadNetwork {
        let nodes = vec![
            NodeSpec::new(1, 0.0, 0.0),
            NodeSpec::new(2, 1.0, 1.0),
            NodeSpec::new(3, 1.0, -1.0),
            NodeSpec::new(4, 2.0, 0.0),
            NodeSpec::new(5, 9.0, 9.0),
        ];
        let edges = vec![
            EdgeSpec::new(1, 3, 1.0, RoadClass::Secondary),
            EdgeSpec::new(3, 4, 1.0, RoadClass::Secondary),
            EdgeSpec::new(1, 2, 1.0, RoadClass::Primary),
            EdgeSpec::new(2, 4, 1.0, RoadClass::Primary),
        ];
        RoadNetwork::new(&nodes, &edges).expect("valid")
    }

    #[test]
    fn test_self_path() {
        let net = diamond();
        let r = RoutingEngine::new(&net).shortest_path(4, 4).expect("path");
        assert_eq!(r.path, Some(vec![4]));
        assert_eq!(r.distance, 0.0);
        assert_eq!(r.crossings, 0);
    }

    #[test]
    fn test_tie_break_lowest_id() {
        let net = diamond();
        let engine = RoutingEngine::new(&net);
        let r = engine.shortest_path(1, 4).expect("path");
        // Both branches have length 2; node 2 is settled before node 3.
        assert_eq!(r.path, Some(vec![1, 2, 4]));
        assert!((r.distance - 2.0).abs() < 1e-10);
        assert_eq!(r.crossings, 2);
    }

    #[test]
    fn test_strictly_shorter_branch_wins() {
        let nodes: Vec<_> = (1..=4).map(|i| NodeSpec::new(i, 0.0, i as f64)).collect();
        let edges = vec![
            EdgeSpec::new(1, 2, 1.0, RoadClass::Primary),
            EdgeSpec::new(2, 4, 1.0, RoadClass::Primary),
            EdgeSpec::new(1, 3, 0.5, RoadClass::Secondary),
            EdgeSpec::new(3, 4, 1.0, RoadClass::Secondary),
        ];
        let net = RoadNetwork::new(&nodes, &edges).expect("valid");
        let r = RoutingEngine::new(&net).shortest_path(1, 4).expect("path");
        assert_eq!(r.path, Some(vec![1, 3, 4]));
        assert!((r.distance - 1.5).abs() < 1e-10);
        assert_eq!(r.crossings, 0);
    }

    #[test]
    fn test_disconnected() {
        let net = diamond();
        let engine = RoutingEngine::new(&net);
        assert!(matches!(
            engine.shortest_path(1, 5),
            Err(Error::NoPath { from: 1, to: 5 })
        ));
        let r = engine.route(1, 5).expect("sentinel");
        assert!(!r.is_reachable());
        assert_eq!(r.distance, f64::INFINITY);
        assert_eq!(r.crossings, 0);
        assert_eq!(engine.distance(5, 1), f64::INFINITY);
    }

    #[test]
    fn test_unknown_node() {
        let net = diamond();
        let engine = RoutingEngine::new(&net);
        assert!(matches!(
            engine.shortest_path(1, 42),
            Err(Error::Configuration(_))
        ));
        assert!(engine.route(42, 1).is_err());
    }

    #[test]
    fn test_symmetric_distance() {
        let net = diamond();
        let engine = RoutingEngine::new(&net);
        for a in 1..=4 {
            for b in 1..=4 {
                assert!((engine.distance(a, b) - engine.distance(b, a)).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_count_crossings() {
        let net = diamond();
        let engine = RoutingEngine::new(&net);
        assert_eq!(engine.count_crossings(&[3, 1, 2, 4]), 2);
        assert_eq!(engine.count_crossings(&[1]), 0);
        assert_eq!(engine.count_crossings(&[]), 0);
    }
}
