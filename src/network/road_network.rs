//! Immutable road network.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::config::{EdgeSpec, NodeSpec};
use crate::error::{Error, Result};
use crate::models::{normalize, Edge, NodeId, Point};

/// An undirected, weighted road graph.
///
/// Nodes keep their input order, which is the enumeration order used for
/// nearest-node lookups. Adjacency lists are sorted by neighbor id. A
/// repeated edge between the same pair replaces the earlier one.
///
/// # Examples
///
/// ```
/// use u_evac::config::{EdgeSpec, NodeSpec};
/// use u_evac::models::{Point, RoadClass};
/// use u_evac::network::RoadNetwork;
///
/// let nodes = vec![
///     NodeSpec::new(1, 0.0, 0.0),
///     NodeSpec::new(2, 1.0, 0.0),
///     NodeSpec::new(3, 2.0, 0.0),
/// ];
/// let edges = vec![
///     EdgeSpec::new(1, 2, 1.0, RoadClass::Secondary),
///     EdgeSpec::new(3, 2, 1.0, RoadClass::Primary),
/// ];
/// let net = RoadNetwork::new(&nodes, &edges).unwrap();
/// assert_eq!(net.neighbors(2).unwrap(), &[(1, 1.0), (3, 1.0)]);
/// assert!(net.is_primary(2, 3));
/// assert_eq!(net.nearest_node(Point::new(1.9, 0.2)), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    nodes: Vec<(NodeId, Point)>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<(NodeId, f64)>>,
    edges: HashMap<(NodeId, NodeId), Edge>,
    primary: BTreeSet<(NodeId, NodeId)>,
}

impl RoadNetwork {
    /// Builds a network from explicit node and edge lists.
    ///
    /// Fails with [`Error::Configuration`] on duplicate or non-finite nodes,
    /// edges referencing unknown nodes, self-loops, and non-positive or
    /// non-finite weights.
    pub fn new(nodes: &[NodeSpec], edges: &[EdgeSpec]) -> Result<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut positions = Vec::with_capacity(nodes.len());
        for node in nodes {
            let position = node.position();
            if !position.is_finite() {
                return Err(Error::config(format!(
                    "node {} has a non-finite position",
                    node.id
                )));
            }
            if index.insert(node.id, positions.len()).is_some() {
                return Err(Error::config(format!("duplicate node id {}", node.id)));
            }
            positions.push((node.id, position));
        }

        let mut by_key: HashMap<(NodeId, NodeId), Edge> = HashMap::with_capacity(edges.len());
        for spec in edges {
            for id in [spec.from, spec.to] {
                if !index.contains_key(&id) {
                    return Err(Error::config(format!("edge references unknown node {id}")));
                }
            }
            if spec.from == spec.to {
                return Err(Error::config(format!("self-loop at node {}", spec.from)));
            }
            if !spec.weight.is_finite() || spec.weight <= 0.0 {
                return Err(Error::config(format!(
                    "edge {}-{} has non-positive weight {}",
                    spec.from, spec.to, spec.weight
                )));
            }
            let edge = Edge::new(spec.from, spec.to, spec.weight, spec.class);
            by_key.insert(edge.key(), edge);
        }

        let mut adjacency = vec![Vec::new(); positions.len()];
        let mut primary = BTreeSet::new();
        for (&(a, b), edge) in &by_key {
            adjacency[index[&a]].push((b, edge.weight()));
            adjacency[index[&b]].push((a, edge.weight()));
            if edge.is_primary() {
                primary.insert((a, b));
            }
        }
        for list in &mut adjacency {
            list.sort_by_key(|&(id, _)| id);
        }

        debug!(
            nodes = positions.len(),
            edges = by_key.len(),
            primary = primary.len(),
            "built road network"
        );

        Ok(Self {
            nodes: positions,
            index,
            adjacency,
            edges: by_key,
            primary,
        })
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Node ids in input order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|&(id, _)| id)
    }

    /// Returns `true` if the node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Position of a node.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.index.get(&id).map(|&i| self.nodes[i].1)
    }

    /// `(neighbor, weight)` pairs sorted by neighbor id.
    pub fn neighbors(&self, id: NodeId) -> Option<&[(NodeId, f64)]> {
        self.index.get(&id).map(|&i| self.adjacency[i].as_slice())
    }

    /// The edge joining `a` and `b`, in either direction.
    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
        self.edges.get(&normalize(a, b))
    }

    /// Weight of the edge joining `a` and `b`.
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.edge(a, b).map(Edge::weight)
    }

    /// Returns `true` if `a`-`b` is a primary road.
    pub fn is_primary(&self, a: NodeId, b: NodeId) -> bool {
        self.primary.contains(&normalize(a, b))
    }

    /// Primary roads as sorted `(min, max)` pairs.
    pub fn primary_edges(&self) -> &BTreeSet<(NodeId, NodeId)> {
        &self.primary
    }

    /// Node closest to `point` by Euclidean distance.
    ///
    /// Ties go to the node listed first. Returns `None` for an empty network.
    pub fn nearest_node(&self, point: Point) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &(id, position) in &self.nodes {
            let d = position.distance_to(&point);
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((id, d)),
            }
        }
        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoadClass;

    fn line() -> (Vec<NodeSpec>, Vec<EdgeSpec>) {
        let nodes = vec![
            NodeSpec::new(10, 0.0, 0.0),
            NodeSpec::new(20, 1.0, 0.0),
            NodeSpec::new(30, 2.0, 0.0),
            NodeSpec::new(40, 9.0, 9.0),
        ];
        let edges = vec![
            EdgeSpec::new(10, 20, 1.0, RoadClass::Secondary),
            EdgeSpec::new(30, 20, 1.5, RoadClass::Primary),
        ];
        (nodes, edges)
    }

    #[test]
    fn test_new_counts() {
        let (n, e) = line();
        let net = RoadNetwork::new(&n, &e).expect("valid");
        assert_eq!(net.num_nodes(), 4);
        assert_eq!(net.num_edges(), 2);
        assert_eq!(net.node_ids().collect::<Vec<_>>(), vec![10, 20, 30, 40]);
        assert!(net.contains(40));
        assert!(!net.contains(50));
    }

    #[test]
    fn test_neighbors_sorted() {
        let (n, e) = line();
        let net = RoadNetwork::new(&n, &e).expect("valid");
        assert_eq!(net.neighbors(20).expect("node"), &[(10, 1.0), (30, 1.5)]);
        assert!(net.neighbors(40).expect("node").is_empty());
        assert!(net.neighbors(99).is_none());
    }

    #[test]
    fn test_edge_lookup_both_directions() {
        let (n, e) = line();
        let net = RoadNetwork::new(&n, &e).expect("valid");
        assert_eq!(net.edge_weight(20, 30), Some(1.5));
        assert_eq!(net.edge_weight(30, 20), Some(1.5));
        assert_eq!(net.edge_weight(10, 30), None);
        assert!(net.is_primary(30, 20));
        assert!(!net.is_primary(10, 20));
    }

    #[test]
    fn test_primary_set_normalized() {
        let (n, mut e) = line();
        e.push(EdgeSpec::new(20, 30, 1.5, RoadClass::Primary));
        let net = RoadNetwork::new(&n, &e).expect("valid");
        let primary: Vec<_> = net.primary_edges().iter().copied().collect();
        assert_eq!(primary, vec![(20, 30)]);
    }

    #[test]
    fn test_repeated_edge_replaces() {
        let (n, mut e) = line();
        e.push(EdgeSpec::new(20, 10, 4.0, RoadClass::Primary));
        let net = RoadNetwork::new(&n, &e).expect("valid");
        assert_eq!(net.num_edges(), 2);
        assert_eq!(net.edge_weight(10, 20), Some(4.0));
        assert!(net.is_primary(10, 20));
    }

    #[test]
    fn test_unknown_node_rejected() {
        let (n, mut e) = line();
        e.push(EdgeSpec::new(10, 99, 1.0, RoadClass::Secondary));
        assert!(matches!(
            RoadNetwork::new(&n, &e),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_bad_weight_rejected() {
        let (n, _) = line();
        for w in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let e = vec![EdgeSpec::new(10, 20, w, RoadClass::Secondary)];
            assert!(RoadNetwork::new(&n, &e).is_err(), "weight {w} accepted");
        }
    }

    #[test]
    fn test_self_loop_rejected() {
        let (n, _) = line();
        let e = vec![EdgeSpec::new(10, 10, 1.0, RoadClass::Secondary)];
        assert!(RoadNetwork::new(&n, &e).is_err());
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let (mut n, e) = line();
        n.push(NodeSpec::new(10, 5.0, 5.0));
        assert!(RoadNetwork::new(&n, &e).is_err());
    }

    #[test]
    fn test_nearest_node() {
        let (n, e) = line();
        let net = RoadNetwork::new(&n, &e).expect("valid");
        assert_eq!(net.nearest_node(Point::new(1.2, 0.1)), Some(20));
        assert_eq!(net.nearest_node(Point::new(8.0, 8.0)), Some(40));
    }

    #[test]
    fn test_nearest_node_tie_first_listed() {
        let (n, e) = line();
        let net = RoadNetwork::new(&n, &e).expect("valid");
        // Equidistant from 10 and 20
        assert_eq!(net.nearest_node(Point::new(0.5, 0.0)), Some(10));
    }

    #[test]
    fn test_nearest_node_empty() {
        let net = RoadNetwork::new(&[], &[]).expect("valid");
        assert_eq!(net.nearest_node(Point::new(0.0, 0.0)), None);
    }
}
