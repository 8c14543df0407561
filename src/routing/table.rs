//! Dense demand-point × assembly-point route table.

use tracing::{debug, trace};

use super::RoutingEngine;
use crate::error::{Error, Result};
use crate::models::{AssemblyId, AssemblyPoint, NodeId, Point, Route};
use crate::network::RoadNetwork;
use crate::partition::DistrictPartitioner;

/// Routes for every (district, assembly point) pair, stored row-major.
///
/// Rows follow district index, columns follow ascending assembly id, so
/// [`records`](Self::records) is already in report order.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable {
    assembly_ids: Vec<AssemblyId>,
    routes: Vec<Route>,
    num_districts: usize,
}

impl RouteTable {
    fn column(&self, assembly_id: AssemblyId) -> Option<usize> {
        self.assembly_ids.binary_search(&assembly_id).ok()
    }

    /// Route from district `q` to the given assembly point.
    pub fn get(&self, q: usize, assembly_id: AssemblyId) -> Option<&Route> {
        if q >= self.num_districts {
            return None;
        }
        let j = self.column(assembly_id)?;
        self.routes.get(q * self.assembly_ids.len() + j)
    }

    /// Walking distance, `+∞` for an unknown or unreachable pair.
    pub fn distance(&self, q: usize, assembly_id: AssemblyId) -> f64 {
        self.get(q, assembly_id)
            .map(Route::distance)
            .unwrap_or(f64::INFINITY)
    }

    /// Routes of one district, in ascending assembly id.
    pub fn row(&self, q: usize) -> &[Route] {
        let m = self.assembly_ids.len();
        if q >= self.num_districts {
            return &[];
        }
        &self.routes[q * m..(q + 1) * m]
    }

    /// Flat record sequence ordered by district index then assembly id.
    pub fn records(&self) -> &[Route] {
        &self.routes
    }

    /// Assembly ids in column order.
    pub fn assembly_ids(&self) -> &[AssemblyId] {
        &self.assembly_ids
    }

    /// Number of districts (rows).
    pub fn num_districts(&self) -> usize {
        self.num_districts
    }
}

/// Builds a [`RouteTable`] by routing each district centroid to each
/// assembly point.
///
/// Both sides are snapped to their nearest network node first. Disconnected
/// pairs are recorded as unreachable, not treated as failures.
pub struct RouteTableBuilder<'a> {
    engine: RoutingEngine<'a>,
    partitioner: &'a DistrictPartitioner,
    assembly_points: Vec<&'a AssemblyPoint>,
}

impl<'a> RouteTableBuilder<'a> {
    /// Creates a builder. Assembly points are ordered by id.
    pub fn new(
        network: &'a RoadNetwork,
        partitioner: &'a DistrictPartitioner,
        assembly_points: &'a [AssemblyPoint],
    ) -> Self {
        let mut sorted: Vec<&AssemblyPoint> = assembly_points.iter().collect();
        sorted.sort_by_key(|p| p.id());
        Self {
            engine: RoutingEngine::new(network),
            partitioner,
            assembly_points: sorted,
        }
    }

    fn snap(&self, point: Point) -> Result<NodeId> {
        self.engine
            .network()
            .nearest_node(point)
            .ok_or_else(|| Error::config("road network has no nodes"))
    }

    /// Nearest network node of every district centroid.
    pub fn demand_nodes(&self) -> Result<Vec<NodeId>> {
        self.partitioner
            .districts()
            .iter()
            .map(|d| self.snap(d.centroid()))
            .collect()
    }

    /// Nearest network node of every assembly point, in ascending id.
    pub fn assembly_nodes(&self) -> Result<Vec<NodeId>> {
        self.assembly_points
            .iter()
            .map(|p| self.snap(p.position()))
            .collect()
    }

    fn pairs(&self) -> Result<Vec<(usize, AssemblyId, NodeId, NodeId)>> {
        let demand = self.demand_nodes()?;
        let assembly = self.assembly_nodes()?;
        let mut pairs = Vec::with_capacity(demand.len() * assembly.len());
        for (q, &from) in demand.iter().enumerate() {
            for (p, &to) in self.assembly_points.iter().zip(&assembly) {
                pairs.push((q, p.id(), from, to));
            }
        }
        Ok(pairs)
    }

    fn route_pair(&self, (q, id, from, to): (usize, AssemblyId, NodeId, NodeId)) -> Result<Route> {
        let result = self.engine.route(from, to)?;
        trace!(district = q, assembly = id, distance = result.distance, "routed pair");
        Ok(match result.path {
            Some(path) => Route::new(q, id, result.distance, result.crossings, path),
            None => Route::unreachable(q, id),
        })
    }

    fn finish(&self, routes: Vec<Route>) -> RouteTable {
        let table = RouteTable {
            assembly_ids: self.assembly_points.iter().map(|p| p.id()).collect(),
            routes,
            num_districts: self.partitioner.num_districts(),
        };
        debug!(
            districts = table.num_districts,
            assembly_points = table.assembly_ids.len(),
            unreachable = table.routes.iter().filter(|r| !r.is_reachable()).count(),
            "built route table"
        );
        table
    }

    /// Routes every pair sequentially.
    pub fn build(&self) -> Result<RouteTable> {
        let routes = self
            .pairs()?
            .into_iter()
            .map(|pair| self.route_pair(pair))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.finish(routes))
    }

    /// Routes every pair on the rayon pool; the table is identical to
    /// [`build`](Self::build).
    #[cfg(feature = "parallel")]
    pub fn build_parallel(&self) -> Result<RouteTable> {
        use rayon::prelude::{IntoParallelIterator, ParallelIterator};

        let routes = self
            .pairs()?
            .into_par_iter()
            .map(|pair| self.route_pair(pair))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.finish(routes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AssemblyPointSpec, DistrictSpec, EdgeSpec, NodeSpec};
    use crate::models::RoadClass;

    /// Path 1-2-3 with a primary middle segment, squares around it, and an
    /// island node 9 far away.
    fn fixture() -> (RoadNetwork, DistrictPartitioner, Vec<AssemblyPoint>) {
        let nodes = vec![
            NodeSpec::new(1, 0.0, 0.0),
            NodeSpec::new(2, 10.0, 0.0),
            NodeSpec::new(3, 20.0, 0.0),
            NodeSpec::new(4, 0.0, 10.0),
            NodeSpec::new(5, 10.0, 10.0),
            NodeSpec::new(9, 100.0, 100.0),
        ];
        let edges = vec![
            EdgeSpec::new(1, 2, 10.0, RoadClass::Secondary),
            EdgeSpec::new(2, 3, 10.0, RoadClass::Primary),
            EdgeSpec::new(1, 4, 10.0, RoadClass::Secondary),
            EdgeSpec::new(2, 5, 10.0, RoadClass::Secondary),
            EdgeSpec::new(4, 5, 10.0, RoadClass::Secondary),
        ];
        let net = RoadNetwork::new(&nodes, &edges).expect("valid");
        let districts = vec![DistrictSpec::new("A", vec![1, 2, 5, 4, 1], 30)];
        let part = DistrictPartitioner::new(&net, &districts).expect("valid");
        let aps = part.assembly_points(&[
            AssemblyPointSpec::new(9, 50, 99.0, 99.0),
            AssemblyPointSpec::new(3, 50, 19.0, 1.0),
        ]);
        (net, part, aps)
    }

    #[test]
    fn test_build_dense_and_ordered() {
        let (net, part, aps) = fixture();
        let table = RouteTableBuilder::new(&net, &part, &aps).build().expect("table");
        assert_eq!(table.num_districts(), 1);
        assert_eq!(table.assembly_ids(), &[3, 9]);
        let ids: Vec<_> = table.records().iter().map(|r| r.assembly_id()).collect();
        assert_eq!(ids, vec![3, 9]);
        assert_eq!(table.row(0).len(), 2);
        assert!(table.row(1).is_empty());
    }

    #[test]
    fn test_snap_to_nearest_node() {
        let (net, part, aps) = fixture();
        let builder = RouteTableBuilder::new(&net, &part, &aps);
        // Centroid (5,5) is equidistant from 1, 2, 4, 5: first listed wins.
        assert_eq!(builder.demand_nodes().expect("nodes"), vec![1]);
        assert_eq!(builder.assembly_nodes().expect("nodes"), vec![3, 9]);
    }

    #[test]
    fn test_route_values() {
        let (net, part, aps) = fixture();
        let table = RouteTableBuilder::new(&net, &part, &aps).build().expect("table");
        let r = table.get(0, 3).expect("route");
        assert_eq!(r.path(), Some(&[1, 2, 3][..]));
        assert!((r.distance() - 20.0).abs() < 1e-10);
        assert_eq!(r.crossings(), 1);
    }

    #[test]
    fn test_unreachable_recorded_as_infinity() {
        let (net, part, aps) = fixture();
        let table = RouteTableBuilder::new(&net, &part, &aps).build().expect("table");
        let r = table.get(0, 9).expect("route");
        assert!(!r.is_reachable());
        assert_eq!(table.distance(0, 9), f64::INFINITY);
        assert_eq!(r.crossings(), 0);
    }

    #[test]
    fn test_unknown_lookup() {
        let (net, part, aps) = fixture();
        let table = RouteTableBuilder::new(&net, &part, &aps).build().expect("table");
        assert!(table.get(0, 4).is_none());
        assert!(table.get(3, 3).is_none());
        assert_eq!(table.distance(0, 4), f64::INFINITY);
    }

    #[test]
    fn test_build_idempotent() {
        let (net, part, aps) = fixture();
        let builder = RouteTableBuilder::new(&net, &part, &aps);
        assert_eq!(builder.build().expect("a"), builder.build().expect("b"));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let (net, part, aps) = fixture();
        let builder = RouteTableBuilder::new(&net, &part, &aps);
        assert_eq!(
            builder.build().expect("seq"),
            builder.build_parallel().expect("par")
        );
    }
}
