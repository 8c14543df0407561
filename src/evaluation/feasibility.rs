//! Per-district admissible assembly points.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::AssemblyId;
use crate::routing::RouteTable;

/// Rejects a walking bound that is negative or not finite.
pub(crate) fn check_max_distance(max_distance: f64) -> Result<()> {
    if !max_distance.is_finite() || max_distance < 0.0 {
        return Err(Error::config(format!(
            "max walking distance must be finite and non-negative, got {max_distance}"
        )));
    }
    Ok(())
}

/// Admissible assembly points per district, ascending by id.
///
/// An empty entry marks an infeasible demand point: no assembly point is
/// within walking distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeasibleSet {
    sets: Vec<Vec<AssemblyId>>,
}

impl FeasibleSet {
    #[cfg(test)]
    pub(crate) fn from_sets(sets: Vec<Vec<AssemblyId>>) -> Self {
        Self { sets }
    }

    /// Admissible assembly ids of district `q` (empty if out of range).
    pub fn get(&self, q: usize) -> &[AssemblyId] {
        self.sets.get(q).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if district `q` may be served by `assembly_id`.
    pub fn contains(&self, q: usize, assembly_id: AssemblyId) -> bool {
        self.get(q).binary_search(&assembly_id).is_ok()
    }

    /// Number of districts.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns true if there are no districts.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Districts with no admissible assembly point.
    pub fn infeasible_districts(&self) -> Vec<usize> {
        self.sets
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_empty())
            .map(|(q, _)| q)
            .collect()
    }

    /// Iterates `(district, admissible ids)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[AssemblyId])> {
        self.sets.iter().map(Vec::as_slice).enumerate()
    }
}

/// Keeps, per district, the assembly points with route distance ≤ dmax.
///
/// # Examples
///
/// ```
/// use u_evac::evaluation::FeasibilityFilter;
/// use u_evac::plan::EvacuationPlan;
/// use u_evac::provider::{DataProvider, SimulatedProvider};
///
/// let config = SimulatedProvider::new().load_config(700.0, 10).unwrap();
/// let plan = EvacuationPlan::build(&config).unwrap();
///
/// let feasible = FeasibilityFilter::new(700.0)?.filter(plan.route_table());
/// assert_eq!(feasible.get(0), &[1, 5, 8, 16, 18]);
/// assert!(feasible.infeasible_districts().is_empty());
/// # Ok::<(), u_evac::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FeasibilityFilter {
    max_distance: f64,
}

impl FeasibilityFilter {
    /// Creates a filter with walking bound `max_distance`.
    ///
    /// Fails with [`Error::Configuration`] if the bound is negative or not
    /// finite.
    pub fn new(max_distance: f64) -> Result<Self> {
        check_max_distance(max_distance)?;
        Ok(Self { max_distance })
    }

    /// The walking bound.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Prunes the table; logs a warning for each infeasible demand point.
    pub fn filter(&self, table: &RouteTable) -> FeasibleSet {
        let sets: Vec<Vec<AssemblyId>> = (0..table.num_districts())
            .map(|q| {
                table
                    .row(q)
                    .iter()
                    .filter(|r| r.distance() <= self.max_distance)
                    .map(|r| r.assembly_id())
                    .collect()
            })
            .collect();

        for (q, set) in sets.iter().enumerate() {
            if set.is_empty() {
                warn!(
                    district = q,
                    max_distance = self.max_distance,
                    "infeasible demand point: no assembly point within walking distance"
                );
            }
        }
        debug!(
            districts = sets.len(),
            admissible = sets.iter().map(Vec::len).sum::<usize>(),
            "filtered route table"
        );
        FeasibleSet { sets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AssemblyPointSpec, DistrictSpec, EdgeSpec, NodeSpec};
    use crate::models::RoadClass;
    use crate::network::RoadNetwork;
    use crate::partition::DistrictPartitioner;
    use crate::routing::RouteTableBuilder;

    /// A line 1-2-3-4 at 100 m spacing with a district around node 1 and
    /// a disconnected node 5.
    fn table() -> RouteTable {
        let nodes = vec![
            NodeSpec::new(1, 0.0, 0.0),
            NodeSpec::new(2, 100.0, 0.0),
            NodeSpec::new(3, 200.0, 0.0),
            NodeSpec::new(4, 300.0, 0.0),
            NodeSpec::new(5, 0.0, 500.0),
            NodeSpec::new(6, -10.0, -10.0),
            NodeSpec::new(7, 10.0, -10.0),
            NodeSpec::new(8, 10.0, 10.0),
            NodeSpec::new(9, -10.0, 10.0),
        ];
        let edges = vec![
            EdgeSpec::new(1, 2, 100.0, RoadClass::Secondary),
            EdgeSpec::new(2, 3, 100.0, RoadClass::Secondary),
            EdgeSpec::new(3, 4, 100.0, RoadClass::Secondary),
        ];
        let net = RoadNetwork::new(&nodes, &edges).expect("valid");
        let part = DistrictPartitioner::new(
            &net,
            &[
                DistrictSpec::new("near", vec![6, 7, 8, 9, 6], 10),
                DistrictSpec::new("island", vec![5, 5, 5], 10),
            ],
        )
        .expect("valid");
        let aps = part.assembly_points(&[
            AssemblyPointSpec::new(2, 10, 100.0, 0.0),
            AssemblyPointSpec::new(3, 10, 200.0, 0.0),
            AssemblyPointSpec::new(4, 10, 300.0, 0.0),
        ]);
        RouteTableBuilder::new(&net, &part, &aps)
            .build()
            .expect("table")
    }

    fn filter(max_distance: f64) -> FeasibleSet {
        FeasibilityFilter::new(max_distance)
            .expect("bound")
            .filter(&table())
    }

    #[test]
    fn test_filter_by_bound() {
        let feasible = filter(200.0);
        assert_eq!(feasible.len(), 2);
        assert_eq!(feasible.get(0), &[2, 3]);
        assert!(feasible.contains(0, 3));
        assert!(!feasible.contains(0, 4));
    }

    #[test]
    fn test_bound_inclusive() {
        let feasible = filter(300.0);
        assert_eq!(feasible.get(0), &[2, 3, 4]);
    }

    #[test]
    fn test_unreachable_is_infeasible() {
        let feasible = filter(1e9);
        assert!(feasible.get(1).is_empty());
        assert_eq!(feasible.infeasible_districts(), vec![1]);
        assert!(feasible.get(7).is_empty());
    }

    #[test]
    fn test_iter() {
        let feasible = filter(100.0);
        let collected: Vec<_> = feasible.iter().map(|(q, s)| (q, s.to_vec())).collect();
        assert_eq!(collected, vec![(0, vec![2]), (1, vec![])]);
    }

    #[test]
    fn test_nan_bound_rejected() {
        for bound in [f64::NAN, f64::INFINITY, -1.0] {
            assert!(matches!(
                FeasibilityFilter::new(bound),
                Err(Error::Configuration(_))
            ));
        }
        assert!(FeasibilityFilter::new(0.0).is_ok());
    }
}
