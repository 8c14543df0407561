//! Input configuration.
//!
//! The configuration is a plain, immutable value object built by a
//! [`DataProvider`](crate::provider::DataProvider) or by hand and passed to
//! component constructors. Nothing here is global.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::evaluation::check_max_distance;
use crate::models::{AssemblyId, NodeId, Point, RoadClass};

/// A road-network node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Node identifier.
    pub id: NodeId,
    /// X-coordinate.
    pub x: f64,
    /// Y-coordinate.
    pub y: f64,
}

impl NodeSpec {
    /// Creates a node spec.
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Node position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A road segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    /// First endpoint.
    pub from: NodeId,
    /// Second endpoint.
    pub to: NodeId,
    /// Walking length, must be positive.
    pub weight: f64,
    /// Primary or secondary road.
    #[serde(default)]
    pub class: RoadClass,
}

impl EdgeSpec {
    /// Creates an edge spec.
    pub fn new(from: NodeId, to: NodeId, weight: f64, class: RoadClass) -> Self {
        Self {
            from,
            to,
            weight,
            class,
        }
    }
}

/// A district boundary and its demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictSpec {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Closed ring of boundary node ids (first == last).
    pub boundary: Vec<NodeId>,
    /// Number of evacuees.
    pub demand: u32,
}

impl DistrictSpec {
    /// Creates a district spec.
    pub fn new(name: impl Into<String>, boundary: Vec<NodeId>, demand: u32) -> Self {
        Self {
            name: name.into(),
            boundary,
            demand,
        }
    }
}

/// An assembly point candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyPointSpec {
    /// Assembly point identifier.
    pub id: AssemblyId,
    /// Capacity, must be positive.
    pub capacity: u32,
    /// X-coordinate.
    pub x: f64,
    /// Y-coordinate.
    pub y: f64,
}

impl AssemblyPointSpec {
    /// Creates an assembly point spec.
    pub fn new(id: AssemblyId, capacity: u32, x: f64, y: f64) -> Self {
        Self { id, capacity, x, y }
    }

    /// Location.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Complete evacuation model input.
///
/// # Examples
///
/// ```
/// use u_evac::provider::{DataProvider, SimulatedProvider};
///
/// let config = SimulatedProvider::new().load_config(700.0, 20).unwrap();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.districts.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvacuationConfig {
    /// Network nodes.
    pub nodes: Vec<NodeSpec>,
    /// Network edges.
    pub edges: Vec<EdgeSpec>,
    /// Districts, in demand-index order.
    pub districts: Vec<DistrictSpec>,
    /// Assembly point candidates.
    pub assembly_points: Vec<AssemblyPointSpec>,
    /// Maximum walking distance (dmax).
    pub max_walking_distance: f64,
    /// Number of assignments to generate.
    pub population_size: usize,
}

impl EvacuationConfig {
    /// Checks every input constraint, failing on the first violation.
    ///
    /// Network-level checks (unknown edge endpoints, weights, self-loops)
    /// are repeated by [`RoadNetwork::new`](crate::network::RoadNetwork::new).
    pub fn validate(&self) -> Result<()> {
        check_max_distance(self.max_walking_distance)?;
        if self.population_size == 0 {
            return Err(Error::config("population size must be positive"));
        }
        if self.districts.is_empty() {
            return Err(Error::config("at least one district is required"));
        }
        if self.assembly_points.is_empty() {
            return Err(Error::config("at least one assembly point is required"));
        }

        let node_ids: HashSet<NodeId> = self.nodes.iter().map(|n| n.id).collect();
        if node_ids.len() != self.nodes.len() {
            return Err(Error::config("duplicate node id"));
        }
        for edge in &self.edges {
            for id in [edge.from, edge.to] {
                if !node_ids.contains(&id) {
                    return Err(Error::config(format!("edge references unknown node {id}")));
                }
            }
        }
        for (q, district) in self.districts.iter().enumerate() {
            if let Some(id) = district.boundary.iter().find(|id| !node_ids.contains(id)) {
                return Err(Error::config(format!(
                    "district {q} references unknown node {id}"
                )));
            }
        }

        let mut seen = HashSet::new();
        for point in &self.assembly_points {
            if !seen.insert(point.id) {
                return Err(Error::config(format!(
                    "duplicate assembly point id {}",
                    point.id
                )));
            }
            if point.capacity == 0 {
                return Err(Error::config(format!(
                    "assembly point {} must have positive capacity",
                    point.id
                )));
            }
            if !point.position().is_finite() {
                return Err(Error::config(format!(
                    "assembly point {} has a non-finite position",
                    point.id
                )));
            }
        }
        Ok(())
    }
}

/// Parameters of the population generator.
///
/// # Examples
///
/// ```
/// use u_evac::config::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_population_size(50)
///     .with_seed(7);
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_attempts, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of individuals to produce.
    pub population_size: usize,
    /// Construction attempts per individual before accepting an invalid one.
    pub max_attempts: usize,
    /// Seed of the master random source.
    pub seed: u64,
    /// Build individuals on the rayon pool.
    pub parallel: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            max_attempts: 100,
            seed: 42,
            parallel: false,
        }
    }
}

impl GeneratorConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the per-individual retry budget.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> EvacuationConfig {
        EvacuationConfig {
            nodes: vec![
                NodeSpec::new(1, 0.0, 0.0),
                NodeSpec::new(2, 1.0, 0.0),
                NodeSpec::new(3, 1.0, 1.0),
            ],
            edges: vec![
                EdgeSpec::new(1, 2, 1.0, RoadClass::Secondary),
                EdgeSpec::new(2, 3, 1.0, RoadClass::Primary),
            ],
            districts: vec![DistrictSpec::new("A", vec![1, 2, 3, 1], 10)],
            assembly_points: vec![AssemblyPointSpec::new(1, 20, 1.0, 1.0)],
            max_walking_distance: 5.0,
            population_size: 3,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(tiny().validate().is_ok());
    }

    #[test]
    fn test_validate_unknown_edge_node() {
        let mut c = tiny();
        c.edges.push(EdgeSpec::new(3, 9, 1.0, RoadClass::Secondary));
        assert!(matches!(c.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_validate_unknown_boundary_node() {
        let mut c = tiny();
        c.districts[0].boundary = vec![1, 2, 42, 1];
        assert!(matches!(c.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_validate_zero_capacity() {
        let mut c = tiny();
        c.assembly_points[0].capacity = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate_assembly_id() {
        let mut c = tiny();
        c.assembly_points.push(AssemblyPointSpec::new(1, 5, 0.0, 0.0));
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_bad_dmax() {
        let mut c = tiny();
        c.max_walking_distance = f64::NAN;
        assert!(c.validate().is_err());
        c.max_walking_distance = -1.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_empty_population() {
        let mut c = tiny();
        c.population_size = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_edge_class_defaults_to_secondary() {
        let e: EdgeSpec =
            serde_json::from_str(r#"{"from": 1, "to": 2, "weight": 3.5}"#).expect("valid");
        assert_eq!(e.class, RoadClass::Secondary);
    }

    #[test]
    fn test_generator_config_builder() {
        let g = GeneratorConfig::default()
            .with_population_size(5)
            .with_max_attempts(3)
            .with_seed(9)
            .with_parallel(true);
        assert_eq!(g.population_size, 5);
        assert_eq!(g.max_attempts, 3);
        assert_eq!(g.seed, 9);
        assert!(g.parallel);
    }
}
