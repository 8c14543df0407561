//! Input data providers.
//!
//! - [`DataProvider`] — Loads the network, districts, and assembly points
//! - [`JsonFileProvider`] — Reads a JSON document from disk
//! - [`SimulatedProvider`] — Built-in 5×5 grid dataset
//!
//! Choosing a provider, and falling back from one to another, is left to
//! the caller.

mod json;
mod simulated;

pub use json::{JsonFileProvider, NetworkDocument};
pub use simulated::SimulatedProvider;

use crate::config::{AssemblyPointSpec, DistrictSpec, EdgeSpec, EvacuationConfig, NodeSpec};
use crate::error::Result;

/// A source of evacuation model input.
pub trait DataProvider {
    /// Network nodes and edges.
    fn load_network(&self) -> Result<(Vec<NodeSpec>, Vec<EdgeSpec>)>;

    /// District boundaries and demands, in demand-index order.
    fn load_districts(&self) -> Result<Vec<DistrictSpec>>;

    /// Assembly point candidates.
    fn load_assembly_points(&self) -> Result<Vec<AssemblyPointSpec>>;

    /// Loads everything and validates it into a configuration.
    fn load_config(
        &self,
        max_walking_distance: f64,
        population_size: usize,
    ) -> Result<EvacuationConfig> {
        let (nodes, edges) = self.load_network()?;
        let config = EvacuationConfig {
            nodes,
            edges,
            districts: self.load_districts()?,
            assembly_points: self.load_assembly_points()?,
            max_walking_distance,
            population_size,
        };
        config.validate()?;
        Ok(config)
    }
}
