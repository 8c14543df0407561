//! JSON file provider.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DataProvider;
use crate::config::{AssemblyPointSpec, DistrictSpec, EdgeSpec, NodeSpec};
use crate::error::Result;

/// On-disk layout of the model input.
///
/// ```json
/// {
///   "nodes": [{"id": 1, "x": 0.0, "y": 0.0}],
///   "edges": [{"from": 1, "to": 2, "weight": 150.0, "class": "primary"}],
///   "districts": [{"name": "Q1", "boundary": [1, 2, 7, 6, 1], "demand": 350}],
///   "assembly_points": [{"id": 1, "capacity": 610, "x": 0.0, "y": 0.0}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkDocument {
    /// Network nodes.
    pub nodes: Vec<NodeSpec>,
    /// Network edges.
    pub edges: Vec<EdgeSpec>,
    /// Districts.
    pub districts: Vec<DistrictSpec>,
    /// Assembly points.
    pub assembly_points: Vec<AssemblyPointSpec>,
}

/// Provider backed by a [`NetworkDocument`] parsed from JSON.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    document: NetworkDocument,
}

impl JsonFileProvider {
    /// Reads and parses a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(&path)?;
        let provider = Self::from_json(&text)?;
        debug!(path = %path.as_ref().display(), "loaded network document");
        Ok(provider)
    }

    /// Parses a JSON string.
    pub fn from_json(text: &str) -> Result<Self> {
        let document = serde_json::from_str(text)?;
        Ok(Self { document })
    }

    /// The parsed document.
    pub fn document(&self) -> &NetworkDocument {
        &self.document
    }
}

impl DataProvider for JsonFileProvider {
    fn load_network(&self) -> Result<(Vec<NodeSpec>, Vec<EdgeSpec>)> {
        Ok((self.document.nodes.clone(), self.document.edges.clone()))
    }

    fn load_districts(&self) -> Result<Vec<DistrictSpec>> {
        Ok(self.document.districts.clone())
    }

    fn load_assembly_points(&self) -> Result<Vec<AssemblyPointSpec>> {
        Ok(self.document.assembly_points.clone())
    }
}
