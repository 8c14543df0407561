//! Assignment chromosome.
//!
//! An assignment encodes a candidate evacuation plan as one gene per
//! district: position `q` holds the id of the assembly point serving
//! district `q`.

use serde::Serialize;

use super::AssemblyId;
use crate::routing::RouteTable;

/// A complete mapping from every district to one assembly point.
///
/// # Examples
///
/// ```
/// use u_evac::models::Assignment;
///
/// let a = Assignment::new(vec![1, 5, 16, 18]);
/// assert_eq!(a.len(), 4);
/// assert_eq!(a.get(2), Some(16));
/// assert_eq!(a.districts_served_by(5), vec![1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Assignment {
    genes: Vec<AssemblyId>,
}

impl Assignment {
    /// Creates an assignment from one assembly id per district.
    pub fn new(genes: Vec<AssemblyId>) -> Self {
        Self { genes }
    }

    /// Returns the assembly id per district.
    pub fn genes(&self) -> &[AssemblyId] {
        &self.genes
    }

    /// Assembly point serving `district`, if in range.
    pub fn get(&self, district: usize) -> Option<AssemblyId> {
        self.genes.get(district).copied()
    }

    /// Number of districts covered.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns true if the assignment covers no district.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// District indices sent to the given assembly point, ascending.
    pub fn districts_served_by(&self, assembly_id: AssemblyId) -> Vec<usize> {
        self.genes
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a == assembly_id)
            .map(|(q, _)| q)
            .collect()
    }

    /// Sum of route distances over all districts (`+∞` if any pair is unrouted).
    pub fn total_distance(&self, table: &RouteTable) -> f64 {
        self.genes
            .iter()
            .enumerate()
            .map(|(q, &a)| table.distance(q, a))
            .sum()
    }

    /// Sum of primary-road crossings over all districts.
    pub fn total_crossings(&self, table: &RouteTable) -> u32 {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(q, &a)| table.get(q, a))
            .map(|r| r.crossings())
            .sum()
    }
}

impl From<Vec<AssemblyId>> for Assignment {
    fn from(genes: Vec<AssemblyId>) -> Self {
        Self::new(genes)
    }
}
