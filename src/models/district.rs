//! Residential districts with evacuation demand.

use super::{NodeId, Point};

/// A district: a closed polygon of network nodes with a population to evacuate.
///
/// The polygon and centroid are derived from the boundary node positions by
/// the [`DistrictPartitioner`](crate::partition::DistrictPartitioner).
#[derive(Debug, Clone, PartialEq)]
pub struct District {
    index: usize,
    name: String,
    boundary: Vec<NodeId>,
    demand: u32,
    polygon: Vec<Point>,
    centroid: Point,
}

impl District {
    pub(crate) fn new(
        index: usize,
        name: String,
        boundary: Vec<NodeId>,
        demand: u32,
        polygon: Vec<Point>,
        centroid: Point,
    ) -> Self {
        Self {
            index,
            name,
            boundary,
            demand,
            polygon,
            centroid,
        }
    }

    /// Position of this district in the configuration (also its demand index).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Display name (e.g. `"Q1"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Closed boundary ring of node ids (first == last).
    pub fn boundary(&self) -> &[NodeId] {
        &self.boundary
    }

    /// Number of people to evacuate.
    pub fn demand(&self) -> u32 {
        self.demand
    }

    /// Closed polygon of boundary node positions.
    pub fn polygon(&self) -> &[Point] {
        &self.polygon
    }

    /// Area-weighted centroid, the demand point of this district.
    pub fn centroid(&self) -> Point {
        self.centroid
    }
}
