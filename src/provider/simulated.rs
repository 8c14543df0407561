//! Built-in simulated dataset.

use super::DataProvider;
use crate::config::{AssemblyPointSpec, DistrictSpec, EdgeSpec, NodeSpec};
use crate::error::Result;
use crate::models::{NodeId, RoadClass};

const GRID: usize = 5;
const SPACING: f64 = 150.0;

/// A 5×5 street grid with four quadrant districts and five assembly points.
///
/// Nodes are numbered 1..=25 row by row from the origin, 150 m apart.
/// The middle row and the middle column are primary roads. Districts
/// Q1..Q4 are the 2×2-block quadrants with demands 350, 320, 460, 500;
/// assembly points sit on nodes 1, 5, 8, 16, 18 with capacities 610, 550,
/// 800, 870, 900.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedProvider;

impl SimulatedProvider {
    /// Creates the provider.
    pub fn new() -> Self {
        Self
    }

    /// Node id at grid `(col, row)`.
    pub fn node_at(col: usize, row: usize) -> NodeId {
        row * GRID + col + 1
    }

    fn position(id: NodeId) -> (f64, f64) {
        let i = id - 1;
        ((i % GRID) as f64 * SPACING, (i / GRID) as f64 * SPACING)
    }

    /// Closed ring around the 2×2 block whose lower-left corner is `(col, row)`.
    fn quadrant(col: usize, row: usize) -> Vec<NodeId> {
        let at = Self::node_at;
        vec![
            at(col, row),
            at(col + 1, row),
            at(col + 2, row),
            at(col + 2, row + 1),
            at(col + 2, row + 2),
            at(col + 1, row + 2),
            at(col, row + 2),
            at(col, row + 1),
            at(col, row),
        ]
    }
}

impl DataProvider for SimulatedProvider {
    fn load_network(&self) -> Result<(Vec<NodeSpec>, Vec<EdgeSpec>)> {
        let middle = GRID / 2;
        let nodes = (1..=GRID * GRID)
            .map(|id| {
                let (x, y) = Self::position(id);
                NodeSpec::new(id, x, y)
            })
            .collect();

        let mut edges = Vec::new();
        for row in 0..GRID {
            for col in 0..GRID {
                let id = Self::node_at(col, row);
                if col + 1 < GRID {
                    let class = if row == middle {
                        RoadClass::Primary
                    } else {
                        RoadClass::Secondary
                    };
                    edges.push(EdgeSpec::new(id, Self::node_at(col + 1, row), SPACING, class));
                }
                if row + 1 < GRID {
                    let class = if col == middle {
                        RoadClass::Primary
                    } else {
                        RoadClass::Secondary
                    };
                    edges.push(EdgeSpec::new(id, Self::node_at(col, row + 1), SPACING, class));
                }
            }
        }
        Ok((nodes, edges))
    }

    fn load_districts(&self) -> Result<Vec<DistrictSpec>> {
        Ok(vec![
            DistrictSpec::new("Q1", Self::quadrant(0, 0), 350),
            DistrictSpec::new("Q2", Self::quadrant(2, 0), 320),
            DistrictSpec::new("Q3", Self::quadrant(0, 2), 460),
            DistrictSpec::new("Q4", Self::quadrant(2, 2), 500),
        ])
    }

    fn load_assembly_points(&self) -> Result<Vec<AssemblyPointSpec>> {
        Ok([(1, 610), (5, 550), (8, 800), (16, 870), (18, 900)]
            .into_iter()
            .map(|(id, capacity)| {
                let (x, y) = Self::position(id);
                AssemblyPointSpec::new(id, capacity, x, y)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape() {
        let (nodes, edges) = SimulatedProvider::new().load_network().expect("grid");
        assert_eq!(nodes.len(), 25);
        assert_eq!(edges.len(), 40);
        let primary = edges.iter().filter(|e| e.class == RoadClass::Primary).count();
        assert_eq!(primary, 8);
    }

    #[test]
    fn test_node_numbering() {
        assert_eq!(SimulatedProvider::node_at(0, 0), 1);
        assert_eq!(SimulatedProvider::node_at(4, 0), 5);
        assert_eq!(SimulatedProvider::node_at(2, 1), 8);
        assert_eq!(SimulatedProvider::position(18), (300.0, 450.0));
    }

    #[test]
    fn test_quadrants() {
        let districts = SimulatedProvider::new().load_districts().expect("districts");
        assert_eq!(districts[0].boundary, vec![1, 2, 3, 8, 13, 12, 11, 6, 1]);
        assert_eq!(districts[3].boundary, vec![13, 14, 15, 20, 25, 24, 23, 18, 13]);
        let demands: Vec<u32> = districts.iter().map(|d| d.demand).collect();
        assert_eq!(demands, vec![350, 320, 460, 500]);
    }

    #[test]
    fn test_config_valid() {
        let config = SimulatedProvider::new().load_config(700.0, 10).expect("config");
        assert_eq!(config.assembly_points.len(), 5);
        assert_eq!(config.assembly_points[2].capacity, 800);
    }
}
