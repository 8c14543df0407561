//! Priority entry for the Dijkstra frontier.

use std::cmp::Ordering;

use crate::models::NodeId;

/// Frontier entry ordered for a max-heap so the cheapest node pops first.
///
/// Equal costs pop in ascending node id, which fixes tie-breaking among
/// equal-length paths.
#[derive(Debug, Clone, Copy)]
pub(super) struct QueueEntry {
    pub(super) cost: f64,
    pub(super) node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Note that the order is reversed compared to the natural ordering.
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.cost.total_cmp(&self.cost) {
            Ordering::Equal => other.node.cmp(&self.node),
            s => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_cheapest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry { cost: 3.0, node: 1 });
        heap.push(QueueEntry { cost: 1.0, node: 9 });
        heap.push(QueueEntry { cost: 2.0, node: 4 });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|e| e.node).collect();
        assert_eq!(order, vec![9, 4, 1]);
    }

    #[test]
    fn test_ties_lowest_node_first() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry { cost: 1.0, node: 7 });
        heap.push(QueueEntry { cost: 1.0, node: 2 });
        heap.push(QueueEntry { cost: 1.0, node: 5 });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|e| e.node).collect();
        assert_eq!(order, vec![2, 5, 7]);
    }
}
