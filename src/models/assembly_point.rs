//! Assembly point type.

use super::{AssemblyId, Point};

/// A designated evacuation destination with finite capacity.
///
/// Capacity and district membership are fixed once the model is built.
///
/// # Examples
///
/// ```
/// use u_evac::models::{AssemblyPoint, Point};
///
/// let p = AssemblyPoint::new(5, 550, Point::new(600.0, 0.0), 1);
/// assert_eq!(p.id(), 5);
/// assert_eq!(p.capacity(), 550);
/// assert_eq!(p.district(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyPoint {
    id: usize,
    capacity: u32,
    position: Point,
    district: usize,
}

impl AssemblyPoint {
    /// Creates an assembly point belonging to the district at index `district`.
    pub fn new(id: usize, capacity: u32, position: Point, district: usize) -> Self {
        Self {
            id,
            capacity,
            position,
            district,
        }
    }

    /// Assembly point ID.
    pub fn id(&self) -> AssemblyId {
        self.id
    }

    /// Maximum number of evacuees.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Location.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Index of the district containing this point.
    pub fn district(&self) -> usize {
        self.district
    }
}
