//! Route records between demand points and assembly points.

use serde::{Serialize, Serializer};

use super::{AssemblyId, NodeId};

/// The walking route from one district's demand point to one assembly point.
///
/// Unreachable pairs are recorded with `distance = +∞`, zero crossings and
/// no path. Serialized, that distance is the string `"inf"` since JSON has
/// no infinity.
///
/// # Examples
///
/// ```
/// use u_evac::models::Route;
///
/// let r = Route::new(0, 1, 300.0, 1, vec![7, 2, 1]);
/// assert!(r.is_reachable());
/// assert_eq!(r.path(), Some(&[7, 2, 1][..]));
///
/// let none = Route::unreachable(0, 5);
/// assert_eq!(none.distance(), f64::INFINITY);
/// assert_eq!(none.crossings(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    district: usize,
    assembly_id: AssemblyId,
    #[serde(serialize_with = "serialize_distance")]
    distance: f64,
    crossings: u32,
    path: Option<Vec<NodeId>>,
}

fn serialize_distance<S: Serializer>(distance: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if distance.is_finite() {
        serializer.serialize_f64(*distance)
    } else {
        serializer.serialize_str("inf")
    }
}

impl Route {
    /// Creates a route along `path`.
    pub fn new(
        district: usize,
        assembly_id: AssemblyId,
        distance: f64,
        crossings: u32,
        path: Vec<NodeId>,
    ) -> Self {
        Self {
            district,
            assembly_id,
            distance,
            crossings,
            path: Some(path),
        }
    }

    /// Creates the sentinel record for a disconnected pair.
    pub fn unreachable(district: usize, assembly_id: AssemblyId) -> Self {
        Self {
            district,
            assembly_id,
            distance: f64::INFINITY,
            crossings: 0,
            path: None,
        }
    }

    /// Demand (district) index.
    pub fn district(&self) -> usize {
        self.district
    }

    /// Destination assembly point.
    pub fn assembly_id(&self) -> AssemblyId {
        self.assembly_id
    }

    /// Shortest walking distance, `+∞` if unreachable.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of primary-road segments walked along.
    pub fn crossings(&self) -> u32 {
        self.crossings
    }

    /// Node sequence from the demand node to the assembly node.
    pub fn path(&self) -> Option<&[NodeId]> {
        self.path.as_deref()
    }

    /// Returns `true` if a path exists.
    pub fn is_reachable(&self) -> bool {
        self.path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_new() {
        let r = Route::new(2, 8, 450.0, 1, vec![17, 12, 13, 8]);
        assert_eq!(r.district(), 2);
        assert_eq!(r.assembly_id(), 8);
        assert_eq!(r.crossings(), 1);
        assert_eq!(r.path().map(|p| p.len()), Some(4));
    }

    #[test]
    fn test_route_unreachable() {
        let r = Route::unreachable(1, 16);
        assert!(!r.is_reachable());
        assert!(r.distance().is_infinite());
        assert!(r.path().is_none());
    }

    #[test]
    fn test_unreachable_serializes_distinctly() {
        let json = serde_json::to_value(Route::unreachable(0, 1)).expect("json");
        assert_eq!(json["distance"], "inf");
        assert!(json["path"].is_null());

        let json = serde_json::to_value(Route::new(0, 1, 300.0, 0, vec![7, 2, 1])).expect("json");
        assert_eq!(json["distance"], 300.0);
    }
}
