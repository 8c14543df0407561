//! District classification of continuous-space points.

use tracing::{debug, trace};

use super::polygon;
use crate::config::{AssemblyPointSpec, DistrictSpec};
use crate::error::{Error, Result};
use crate::models::{AssemblyPoint, District, Point};
use crate::network::RoadNetwork;

/// Maps points to districts.
///
/// A point belongs to the first district (in configuration order) whose
/// polygon strictly contains it. Points inside no polygon, including points
/// exactly on a boundary, fall back to the district with the nearest
/// centroid, ties going to the lower index.
///
/// Every district's centroid is classified once at construction: the result
/// is its demand group. Districts sharing a group must be served by the same
/// assembly point.
///
/// # Examples
///
/// ```
/// use u_evac::models::Point;
/// use u_evac::partition::DistrictPartitioner;
/// use u_evac::provider::{DataProvider, SimulatedProvider};
/// use u_evac::network::RoadNetwork;
///
/// let provider = SimulatedProvider::new();
/// let (nodes, edges) = provider.load_network().unwrap();
/// let network = RoadNetwork::new(&nodes, &edges).unwrap();
/// let districts = provider.load_districts().unwrap();
///
/// let partitioner = DistrictPartitioner::new(&network, &districts).unwrap();
/// assert_eq!(partitioner.num_districts(), 4);
/// assert_eq!(partitioner.classify(Point::new(100.0, 100.0)), 0);
/// assert_eq!(partitioner.demand_groups(), &[0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct DistrictPartitioner {
    districts: Vec<District>,
    groups: Vec<usize>,
}

impl DistrictPartitioner {
    /// Derives district polygons and centroids from boundary node positions.
    ///
    /// An open boundary ring is closed implicitly. Fails with
    /// [`Error::Configuration`] if there are no districts, a boundary is
    /// empty, or it references a node missing from the network.
    pub fn new(network: &RoadNetwork, specs: &[DistrictSpec]) -> Result<Self> {
        if specs.is_empty() {
            return Err(Error::config("at least one district is required"));
        }

        let mut districts = Vec::with_capacity(specs.len());
        for (q, spec) in specs.iter().enumerate() {
            let mut boundary = spec.boundary.clone();
            if let (Some(&first), Some(&last)) = (boundary.first(), boundary.last()) {
                if first != last {
                    boundary.push(first);
                }
            }
            let ring = boundary
                .iter()
                .map(|&id| {
                    network.position(id).ok_or_else(|| {
                        Error::config(format!("district {q} references unknown node {id}"))
                    })
                })
                .collect::<Result<Vec<Point>>>()?;
            let centroid = polygon::centroid(&ring)
                .ok_or_else(|| Error::config(format!("district {q} has an empty boundary")))?;
            let name = if spec.name.is_empty() {
                format!("Q{}", q + 1)
            } else {
                spec.name.clone()
            };
            districts.push(District::new(q, name, boundary, spec.demand, ring, centroid));
        }

        let mut partitioner = Self {
            districts,
            groups: Vec::new(),
        };
        let groups = partitioner
            .districts
            .iter()
            .map(|d| partitioner.classify(d.centroid()))
            .collect();
        partitioner.groups = groups;

        debug!(
            districts = partitioner.districts.len(),
            groups = ?partitioner.groups,
            "built district partition"
        );
        Ok(partitioner)
    }

    /// The districts in configuration order.
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// Number of districts.
    pub fn num_districts(&self) -> usize {
        self.districts.len()
    }

    /// Centroid of district `q`.
    pub fn centroid(&self, q: usize) -> Option<Point> {
        self.districts.get(q).map(District::centroid)
    }

    /// Polygon of district `q`.
    pub fn polygon(&self, q: usize) -> Option<&[Point]> {
        self.districts.get(q).map(District::polygon)
    }

    /// Demand of every district, in index order.
    pub fn demands(&self) -> Vec<u32> {
        self.districts.iter().map(District::demand).collect()
    }

    /// Demand group of every district, in index order.
    pub fn demand_groups(&self) -> &[usize] {
        &self.groups
    }

    /// Index of the district containing `point`.
    pub fn classify(&self, point: Point) -> usize {
        if let Some(q) = self
            .districts
            .iter()
            .position(|d| polygon::contains_point(d.polygon(), point))
        {
            return q;
        }
        let q = self.nearest_centroid(point);
        trace!(x = point.x, y = point.y, district = q, "nearest-centroid fallback");
        q
    }

    fn nearest_centroid(&self, point: Point) -> usize {
        let mut best = (0, f64::INFINITY);
        for (q, district) in self.districts.iter().enumerate() {
            let d = district.centroid().distance_to(&point);
            if d < best.1 {
                best = (q, d);
            }
        }
        best.0
    }

    /// Resolves assembly point specs to assembly points with district membership.
    pub fn assembly_points(&self, specs: &[AssemblyPointSpec]) -> Vec<AssemblyPoint> {
        specs
            .iter()
            .map(|s| AssemblyPoint::new(s.id, s.capacity, s.position(), self.classify(s.position())))
            .collect()
    }
}
