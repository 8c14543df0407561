//! District partitioning.
//!
//! - [`polygon`] — Shoelace area and centroid, ray-casting containment
//! - [`DistrictPartitioner`] — Maps demand centroids and assembly points to districts

pub mod polygon;
mod partitioner;

pub use partitioner::DistrictPartitioner;
