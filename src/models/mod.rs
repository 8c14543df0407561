//! Domain model types for evacuation assignment.
//!
//! Provides the core abstractions: points and road edges of the network,
//! districts with evacuation demand, assembly points with capacity, routes
//! between them, and the assignment chromosome that maps every district to
//! one assembly point.

mod assembly_point;
mod assignment;
mod district;
mod edge;
mod point;
mod route;

pub use assembly_point::AssemblyPoint;
pub use assignment::Assignment;
pub use district::District;
pub(crate) use edge::normalize;
pub use edge::{Edge, RoadClass};
pub use point::Point;
pub use route::Route;

/// Identifier of a road-network node.
pub type NodeId = usize;

/// Identifier of an assembly point.
pub type AssemblyId = usize;
