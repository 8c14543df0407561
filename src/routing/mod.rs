//! Shortest walking routes over the road network.
//!
//! - [`RoutingEngine`] — Dijkstra shortest path with primary-road crossing count
//! - [`RouteTableBuilder`] — Dense demand-point × assembly-point [`RouteTable`]

mod engine;
mod queue;
mod table;

pub use engine::{PathResult, RoutingEngine};
pub use table::{RouteTable, RouteTableBuilder};
