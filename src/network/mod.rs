//! Road network graph.
//!
//! - [`RoadNetwork`] — Immutable undirected graph of walkable roads with
//!   primary/secondary classification

mod road_network;

pub use road_network::RoadNetwork;
