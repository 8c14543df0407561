//! # u-evac
//!
//! Evacuation assignment library: routes residential demand to capacity-limited
//! assembly points over a road network, subject to a walking-distance bound
//! and district grouping.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Point, Edge, District, AssemblyPoint, Route, Assignment)
//! - [`config`] — Immutable input configuration
//! - [`network`] — Road network graph
//! - [`partition`] — District polygons, centroids, and point classification
//! - [`routing`] — Dijkstra shortest paths and the dense route table
//! - [`evaluation`] — Feasible sets and assignment validation
//! - [`population`] — Randomized, retry-bounded population seeding
//! - [`provider`] — JSON-file and simulated data providers
//! - [`plan`] — End-to-end pipeline

pub mod config;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod network;
pub mod partition;
pub mod plan;
pub mod population;
pub mod provider;
pub mod routing;

pub use error::{Error, Result};
