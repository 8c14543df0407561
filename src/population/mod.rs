//! Population seeding of feasible assignments.
//!
//! - [`PopulationGenerator`] — Randomized, retry-bounded construction of valid assignments
//! - [`Individual`] — One assignment with its verdict and degraded-mode flag
//! - [`Population`] — The ordered set of generated individuals

mod generator;
mod individual;

pub use generator::PopulationGenerator;
pub use individual::{Individual, Population};
