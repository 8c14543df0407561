//! Feasibility and validity of assignments.
//!
//! - [`FeasibilityFilter`] — Prunes the route table to admissible assembly points per district
//! - [`AssignmentValidator`] — Checks capacity, district cohesion, and walking distance

mod feasibility;
mod validator;
mod violation;

pub(crate) use feasibility::check_max_distance;
pub use feasibility::{FeasibilityFilter, FeasibleSet};
pub use validator::AssignmentValidator;
pub use violation::{Constraint, Verdict, Violation, ViolationType};
