//! Violation and verdict types.

use serde::Serialize;

use crate::models::AssemblyId;

/// The constraint family a violation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Constraint {
    /// Assignment shape: length and known assembly ids.
    Structure,
    /// Summed demand within assembly point capacity.
    Capacity,
    /// Districts of one demand group share an assembly point.
    Cohesion,
    /// Route distance within the walking bound.
    WalkingDistance,
}

/// A type of constraint violation in an assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViolationType {
    /// The assignment does not cover exactly one gene per district.
    LengthMismatch {
        /// Number of districts.
        expected: usize,
        /// Assignment length.
        actual: usize,
    },
    /// A gene names an assembly point that does not exist.
    UnknownAssemblyPoint {
        /// District index.
        district: usize,
        /// Offending id.
        assembly_id: AssemblyId,
    },
    /// Summed demand at an assembly point exceeds its capacity.
    CapacityExceeded {
        /// Overloaded assembly point.
        assembly_id: AssemblyId,
        /// Summed demand.
        load: u64,
        /// Capacity.
        capacity: u32,
    },
    /// Districts of one demand group are split across assembly points.
    ConflictingDistrict {
        /// Demand group (district index the members classify into).
        group: usize,
        /// Member district indices.
        districts: Vec<usize>,
        /// Distinct assembly ids assigned to the members, ascending.
        assembly_ids: Vec<AssemblyId>,
    },
    /// Walking distance exceeds the bound.
    MaxDistanceExceeded {
        /// District index.
        district: usize,
        /// Assigned assembly point.
        assembly_id: AssemblyId,
        /// Route distance (`+∞` if unreachable).
        distance: f64,
        /// Maximum allowed distance.
        max_distance: f64,
    },
}

/// A constraint violation in an assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }

    /// The constraint this violation breaks.
    pub fn constraint(&self) -> Constraint {
        match self.kind {
            ViolationType::LengthMismatch { .. } | ViolationType::UnknownAssemblyPoint { .. } => {
                Constraint::Structure
            }
            ViolationType::CapacityExceeded { .. } => Constraint::Capacity,
            ViolationType::ConflictingDistrict { .. } => Constraint::Cohesion,
            ViolationType::MaxDistanceExceeded { .. } => Constraint::WalkingDistance,
        }
    }
}

/// Outcome of validating one assignment: valid iff no violations.
///
/// # Examples
///
/// ```
/// use u_evac::evaluation::{Constraint, Verdict, Violation, ViolationType};
///
/// let ok = Verdict::new(vec![]);
/// assert!(ok.is_valid());
///
/// let bad = Verdict::new(vec![Violation::new(ViolationType::CapacityExceeded {
///     assembly_id: 5,
///     load: 551,
///     capacity: 550,
/// })]);
/// assert!(!bad.is_valid());
/// assert_eq!(bad.failed_constraints(), vec![Constraint::Capacity]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Verdict {
    violations: Vec<Violation>,
}

impl Verdict {
    /// Creates a verdict from the collected violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns `true` if every constraint holds.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// All violations, in check order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Distinct failed constraints, sorted.
    pub fn failed_constraints(&self) -> Vec<Constraint> {
        let mut c: Vec<_> = self.violations.iter().map(Violation::constraint).collect();
        c.sort();
        c.dedup();
        c
    }

    /// Returns `true` if the given constraint failed.
    pub fn failed(&self, constraint: Constraint) -> bool {
        self.violations.iter().any(|v| v.constraint() == constraint)
    }
}
