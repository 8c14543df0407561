//! Assignment validator.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::Result;
use crate::models::{AssemblyId, AssemblyPoint, Assignment};
use crate::partition::DistrictPartitioner;
use crate::routing::RouteTable;

use super::{check_max_distance, Verdict, Violation, ViolationType};

/// Checks an assignment against capacity, district cohesion, and walking
/// distance, in that order. Every violation is reported; checking does not
/// stop at the first failure.
///
/// # Examples
///
/// ```
/// use u_evac::evaluation::{AssignmentValidator, Constraint};
/// use u_evac::models::Assignment;
/// use u_evac::plan::EvacuationPlan;
/// use u_evac::provider::{DataProvider, SimulatedProvider};
///
/// let config = SimulatedProvider::new().load_config(700.0, 10).unwrap();
/// let plan = EvacuationPlan::build(&config).unwrap();
/// let validator = plan.validator()?;
///
/// assert!(validator.validate(&Assignment::new(vec![1, 5, 16, 18])).is_valid());
///
/// // 350 + 320 at assembly point 1 (capacity 610)
/// let verdict = validator.validate(&Assignment::new(vec![1, 1, 16, 18]));
/// assert_eq!(verdict.failed_constraints(), vec![Constraint::Capacity]);
/// # Ok::<(), u_evac::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentValidator<'a> {
    capacities: HashMap<AssemblyId, u32>,
    demands: Vec<u32>,
    groups: &'a [usize],
    table: &'a RouteTable,
    max_distance: f64,
}

impl<'a> AssignmentValidator<'a> {
    /// Creates a validator.
    ///
    /// Fails with [`Error::Configuration`](crate::Error::Configuration) if
    /// `max_distance` is negative or not finite.
    pub fn new(
        partitioner: &'a DistrictPartitioner,
        assembly_points: &[AssemblyPoint],
        table: &'a RouteTable,
        max_distance: f64,
    ) -> Result<Self> {
        check_max_distance(max_distance)?;
        Ok(Self {
            capacities: assembly_points
                .iter()
                .map(|p| (p.id(), p.capacity()))
                .collect(),
            demands: partitioner.demands(),
            groups: partitioner.demand_groups(),
            table,
            max_distance,
        })
    }

    /// Walking bound.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Summed demand per assembly point, ascending by id. Genes beyond the
    /// district count are ignored.
    pub fn loads(&self, assignment: &Assignment) -> BTreeMap<AssemblyId, u64> {
        let mut loads = BTreeMap::new();
        for (q, &id) in assignment.genes().iter().enumerate().take(self.demands.len()) {
            *loads.entry(id).or_insert(0) += u64::from(self.demands[q]);
        }
        loads
    }

    /// Validates all constraints and reports every violation.
    pub fn validate(&self, assignment: &Assignment) -> Verdict {
        let mut violations = Vec::new();

        if assignment.len() != self.demands.len() {
            violations.push(Violation::new(ViolationType::LengthMismatch {
                expected: self.demands.len(),
                actual: assignment.len(),
            }));
        }
        let genes = &assignment.genes()[..assignment.len().min(self.demands.len())];
        for (q, &id) in genes.iter().enumerate() {
            if !self.capacities.contains_key(&id) {
                violations.push(Violation::new(ViolationType::UnknownAssemblyPoint {
                    district: q,
                    assembly_id: id,
                }));
            }
        }

        // Capacity
        for (id, load) in self.loads(assignment) {
            if let Some(&capacity) = self.capacities.get(&id) {
                if load > u64::from(capacity) {
                    violations.push(Violation::new(ViolationType::CapacityExceeded {
                        assembly_id: id,
                        load,
                        capacity,
                    }));
                }
            }
        }

        // District cohesion
        let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (q, &group) in self.groups.iter().enumerate().take(genes.len()) {
            members.entry(group).or_default().push(q);
        }
        for (group, districts) in members {
            let assigned: BTreeSet<AssemblyId> = districts.iter().map(|&q| genes[q]).collect();
            if assigned.len() > 1 {
                violations.push(Violation::new(ViolationType::ConflictingDistrict {
                    group,
                    districts,
                    assembly_ids: assigned.into_iter().collect(),
                }));
            }
        }

        // Walking distance
        for (q, &id) in genes.iter().enumerate() {
            if !self.capacities.contains_key(&id) {
                continue;
            }
            let distance = self.table.distance(q, id);
            if distance > self.max_distance {
                violations.push(Violation::new(ViolationType::MaxDistanceExceeded {
                    district: q,
                    assembly_id: id,
                    distance,
                    max_distance: self.max_distance,
                }));
            }
        }

        Verdict::new(violations)
    }

    /// Shorthand for `validate(assignment).is_valid()`.
    pub fn is_valid(&self, assignment: &Assignment) -> bool {
        self.validate(assignment).is_valid()
    }
}
