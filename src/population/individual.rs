//! Generated individuals and populations.

use serde::Serialize;

use crate::evaluation::Verdict;
use crate::models::Assignment;
use crate::routing::RouteTable;

/// One generated assignment.
///
/// A degraded individual exhausted its retry budget without reaching a
/// valid assignment; it carries the last attempt and its violations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Individual {
    assignment: Assignment,
    verdict: Verdict,
    attempts: usize,
    degraded: bool,
}

impl Individual {
    pub(crate) fn new(assignment: Assignment, verdict: Verdict, attempts: usize) -> Self {
        let degraded = !verdict.is_valid();
        Self {
            assignment,
            verdict,
            attempts,
            degraded,
        }
    }

    /// The assignment chromosome.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Validation verdict of the assignment.
    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    /// Returns `true` if the assignment satisfies every constraint.
    pub fn is_valid(&self) -> bool {
        self.verdict.is_valid()
    }

    /// Returns `true` if the retry budget ran out.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Construction attempts used.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

/// An ordered population of individuals.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    pub(crate) fn new(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// All individuals, in generation order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Iterates the individuals.
    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    /// Population size.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns true if the population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Number of valid individuals.
    pub fn num_valid(&self) -> usize {
        self.individuals.iter().filter(|i| i.is_valid()).count()
    }

    /// Number of degraded individuals.
    pub fn num_degraded(&self) -> usize {
        self.individuals.iter().filter(|i| i.is_degraded()).count()
    }

    /// The valid individual with the smallest total walking distance.
    ///
    /// Ties go to the earlier individual.
    pub fn best_by_distance(&self, table: &RouteTable) -> Option<&Individual> {
        let mut best: Option<(&Individual, f64)> = None;
        for ind in self.individuals.iter().filter(|i| i.is_valid()) {
            let d = ind.assignment().total_distance(table);
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((ind, d)),
            }
        }
        best.map(|(ind, _)| ind)
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}
