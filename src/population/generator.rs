//! Randomized construction of valid assignments.
//!
//! Each individual is built district by district: a district whose demand
//! group already has an assembly point reuses it, otherwise one is drawn
//! uniformly from its feasible set, or from all assembly points when the
//! feasible set is empty. The candidate is validated and the whole
//! construction retried until it is valid or the retry budget runs out, in
//! which case the last candidate is kept and flagged as degraded.

use std::collections::HashMap;

use rand::Rng;
use tracing::{debug, trace, warn};

use super::{Individual, Population};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::evaluation::{AssignmentValidator, FeasibleSet};
use crate::models::{AssemblyId, Assignment};

/// Generates a population of assignments.
///
/// Every individual draws its own seed from the injected random source and
/// builds from a private RNG, so the population depends only on the master
/// seed and inputs, and is identical with or without parallel construction.
///
/// # Examples
///
/// ```
/// use u_evac::config::GeneratorConfig;
/// use u_evac::plan::EvacuationPlan;
/// use u_evac::provider::{DataProvider, SimulatedProvider};
///
/// let config = SimulatedProvider::new().load_config(700.0, 8).unwrap();
/// let plan = EvacuationPlan::build(&config).unwrap();
/// let validator = plan.validator()?;
/// let generator = plan.generator(&validator, GeneratorConfig::default().with_population_size(8))?;
///
/// let mut rng = u_numflow::random::create_rng(42);
/// let population = generator.generate(&mut rng);
/// assert_eq!(population.len(), 8);
/// assert_eq!(population.num_valid(), 8);
/// # Ok::<(), u_evac::Error>(())
/// ```
pub struct PopulationGenerator<'a> {
    feasible: &'a FeasibleSet,
    validator: &'a AssignmentValidator<'a>,
    assembly_ids: Vec<AssemblyId>,
    groups: &'a [usize],
    config: GeneratorConfig,
}

impl<'a> PopulationGenerator<'a> {
    /// Creates a generator.
    ///
    /// `assembly_ids` is the fallback pool for infeasible districts and
    /// `groups` the demand group of each district. An empty pool is a
    /// [`Error::Configuration`].
    pub fn new(
        feasible: &'a FeasibleSet,
        validator: &'a AssignmentValidator<'a>,
        assembly_ids: &[AssemblyId],
        groups: &'a [usize],
        config: GeneratorConfig,
    ) -> Result<Self> {
        if assembly_ids.is_empty() {
            return Err(Error::config("at least one assembly point is required"));
        }
        let mut assembly_ids = assembly_ids.to_vec();
        assembly_ids.sort_unstable();
        assembly_ids.dedup();
        Ok(Self {
            feasible,
            validator,
            assembly_ids,
            groups,
            config,
        })
    }

    /// Generator parameters.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates `population_size` individuals.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Population {
        let seeds: Vec<u64> = (0..self.config.population_size)
            .map(|_| rng.random::<u64>())
            .collect();

        let individuals = self.build_all(seeds);
        let population = Population::new(individuals);
        debug!(
            size = population.len(),
            valid = population.num_valid(),
            degraded = population.num_degraded(),
            "generated population"
        );
        population
    }

    #[cfg(feature = "parallel")]
    fn build_all(&self, seeds: Vec<u64>) -> Vec<Individual> {
        use rayon::prelude::*;

        if self.config.parallel {
            seeds
                .into_par_iter()
                .enumerate()
                .map(|(i, seed)| self.build_individual(i, seed))
                .collect()
        } else {
            self.build_sequential(seeds)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn build_all(&self, seeds: Vec<u64>) -> Vec<Individual> {
        self.build_sequential(seeds)
    }

    fn build_sequential(&self, seeds: Vec<u64>) -> Vec<Individual> {
        seeds
            .into_iter()
            .enumerate()
            .map(|(i, seed)| self.build_individual(i, seed))
            .collect()
    }

    /// Builds one individual from its own seed.
    pub fn build_individual(&self, index: usize, seed: u64) -> Individual {
        let mut rng = u_numflow::random::create_rng(seed);
        let max_attempts = self.config.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;
            let candidate = self.construct(&mut rng);
            let verdict = self.validator.validate(&candidate);
            if verdict.is_valid() {
                trace!(individual = index, attempts = attempt, "valid assignment");
                return Individual::new(candidate, verdict, attempt);
            }
            if attempt >= max_attempts {
                warn!(
                    individual = index,
                    attempts = attempt,
                    failed = ?verdict.failed_constraints(),
                    "population degraded: no valid assignment within retry budget"
                );
                return Individual::new(candidate, verdict, attempt);
            }
        }
    }

    /// Draws one candidate assignment.
    pub fn construct<R: Rng>(&self, rng: &mut R) -> Assignment {
        let n = self.groups.len();
        let mut chosen: HashMap<usize, AssemblyId> = HashMap::with_capacity(n);
        let mut genes = Vec::with_capacity(n);

        for (q, &group) in self.groups.iter().enumerate() {
            let id = match chosen.get(&group) {
                Some(&id) => id,
                None => {
                    let options = match self.feasible.get(q) {
                        [] => self.assembly_ids.as_slice(),
                        set => set,
                    };
                    let id = options[rng.random_range(0..options.len())];
                    chosen.insert(group, id);
                    id
                }
            };
            genes.push(id);
        }
        Assignment::new(genes)
    }
}
