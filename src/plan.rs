//! End-to-end evacuation pipeline.

use tracing::info;

use crate::config::{EvacuationConfig, GeneratorConfig};
use crate::error::Result;
use crate::evaluation::{AssignmentValidator, FeasibilityFilter, FeasibleSet};
use crate::models::{AssemblyId, AssemblyPoint};
use crate::network::RoadNetwork;
use crate::partition::DistrictPartitioner;
use crate::population::{Population, PopulationGenerator};
use crate::routing::{RouteTable, RouteTableBuilder, RoutingEngine};

/// All derived data for one configuration: network, districts, assembly
/// points, route table, and feasible sets.
///
/// Everything is computed once in [`build`](Self::build) and is read-only
/// afterwards.
///
/// # Examples
///
/// ```
/// use u_evac::config::GeneratorConfig;
/// use u_evac::plan::EvacuationPlan;
/// use u_evac::provider::{DataProvider, SimulatedProvider};
///
/// let config = SimulatedProvider::new().load_config(700.0, 10).unwrap();
/// let plan = EvacuationPlan::build(&config).unwrap();
/// assert_eq!(plan.route_table().records().len(), 4 * 5);
///
/// let population = plan.generate(&GeneratorConfig::default().with_population_size(10))?;
/// assert_eq!(population.num_valid(), 10);
/// # Ok::<(), u_evac::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct EvacuationPlan {
    network: RoadNetwork,
    partitioner: DistrictPartitioner,
    assembly_points: Vec<AssemblyPoint>,
    table: RouteTable,
    feasible: FeasibleSet,
    max_walking_distance: f64,
    population_size: usize,
}

impl EvacuationPlan {
    /// Validates the configuration and derives every table.
    pub fn build(config: &EvacuationConfig) -> Result<Self> {
        config.validate()?;
        let network = RoadNetwork::new(&config.nodes, &config.edges)?;
        let partitioner = DistrictPartitioner::new(&network, &config.districts)?;
        let assembly_points = partitioner.assembly_points(&config.assembly_points);

        let builder = RouteTableBuilder::new(&network, &partitioner, &assembly_points);
        #[cfg(feature = "parallel")]
        let table = builder.build_parallel()?;
        #[cfg(not(feature = "parallel"))]
        let table = builder.build()?;

        let feasible = FeasibilityFilter::new(config.max_walking_distance)?.filter(&table);
        info!(
            districts = partitioner.num_districts(),
            assembly_points = assembly_points.len(),
            infeasible = feasible.infeasible_districts().len(),
            "evacuation plan ready"
        );

        Ok(Self {
            network,
            partitioner,
            assembly_points,
            table,
            feasible,
            max_walking_distance: config.max_walking_distance,
            population_size: config.population_size,
        })
    }

    /// The road network.
    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    /// A routing engine over the network.
    pub fn engine(&self) -> RoutingEngine<'_> {
        RoutingEngine::new(&self.network)
    }

    /// District partition.
    pub fn partitioner(&self) -> &DistrictPartitioner {
        &self.partitioner
    }

    /// Assembly points with district membership, in configuration order.
    pub fn assembly_points(&self) -> &[AssemblyPoint] {
        &self.assembly_points
    }

    /// Assembly ids, ascending.
    pub fn assembly_ids(&self) -> &[AssemblyId] {
        self.table.assembly_ids()
    }

    /// Dense route table.
    pub fn route_table(&self) -> &RouteTable {
        &self.table
    }

    /// Admissible assembly points per district.
    pub fn feasible_set(&self) -> &FeasibleSet {
        &self.feasible
    }

    /// Walking bound (dmax).
    pub fn max_walking_distance(&self) -> f64 {
        self.max_walking_distance
    }

    /// A validator over this plan's data.
    pub fn validator(&self) -> Result<AssignmentValidator<'_>> {
        AssignmentValidator::new(
            &self.partitioner,
            &self.assembly_points,
            &self.table,
            self.max_walking_distance,
        )
    }

    /// A population generator using `validator`.
    pub fn generator<'s>(
        &'s self,
        validator: &'s AssignmentValidator<'s>,
        config: GeneratorConfig,
    ) -> Result<PopulationGenerator<'s>> {
        PopulationGenerator::new(
            &self.feasible,
            validator,
            self.table.assembly_ids(),
            self.partitioner.demand_groups(),
            config,
        )
    }

    /// Generator settings with this plan's population size.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::default().with_population_size(self.population_size)
    }

    /// Generates a population seeded from `config.seed`.
    pub fn generate(&self, config: &GeneratorConfig) -> Result<Population> {
        let validator = self.validator()?;
        let generator = self.generator(&validator, config.clone())?;
        let mut rng = u_numflow::random::create_rng(config.seed);
        Ok(generator.generate(&mut rng))
    }
}
