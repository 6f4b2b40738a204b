//! Multi-population orchestration.
//!
//! [`Ga`] drives the generational loop:
//! initialize → (migrate → evolve → evaluate → sort → track best) per step.
//!
//! Population work fans out on rayon, one task per population. Each task
//! holds the only `&mut` to its population, so no locking is needed; the
//! completion of the parallel iterator is the barrier. Migration and best
//! tracking run on the calling thread, between two barriers.

use crate::config::{check_migration_frequency, GaConfig};
use crate::error::Result;
use crate::logging::{log_population, PopulationLogger};
use crate::migration::Migrator;
use crate::model::Model;
use crate::population::Population;
use crate::random::{child_seeds, create_rng_from, EngineRng};
use crate::topology::Topology;
use crate::types::{Genome, GenomeMaker, Individual};
use rayon::prelude::*;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Summary of a [`Ga::run`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionReport {
    /// Fitness of the best individual after the last generation.
    pub best_fitness: f64,

    /// Value of the engine's generation counter at the end of the run.
    pub generations: usize,

    /// Total wall-clock time spent in `enhance` so far.
    pub age: Duration,

    /// Best fitness before the first step and after each step.
    pub fitness_history: Vec<f64>,
}

/// The evolutionary engine.
///
/// Built by [`GaBuilder`](crate::GaBuilder). Holds no population until
/// [`initialize`](Ga::initialize) is called.
pub struct Ga<G: Genome> {
    topology: Topology,
    config: GaConfig,
    maker: Box<dyn GenomeMaker<G>>,
    model: Box<dyn Model<G>>,
    migrator: Option<Box<dyn Migrator<G>>>,
    logger: Option<Box<dyn PopulationLogger<G>>>,

    populations: Vec<Population<G>>,
    best: Option<Individual<G>>,
    age: Duration,
    generations: usize,
    rng: EngineRng,
}

impl<G: Genome> Ga<G> {
    pub(crate) fn from_parts(
        topology: Topology,
        config: GaConfig,
        maker: Box<dyn GenomeMaker<G>>,
        model: Box<dyn Model<G>>,
        migrator: Option<Box<dyn Migrator<G>>>,
        logger: Option<Box<dyn PopulationLogger<G>>>,
    ) -> Self {
        let rng = create_rng_from(config.seed);
        Self {
            topology,
            config,
            maker,
            model,
            migrator,
            logger,
            populations: Vec::new(),
            best: None,
            age: Duration::ZERO,
            generations: 0,
            rng,
        }
    }

    /// Re-checks the topology, the model and the migration frequency.
    pub fn validate(&self) -> Result<()> {
        self.topology.validate()?;
        self.model.validate()?;
        if self.migrator.is_some() {
            check_migration_frequency(self.config.migration_frequency)?;
        }
        Ok(())
    }

    /// Creates and evaluates every population, then finds the best
    /// individual.
    ///
    /// Calling this again discards all progress: populations, best
    /// individual, age and generation counter are reset, and the master
    /// generator is re-seeded.
    pub fn initialize(&mut self) {
        let start = Instant::now();
        self.rng = create_rng_from(self.config.seed);
        self.generations = 0;
        self.age = Duration::ZERO;

        let seeds = child_seeds(&mut self.rng, self.topology.population_count);
        let size = self.topology.individual_count;
        let maker: &dyn GenomeMaker<G> = &*self.maker;
        let logger = self.logger.as_deref();

        let spawn = |(id, seed): (usize, u64)| {
            let mut pop = Population::generate(id, size, maker, seed);
            pop.evaluate();
            pop.sort();
            if let Some(logger) = logger {
                log_population(logger, &pop);
            }
            pop
        };

        self.populations = if self.config.parallel {
            seeds.into_par_iter().enumerate().map(spawn).collect()
        } else {
            seeds.into_iter().enumerate().map(spawn).collect()
        };

        // Placeholder with infinitely bad fitness; any evaluated individual
        // replaces it.
        self.best = Some(Individual::new(self.maker.make(&mut self.rng)));
        self.find_best();

        debug!(
            populations = self.populations.len(),
            individuals = size,
            best_fitness = self.best_fitness(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "initialized"
        );
    }

    /// Runs one generation on every population.
    ///
    /// Does nothing but log a warning if [`initialize`](Ga::initialize) has
    /// not run yet. Panics raised by the model, the migrator or the genome
    /// propagate to the caller.
    pub fn enhance(&mut self) {
        if self.populations.is_empty() {
            warn!("enhance called before initialize, ignoring");
            return;
        }

        let start = Instant::now();
        self.generations += 1;

        if self.migrates_on(self.generations) {
            if let Some(migrator) = self.migrator.as_deref() {
                debug!(generation = self.generations, "migrating");
                migrator.apply(&mut self.populations, &mut self.rng);
            }
        }

        let species_count = self
            .topology
            .speciated()
            .then_some(self.topology.species_count);
        let model: &dyn Model<G> = &*self.model;
        let logger = self.logger.as_deref();
        let evolve = |pop: &mut Population<G>| {
            evolve_population(pop, model, species_count, logger, start);
        };

        if self.config.parallel {
            self.populations.par_iter_mut().for_each(evolve);
        } else {
            self.populations.iter_mut().for_each(evolve);
        }

        self.find_best();
        self.age += start.elapsed();

        debug!(
            generation = self.generations,
            best_fitness = self.best_fitness(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "generation complete"
        );
    }

    /// Initializes if needed, then runs `generations` steps.
    pub fn run(&mut self, generations: usize) -> EvolutionReport {
        if self.populations.is_empty() {
            self.initialize();
        }

        let mut fitness_history = Vec::with_capacity(generations + 1);
        fitness_history.push(self.best_fitness());
        for _ in 0..generations {
            self.enhance();
            fitness_history.push(self.best_fitness());
        }

        EvolutionReport {
            best_fitness: self.best_fitness(),
            generations: self.generations,
            age: self.age,
            fitness_history,
        }
    }

    /// Returns `true` if migration happens on generation `generation`.
    ///
    /// Requires more than one population, a migrator, and `generation` to be
    /// a multiple of the migration frequency.
    pub fn migrates_on(&self, generation: usize) -> bool {
        self.migrator.is_some()
            && self.topology.population_count > 1
            && self.config.migration_frequency > 0
            && generation % self.config.migration_frequency == 0
    }

    /// Replaces the global best with any strictly better population leader.
    ///
    /// Populations are sorted, so only index 0 of each needs checking.
    fn find_best(&mut self) {
        for pop in &self.populations {
            let Some(candidate) = pop.best() else {
                continue;
            };
            let improved = match &self.best {
                Some(best) => candidate.fitness < best.fitness,
                None => true,
            };
            if improved {
                info!(
                    population = pop.id,
                    generation = self.generations,
                    fitness = candidate.fitness,
                    "new best individual"
                );
                self.best = Some(candidate.clone());
            }
        }
    }

    /// The populations, each sorted best first.
    pub fn populations(&self) -> &[Population<G>] {
        &self.populations
    }

    /// Best individual found since the last `initialize`.
    pub fn best(&self) -> Option<&Individual<G>> {
        self.best.as_ref()
    }

    /// Fitness of [`best`](Ga::best), `f64::INFINITY` before `initialize`.
    pub fn best_fitness(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |b| b.fitness)
    }

    /// Total wall-clock time spent in `enhance`.
    pub fn age(&self) -> Duration {
        self.age
    }

    /// Number of `enhance` steps since the last `initialize`.
    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }
}

/// One generation of a single population: evolve, evaluate, sort,
/// bookkeeping, log. Never reordered.
fn evolve_population<G: Genome>(
    pop: &mut Population<G>,
    model: &dyn Model<G>,
    species_count: Option<usize>,
    logger: Option<&dyn PopulationLogger<G>>,
    start: Instant,
) {
    if let Some(count) = species_count {
        let mut species = pop.speciate(count);
        for group in species.groups_mut() {
            model.apply(group, &mut pop.rng);
        }
        pop.individuals = species.merge();
    } else {
        model.apply(&mut pop.individuals, &mut pop.rng);
    }

    pop.evaluate();
    pop.sort();
    pop.age += start.elapsed();
    pop.generations += 1;

    if let Some(logger) = logger {
        log_population(logger, pop);
    }
}

impl<G: Genome> fmt::Debug for Ga<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ga")
            .field("topology", &self.topology)
            .field("config", &self.config)
            .field("populations", &self.populations.len())
            .field("best_fitness", &self.best_fitness())
            .field("age", &self.age)
            .field("generations", &self.generations)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
