//! Populations and their summary statistics.

use crate::random::{create_rng, EngineRng};
use crate::species::Species;
use crate::types::{evaluate_individuals, sort_individuals, Genome, GenomeMaker, Individual};
use std::time::Duration;

/// An independently evolving collection of individuals.
///
/// Each population owns its own random number generator, so populations can
/// evolve on separate threads without sharing any mutable state.
///
/// After every `initialize` / `enhance` step the individuals are sorted by
/// ascending fitness: `individuals[0]` is the best one.
#[derive(Debug, Clone)]
pub struct Population<G> {
    /// Position of this population inside the engine.
    pub id: usize,

    /// Individuals, best first once evaluated and sorted.
    pub individuals: Vec<Individual<G>>,

    /// Accumulated wall-clock time spent evolving this population.
    pub age: Duration,

    /// Number of generations this population went through.
    pub generations: usize,

    pub(crate) rng: EngineRng,
}

impl<G: Genome> Population<G> {
    /// Creates a population from existing individuals.
    pub fn new(id: usize, individuals: Vec<Individual<G>>, seed: u64) -> Self {
        Self {
            id,
            individuals,
            age: Duration::ZERO,
            generations: 0,
            rng: create_rng(seed),
        }
    }

    /// Creates `size` unevaluated individuals with `maker`, drawing from a
    /// generator seeded with `seed`.
    pub fn generate(id: usize, size: usize, maker: &dyn GenomeMaker<G>, seed: u64) -> Self {
        let mut pop = Self::new(id, Vec::with_capacity(size), seed);
        for _ in 0..size {
            let genome = maker.make(&mut pop.rng);
            pop.individuals.push(Individual::new(genome));
        }
        pop
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if the population holds no individual.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Best individual, assuming the population is sorted.
    pub fn best(&self) -> Option<&Individual<G>> {
        self.individuals.first()
    }

    /// Evaluates every individual.
    pub fn evaluate(&mut self) {
        evaluate_individuals(&mut self.individuals);
    }

    /// Sorts individuals by ascending fitness.
    pub fn sort(&mut self) {
        sort_individuals(&mut self.individuals);
    }

    /// Moves the individuals out into `species_count` species.
    ///
    /// The population is left empty until the species are merged back with
    /// [`Species::merge`].
    pub fn speciate(&mut self, species_count: usize) -> Species<G> {
        Species::partition(std::mem::take(&mut self.individuals), species_count)
    }

    /// Summary statistics of the current fitness values.
    ///
    /// Returns `None` for an empty population.
    pub fn stats(&self) -> Option<PopulationStats> {
        PopulationStats::compute(self)
    }
}

/// Fitness summary of a population at one point in time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationStats {
    pub id: usize,
    pub size: usize,
    pub generations: usize,
    pub age: Duration,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl PopulationStats {
    fn compute<G>(pop: &Population<G>) -> Option<Self> {
        if pop.individuals.is_empty() {
            return None;
        }
        let n = pop.individuals.len() as f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for ind in &pop.individuals {
            min = min.min(ind.fitness);
            max = max.max(ind.fitness);
            sum += ind.fitness;
        }
        let mean = sum / n;
        let variance = pop
            .individuals
            .iter()
            .map(|ind| (ind.fitness - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            id: pop.id,
            size: pop.individuals.len(),
            generations: pop.generations,
            age: pop.age,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}
