//! Core trait definitions and the [`Individual`] container.
//!
//! [`Genome`] and [`GenomeMaker`] define the contract between the generic
//! engine and the user's candidate-solution representation. The engine never
//! looks inside a genome: it only creates, evaluates, mutates, recombines and
//! clones it.

use rand::{Rng, RngCore};
use std::cmp::Ordering;

/// A candidate solution.
///
/// Lower fitness is considered better (minimization). For maximization
/// problems, negate the score.
///
/// # Implementing
///
/// ```
/// use rand::Rng;
/// use u_evolution::Genome;
///
/// #[derive(Clone)]
/// struct Point(Vec<f64>);
///
/// impl Genome for Point {
///     fn evaluate(&self) -> f64 {
///         self.0.iter().map(|x| x * x).sum()
///     }
///
///     fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
///         let i = rng.random_range(0..self.0.len());
///         self.0[i] += rng.random_range(-0.5..0.5);
///     }
/// }
/// ```
///
/// # Thread Safety
///
/// Genomes must be `Send + Sync` because populations evolve on rayon worker
/// threads.
pub trait Genome: Clone + Send + Sync {
    /// Computes the fitness of this genome.
    ///
    /// This is typically the most expensive operation and is called for
    /// every individual after each generation.
    fn evaluate(&self) -> f64;

    /// Mutates the genome in place.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng + ?Sized>(&mut self, _rng: &mut R) {}

    /// Recombines two parents into two offspring.
    ///
    /// The default implementation clones both parents (no crossover).
    fn crossover<R: Rng + ?Sized>(&self, other: &Self, _rng: &mut R) -> (Self, Self) {
        (self.clone(), other.clone())
    }
}

/// Factory producing random genomes.
///
/// Called once per individual by [`Ga::initialize`](crate::Ga::initialize),
/// plus once to build the placeholder best individual.
///
/// Any `Fn(&mut dyn RngCore) -> G` closure that is `Send + Sync` is a
/// `GenomeMaker`.
pub trait GenomeMaker<G: Genome>: Send + Sync {
    /// Creates a new random genome.
    fn make(&self, rng: &mut dyn RngCore) -> G;
}

impl<G, F> GenomeMaker<G> for F
where
    G: Genome,
    F: Fn(&mut dyn RngCore) -> G + Send + Sync,
{
    fn make(&self, rng: &mut dyn RngCore) -> G {
        self(rng)
    }
}

/// A genome together with its cached fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<G> {
    /// The candidate solution.
    pub genome: G,

    /// Fitness of `genome` at the last evaluation.
    ///
    /// `f64::INFINITY` until the individual is evaluated.
    pub fitness: f64,
}

impl<G: Genome> Individual<G> {
    /// Wraps a genome into an unevaluated individual.
    pub fn new(genome: G) -> Self {
        Self {
            genome,
            fitness: f64::INFINITY,
        }
    }

    /// Evaluates the genome and caches the result.
    pub fn evaluate(&mut self) {
        self.fitness = self.genome.evaluate();
    }

    /// Returns `true` once the individual carries a real fitness value.
    pub fn is_evaluated(&self) -> bool {
        self.fitness != f64::INFINITY
    }

    /// Mutates the genome. The cached fitness becomes stale.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.genome.mutate(rng);
    }

    /// Recombines with `other`, yielding two unevaluated offspring.
    pub fn crossover<R: Rng + ?Sized>(&self, other: &Self, rng: &mut R) -> (Self, Self) {
        let (a, b) = self.genome.crossover(&other.genome, rng);
        (Self::new(a), Self::new(b))
    }
}

/// Evaluates every individual.
pub fn evaluate_individuals<G: Genome>(individuals: &mut [Individual<G>]) {
    for ind in individuals.iter_mut() {
        ind.evaluate();
    }
}

/// Sorts individuals by ascending fitness (best first).
///
/// NaN fitness values sort after every number regardless of their sign bit.
pub fn sort_individuals<G>(individuals: &mut [Individual<G>]) {
    individuals.sort_by(|a, b| compare_fitness(a.fitness, b.fitness));
}

/// Returns `true` if the individuals are in ascending fitness order.
pub fn is_sorted<G>(individuals: &[Individual<G>]) -> bool {
    individuals
        .windows(2)
        .all(|w| compare_fitness(w[0].fitness, w[1].fitness) != Ordering::Greater)
}

/// Ascending order on fitness with every NaN placed after every number.
pub(crate) fn compare_fitness(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}
