//! Migration policies: exchange of individuals between populations.
//!
//! Migration keeps island populations from converging on separate local
//! optima. The engine calls the migrator on the orchestrating thread, before
//! any population worker starts the generation, so a migrator always sees
//! every population at once.

use crate::population::Population;
use crate::types::Genome;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Moves individuals across populations.
///
/// Implementations must preserve the total number of individuals. Moved
/// individuals keep their cached fitness; populations are re-sorted after
/// the model runs, not after migration.
pub trait Migrator<G: Genome>: Send + Sync {
    /// Exchanges individuals between `populations`.
    fn apply(&self, populations: &mut [Population<G>], rng: &mut dyn RngCore);
}

/// Pools every individual, shuffles the pool and deals it back.
///
/// Each population keeps its size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shuffle;

impl<G: Genome> Migrator<G> for Shuffle {
    fn apply(&self, populations: &mut [Population<G>], rng: &mut dyn RngCore) {
        let sizes: Vec<usize> = populations.iter().map(Population::len).collect();
        let mut pool = Vec::with_capacity(sizes.iter().sum());
        for pop in populations.iter_mut() {
            pool.append(&mut pop.individuals);
        }
        pool.shuffle(rng);

        let mut rest = pool.into_iter();
        for (pop, size) in populations.iter_mut().zip(sizes) {
            pop.individuals.extend(rest.by_ref().take(size));
        }
    }
}

/// Ring migration: the `count` best individuals of population `i` move to
/// population `(i + 1) % n`.
///
/// Sizes are preserved as long as every population holds at least `count`
/// individuals; a smaller population sends all it has. Populations are
/// assumed sorted (best first), which holds between two engine generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    /// Number of emigrants per population.
    pub count: usize,
}

impl Ring {
    /// Creates a ring migrator moving `count` individuals per population.
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl Default for Ring {
    fn default() -> Self {
        Self { count: 1 }
    }
}

impl<G: Genome> Migrator<G> for Ring {
    fn apply(&self, populations: &mut [Population<G>], _rng: &mut dyn RngCore) {
        let n = populations.len();
        if n < 2 || self.count == 0 {
            return;
        }

        let emigrants: Vec<Vec<_>> = populations
            .iter_mut()
            .map(|pop| {
                let k = self.count.min(pop.individuals.len());
                pop.individuals.drain(..k).collect()
            })
            .collect();

        for (i, group) in emigrants.into_iter().enumerate() {
            populations[(i + 1) % n].individuals.extend(group);
        }
    }
}
