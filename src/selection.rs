//! Parent selection strategies used by the [`Generational`](crate::Generational) model.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use crate::types::{compare_fitness, Individual};
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// All strategies assume minimization (lower fitness = better).
///
/// ```
/// use u_evolution::Selection;
///
/// let sel = Selection::Tournament(3);
/// assert_eq!(sel, Selection::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Pick `k` individuals uniformly at random, keep the best.
    ///
    /// Higher `k` means stronger selection pressure.
    Tournament(usize),

    /// Fitness-proportionate selection on inverted fitness
    /// (`max - f + epsilon`).
    Roulette,

    /// Linear ranking: weight `n - rank`, best rank is 0.
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index.
    ///
    /// # Panics
    /// Panics if `individuals` is empty.
    pub fn select<G, R: Rng + ?Sized>(&self, individuals: &[Individual<G>], rng: &mut R) -> usize {
        assert!(
            !individuals.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(individuals, *k, rng),
            Selection::Roulette => roulette(individuals, rng),
            Selection::Rank => rank(individuals, rng),
        }
    }
}

fn tournament<G, R: Rng + ?Sized>(individuals: &[Individual<G>], k: usize, rng: &mut R) -> usize {
    let n = individuals.len();
    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if individuals[idx].fitness < individuals[best_idx].fitness {
            best_idx = idx;
        }
    }
    best_idx
}

fn roulette<G, R: Rng + ?Sized>(individuals: &[Individual<G>], rng: &mut R) -> usize {
    let n = individuals.len();
    if n == 1 {
        return 0;
    }

    let epsilon = 1e-10;
    let max_fitness = individuals
        .iter()
        .map(|ind| ind.fitness)
        .filter(|f| f.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max_fitness.is_finite() {
        return rng.random_range(0..n);
    }

    // Unevaluated or NaN individuals get the minimum weight; a weight that
    // overflows saturates at f64::MAX.
    let mut weights: Vec<f64> = individuals
        .iter()
        .map(|ind| {
            let w = max_fitness - ind.fitness + epsilon;
            if w > 0.0 {
                w.min(f64::MAX)
            } else {
                epsilon
            }
        })
        .collect();

    let mut total: f64 = weights.iter().sum();
    if !total.is_finite() {
        let scale = 2.0 * n as f64;
        for w in weights.iter_mut() {
            *w /= scale;
        }
        total = weights.iter().sum();
    }
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1
}

fn rank<G, R: Rng + ?Sized>(individuals: &[Individual<G>], rng: &mut R) -> usize {
    let n = individuals.len();
    if n == 1 {
        return 0;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| compare_fitness(individuals[a].fitness, individuals[b].fitness));

    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (rank, &idx) in order.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return idx;
        }
    }

    order[n - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Vec<Individual<()>> {
        fitnesses
            .iter()
            .map(|&f| Individual {
                genome: (),
                fitness: f,
            })
            .collect()
    }

    fn counts(sel: Selection, pop: &[Individual<()>]) -> Vec<u32> {
        let mut rng = create_rng(42);
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..10_000 {
            counts[sel.select(pop, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let counts = counts(Selection::Tournament(4), &pop);
        assert!(counts[2] > 6000, "best selected {} times", counts[2]);
    }

    #[test]
    fn test_tournament_size_1_is_uniform() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let counts = counts(Selection::Tournament(1), &pop);
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let counts = counts(Selection::Roulette, &pop);
        assert!(counts[2] > counts[0]);
    }

    #[test]
    fn test_roulette_unevaluated_population() {
        let pop = make_population(&[f64::INFINITY, f64::INFINITY]);
        let mut rng = create_rng(42);
        let idx = Selection::Roulette.select(&pop, &mut rng);
        assert!(idx < 2);
    }

    #[test]
    fn test_roulette_overflowing_weight_favors_best() {
        let pop = make_population(&[f64::MAX, -f64::MAX]);
        let counts = counts(Selection::Roulette, &pop);
        assert!(counts[1] > 9900, "best selected {} times", counts[1]);
    }

    #[test]
    fn test_roulette_overflowing_total_favors_best() {
        let pop = make_population(&[f64::MAX, -f64::MAX, -f64::MAX]);
        let counts = counts(Selection::Roulette, &pop);
        assert!(counts[0] < 100, "worst selected {} times", counts[0]);
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let counts = counts(Selection::Rank, &pop);
        assert!(counts[2] > counts[0]);
    }

    #[test]
    fn test_rank_negative_nan_ranked_last() {
        let nan = -f64::NAN;
        let pop = make_population(&[nan, 1.0, 2.0]);
        let counts = counts(Selection::Rank, &pop);
        assert!(counts[1] > counts[0]);
        assert!(counts[2] > counts[0]);
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);
        assert_eq!(Selection::Tournament(3).select(&pop, &mut rng), 0);
        assert_eq!(Selection::Roulette.select(&pop, &mut rng), 0);
        assert_eq!(Selection::Rank.select(&pop, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Individual<()>> = vec![];
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&pop, &mut rng);
    }
}
