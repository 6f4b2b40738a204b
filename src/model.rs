//! Evolution models: one generation's worth of operators.
//!
//! A [`Model`] receives the individuals of a population (or of one species
//! of a population) and replaces them with the next generation. The engine
//! re-evaluates and re-sorts afterward, so a model may leave stale fitness
//! values behind and may even change the number of individuals.

use crate::error::{GaError, Result};
use crate::selection::Selection;
use crate::types::{sort_individuals, Genome, Individual};
use rand::{Rng, RngCore};

/// Applies evolutionary operators to a group of individuals in place.
///
/// # Thread Safety
///
/// One model instance is shared by every population worker, hence the
/// `Send + Sync` bound. Per-call state must live on the stack or in `rng`.
pub trait Model<G: Genome>: Send + Sync {
    /// Evolves `individuals` by one generation.
    ///
    /// `individuals` is sorted best first on entry. It may be empty when a
    /// population has more species than individuals.
    fn apply(&self, individuals: &mut Vec<Individual<G>>, rng: &mut dyn RngCore);

    /// Checks the model's own parameters.
    ///
    /// Called by [`GaBuilder::validate`](crate::GaBuilder::validate).
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Generational replacement with elitism.
///
/// The best `elite_ratio` fraction is copied unchanged; the rest of the next
/// generation is bred from parents chosen by `selection`, recombined with
/// probability `crossover_rate` and mutated with probability
/// `mutation_rate`. The group size is preserved.
///
/// ```
/// use u_evolution::{Generational, Selection};
///
/// let model = Generational::default()
///     .with_selection(Selection::Tournament(5))
///     .with_mutation_rate(0.2);
/// assert!((model.crossover_rate - 0.9).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generational {
    /// Parent selection strategy.
    pub selection: Selection,

    /// Fraction of the group copied unchanged (0.0–1.0).
    pub elite_ratio: f64,

    /// Probability of recombining a pair of parents (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability of mutating an offspring (0.0–1.0).
    pub mutation_rate: f64,
}

impl Default for Generational {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            elite_ratio: 0.1,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
        }
    }
}

impl Generational {
    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }
}

fn check_rate(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GaError::InvalidModel(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

impl<G: Genome> Model<G> for Generational {
    fn apply(&self, individuals: &mut Vec<Individual<G>>, rng: &mut dyn RngCore) {
        let size = individuals.len();
        if size == 0 {
            return;
        }
        sort_individuals(individuals);

        let elite_count = ((size as f64 * self.elite_ratio) as usize).min(size);
        let mut next: Vec<Individual<G>> = Vec::with_capacity(size);
        next.extend_from_slice(&individuals[..elite_count]);

        while next.len() < size {
            let p1 = self.selection.select(&individuals[..], rng);
            let p2 = self.selection.select(&individuals[..], rng);

            let (c1, c2) = if rng.random_bool(self.crossover_rate) {
                individuals[p1].crossover(&individuals[p2], rng)
            } else {
                (individuals[p1].clone(), individuals[p2].clone())
            };

            for mut child in [c1, c2] {
                if next.len() >= size {
                    break;
                }
                if rng.random_bool(self.mutation_rate) {
                    child.mutate(rng);
                }
                next.push(child);
            }
        }

        *individuals = next;
    }

    fn validate(&self) -> Result<()> {
        if let Selection::Tournament(0) = self.selection {
            return Err(GaError::InvalidModel(
                "tournament size must be at least 1".into(),
            ));
        }
        check_rate("elite_ratio", self.elite_ratio)?;
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::types::evaluate_individuals;

    #[derive(Clone, Debug, PartialEq)]
    struct Value(f64);

    impl Genome for Value {
        fn evaluate(&self) -> f64 {
            self.0.abs()
        }

        fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
            self.0 += rng.random_range(-1.0..1.0);
        }

        fn crossover<R: Rng + ?Sized>(&self, other: &Self, _rng: &mut R) -> (Self, Self) {
            let mid = (self.0 + other.0) / 2.0;
            (Value(mid), Value(mid))
        }
    }

    fn evaluated(values: &[f64]) -> Vec<Individual<Value>> {
        let mut inds: Vec<Individual<Value>> =
            values.iter().map(|&v| Individual::new(Value(v))).collect();
        evaluate_individuals(&mut inds);
        sort_individuals(&mut inds);
        inds
    }

    fn validate(model: &Generational) -> Result<()> {
        <Generational as Model<Value>>::validate(model)
    }

    #[test]
    fn test_default_model() {
        let model = Generational::default();
        assert_eq!(model.selection, Selection::Tournament(3));
        assert!((model.elite_ratio - 0.1).abs() < 1e-12);
        assert!((model.mutation_rate - 0.1).abs() < 1e-12);
        assert!(validate(&model).is_ok());
    }

    #[test]
    fn test_size_preserved_odd() {
        let model = Generational::default();
        let mut rng = create_rng(42);
        let mut inds = evaluated(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        model.apply(&mut inds, &mut rng);
        assert_eq!(inds.len(), 7);
    }

    #[test]
    fn test_elites_kept() {
        let model = Generational::default()
            .with_elite_ratio(0.2)
            .with_mutation_rate(1.0);
        let mut rng = create_rng(42);
        let mut inds = evaluated(&[9.0, 0.5, 3.0, 7.0, 1.0, 4.0, 8.0, 2.0, 6.0, 5.0]);
        model.apply(&mut inds, &mut rng);
        assert_eq!(inds[0].genome, Value(0.5));
        assert_eq!(inds[1].genome, Value(1.0));
        assert!((inds[0].fitness - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_is_noop() {
        let model = Generational::default();
        let mut rng = create_rng(42);
        let mut inds: Vec<Individual<Value>> = Vec::new();
        model.apply(&mut inds, &mut rng);
        assert!(inds.is_empty());
    }

    #[test]
    fn test_single_individual() {
        let model = Generational::default().with_elite_ratio(0.0);
        let mut rng = create_rng(42);
        let mut inds = evaluated(&[3.0]);
        model.apply(&mut inds, &mut rng);
        assert_eq!(inds.len(), 1);
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        assert!(validate(&Generational::default().with_mutation_rate(1.5)).is_err());
        assert!(validate(&Generational::default().with_crossover_rate(-0.1)).is_err());
        assert!(validate(&Generational::default().with_elite_ratio(2.0)).is_err());
        assert!(validate(&Generational::default().with_mutation_rate(f64::NAN)).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_tournament() {
        let err = validate(&Generational::default().with_selection(Selection::Tournament(0)))
            .unwrap_err();
        assert!(matches!(err, GaError::InvalidModel(_)));
    }

    #[test]
    fn test_improves_over_generations() {
        let model = Generational::default().with_mutation_rate(0.5);
        let mut rng = create_rng(7);
        let mut inds = evaluated(&[8.0, -6.0, 5.0, 9.0, -7.0, 4.0, 6.0, -5.0, 7.0, 10.0]);
        let initial_best = inds[0].fitness;
        for _ in 0..30 {
            model.apply(&mut inds, &mut rng);
            evaluate_individuals(&mut inds);
            sort_individuals(&mut inds);
        }
        assert!(inds[0].fitness <= initial_best);
    }
}
