//! Engine configuration and the builder that validates it.
//!
//! [`GaConfig`] holds the plain runtime parameters; [`GaBuilder`] gathers
//! them together with the [`Topology`] and the user collaborators, validates
//! everything in a fixed order and produces a ready-to-run [`Ga`].

use crate::error::{GaError, Result};
use crate::logging::PopulationLogger;
use crate::migration::Migrator;
use crate::model::Model;
use crate::runner::Ga;
use crate::topology::Topology;
use crate::types::{Genome, GenomeMaker};
use std::fmt;

/// Runtime parameters of the engine.
///
/// # Defaults
///
/// ```
/// use u_evolution::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.migration_frequency, 10);
/// assert!(config.parallel);
/// assert!(config.seed.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Migration happens on every generation divisible by this value.
    ///
    /// Only meaningful when a migrator is configured, in which case it must
    /// be at least 1.
    pub migration_frequency: usize,

    /// Whether populations evolve in parallel using rayon.
    ///
    /// Sequential execution runs exactly the same per-population steps.
    pub parallel: bool,

    /// Master random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            migration_frequency: 10,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the migration frequency.
    pub fn with_migration_frequency(mut self, frequency: usize) -> Self {
        self.migration_frequency = frequency;
        self
    }

    /// Enables or disables parallel population evolution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the master random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Collects the engine's configuration and collaborators.
///
/// # Usage
///
/// ```
/// use rand::{Rng, RngCore};
/// use u_evolution::{GaBuilder, Generational, Genome, Shuffle, Topology};
///
/// #[derive(Clone)]
/// struct Scalar(f64);
///
/// impl Genome for Scalar {
///     fn evaluate(&self) -> f64 {
///         self.0.abs()
///     }
///
///     fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
///         self.0 += rng.random_range(-1.0..1.0);
///     }
/// }
///
/// let mut ga = GaBuilder::new(Topology::new(2, 0, 20))
///     .with_genome_maker(|rng: &mut dyn RngCore| Scalar(rng.random_range(-10.0..10.0)))
///     .with_model(Generational::default())
///     .with_migrator(Shuffle)
///     .with_migration_frequency(5)
///     .with_seed(42)
///     .build()
///     .expect("valid configuration");
///
/// ga.initialize();
/// ga.enhance();
/// assert_eq!(ga.generations(), 1);
/// ```
pub struct GaBuilder<G: Genome> {
    topology: Topology,
    config: GaConfig,
    maker: Option<Box<dyn GenomeMaker<G>>>,
    model: Option<Box<dyn Model<G>>>,
    migrator: Option<Box<dyn Migrator<G>>>,
    logger: Option<Box<dyn PopulationLogger<G>>>,
}

impl<G: Genome> GaBuilder<G> {
    /// Starts a builder with the given topology and default [`GaConfig`].
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            config: GaConfig::default(),
            maker: None,
            model: None,
            migrator: None,
            logger: None,
        }
    }

    /// Replaces the runtime parameters.
    pub fn with_config(mut self, config: GaConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the genome factory.
    pub fn with_genome_maker(mut self, maker: impl GenomeMaker<G> + 'static) -> Self {
        self.maker = Some(Box::new(maker));
        self
    }

    /// Sets the evolution model.
    pub fn with_model(mut self, model: impl Model<G> + 'static) -> Self {
        self.model = Some(Box::new(model));
        self
    }

    /// Sets the migrator.
    pub fn with_migrator(mut self, migrator: impl Migrator<G> + 'static) -> Self {
        self.migrator = Some(Box::new(migrator));
        self
    }

    /// Sets the population logger.
    pub fn with_logger(mut self, logger: impl PopulationLogger<G> + 'static) -> Self {
        self.logger = Some(Box::new(logger));
        self
    }

    /// Sets the migration frequency.
    pub fn with_migration_frequency(mut self, frequency: usize) -> Self {
        self.config.migration_frequency = frequency;
        self
    }

    /// Sets the master random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Enables or disables parallel population evolution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Validates the configuration, failing on the first violation.
    ///
    /// Checks, in order: genome maker present, topology valid, model present
    /// and valid, migration frequency at least 1 when a migrator is set.
    pub fn validate(&self) -> Result<()> {
        if self.maker.is_none() {
            return Err(GaError::MissingGenomeMaker);
        }
        self.topology.validate()?;
        match &self.model {
            None => return Err(GaError::MissingModel),
            Some(model) => model.validate()?,
        }
        if self.migrator.is_some() {
            check_migration_frequency(self.config.migration_frequency)?;
        }
        Ok(())
    }

    /// Validates and produces an engine.
    ///
    /// The engine holds no population until [`Ga::initialize`] is called.
    pub fn build(self) -> Result<Ga<G>> {
        self.validate()?;
        let maker = self.maker.ok_or(GaError::MissingGenomeMaker)?;
        let model = self.model.ok_or(GaError::MissingModel)?;
        Ok(Ga::from_parts(
            self.topology,
            self.config,
            maker,
            model,
            self.migrator,
            self.logger,
        ))
    }
}

pub(crate) fn check_migration_frequency(frequency: usize) -> Result<()> {
    if frequency < 1 {
        return Err(GaError::InvalidMigrationFrequency(frequency));
    }
    Ok(())
}

impl<G: Genome> fmt::Debug for GaBuilder<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaBuilder")
            .field("topology", &self.topology)
            .field("config", &self.config)
            .field("has_genome_maker", &self.maker.is_some())
            .field("has_model", &self.model.is_some())
            .field("has_migrator", &self.migrator.is_some())
            .field("has_logger", &self.logger.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::Shuffle;
    use crate::model::Generational;
    use rand::{Rng, RngCore};

    #[derive(Clone, Debug)]
    struct Scalar(f64);

    impl Genome for Scalar {
        fn evaluate(&self) -> f64 {
            self.0
        }
    }

    fn maker(rng: &mut dyn RngCore) -> Scalar {
        Scalar(rng.random_range(0.0..1.0))
    }

    fn complete() -> GaBuilder<Scalar> {
        GaBuilder::new(Topology::new(2, 0, 5))
            .with_genome_maker(maker)
            .with_model(Generational::default())
    }

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.migration_frequency, 10);
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = GaConfig::default()
            .with_migration_frequency(3)
            .with_parallel(false)
            .with_seed(42);
        assert_eq!(config.migration_frequency, 3);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(complete().validate().is_ok());
        assert!(complete().with_migrator(Shuffle).validate().is_ok());
    }

    #[test]
    fn test_missing_genome_maker_reported_first() {
        // Topology and model are invalid too; the maker check runs first.
        let builder: GaBuilder<Scalar> = GaBuilder::new(Topology::new(0, 0, 0));
        assert_eq!(builder.validate(), Err(GaError::MissingGenomeMaker));
    }

    #[test]
    fn test_topology_checked_before_model() {
        let builder = GaBuilder::new(Topology::new(0, 0, 1)).with_genome_maker(maker);
        assert!(matches!(
            builder.validate(),
            Err(GaError::InvalidTopology(_))
        ));
    }

    #[test]
    fn test_missing_model() {
        let builder = GaBuilder::new(Topology::new(1, 0, 1)).with_genome_maker(maker);
        assert_eq!(builder.validate(), Err(GaError::MissingModel));
    }

    #[test]
    fn test_invalid_model() {
        let builder = GaBuilder::new(Topology::new(1, 0, 1))
            .with_genome_maker(maker)
            .with_model(Generational::default().with_mutation_rate(2.0));
        assert!(matches!(builder.validate(), Err(GaError::InvalidModel(_))));
    }

    #[test]
    fn test_migrator_requires_frequency() {
        let builder = complete()
            .with_migrator(Shuffle)
            .with_migration_frequency(0);
        assert_eq!(
            builder.validate(),
            Err(GaError::InvalidMigrationFrequency(0))
        );
    }

    #[test]
    fn test_zero_frequency_without_migrator_is_valid() {
        assert!(complete().with_migration_frequency(0).validate().is_ok());
    }

    #[test]
    fn test_build_propagates_error() {
        let err = complete()
            .with_migrator(Shuffle)
            .with_migration_frequency(0)
            .build()
            .unwrap_err();
        assert_eq!(err, GaError::InvalidMigrationFrequency(0));
    }

    #[test]
    fn test_build_ok() {
        let ga = complete().with_seed(1).build().unwrap();
        assert_eq!(ga.topology(), &Topology::new(2, 0, 5));
        assert_eq!(ga.config().seed, Some(1));
        assert!(ga.populations().is_empty());
        assert!(ga.best().is_none());
    }
}
