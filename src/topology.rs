//! Structural configuration of the engine.

use crate::error::{GaError, Result};

/// Size of the engine: how many populations, how many species per
/// population, and how many individuals per population.
///
/// # Examples
///
/// ```
/// use u_evolution::Topology;
///
/// let topology = Topology::new(4, 2, 50);
/// assert!(topology.validate().is_ok());
///
/// // Zero species disables speciation; it is not an error.
/// assert!(Topology::new(1, 0, 1).validate().is_ok());
/// assert!(Topology::new(0, 0, 1).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    /// Number of independent populations.
    pub population_count: usize,

    /// Number of species each population is split into every generation.
    ///
    /// `0` disables speciation: the model is applied to the whole population.
    pub species_count: usize,

    /// Number of individuals created per population by `initialize`.
    pub individual_count: usize,
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            population_count: 1,
            species_count: 0,
            individual_count: 30,
        }
    }
}

impl Topology {
    /// Creates a topology.
    pub fn new(population_count: usize, species_count: usize, individual_count: usize) -> Self {
        Self {
            population_count,
            species_count,
            individual_count,
        }
    }

    /// Sets the number of populations.
    pub fn with_population_count(mut self, n: usize) -> Self {
        self.population_count = n;
        self
    }

    /// Sets the number of species per population.
    pub fn with_species_count(mut self, n: usize) -> Self {
        self.species_count = n;
        self
    }

    /// Sets the number of individuals per population.
    pub fn with_individual_count(mut self, n: usize) -> Self {
        self.individual_count = n;
        self
    }

    /// Returns `true` if populations are split into species.
    pub fn speciated(&self) -> bool {
        self.species_count > 0
    }

    /// Validates the topology.
    ///
    /// `species_count` is unsigned, so its lower bound holds by construction.
    pub fn validate(&self) -> Result<()> {
        if self.population_count < 1 {
            return Err(GaError::InvalidTopology(
                "population_count must be at least 1".into(),
            ));
        }
        if self.individual_count < 1 {
            return Err(GaError::InvalidTopology(
                "individual_count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_topology() {
        let topology = Topology::default();
        assert_eq!(topology.population_count, 1);
        assert_eq!(topology.species_count, 0);
        assert_eq!(topology.individual_count, 30);
        assert!(topology.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let topology = Topology::default()
            .with_population_count(3)
            .with_species_count(2)
            .with_individual_count(40);
        assert_eq!(topology, Topology::new(3, 2, 40));
        assert!(topology.speciated());
    }

    #[test]
    fn test_validate_rejects_zero_populations() {
        let err = Topology::new(0, 0, 1).validate().unwrap_err();
        assert!(matches!(err, GaError::InvalidTopology(_)));
    }

    #[test]
    fn test_validate_accepts_minimal() {
        assert!(Topology::new(1, 0, 1).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_individuals() {
        let err = Topology::new(1, 0, 0).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid topology: individual_count must be at least 1"
        );
    }

    #[test]
    fn test_zero_species_is_valid() {
        let topology = Topology::new(2, 0, 10);
        assert!(topology.validate().is_ok());
        assert!(!topology.speciated());
    }

    #[test]
    fn test_more_species_than_individuals_is_valid() {
        assert!(Topology::new(1, 10, 3).validate().is_ok());
    }
}
