//! Multi-population evolutionary engine.
//!
//! Evolves several independent populations of candidate solutions in
//! parallel, optionally splitting each population into species every
//! generation and periodically migrating individuals between populations,
//! while tracking the best solution found so far.
//!
//! - **Genome / GenomeMaker**: the user's candidate representation and its
//!   random factory. Lower fitness is better.
//! - **Population / Species**: ordered, evaluated individuals; species are a
//!   transient partition evolved group by group, then merged back.
//! - **Model**: one generation's worth of operators ([`Generational`] ships
//!   with the crate).
//! - **Migrator**: exchange between populations ([`Shuffle`], [`Ring`]).
//! - **Ga**: the orchestrator, built and validated by [`GaBuilder`].
//!
//! # Architecture
//!
//! Per-population work fans out on rayon with one task per population, each
//! holding exclusive access to its population and its own seeded generator.
//! Migration and best tracking run on the calling thread between barriers.
//! Configuration errors are reported as [`GaError`] before any evolution
//! starts; faults inside user collaborators propagate as panics.
//!
//! # Example
//!
//! ```
//! use rand::{Rng, RngCore};
//! use u_evolution::{GaBuilder, Generational, Genome, Ring, Topology};
//!
//! #[derive(Clone)]
//! struct Sphere(Vec<f64>);
//!
//! impl Genome for Sphere {
//!     fn evaluate(&self) -> f64 {
//!         self.0.iter().map(|x| x * x).sum()
//!     }
//!
//!     fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
//!         let i = rng.random_range(0..self.0.len());
//!         self.0[i] += rng.random_range(-0.5..0.5);
//!     }
//! }
//!
//! let mut ga = GaBuilder::new(Topology::new(4, 2, 30))
//!     .with_genome_maker(|rng: &mut dyn RngCore| {
//!         Sphere((0..3).map(|_| rng.random_range(-5.0..5.0)).collect())
//!     })
//!     .with_model(Generational::default().with_mutation_rate(0.3))
//!     .with_migrator(Ring::new(2))
//!     .with_migration_frequency(5)
//!     .with_seed(42)
//!     .build()
//!     .unwrap();
//!
//! let report = ga.run(50);
//! assert_eq!(report.generations, 50);
//! assert!(report.best_fitness <= report.fitness_history[0]);
//! ```

mod config;
mod error;
mod logging;
mod migration;
mod model;
mod population;
pub mod random;
mod runner;
mod selection;
mod species;
mod topology;
mod types;

pub use config::{GaBuilder, GaConfig};
pub use error::{GaError, Result};
pub use logging::{PopulationLogger, TracingLogger};
pub use migration::{Migrator, Ring, Shuffle};
pub use model::{Generational, Model};
pub use population::{Population, PopulationStats};
pub use runner::{EvolutionReport, Ga};
pub use selection::Selection;
pub use species::Species;
pub use topology::Topology;
pub use types::{evaluate_individuals, is_sorted, sort_individuals, Genome, GenomeMaker, Individual};
