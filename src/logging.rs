//! Population snapshot reporting.

use crate::population::Population;
use crate::types::Genome;
use std::panic::{self, AssertUnwindSafe};
use tracing::{info, warn};

/// Receives a sorted, evaluated population after `initialize` and after
/// every `enhance` step.
///
/// Logging is fire-and-forget: a panicking logger is reported and ignored,
/// it never aborts the generation.
pub trait PopulationLogger<G: Genome>: Send + Sync {
    /// Records one population snapshot.
    fn log(&self, population: &Population<G>);
}

/// Emits one `tracing` event per population snapshot with its
/// [`PopulationStats`](crate::PopulationStats).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl<G: Genome> PopulationLogger<G> for TracingLogger {
    fn log(&self, population: &Population<G>) {
        if let Some(stats) = population.stats() {
            info!(
                population = stats.id,
                generations = stats.generations,
                size = stats.size,
                age_ms = stats.age.as_millis() as u64,
                min = stats.min,
                max = stats.max,
                mean = stats.mean,
                std_dev = stats.std_dev,
                "population snapshot"
            );
        }
    }
}

/// Hands `population` to `logger`, swallowing any panic.
pub(crate) fn log_population<G: Genome>(
    logger: &dyn PopulationLogger<G>,
    population: &Population<G>,
) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| logger.log(population)));
    if outcome.is_err() {
        warn!(population = population.id, "population logger panicked");
    }
}
