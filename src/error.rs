//! Configuration error types.
//!
//! Every error here is detected before evolution starts. Faults raised by
//! user collaborators while a generation is running are not represented:
//! they propagate as panics.

use thiserror::Error;

/// Errors reported by [`Topology::validate`](crate::Topology::validate),
/// [`GaBuilder::validate`](crate::GaBuilder::validate) and
/// [`Ga::validate`](crate::Ga::validate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GaError {
    #[error("genome maker cannot be absent")]
    MissingGenomeMaker,

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("model cannot be absent")]
    MissingModel,

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("migration frequency must be at least 1 when a migrator is set, got {0}")]
    InvalidMigrationFrequency(usize),
}

/// Convenience alias used by the fallible APIs of this crate.
pub type Result<T> = std::result::Result<T, GaError>;
