use thiserror::Error;

use crate::fact::{CorruptionSide, EntityId};

/// Errors that can occur in lattix-eval.
///
/// Every variant is fatal for the evaluation that raised it: no partial
/// metrics are ever returned.
#[derive(Error, Debug)]
pub enum Error {
    /// The entity universe has no members.
    #[error("entity universe is empty")]
    EmptyUniverse,
    /// The entity universe lists the same id more than once.
    #[error("entity {0} appears more than once in the universe")]
    DuplicateEntity(EntityId),
    /// The value in the corrupted slot of a fact is not a known entity.
    #[error("{side} entity {entity} is not in the entity universe")]
    EntityNotInUniverse {
        /// The missing entity.
        entity: EntityId,
        /// The slot it was read from.
        side: CorruptionSide,
    },
    /// Nothing to evaluate: mean rank over zero facts is undefined.
    #[error("fact set is empty")]
    EmptyFactSet,
    /// Side runs with different hits@k cut-offs cannot be pooled.
    #[error("cannot pool runs with different k ({0} vs {1})")]
    MixedCutoff(usize, usize),
    /// The scorer returned a score vector of the wrong length.
    #[error("scorer returned {actual} scores for a batch of {expected} facts")]
    ScoreCountMismatch {
        /// Batch length.
        expected: usize,
        /// Number of scores returned.
        actual: usize,
    },
    /// Failure raised by the external scoring model.
    #[error("scoring failed: {0}")]
    Scoring(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an arbitrary model error.
    pub fn scoring<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Scoring(err.into())
    }
}

/// Result type alias for lattix-eval.
pub type Result<T> = std::result::Result<T, Error>;
