//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from map generation and the rules engine so clients can
//! bubble them up with consistent context.
use game_content::GenerationError;
use game_core::{EntityKind, ErrorSeverity, GameError, ReduceError, StateError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("rules engine rejected an orchestrated action")]
    Reduce(#[from] ReduceError),

    #[error("inconsistent game state")]
    State(#[from] StateError),

    #[error("no vacant floor for {kind} after {attempts} attempts")]
    SpawnExhausted { kind: EntityKind, attempts: u32 },

    #[error("invalid runtime configuration: {0}")]
    InvalidConfig(String),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Generation(err) => err.severity(),
            // Sessions only issue actions they have checked against the
            // current state, so a rejection means the two disagree.
            Self::Reduce(_) => ErrorSeverity::Internal,
            Self::State(err) => err.severity(),
            Self::SpawnExhausted { .. } => ErrorSeverity::Recoverable,
            Self::InvalidConfig(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Generation(err) => err.error_code(),
            Self::Reduce(err) => err.error_code(),
            Self::State(err) => err.error_code(),
            Self::SpawnExhausted { .. } => "RUNTIME_SPAWN_EXHAUSTED",
            Self::InvalidConfig(_) => "RUNTIME_INVALID_CONFIG",
        }
    }
}
