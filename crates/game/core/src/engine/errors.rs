//! Error types for the reducer.
//!
//! A failed reduction never touches the input state: callers keep the snapshot
//! they passed in, so every variant here is a reported no-op.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ReduceError {
    /// The action names an entity that is not on the board.
    #[error("{action}: unknown entity '{entity}'")]
    UnknownEntity {
        action: &'static str,
        entity: EntityId,
    },

    /// An entity with this key already exists.
    #[error("{action}: entity '{entity}' already exists")]
    DuplicateEntity {
        action: &'static str,
        entity: EntityId,
    },

    /// The destination tile is held by another entity.
    #[error("{action}: {position} is occupied by '{occupant}'")]
    Occupied {
        action: &'static str,
        position: Position,
        occupant: EntityId,
    },

    /// The destination is a wall or lies outside the grid.
    #[error("{action}: {position} is not a floor tile")]
    Blocked {
        action: &'static str,
        position: Position,
    },
}

impl ReduceError {
    pub(crate) fn unknown(action: &'static str, entity: &EntityId) -> Self {
        Self::UnknownEntity {
            action,
            entity: entity.clone(),
        }
    }

    /// Name of the action that was rejected.
    pub fn action(&self) -> &'static str {
        match self {
            Self::UnknownEntity { action, .. }
            | Self::DuplicateEntity { action, .. }
            | Self::Occupied { action, .. }
            | Self::Blocked { action, .. } => action,
        }
    }
}

impl GameError for ReduceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownEntity { .. } | Self::DuplicateEntity { .. } => ErrorSeverity::Validation,
            Self::Occupied { .. } | Self::Blocked { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntity { .. } => "REDUCE_UNKNOWN_ENTITY",
            Self::DuplicateEntity { .. } => "REDUCE_DUPLICATE_ENTITY",
            Self::Occupied { .. } => "REDUCE_OCCUPIED",
            Self::Blocked { .. } => "REDUCE_BLOCKED",
        }
    }
}
