//! State consistency errors.
//!
//! Raised by [`GameState::check_integrity`](super::GameState::check_integrity)
//! when the occupancy index and entity positions disagree, or an entity is
//! placed somewhere it cannot stand.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// An occupancy key points at an entity that no longer exists.
    #[error("position {position} maps to missing entity '{entity}'")]
    DanglingOccupancy { position: Position, entity: EntityId },

    /// An occupancy key points at an entity whose footprint is elsewhere.
    #[error("position {position} maps to '{entity}' which stands at {actual}")]
    StaleOccupancy {
        position: Position,
        entity: EntityId,
        actual: Position,
    },

    /// A live entity tile is missing from the occupancy index.
    #[error("entity '{entity}' at {position} is missing from the occupancy index")]
    MissingOccupant { entity: EntityId, position: Position },

    /// An entity stands outside the grid.
    #[error("entity '{entity}' at {position} is out of bounds")]
    OutOfBounds { entity: EntityId, position: Position },

    /// An entity stands on a wall tile.
    #[error("entity '{entity}' at {position} stands on a wall")]
    OnWall { entity: EntityId, position: Position },

    /// The player entity is absent.
    #[error("player entity is missing")]
    PlayerMissing,
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            DanglingOccupancy { .. } | StaleOccupancy { .. } | MissingOccupant { .. } => {
                ErrorSeverity::Internal
            }
            OutOfBounds { .. } | OnWall { .. } => ErrorSeverity::Validation,
            PlayerMissing => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            DanglingOccupancy { .. } => "STATE_DANGLING_OCCUPANCY",
            StaleOccupancy { .. } => "STATE_STALE_OCCUPANCY",
            MissingOccupant { .. } => "STATE_MISSING_OCCUPANT",
            OutOfBounds { .. } => "STATE_OUT_OF_BOUNDS",
            OnWall { .. } => "STATE_ON_WALL",
            PlayerMissing => "STATE_PLAYER_MISSING",
        }
    }
}
