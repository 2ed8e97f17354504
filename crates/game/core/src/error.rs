//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`ReduceError`, `StateError`, and the generator and
//! runtime errors in downstream crates) are defined next to the code they
//! describe and share the classification defined here.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: may succeed on retry (e.g. a new random seed)
/// - **Validation**: invalid input, should not be retried unchanged
/// - **Internal**: state inconsistency that indicates a bug
/// - **Fatal**: cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: room placement budget exhausted, no empty tile found.
    Recoverable,

    /// Examples: unknown entity, malformed generation parameters.
    Validation,

    /// Examples: occupancy index out of sync with entity positions.
    Internal,

    Fatal,
}

impl ErrorSeverity {
    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all game errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable SCREAMING_SNAKE_CASE identifiers
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
