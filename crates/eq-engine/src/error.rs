//! Equilibrium engine errors.

use eq_core::EqError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Faults raised by an equilibrium engine.
///
/// Non-convergence is not an error: it is reported through
/// [`SolveOutcome::succeeded`](crate::SolveOutcome).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Unit or numeric error from a value handed to the engine.
    #[error("Invalid quantity: {0}")]
    Quantity(#[from] EqError),

    /// Species not present in the chemical system.
    #[error("Unknown species: {name}")]
    UnknownSpecies { name: String },

    /// Named input not registered on the specification.
    #[error("Unknown input: {name}")]
    UnknownInput { name: String },

    /// A declared unknown was never given a value.
    #[error("Missing condition: {what}")]
    MissingCondition { what: String },

    /// Chemical system definition is unusable.
    #[error("Invalid chemical system: {what}")]
    InvalidSystem { what: String },

    /// Backend-specific failure.
    #[error("Backend error: {message}")]
    Backend { message: String },
}
