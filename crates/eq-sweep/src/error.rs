//! Error types for sweep configuration and execution.

use eq_core::EqError;
use eq_engine::EngineError;
use thiserror::Error;

/// Errors raised while configuring or running a sweep.
///
/// A grid point that fails to converge is not an error; it is recorded as
/// [`EquilibriumStatus::Failure`](crate::EquilibriumStatus).
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Unknown constraint: {name}")]
    UnknownConstraint { name: String },

    #[error("Constraint registered twice: {name}")]
    DuplicateConstraint { name: String },

    #[error("Constraint {name} has no values")]
    EmptyValues { name: String },

    #[error("Invalid unit '{unit}' for constraint {name}")]
    InvalidUnit { name: String, unit: String },

    #[error("Grid of {axes} axes has more points than can be addressed")]
    GridTooLarge { axes: usize },

    #[error("Invalid range: {what}")]
    InvalidRange { what: String },

    #[error("Invalid quantity: {0}")]
    Quantity(#[from] EqError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Plan error: {what}")]
    Plan { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SweepResult<T> = Result<T, SweepError>;
