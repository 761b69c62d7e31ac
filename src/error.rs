//! Error types for the assignment engine.
//!
//! "No feasible assignment" is never an error: it is reported through
//! [`RunResult::success`](crate::models::RunResult) and page reports.
//! Errors here cover configuration and programming mistakes only.

/// Errors raised by a [`Solver`](crate::solver::Solver) backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    #[error("solver backend '{backend}' is unavailable: {reason}")]
    Unavailable { backend: String, reason: String },

    #[error("variable {index} does not belong to this model")]
    UnknownVariable { index: usize },

    #[error("invalid bounds for variable '{name}': [{lower}, {upper}]")]
    InvalidBounds { name: String, lower: i64, upper: i64 },
}

/// Errors returned by the dispatcher and optimizers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssignError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Result alias for assignment operations.
pub type AssignResult<T> = std::result::Result<T, AssignError>;
