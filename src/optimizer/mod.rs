//! Assignment optimizers.
//!
//! Two strategies share the same inputs and output shape:
//!
//! | Strategy | Module | Guarantees |
//! |----------|--------|------------|
//! | Exact | [`exact`] | Maximizes total reward subject to all constraints, per page |
//! | Heuristic | [`heuristic`] | Never exceeds caps or assigns conflicts; no optimality |
//!
//! Both run a general pass followed by a committee pass.

pub mod exact;
pub mod heuristic;

pub use exact::{objective_value, AssignmentModel, ExactOptimizer, ExactSolution, PassOutput};
pub use heuristic::{GreedyAssigner, WorkloadLedger};
