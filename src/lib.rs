//! Reviewer assignment engine.
//!
//! Assigns reviewers to proposals for a review cycle and track. Hard
//! constraints are conflict of interest and technique/area relevance,
//! per-reviewer workload caps, and a minimum number of reviews per
//! proposal. Among feasible assignments the engine prefers higher affinity.
//!
//! Two strategies share one interface: an exact integer program solved
//! page by page through a pluggable [`solver::Solver`] backend, and a
//! randomized greedy heuristic.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Submission`, `Reviewer`, `TrackConfig`,
//!   `Assignment`, `RunResult`
//! - **`descriptor`**: Normalized matching views of proposals and reviewers
//! - **`scoring`**: Compatibility vetoes and affinity rewards
//! - **`solver`**: Integer-programming abstraction and the in-crate
//!   branch-and-bound backend
//! - **`optimizer`**: Exact (paged integer program) and heuristic strategies
//! - **`pool`**: General/committee reviewer pool preparation
//! - **`dispatcher`**: Strategy selection, general + committee passes, merge
//! - **`kpi`**: Assignment quality metrics
//! - **`validation`**: Optional input integrity checks
//! - **`config`**, **`error`**: Engine configuration and error types
//!
//! # Example
//!
//! ```
//! use review_assign::{assign_reviewers, AssignmentRequest, EngineConfig, Strategy};
//! use review_assign::descriptor::{ProposalDescriptor, ReviewerDescriptor};
//! use review_assign::models::TrackConfig;
//!
//! let request = AssignmentRequest::new(
//!     "2026-1",
//!     TrackConfig::new("GEN", 1, 2),
//!     vec![
//!         ProposalDescriptor::new("P1").with_technique("SAXS").with_area("BIO"),
//!         ProposalDescriptor::new("P2").with_technique("SAXS").with_area("BIO"),
//!     ],
//!     vec![
//!         ReviewerDescriptor::new("R1").with_technique("SAXS").with_area("BIO"),
//!         ReviewerDescriptor::new("R2").with_technique("SAXS").with_area("BIO"),
//!     ],
//! );
//!
//! let config = EngineConfig::new(Strategy::Heuristic).with_seed(1);
//! let result = assign_reviewers(&request, &config).unwrap();
//! assert!(result.success);
//! assert_eq!(result.assignment.reviewer_count("P1"), 1);
//! ```

pub mod config;
pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod kpi;
pub mod models;
pub mod optimizer;
pub mod pool;
pub mod scoring;
pub mod solver;
pub mod validation;

pub use config::{EngineConfig, Strategy};
pub use dispatcher::{assign_reviewers, AssignmentRequest, Dispatcher};
pub use error::{AssignError, AssignResult, SolverError};
pub use kpi::AssignmentKpi;
pub use models::{Assignment, RunResult};
