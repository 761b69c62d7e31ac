//! Compatibility vetoes and affinity scores.
//!
//! Pure functions over descriptors; no side effects.
//!
//! # Usage
//!
//! ```
//! use review_assign::descriptor::{ProposalDescriptor, ReviewerDescriptor};
//! use review_assign::scoring::{is_incompatible, reward};
//!
//! let proposal = ProposalDescriptor::new("P1").with_technique("XAS").with_area("CHEM");
//! let reviewer = ReviewerDescriptor::new("R1").with_technique("XAS").with_area("CHEM");
//!
//! assert_eq!(is_incompatible(&proposal, &reviewer, false), 0);
//! assert_eq!(reward(&proposal, &reviewer), 100.0);
//! ```

mod affinity;
mod veto;

pub use affinity::{match_strength, penalty, reward, reward_weighted, PENALTY_CEILING, PENALTY_STEP};
pub use veto::{has_conflict, is_incompatible, veto_conflict, veto_subject, veto_technique, Veto};
