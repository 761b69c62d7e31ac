//! Affinity scoring.
//!
//! The reward multiplies the technique overlap by the area overlap, so a
//! reviewer matching on both axes always outranks one matching on a
//! single axis.

use crate::config::DEFAULT_REWARD_WEIGHT;
use crate::descriptor::{ProposalDescriptor, ReviewerDescriptor};

/// Upper value of the penalty cost model.
pub const PENALTY_CEILING: f64 = 100.0;
/// Penalty reduction per unit of match strength.
pub const PENALTY_STEP: f64 = 10.0;

/// `|shared techniques| × |shared areas|`.
pub fn match_strength(proposal: &ProposalDescriptor, reviewer: &ReviewerDescriptor) -> usize {
    let techniques = proposal.techniques.intersection(&reviewer.techniques).count();
    let areas = proposal.areas.intersection(&reviewer.areas).count();
    techniques * areas
}

/// Reward with an explicit base weight.
pub fn reward_weighted(
    proposal: &ProposalDescriptor,
    reviewer: &ReviewerDescriptor,
    weight: f64,
) -> f64 {
    weight * match_strength(proposal, reviewer) as f64
}

/// Reward with the default base weight of 100.
pub fn reward(proposal: &ProposalDescriptor, reviewer: &ReviewerDescriptor) -> f64 {
    reward_weighted(proposal, reviewer, DEFAULT_REWARD_WEIGHT)
}

/// Alternate cost model: `max(0, 100 − 10 × match_strength)`.
///
/// Not used by the optimizers; available for minimization formulations.
pub fn penalty(proposal: &ProposalDescriptor, reviewer: &ReviewerDescriptor) -> f64 {
    (PENALTY_CEILING - PENALTY_STEP * match_strength(proposal, reviewer) as f64).max(0.0)
}
