//! Compatibility vetoes.
//!
//! Each veto returns `1` (incompatible) or `0` (compatible). A relaxed
//! veto always returns `0`; relaxation is used for the committee pass,
//! whose members are pre-vetted by track membership for technique and area.
//! Conflicts of interest are never relaxed: both optimizers exclude them in
//! the committee pass through [`has_conflict`].

use crate::descriptor::{ProposalDescriptor, ReviewerDescriptor};

/// Veto signal: `0` compatible, `1` incompatible.
pub type Veto = u8;

/// Conflict of interest: shared email with the team, or the reviewer's
/// name is among the declared exclusions.
pub fn veto_conflict(
    proposal: &ProposalDescriptor,
    reviewer: &ReviewerDescriptor,
    relaxed: bool,
) -> Veto {
    if relaxed {
        return 0;
    }
    let shares_email = !proposal.emails.is_disjoint(&reviewer.emails);
    let declared = proposal.conflicts.contains(&reviewer.name);
    u8::from(shares_email || declared)
}

/// Technique mismatch: no technique in common.
pub fn veto_technique(
    proposal: &ProposalDescriptor,
    reviewer: &ReviewerDescriptor,
    relaxed: bool,
) -> Veto {
    if relaxed {
        return 0;
    }
    u8::from(proposal.techniques.is_disjoint(&reviewer.techniques))
}

/// Subject mismatch: no area in common.
pub fn veto_subject(
    proposal: &ProposalDescriptor,
    reviewer: &ReviewerDescriptor,
    relaxed: bool,
) -> Veto {
    if relaxed {
        return 0;
    }
    u8::from(proposal.areas.is_disjoint(&reviewer.areas))
}

/// Logical OR of the three vetoes.
pub fn is_incompatible(
    proposal: &ProposalDescriptor,
    reviewer: &ReviewerDescriptor,
    relaxed: bool,
) -> Veto {
    veto_conflict(proposal, reviewer, relaxed)
        .max(veto_technique(proposal, reviewer, relaxed))
        .max(veto_subject(proposal, reviewer, relaxed))
}

/// Conflict-of-interest check that ignores relaxation.
pub fn has_conflict(proposal: &ProposalDescriptor, reviewer: &ReviewerDescriptor) -> bool {
    veto_conflict(proposal, reviewer, false) == 1
}
