//! Input validation for assignment runs.
//!
//! The optimizers never reject input: a proposal with no techniques or
//! areas is simply vetoed for every reviewer. Callers that want to surface
//! such problems before a run can use [`validate_input`]. Detects:
//! - Duplicate proposal or reviewer IDs
//! - Proposals with no techniques or no areas
//! - Reviewers with no email (conflict detection is blind for them)
//! - Committee members missing from the reviewer list
//! - Track limits that can never be met

use std::collections::BTreeSet;

use crate::descriptor::{ProposalDescriptor, ReviewerDescriptor};
use crate::models::TrackConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A proposal has no techniques or no areas.
    MalformedProposal,
    /// A reviewer has no usable email.
    MissingEmail,
    /// A committee member is not among the reviewers.
    UnknownCommitteeMember,
    /// Track limits are zero.
    InvalidTrackLimits,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input of an assignment run.
///
/// Checks:
/// 1. No duplicate proposal IDs
/// 2. No duplicate reviewer IDs
/// 3. Every proposal has at least one technique and one area
/// 4. Every reviewer has an email
/// 5. Every committee member is in the reviewer list
/// 6. `min_reviewers` and `max_proposals` are positive
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    proposals: &[ProposalDescriptor],
    reviewers: &[ReviewerDescriptor],
    track: &TrackConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut proposal_ids = BTreeSet::new();
    for p in proposals {
        if !proposal_ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate proposal ID: {}", p.id),
            ));
        }
        if p.is_malformed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedProposal,
                format!(
                    "Proposal '{}' has {} techniques and {} areas",
                    p.id,
                    p.techniques.len(),
                    p.areas.len()
                ),
            ));
        }
    }

    let mut reviewer_ids = BTreeSet::new();
    for r in reviewers {
        if !reviewer_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate reviewer ID: {}", r.id),
            ));
        }
        if r.emails.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingEmail,
                format!("Reviewer '{}' has no email", r.id),
            ));
        }
    }

    for member in &track.committee {
        if !reviewer_ids.contains(member.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCommitteeMember,
                format!("Track '{}' committee member '{}' is not a reviewer", track.id, member),
            ));
        }
    }

    if track.min_reviewers == 0 || track.max_proposals == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTrackLimits,
            format!(
                "Track '{}' has min_reviewers={} and max_proposals={}",
                track.id, track.min_reviewers, track.max_proposals
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
