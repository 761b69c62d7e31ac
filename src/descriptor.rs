//! Matching descriptors.
//!
//! Flat, immutable projections of submissions and reviewers that the
//! veto and affinity functions consume. Built once at the start of a run
//! and dropped at the end.
//!
//! Normalization:
//! - emails are trimmed and lowercased; empty strings are dropped
//! - names become `"last,first"`, trimmed and lowercased

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{ReviewerRecord, SubmissionRecord};

/// Canonical form of an email address, or `None` if blank.
pub fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        None
    } else {
        Some(email.to_lowercase())
    }
}

/// Matching view of a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProposalDescriptor {
    /// Submission key.
    pub id: String,
    /// Requested techniques.
    pub techniques: BTreeSet<String>,
    /// Subject areas.
    pub areas: BTreeSet<String>,
    /// Normalized emails of the whole team.
    pub emails: BTreeSet<String>,
    /// Normalized names of declared reviewer exclusions.
    pub conflicts: BTreeSet<String>,
}

impl ProposalDescriptor {
    /// Creates an empty descriptor.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Projects a submission record.
    pub fn from_record<S: SubmissionRecord + ?Sized>(record: &S) -> Self {
        Self {
            id: record.id().to_string(),
            techniques: record.techniques().into_iter().collect(),
            areas: record.areas().into_iter().collect(),
            emails: record
                .team_emails()
                .iter()
                .filter_map(|e| normalize_email(e))
                .collect(),
            conflicts: record
                .declared_conflicts()
                .iter()
                .map(|name| name.normalized())
                .collect(),
        }
    }

    /// Adds a technique.
    pub fn with_technique(mut self, technique: impl Into<String>) -> Self {
        self.techniques.insert(technique.into());
        self
    }

    /// Adds a subject area.
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.areas.insert(area.into());
        self
    }

    /// Adds a team email (normalized).
    pub fn with_email(mut self, email: &str) -> Self {
        self.emails.extend(normalize_email(email));
        self
    }

    /// Adds a declared conflict by already-normalized name.
    pub fn with_conflict(mut self, normalized_name: impl Into<String>) -> Self {
        self.conflicts.insert(normalized_name.into());
        self
    }

    /// Whether the proposal lacks techniques or areas, in which case every
    /// reviewer is vetoed against it.
    pub fn is_malformed(&self) -> bool {
        self.techniques.is_empty() || self.areas.is_empty()
    }
}

/// Matching view of a reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewerDescriptor {
    /// Reviewer key.
    pub id: String,
    /// Technique expertise.
    pub techniques: BTreeSet<String>,
    /// Top-level subject areas.
    pub areas: BTreeSet<String>,
    /// Normalized primary and secondary emails.
    pub emails: BTreeSet<String>,
    /// Normalized `"last,first"` name.
    pub name: String,
}

impl ReviewerDescriptor {
    /// Creates an empty descriptor.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Projects a reviewer record.
    pub fn from_record<R: ReviewerRecord + ?Sized>(record: &R) -> Self {
        let emails = std::iter::once(record.email())
            .chain(record.alt_email())
            .filter_map(normalize_email)
            .collect();
        Self {
            id: record.id().to_string(),
            techniques: record.techniques().into_iter().collect(),
            areas: record.areas().into_iter().collect(),
            emails,
            name: record.name().normalized(),
        }
    }

    /// Adds a technique.
    pub fn with_technique(mut self, technique: impl Into<String>) -> Self {
        self.techniques.insert(technique.into());
        self
    }

    /// Adds a subject area.
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.areas.insert(area.into());
        self
    }

    /// Adds an email (normalized).
    pub fn with_email(mut self, email: &str) -> Self {
        self.emails.extend(normalize_email(email));
        self
    }

    /// Sets the already-normalized name.
    pub fn with_name(mut self, normalized_name: impl Into<String>) -> Self {
        self.name = normalized_name.into();
        self
    }
}
