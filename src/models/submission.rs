//! Submission (proposal) model.
//!
//! A submission is a proposal entered into a review track. The engine only
//! needs the fields that drive matching: requested techniques, subject
//! areas, the team's email addresses, and reviewers the authors asked to
//! exclude.

use serde::{Deserialize, Serialize};

/// A person's name as entered in a form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonName {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl PersonName {
    /// Creates a name from its parts.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Canonical matching key: `"last,first"`, trimmed and lowercased.
    pub fn normalized(&self) -> String {
        format!("{},{}", self.last_name.trim(), self.first_name.trim())
            .trim()
            .to_lowercase()
    }
}

/// Read access to a submission owned by the proposal store.
///
/// Implemented by [`Submission`] and by any external entity that can
/// expose the matching fields.
pub trait SubmissionRecord {
    /// Opaque submission key.
    fn id(&self) -> &str;
    /// Identifiers of the techniques requested.
    fn techniques(&self) -> Vec<String>;
    /// Identifiers of the subject areas covered.
    fn areas(&self) -> Vec<String>;
    /// Email addresses of every team member (raw, unnormalized).
    fn team_emails(&self) -> Vec<String>;
    /// Reviewers the team declared as inappropriate.
    fn declared_conflicts(&self) -> Vec<PersonName>;
}

/// In-memory submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    /// Unique submission identifier.
    pub id: String,
    /// Proposal title (display only).
    pub title: String,
    /// Requested technique identifiers.
    pub techniques: Vec<String>,
    /// Subject area identifiers.
    pub areas: Vec<String>,
    /// Team member emails.
    pub team_emails: Vec<String>,
    /// Declared reviewer exclusions.
    pub declared_conflicts: Vec<PersonName>,
}

impl Submission {
    /// Creates an empty submission.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds a requested technique.
    pub fn with_technique(mut self, technique: impl Into<String>) -> Self {
        self.techniques.push(technique.into());
        self
    }

    /// Adds a subject area.
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.areas.push(area.into());
        self
    }

    /// Adds a team member email.
    pub fn with_team_email(mut self, email: impl Into<String>) -> Self {
        self.team_emails.push(email.into());
        self
    }

    /// Adds a declared conflict.
    pub fn with_conflict(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.declared_conflicts
            .push(PersonName::new(first_name, last_name));
        self
    }
}

impl SubmissionRecord for Submission {
    fn id(&self) -> &str {
        &self.id
    }

    fn techniques(&self) -> Vec<String> {
        self.techniques.clone()
    }

    fn areas(&self) -> Vec<String> {
        self.areas.clone()
    }

    fn team_emails(&self) -> Vec<String> {
        self.team_emails.clone()
    }

    fn declared_conflicts(&self) -> Vec<PersonName> {
        self.declared_conflicts.clone()
    }
}
