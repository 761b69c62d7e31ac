//! Reviewer model.
//!
//! Reviewers declare the techniques and top-level subject areas they can
//! evaluate. Availability (active, not on hiatus) is decided by the
//! reviewer store; the engine only reads the resulting flag.

use serde::{Deserialize, Serialize};

use super::PersonName;

/// Read access to a reviewer owned by the reviewer store.
pub trait ReviewerRecord {
    /// Opaque reviewer key.
    fn id(&self) -> &str;
    /// Technique identifiers of declared expertise.
    fn techniques(&self) -> Vec<String>;
    /// Top-level subject area identifiers.
    fn areas(&self) -> Vec<String>;
    /// Primary email (raw).
    fn email(&self) -> &str;
    /// Secondary email, if any (raw).
    fn alt_email(&self) -> Option<&str>;
    /// Display name.
    fn name(&self) -> PersonName;
    /// Whether the reviewer can take assignments this cycle.
    fn is_available(&self) -> bool;
}

/// In-memory reviewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reviewer {
    /// Unique reviewer identifier.
    pub id: String,
    /// Reviewer name.
    pub name: PersonName,
    /// Primary email.
    pub email: String,
    /// Secondary email.
    pub alt_email: Option<String>,
    /// Technique expertise.
    pub techniques: Vec<String>,
    /// Top-level subject areas.
    pub areas: Vec<String>,
    /// Account is active.
    pub active: bool,
    /// Reviewer declared a break for the current cycle.
    pub on_hiatus: bool,
}

impl Reviewer {
    /// Creates an active reviewer with no expertise.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: PersonName::default(),
            email: String::new(),
            alt_email: None,
            techniques: Vec::new(),
            areas: Vec::new(),
            active: true,
            on_hiatus: false,
        }
    }

    /// Sets the name.
    pub fn with_name(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.name = PersonName::new(first_name, last_name);
        self
    }

    /// Sets the primary email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the secondary email.
    pub fn with_alt_email(mut self, email: impl Into<String>) -> Self {
        self.alt_email = Some(email.into());
        self
    }

    /// Adds a technique.
    pub fn with_technique(mut self, technique: impl Into<String>) -> Self {
        self.techniques.push(technique.into());
        self
    }

    /// Adds a subject area.
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.areas.push(area.into());
        self
    }

    /// Marks the reviewer as on hiatus.
    pub fn on_hiatus(mut self) -> Self {
        self.on_hiatus = true;
        self
    }

    /// Marks the reviewer as inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

impl ReviewerRecord for Reviewer {
    fn id(&self) -> &str {
        &self.id
    }

    fn techniques(&self) -> Vec<String> {
        self.techniques.clone()
    }

    fn areas(&self) -> Vec<String> {
        self.areas.clone()
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn alt_email(&self) -> Option<&str> {
        self.alt_email.as_deref()
    }

    fn name(&self) -> PersonName {
        self.name.clone()
    }

    fn is_available(&self) -> bool {
        self.active && !self.on_hiatus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviewer_builder() {
        let r = Reviewer::new("R1")
            .with_name("Ada", "Lovelace")
            .with_email("ada@x.org")
            .with_alt_email("ada@y.org")
            .with_technique("MX")
            .with_area("BIO");

        assert_eq!(ReviewerRecord::id(&r), "R1");
        assert_eq!(r.email(), "ada@x.org");
        assert_eq!(r.alt_email(), Some("ada@y.org"));
        assert_eq!(ReviewerRecord::name(&r).normalized(), "lovelace,ada");
        assert!(r.is_available());
    }

    #[test]
    fn test_reviewer_availability() {
        assert!(!Reviewer::new("R1").on_hiatus().is_available());
        assert!(!Reviewer::new("R2").inactive().is_available());
    }
}
