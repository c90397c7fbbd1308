//! Procedure data model
//!
//! [`ProcedureKey`], [`ProcedureDefinition`] and [`Step`] are plain value
//! types. Once a definition is registered in a [`Catalog`](crate::Catalog)
//! it is only ever handed out by shared reference.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Case-normalized identifier of one procedure
///
/// Construction trims surrounding whitespace and lowercases, so
/// `"OTP Fraud "` and `"otp fraud"` name the same procedure. Deserialization
/// goes through the same normalization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ProcedureKey(String);

impl ProcedureKey {
    /// Create a normalized key
    #[inline]
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    /// Borrow the normalized key text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the key is blank
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ProcedureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProcedureKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProcedureKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<ProcedureKey> for String {
    fn from(key: ProcedureKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ProcedureKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One ordinal unit of a procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based position within the procedure
    pub ordinal: usize,
    /// What the investigating officer does
    pub description: String,
    /// Evidence to collect, in order
    pub evidence_checklist: Vec<String>,
    /// Other parties to involve
    pub coordination: Vec<String>,
    /// Legal basis for the action
    pub legal_basis: String,
}

impl Step {
    /// Create a step with empty checklists
    #[inline]
    #[must_use]
    pub fn new(
        ordinal: usize,
        description: impl Into<String>,
        legal_basis: impl Into<String>,
    ) -> Self {
        Self {
            ordinal,
            description: description.into(),
            evidence_checklist: Vec::new(),
            coordination: Vec::new(),
            legal_basis: legal_basis.into(),
        }
    }

    /// With evidence checklist
    #[inline]
    #[must_use]
    pub fn with_evidence<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evidence_checklist = items.into_iter().map(Into::into).collect();
        self
    }

    /// With coordination parties
    #[inline]
    #[must_use]
    pub fn with_coordination<I, S>(mut self, parties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.coordination = parties.into_iter().map(Into::into).collect();
        self
    }
}

/// A named, ordered investigative checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureDefinition {
    /// Catalog identifier
    pub key: ProcedureKey,
    /// Display name
    pub title: String,
    /// Guidance on formal filing requirements
    pub registration_note: String,
    /// Alternate phrases that also resolve to this procedure
    pub keywords: Vec<String>,
    /// Ordered steps, never empty once registered
    pub steps: Vec<Step>,
    /// Canned question/answer pairs
    pub qa_entries: IndexMap<String, String>,
    /// Term definitions
    pub glossary_entries: IndexMap<String, String>,
}

impl ProcedureDefinition {
    /// Create a definition without steps
    #[must_use]
    pub fn new(key: impl Into<ProcedureKey>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            registration_note: String::new(),
            keywords: Vec::new(),
            steps: Vec::new(),
            qa_entries: IndexMap::new(),
            glossary_entries: IndexMap::new(),
        }
    }

    /// With registration note
    #[inline]
    #[must_use]
    pub fn with_registration_note(mut self, note: impl Into<String>) -> Self {
        self.registration_note = note.into();
        self
    }

    /// With keywords
    #[inline]
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Append one step
    #[inline]
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// With question/answer entry
    #[inline]
    #[must_use]
    pub fn with_qa(mut self, question: impl Into<String>, answer: impl Into<String>) -> Self {
        self.qa_entries.insert(question.into(), answer.into());
        self
    }

    /// With glossary entry
    #[inline]
    #[must_use]
    pub fn with_glossary(mut self, term: impl Into<String>, definition: impl Into<String>) -> Self {
        self.glossary_entries.insert(term.into(), definition.into());
        self
    }

    /// Number of steps
    #[inline]
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Step at a 0-based index
    #[inline]
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Case-insensitive containment test over the key and every keyword
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.key.as_str().contains(needle)
            || self
                .keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(needle))
    }
}
