//! Dataset document format
//!
//! A dataset is an ordered mapping from procedure key to [`ProcedureRecord`].
//! Field names follow the authored JSON/YAML (`evidenceChecklist`, `legal`,
//! `registration`, `qa`, `definitions`). Document order is registration
//! order.

use crate::error::CatalogError;
use crate::procedure::{ProcedureDefinition, ProcedureKey, Step};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported dataset encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// JSON object
    Json,
    /// YAML mapping
    Yaml,
}

impl DatasetFormat {
    /// Pick the format from a file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// One step as authored
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    /// 1-based ordinal
    pub step: usize,
    /// Action text
    pub description: String,
    /// Evidence to collect
    #[serde(default)]
    pub evidence_checklist: Vec<String>,
    /// Parties to involve
    #[serde(default)]
    pub coordination: Vec<String>,
    /// Legal basis
    #[serde(default)]
    pub legal: String,
}

/// One procedure as authored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureRecord {
    /// Display title
    pub title: String,
    /// Resolver keywords
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Registration requirement
    #[serde(default)]
    pub registration: String,
    /// Ordered steps
    pub steps: Vec<StepRecord>,
    /// Canned question and answer pairs
    #[serde(default)]
    pub qa: IndexMap<String, String>,
    /// Glossary terms
    #[serde(default)]
    pub definitions: IndexMap<String, String>,
}

impl ProcedureRecord {
    /// Convert into a definition under `key`
    #[must_use]
    pub fn into_definition(self, key: &str) -> ProcedureDefinition {
        let steps = self
            .steps
            .into_iter()
            .map(|record| {
                Step::new(record.step, record.description, record.legal)
                    .with_evidence(record.evidence_checklist)
                    .with_coordination(record.coordination)
            })
            .collect();

        ProcedureDefinition {
            key: ProcedureKey::new(key),
            title: self.title,
            registration_note: self.registration,
            keywords: self.keywords,
            steps,
            qa_entries: self.qa,
            glossary_entries: self.definitions,
        }
    }
}

/// Parse a dataset document into definitions, preserving document order
///
/// # Errors
/// Returns [`CatalogError::Parse`] when the document is malformed.
pub fn parse_dataset(
    source: &str,
    format: DatasetFormat,
) -> Result<Vec<ProcedureDefinition>, CatalogError> {
    let records: IndexMap<String, ProcedureRecord> = match format {
        DatasetFormat::Json => serde_json::from_str(source)?,
        DatasetFormat::Yaml => serde_yaml::from_str(source)?,
    };

    Ok(records
        .into_iter()
        .map(|(key, record)| record.into_definition(&key))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            DatasetFormat::from_path(&PathBuf::from("sops.json")),
            Some(DatasetFormat::Json)
        );
        assert_eq!(
            DatasetFormat::from_path(&PathBuf::from("sops.YML")),
            Some(DatasetFormat::Yaml)
        );
        assert_eq!(DatasetFormat::from_path(&PathBuf::from("sops.txt")), None);
        assert_eq!(DatasetFormat::from_path(&PathBuf::from("sops")), None);
    }

    #[test]
    fn json_preserves_document_order() {
        let source = r#"{
            "zeta": {"title": "Z", "steps": [{"step": 1, "description": "z1", "legal": "lz"}]},
            "alpha": {"title": "A", "steps": [{"step": 1, "description": "a1"}]}
        }"#;

        let definitions = parse_dataset(source, DatasetFormat::Json).unwrap();
        let keys: Vec<_> = definitions.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(definitions[1].steps[0].legal_basis, "");
    }

    #[test]
    fn yaml_maps_authored_field_names() {
        let source = r#"
Card Fraud:
  title: "SOP for Card Fraud"
  keywords: ["skimming"]
  registration: "FIR required."
  steps:
    - step: 1
      description: "Collect statement"
      evidenceChecklist: ["Bank statement"]
      coordination: ["Bank"]
      legal: "Section 91"
  qa:
    first step: "Collect statement"
  definitions:
    fir: "First Information Report"
"#;

        let definitions = parse_dataset(source, DatasetFormat::Yaml).unwrap();
        let card = &definitions[0];
        assert_eq!(card.key.as_str(), "card fraud");
        assert_eq!(card.registration_note, "FIR required.");
        assert_eq!(card.steps[0].evidence_checklist, vec!["Bank statement"]);
        assert_eq!(card.steps[0].coordination, vec!["Bank"]);
        assert_eq!(card.steps[0].legal_basis, "Section 91");
        assert_eq!(card.qa_entries.get("first step").map(String::as_str), Some("Collect statement"));
        assert!(card.glossary_entries.contains_key("fir"));
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let err = parse_dataset("{ not json", DatasetFormat::Json).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
