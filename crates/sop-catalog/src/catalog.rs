//! Registration-ordered procedure catalog
//!
//! Provides [`Catalog`], validated once at construction and read-only
//! afterwards. Iteration order is registration order; the resolver depends
//! on it for first-match tie-breaks.

use crate::document::{parse_dataset, DatasetFormat};
use crate::error::CatalogError;
use crate::procedure::{ProcedureDefinition, ProcedureKey};
use indexmap::IndexMap;
use std::path::Path;

const BUILTIN_DATASET: &str = include_str!("../data/cybercrime_sops.yaml");

/// Immutable procedure catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    procedures: IndexMap<ProcedureKey, ProcedureDefinition>,
}

impl Catalog {
    /// Build a catalog from definitions in registration order
    ///
    /// Keys normalize on construction, so a definition built with a
    /// mixed-case key registers under its lowercased form.
    ///
    /// # Errors
    /// Returns error on a blank or duplicate key, an empty step list, or a
    /// step whose ordinal differs from its 1-based position.
    pub fn new(
        definitions: impl IntoIterator<Item = ProcedureDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut procedures = IndexMap::new();

        for definition in definitions {
            validate(&definition)?;

            if procedures.contains_key(&definition.key) {
                return Err(CatalogError::DuplicateKey(definition.key));
            }
            procedures.insert(definition.key.clone(), definition);
        }

        tracing::debug!("Catalog built with {} procedures", procedures.len());
        Ok(Self { procedures })
    }

    /// The built-in cyber-crime investigation SOPs
    ///
    /// # Errors
    /// Returns error only if the embedded dataset is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUILTIN_DATASET)
    }

    /// Parse a JSON dataset
    ///
    /// # Errors
    /// Returns error on malformed JSON or an invalid definition.
    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        Self::new(parse_dataset(source, DatasetFormat::Json)?)
    }

    /// Parse a YAML dataset
    ///
    /// # Errors
    /// Returns error on malformed YAML or an invalid definition.
    pub fn from_yaml_str(source: &str) -> Result<Self, CatalogError> {
        Self::new(parse_dataset(source, DatasetFormat::Yaml)?)
    }

    /// Load a dataset file, format chosen by extension
    ///
    /// # Errors
    /// Returns error if the file cannot be read, has an unknown extension,
    /// or does not describe a valid catalog.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let format = DatasetFormat::from_path(path)
            .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;
        let source =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;

        tracing::info!("Loading procedure dataset from {}", path.display());
        Self::new(parse_dataset(&source, format)?)
    }

    /// Lookup a procedure by key
    #[inline]
    #[must_use]
    pub fn lookup(&self, key: &ProcedureKey) -> Option<&ProcedureDefinition> {
        self.procedures.get(key)
    }

    /// Check if a key is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &ProcedureKey) -> bool {
        self.procedures.contains_key(key)
    }

    /// Keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = &ProcedureKey> {
        self.procedures.keys()
    }

    /// Definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ProcedureDefinition> {
        self.procedures.values()
    }

    /// Keys starting with `prefix` (case-insensitive), in registration order
    #[must_use]
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<&ProcedureKey> {
        let prefix = prefix.trim().to_lowercase();
        self.procedures
            .keys()
            .filter(|key| key.as_str().starts_with(&prefix))
            .collect()
    }

    /// Number of procedures
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    /// Check if catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

fn validate(definition: &ProcedureDefinition) -> Result<(), CatalogError> {
    if definition.key.is_empty() {
        return Err(CatalogError::EmptyKey);
    }
    if definition.steps.is_empty() {
        return Err(CatalogError::EmptySteps(definition.key.clone()));
    }
    for (index, step) in definition.steps.iter().enumerate() {
        if step.ordinal != index + 1 {
            return Err(CatalogError::OrdinalMismatch {
                key: definition.key.clone(),
                position: index + 1,
                ordinal: step.ordinal,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::Step;

    fn single_step(key: &str) -> ProcedureDefinition {
        ProcedureDefinition::new(key, key.to_uppercase()).with_step(Step::new(1, "only", "law"))
    }

    #[test]
    fn catalog_preserves_registration_order() {
        let catalog =
            Catalog::new([single_step("b"), single_step("a"), single_step("c")]).unwrap();
        let keys: Vec<_> = catalog.keys().map(ProcedureKey::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn catalog_finds_deserialized_keys() {
        let catalog = Catalog::new([single_step("Mixed Case")]).unwrap();
        let key: ProcedureKey = serde_json::from_str("\"  MIXED case \"").unwrap();
        assert!(catalog.contains(&key));
    }

    #[test]
    fn catalog_rejects_duplicate_keys() {
        let err = Catalog::new([single_step("dup"), single_step("DUP")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateKey(key) if key.as_str() == "dup"));
    }

    #[test]
    fn catalog_rejects_blank_key() {
        let err = Catalog::new([single_step("   ")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyKey));
    }

    #[test]
    fn catalog_rejects_empty_steps() {
        let err = Catalog::new([ProcedureDefinition::new("empty", "Empty")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptySteps(_)));
    }

    #[test]
    fn catalog_rejects_ordinal_gap() {
        let definition = ProcedureDefinition::new("gap", "Gap")
            .with_step(Step::new(1, "one", "l"))
            .with_step(Step::new(3, "three", "l"));
        let err = Catalog::new([definition]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::OrdinalMismatch { position: 2, ordinal: 3, .. }
        ));
    }

    #[test]
    fn lookup_unknown_key_is_absent() {
        let catalog = Catalog::new([single_step("known")]).unwrap();
        assert!(catalog.lookup(&ProcedureKey::new("unknown")).is_none());
        assert!(catalog.lookup(&ProcedureKey::new("KNOWN")).is_some());
    }

    #[test]
    fn prefix_hint_is_case_insensitive() {
        let catalog = Catalog::new([
            single_step("sim swap fraud"),
            single_step("otp fraud"),
            single_step("social media impersonation"),
        ])
        .unwrap();

        let hints: Vec<_> = catalog
            .keys_with_prefix("S")
            .into_iter()
            .map(ProcedureKey::as_str)
            .collect();
        assert_eq!(hints, vec!["sim swap fraud", "social media impersonation"]);
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
