//! Free-text query resolution
//!
//! Provides [`Resolver`], a first-match containment search over a
//! [`Catalog`] in registration order.
//!
//! # Matching
//! - The query is trimmed and lowercased; a blank query is rejected.
//! - A procedure matches if its key or any of its keywords contains the
//!   normalized query.
//! - The earliest registered match wins. Later matches are never examined.

use crate::error::ResolveError;
use sop_catalog::{Catalog, ProcedureKey};

/// Maps free text to at most one procedure key
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> Resolver<'a> {
    /// Create resolver over a catalog
    #[inline]
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Resolve a query to the first matching procedure key
    ///
    /// # Errors
    /// Returns [`ResolveError::EmptyQuery`] for blank or whitespace-only
    /// queries. A query that matches nothing yields `Ok(None)`.
    pub fn resolve(&self, query: &str) -> Result<Option<ProcedureKey>, ResolveError> {
        let needle = normalize_query(query)?;

        let found = self
            .catalog
            .iter()
            .find(|procedure| procedure.mentions(&needle))
            .map(|procedure| procedure.key.clone());

        match &found {
            Some(key) => tracing::debug!(query = %needle, key = %key, "Query resolved"),
            None => tracing::debug!(query = %needle, "Query matched no procedure"),
        }

        Ok(found)
    }
}

/// Trim and lowercase a query
///
/// # Errors
/// Returns [`ResolveError::EmptyQuery`] if nothing is left after trimming.
pub fn normalize_query(query: &str) -> Result<String, ResolveError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::EmptyQuery);
    }
    Ok(trimmed.to_lowercase())
}
