//! SOP Catalog
//!
//! Immutable, in-memory catalog of investigative standard operating
//! procedures.
//!
//! # Overview
//!
//! The catalog provides:
//! - **ProcedureKey**: case-normalized identifier of one procedure
//! - **ProcedureDefinition**: title, keywords, registration note and ordered steps
//! - **Catalog**: registration-ordered lookup, validated once at construction
//!
//! # Example
//!
//! ```rust
//! use sop_catalog::{Catalog, ProcedureDefinition, ProcedureKey, Step};
//!
//! let procedure = ProcedureDefinition::new("Phishing", "SOP for Phishing")
//!     .with_keywords(["fake email"])
//!     .with_step(Step::new(1, "Collect the email headers", "Section 91 notice"));
//!
//! let catalog = Catalog::new([procedure]).unwrap();
//! assert!(catalog.lookup(&ProcedureKey::new("phishing")).is_some());
//! ```

pub mod catalog;
pub mod document;
pub mod error;
pub mod procedure;

// Re-exports
pub use catalog::Catalog;
pub use document::{DatasetFormat, ProcedureRecord, StepRecord};
pub use error::CatalogError;
pub use procedure::{ProcedureDefinition, ProcedureKey, Step};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for catalog consumers
    pub use crate::{Catalog, CatalogError, ProcedureDefinition, ProcedureKey, Step};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
