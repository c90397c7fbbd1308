//! SOP Engine - Procedure Resolution & Stepwise Guidance
//!
//! The engine that:
//! - Maps a free-text query to exactly one procedure (first match wins)
//! - Walks the procedure's steps strictly in order to a terminal summary
//! - Keeps a duplicate-free, re-selectable history of visited procedures
//! - Produces view-model snapshots for any presentation layer
//!
//! # Example
//!
//! ```rust
//! use sop_catalog::Catalog;
//! use sop_engine::{Progress, QueryOutcome, Session};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(Catalog::builtin()?);
//! let mut session = Session::new(catalog);
//!
//! let outcome = session.submit_query("vishing")?;
//! assert!(matches!(outcome, QueryOutcome::Started(_)));
//!
//! while let Progress::Stepping(_) = session.advance()? {}
//! assert!(session.is_complete());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod resolver;
pub mod session;
pub mod view;

// Re-exports for convenience
pub use error::{GuideError, ResolveError, SessionError};
pub use resolver::{normalize_query, Resolver};
pub use session::{NavState, Progress, QueryOutcome, Session, SessionId};
pub use view::{HistoryEntry, SessionView, StepView, SummaryView, CLOSING_NOTE};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a guidance session
    pub use crate::{
        GuideError, NavState, Progress, QueryOutcome, Resolver, Session, SessionView,
    };
    pub use sop_catalog::{Catalog, ProcedureKey};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
