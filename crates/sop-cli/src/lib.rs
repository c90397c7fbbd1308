//! SOP Guide terminal front end
//!
//! Configuration, logging setup, command parsing and plain-text rendering
//! for the `sop-guide` binary.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod command;
pub mod config;
pub mod console;
pub mod render;
pub mod repl;
pub mod telemetry;

pub use command::ReplCommand;
pub use config::{ConfigError, GuideConfig};
pub use console::{Console, Reaction};

use sop_catalog::{Catalog, CatalogError};
use sop_engine::{GuideError, Progress, QueryOutcome, Session, SessionView};

/// Load the configured dataset, or the built-in SOPs
///
/// # Errors
/// Returns error if the dataset cannot be read or is invalid.
pub fn load_catalog(config: &GuideConfig) -> Result<Catalog, CatalogError> {
    match &config.catalog_path {
        Some(path) => Catalog::load(path),
        None => Catalog::builtin(),
    }
}

/// Resolve `query` and collect every view from the first step to the summary
///
/// Returns `None` when nothing matches.
///
/// # Errors
/// Returns error for a blank query.
pub fn walkthrough(session: &mut Session, query: &str) -> Result<Option<Vec<SessionView>>, GuideError> {
    if let QueryOutcome::NoMatch { .. } = session.submit_query(query)? {
        return Ok(None);
    }

    let mut views = vec![session.view()];
    loop {
        let progress = session.advance()?;
        views.push(session.view());
        if progress == Progress::Completed {
            break;
        }
    }
    Ok(Some(views))
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
