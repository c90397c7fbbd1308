//! SOP Assistant
//!
//! Contract and HTTP adapter for the remote free-text question-answering
//! service consulted during an investigation.
//!
//! # Overview
//!
//! - **Assistant**: one question in, one answer out, single attempt
//! - **HttpAssistant**: `POST { "message" }` → `{ "answer" }` over reqwest
//! - **consult**: the only place failures become the fixed fallback text
//! - **AnswerBoard**: last-write-wins display surface for answers
//!
//! # Example
//!
//! ```rust,ignore
//! use sop_assistant::{consult, AssistantConfig, HttpAssistant};
//!
//! let assistant = HttpAssistant::new(&AssistantConfig::new());
//! let text = consult(&assistant, "How do I stop the money?").await;
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod desk;
pub mod error;

// Re-exports
pub use client::{AskRequest, AskResponse, Assistant, AssistantConfig, HttpAssistant, DEFAULT_ENDPOINT};
pub use desk::{ask_in_background, consult, AnswerBoard, FALLBACK_MESSAGE, PROCESSING_MESSAGE};
pub use error::AssistantError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
