//! Error types for the QA collaborator
//!
//! None of these reach the operator directly; [`consult`](crate::consult)
//! collapses every variant into [`FALLBACK_MESSAGE`](crate::FALLBACK_MESSAGE).

/// QA exchange failures
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// Request never got a response (refused, reset, DNS, ...)
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("assistant responded with status {0}")]
    Status(u16),

    /// Response body was not `{ "answer": ... }`
    #[error("undecodable assistant response: {0}")]
    Decode(String),
}
