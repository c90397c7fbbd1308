//! Error types for the guidance engine
//!
//! Covers:
//! - Blank operator queries
//! - Navigation calls made in the wrong state
//! - Keys that violate the resolver/catalog/history integrity
//!
//! A query that matches nothing is not an error; it is reported as
//! [`QueryOutcome::NoMatch`](crate::QueryOutcome::NoMatch).

use crate::session::NavState;
use sop_catalog::ProcedureKey;

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    /// Query could not be resolved
    #[error("resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    /// Session rejected the operation
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

impl GuideError {
    /// Check if the error is an operator usage mistake rather than a bug
    #[inline]
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::Resolve(ResolveError::EmptyQuery))
    }
}

/// Resolver errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Query is blank after trimming
    #[error("query is empty")]
    EmptyQuery,
}

/// Session controller errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Operation is not valid in the current state
    #[error("cannot {operation} while {state}")]
    InvalidTransition {
        /// Rejected operation
        operation: &'static str,
        /// State at the time of the call
        state: NavState,
    },

    /// Key is not in the catalog
    #[error("procedure '{0}' is not in the catalog")]
    InvalidSelection(ProcedureKey),

    /// Key was never visited in this session
    #[error("procedure '{0}' is not in the session history")]
    NotInHistory(ProcedureKey),

    /// History position past the end
    #[error("history entry {index} out of range (len: {len})")]
    HistoryIndexOutOfRange {
        /// Requested 0-based position
        index: usize,
        /// Current history length
        len: usize,
    },
}

impl SessionError {
    /// Check if the error signals a broken resolver/catalog/history invariant
    #[inline]
    #[must_use]
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidSelection(_) | Self::NotInHistory(_) | Self::HistoryIndexOutOfRange { .. }
        )
    }

    pub(crate) fn invalid_transition(operation: &'static str, state: &NavState) -> Self {
        Self::InvalidTransition {
            operation,
            state: state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_usage_error() {
        let err = GuideError::from(ResolveError::EmptyQuery);
        assert!(err.is_usage_error());
    }

    #[test]
    fn session_errors_are_not_usage_errors() {
        let err = GuideError::from(SessionError::InvalidSelection(ProcedureKey::new("x")));
        assert!(!err.is_usage_error());
    }

    #[test]
    fn integrity_classification() {
        assert!(SessionError::InvalidSelection(ProcedureKey::new("x")).is_integrity_violation());
        assert!(SessionError::NotInHistory(ProcedureKey::new("x")).is_integrity_violation());
        assert!(SessionError::HistoryIndexOutOfRange { index: 3, len: 1 }.is_integrity_violation());
        assert!(!SessionError::invalid_transition("advance", &NavState::Idle)
            .is_integrity_violation());
    }

    #[test]
    fn invalid_transition_message_names_state() {
        let err = SessionError::invalid_transition("advance", &NavState::Idle);
        assert_eq!(err.to_string(), "cannot advance while idle");
    }
}
