//! Session controller
//!
//! Owns the navigation state machine and the visit history for one operator
//! interaction.
//!
//! # States
//! ```text
//! Idle ──select──▶ Stepping ──advance (last step)──▶ Summary
//!                  │    ▲                              │
//!                  └────┘ advance                      │
//!        ◀─────────────── select (any state) ──────────┘
//! ```
//! `advance` is only valid while stepping. Selecting a procedure always
//! restarts at the first step and records the key in history once.

use crate::error::{GuideError, SessionError};
use crate::resolver::Resolver;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use sop_catalog::{Catalog, ProcedureDefinition, ProcedureKey, Step};
use std::sync::Arc;
use ulid::Ulid;

/// Unique session identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Ulid);

impl SessionId {
    /// Generate new session ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Navigation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NavState {
    /// No procedure selected
    Idle,
    /// Walking a procedure
    Stepping {
        /// Active procedure
        key: ProcedureKey,
        /// 0-based index into its steps
        cursor: usize,
    },
    /// Every step of the procedure has been shown
    Summary {
        /// Completed procedure
        key: ProcedureKey,
    },
}

impl NavState {
    /// Key of the active procedure, if any
    #[inline]
    #[must_use]
    pub fn active_key(&self) -> Option<&ProcedureKey> {
        match self {
            Self::Idle => None,
            Self::Stepping { key, .. } | Self::Summary { key } => Some(key),
        }
    }
}

impl std::fmt::Display for NavState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Stepping { key, cursor } => write!(f, "at step {} of '{key}'", cursor + 1),
            Self::Summary { key } => write!(f, "at the summary of '{key}'"),
        }
    }
}

/// Result of submitting a free-text query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// A procedure was selected and its first step is current
    Started(ProcedureKey),
    /// Nothing matched; session state is unchanged
    NoMatch {
        /// Query as the operator typed it
        query: String,
    },
}

/// Where `advance` left the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Still stepping; new 0-based cursor
    Stepping(usize),
    /// Last step passed; summary reached
    Completed,
}

/// Transient navigation and history state for one operator interaction
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    catalog: Arc<Catalog>,
    state: NavState,
    history: IndexSet<ProcedureKey>,
}

impl Session {
    /// Create an idle session over a shared catalog
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let id = SessionId::new();
        tracing::debug!(session = %id, "Session opened");
        Self {
            id,
            catalog,
            state: NavState::Idle,
            history: IndexSet::new(),
        }
    }

    /// Session identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Catalog this session navigates
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current navigation state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Visited keys in first-visit order
    pub fn history(&self) -> impl Iterator<Item = &ProcedureKey> {
        self.history.iter()
    }

    /// Number of distinct procedures visited
    #[inline]
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Check if a key has been visited
    #[inline]
    #[must_use]
    pub fn has_visited(&self, key: &ProcedureKey) -> bool {
        self.history.contains(key)
    }

    /// Definition of the active procedure
    #[must_use]
    pub fn active_procedure(&self) -> Option<&ProcedureDefinition> {
        self.state
            .active_key()
            .and_then(|key| self.catalog.lookup(key))
    }

    /// Resolve a query and select the matching procedure
    ///
    /// On no match the session is left exactly as it was.
    ///
    /// # Errors
    /// Returns [`ResolveError::EmptyQuery`](crate::ResolveError::EmptyQuery)
    /// for a blank query.
    pub fn submit_query(&mut self, query: &str) -> Result<QueryOutcome, GuideError> {
        let resolved = Resolver::new(&self.catalog).resolve(query)?;

        match resolved {
            Some(key) => {
                self.select_procedure(&key)?;
                Ok(QueryOutcome::Started(key))
            }
            None => {
                tracing::info!(session = %self.id, query, "No procedure found");
                Ok(QueryOutcome::NoMatch {
                    query: query.to_string(),
                })
            }
        }
    }

    /// Make `key` the active procedure at its first step
    ///
    /// Discards any in-flight position in the previous procedure.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidSelection`] if `key` is not in the
    /// catalog; the session is left unchanged.
    #[tracing::instrument(level = "debug", skip(self), fields(session = %self.id))]
    pub fn select_procedure(&mut self, key: &ProcedureKey) -> Result<(), SessionError> {
        if !self.catalog.contains(key) {
            tracing::warn!(key = %key, "Rejected selection of unknown procedure");
            return Err(SessionError::InvalidSelection(key.clone()));
        }

        self.state = NavState::Stepping {
            key: key.clone(),
            cursor: 0,
        };
        self.record_history(key)?;

        tracing::info!(key = %key, "Procedure selected");
        Ok(())
    }

    /// Move to the next step, or to the summary after the last one
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidTransition`] unless stepping.
    #[tracing::instrument(level = "debug", skip(self), fields(session = %self.id))]
    pub fn advance(&mut self) -> Result<Progress, SessionError> {
        let NavState::Stepping { key, cursor } = &self.state else {
            tracing::warn!(state = %self.state, "Rejected advance");
            return Err(SessionError::invalid_transition("advance", &self.state));
        };

        let total = self
            .catalog
            .lookup(key)
            .map(ProcedureDefinition::step_count)
            .ok_or_else(|| SessionError::InvalidSelection(key.clone()))?;

        let next = cursor + 1;
        if next < total {
            tracing::debug!(key = %key, step = next + 1, total, "Advanced");
            self.state = NavState::Stepping {
                key: key.clone(),
                cursor: next,
            };
            Ok(Progress::Stepping(next))
        } else {
            tracing::info!(key = %key, "Procedure completed");
            self.state = NavState::Summary { key: key.clone() };
            Ok(Progress::Completed)
        }
    }

    /// Append `key` to history unless already present
    ///
    /// Returns `true` if the key was newly recorded.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidSelection`] if `key` is not in the
    /// catalog.
    pub fn record_history(&mut self, key: &ProcedureKey) -> Result<bool, SessionError> {
        if !self.catalog.contains(key) {
            return Err(SessionError::InvalidSelection(key.clone()));
        }
        Ok(self.history.insert(key.clone()))
    }

    /// Re-select a previously visited procedure
    ///
    /// History order and membership are unchanged.
    ///
    /// # Errors
    /// Returns [`SessionError::NotInHistory`] if `key` was never visited.
    #[tracing::instrument(level = "debug", skip(self), fields(session = %self.id))]
    pub fn replay_from_history(&mut self, key: &ProcedureKey) -> Result<(), SessionError> {
        if !self.history.contains(key) {
            tracing::warn!(key = %key, "Rejected replay of unvisited procedure");
            return Err(SessionError::NotInHistory(key.clone()));
        }
        self.select_procedure(key)
    }

    /// Re-select the history entry at a 0-based position
    ///
    /// # Errors
    /// Returns [`SessionError::HistoryIndexOutOfRange`] past the end.
    pub fn replay_history_entry(&mut self, index: usize) -> Result<ProcedureKey, SessionError> {
        let key = self
            .history
            .get_index(index)
            .cloned()
            .ok_or(SessionError::HistoryIndexOutOfRange {
                index,
                len: self.history.len(),
            })?;
        self.replay_from_history(&key)?;
        Ok(key)
    }

    /// Step at the cursor
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidTransition`] unless stepping.
    pub fn current_step(&self) -> Result<&Step, SessionError> {
        let NavState::Stepping { key, cursor } = &self.state else {
            return Err(SessionError::invalid_transition("show a step", &self.state));
        };

        self.catalog
            .lookup(key)
            .and_then(|procedure| procedure.step(*cursor))
            .ok_or_else(|| SessionError::InvalidSelection(key.clone()))
    }

    /// Check if the summary has been reached
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.state, NavState::Summary { .. })
    }

    /// Check that the state names a registered procedure and, while
    /// stepping, an existing step
    pub(crate) fn position_is_valid(&self) -> bool {
        match &self.state {
            NavState::Idle => true,
            NavState::Stepping { .. } => self.current_step().is_ok(),
            NavState::Summary { key } => self.catalog.contains(key),
        }
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: NavState) {
        self.state = state;
    }

    /// Return to idle and forget history
    pub fn reset(&mut self) {
        tracing::debug!(session = %self.id, "Session reset");
        self.state = NavState::Idle;
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;

    fn catalog() -> Arc<Catalog> {
        let two = ProcedureDefinition::new("two step", "Two")
            .with_keywords(["pair"])
            .with_step(Step::new(1, "first", "l1"))
            .with_step(Step::new(2, "second", "l2"));
        let one = ProcedureDefinition::new("one step", "One").with_step(Step::new(1, "only", "l"));
        Arc::new(Catalog::new([two, one]).unwrap())
    }

    #[test]
    fn new_session_is_idle() {
        let session = Session::new(catalog());
        assert_eq!(session.state(), &NavState::Idle);
        assert!(!session.is_complete());
        assert!(session.active_procedure().is_none());
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn select_starts_at_first_step() {
        let mut session = Session::new(catalog());
        session.select_procedure(&ProcedureKey::new("two step")).unwrap();

        assert_eq!(
            session.state(),
            &NavState::Stepping {
                key: ProcedureKey::new("two step"),
                cursor: 0
            }
        );
        assert_eq!(session.current_step().unwrap().description, "first");
    }

    #[test]
    fn single_step_procedure_completes_on_first_advance() {
        let mut session = Session::new(catalog());
        session.select_procedure(&ProcedureKey::new("one step")).unwrap();

        assert_eq!(session.advance().unwrap(), Progress::Completed);
        assert!(session.is_complete());
    }

    #[test]
    fn advance_while_idle_is_invalid() {
        let mut session = Session::new(catalog());
        let err = session.advance().unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidTransition {
                operation: "advance",
                state: NavState::Idle
            }
        ));
    }

    #[test]
    fn current_step_in_summary_is_invalid() {
        let mut session = Session::new(catalog());
        session.select_procedure(&ProcedureKey::new("one step")).unwrap();
        session.advance().unwrap();

        assert!(matches!(
            session.current_step(),
            Err(SessionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn unknown_selection_leaves_state_untouched() {
        let mut session = Session::new(catalog());
        session.select_procedure(&ProcedureKey::new("two step")).unwrap();
        session.advance().unwrap();
        let before = session.state().clone();

        let err = session
            .select_procedure(&ProcedureKey::new("ghost"))
            .unwrap_err();

        assert_eq!(err, SessionError::InvalidSelection(ProcedureKey::new("ghost")));
        assert_eq!(session.state(), &before);
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn record_history_rejects_unknown_keys() {
        let mut session = Session::new(catalog());
        assert!(session.record_history(&ProcedureKey::new("ghost")).is_err());
        assert!(session.record_history(&ProcedureKey::new("one step")).unwrap());
        assert!(!session.record_history(&ProcedureKey::new("one step")).unwrap());
    }

    #[test]
    fn submit_query_no_match_keeps_state() {
        let mut session = Session::new(catalog());
        session.submit_query("pair").unwrap();
        session.advance().unwrap();
        let before = session.state().clone();

        let outcome = session.submit_query("Ransomware").unwrap();

        assert_eq!(
            outcome,
            QueryOutcome::NoMatch {
                query: "Ransomware".to_string()
            }
        );
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn submit_blank_query_is_empty_query() {
        let mut session = Session::new(catalog());
        let err = session.submit_query("  ").unwrap_err();
        assert!(matches!(err, GuideError::Resolve(ResolveError::EmptyQuery)));
    }

    #[test]
    fn replay_unvisited_is_rejected() {
        let mut session = Session::new(catalog());
        let err = session
            .replay_from_history(&ProcedureKey::new("one step"))
            .unwrap_err();
        assert_eq!(err, SessionError::NotInHistory(ProcedureKey::new("one step")));
        assert_eq!(session.state(), &NavState::Idle);
    }

    #[test]
    fn replay_history_entry_by_position() {
        let mut session = Session::new(catalog());
        session.submit_query("one").unwrap();
        session.submit_query("two").unwrap();

        let key = session.replay_history_entry(0).unwrap();
        assert_eq!(key, ProcedureKey::new("one step"));
        assert_eq!(session.state().active_key(), Some(&key));

        assert_eq!(
            session.replay_history_entry(5).unwrap_err(),
            SessionError::HistoryIndexOutOfRange { index: 5, len: 2 }
        );
    }

    #[test]
    fn reset_returns_to_idle_and_clears_history() {
        let mut session = Session::new(catalog());
        session.submit_query("two").unwrap();
        session.reset();

        assert_eq!(session.state(), &NavState::Idle);
        assert_eq!(session.history().count(), 0);
    }

    #[test]
    fn nav_state_display() {
        let state = NavState::Stepping {
            key: ProcedureKey::new("otp fraud"),
            cursor: 2,
        };
        assert_eq!(state.to_string(), "at step 3 of 'otp fraud'");
    }
}
