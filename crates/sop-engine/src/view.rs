//! View-model snapshots
//!
//! What the presentation layer shows, never how. Snapshots are owned,
//! serializable copies so a renderer can hold them without borrowing the
//! session.

use crate::session::{NavState, Session};
use serde::Serialize;
use sop_catalog::ProcedureKey;

/// Fixed note shown at the end of every procedure
pub const CLOSING_NOTE: &str =
    "Ensure all collected evidence is properly documented and filed according to procedure.";

/// Snapshot of what the session currently shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionView {
    /// Nothing selected yet
    Idle,
    /// One step of the active procedure
    Step(StepView),
    /// End of the active procedure
    Summary(SummaryView),
}

/// One step with its position in the procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    /// Procedure key
    pub key: ProcedureKey,
    /// Procedure title
    pub title: String,
    /// 1-based step number
    pub ordinal: usize,
    /// Total number of steps
    pub total: usize,
    /// What to do at this step
    pub description: String,
    /// Evidence to collect
    pub evidence_checklist: Vec<String>,
    /// Parties to coordinate with; may be empty
    pub coordination: Vec<String>,
    /// Legal framework for the step
    pub legal_basis: String,
}

impl StepView {
    /// Check if this is the final step
    #[inline]
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.ordinal == self.total
    }
}

/// End-of-procedure summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    /// Procedure key
    pub key: ProcedureKey,
    /// Procedure title
    pub title: String,
    /// Registration requirement, verbatim
    pub registration_note: String,
    /// Always [`CLOSING_NOTE`]
    pub closing_note: String,
}

/// One history entry as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Visited procedure
    pub key: ProcedureKey,
    /// Its display title
    pub title: String,
}

impl Session {
    /// Snapshot of the current state
    ///
    /// A position outside the catalog is an integrity violation: it panics
    /// in debug builds and renders as idle, logged at error, otherwise.
    #[must_use]
    pub fn view(&self) -> SessionView {
        debug_assert!(
            self.position_is_valid(),
            "session position outside the catalog: {}",
            self.state()
        );

        let procedure = match (self.state(), self.active_procedure()) {
            (NavState::Idle, _) => return SessionView::Idle,
            (_, Some(procedure)) => procedure,
            (state, None) => {
                tracing::error!(session = %self.id(), %state, "Active procedure missing from catalog");
                return SessionView::Idle;
            }
        };

        match self.state() {
            NavState::Idle => SessionView::Idle,
            NavState::Stepping { cursor, .. } => match procedure.step(*cursor) {
                Some(step) => SessionView::Step(StepView {
                    key: procedure.key.clone(),
                    title: procedure.title.clone(),
                    ordinal: step.ordinal,
                    total: procedure.step_count(),
                    description: step.description.clone(),
                    evidence_checklist: step.evidence_checklist.clone(),
                    coordination: step.coordination.clone(),
                    legal_basis: step.legal_basis.clone(),
                }),
                None => {
                    tracing::error!(
                        session = %self.id(),
                        key = %procedure.key,
                        cursor,
                        "Stepping cursor outside procedure"
                    );
                    SessionView::Idle
                }
            },
            NavState::Summary { .. } => SessionView::Summary(SummaryView {
                key: procedure.key.clone(),
                title: procedure.title.clone(),
                registration_note: procedure.registration_note.clone(),
                closing_note: CLOSING_NOTE.to_string(),
            }),
        }
    }

    /// History with display titles, in first-visit order
    #[must_use]
    pub fn history_view(&self) -> Vec<HistoryEntry> {
        self.history()
            .filter_map(|key| self.catalog().lookup(key))
            .map(|procedure| HistoryEntry {
                key: procedure.key.clone(),
                title: procedure.title.clone(),
            })
            .collect()
    }
}
