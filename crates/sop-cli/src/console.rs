//! Operator console
//!
//! Binds one [`Session`] to the assistant and turns each [`ReplCommand`]
//! into text to print. Navigation runs synchronously; questions go to the
//! [`AnswerBoard`] on a background task, so stepping continues while an
//! answer is pending.

use crate::command::{ReplCommand, HELP};
use crate::render::{render_catalog, render_history, render_no_match, render_view};
use sop_assistant::{ask_in_background, AnswerBoard, Assistant};
use sop_engine::{GuideError, QueryOutcome, Session, SessionError, SessionView};
use std::sync::Arc;

/// What the REPL should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Print text
    Print(String),
    /// Nothing to print now; output arrives on the answer board
    Pending,
    /// Leave the REPL
    Quit,
}

/// One operator interaction
pub struct Console {
    session: Session,
    assistant: Arc<dyn Assistant>,
    board: AnswerBoard,
}

impl Console {
    /// Create console over a session
    #[must_use]
    pub fn new(session: Session, assistant: Arc<dyn Assistant>) -> Self {
        Self {
            session,
            assistant,
            board: AnswerBoard::new(),
        }
    }

    /// Session being driven
    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Assistant answer surface
    #[inline]
    #[must_use]
    pub fn board(&self) -> &AnswerBoard {
        &self.board
    }

    /// Apply one command
    ///
    /// Must run inside a tokio runtime; `ask` spawns a task.
    pub fn handle(&mut self, command: ReplCommand) -> Reaction {
        match command {
            ReplCommand::Search(query) => Reaction::Print(self.search(&query)),
            ReplCommand::Next => Reaction::Print(self.next()),
            ReplCommand::History => {
                Reaction::Print(render_history(&self.session.history_view()))
            }
            ReplCommand::Replay(position) => Reaction::Print(self.replay(position)),
            ReplCommand::Ask(question) => {
                match ask_in_background(Arc::clone(&self.assistant), &self.board, &question) {
                    Some(_) => Reaction::Pending,
                    None => Reaction::Print("Please type a question.".to_string()),
                }
            }
            ReplCommand::List => Reaction::Print(render_catalog(self.session.catalog())),
            ReplCommand::Help => Reaction::Print(HELP.to_string()),
            ReplCommand::Quit => Reaction::Quit,
            ReplCommand::Empty => Reaction::Print(String::new()),
            ReplCommand::Invalid(message) => Reaction::Print(message),
        }
    }

    fn search(&mut self, query: &str) -> String {
        match self.session.submit_query(query) {
            Ok(QueryOutcome::Started(_)) => render_view(&self.session.view()),
            Ok(QueryOutcome::NoMatch { query }) => render_no_match(&query),
            Err(e) if e.is_usage_error() => "Please enter a crime type or keyword.".to_string(),
            Err(e) => {
                tracing::error!("Search failed: {}", e);
                format!("Search failed: {e}")
            }
        }
    }

    fn next(&mut self) -> String {
        match self.session.advance() {
            Ok(_) => render_view(&self.session.view()),
            Err(SessionError::InvalidTransition { .. }) => match self.session.view() {
                SessionView::Summary(_) => {
                    "Procedure complete. Search for another procedure or replay one from history."
                        .to_string()
                }
                _ => "No procedure in progress. Search for one first.".to_string(),
            },
            Err(e) => {
                tracing::error!("Advance failed: {}", e);
                format!("{}", GuideError::from(e))
            }
        }
    }

    fn replay(&mut self, position: usize) -> String {
        match self.session.replay_history_entry(position.saturating_sub(1)) {
            Ok(_) => render_view(&self.session.view()),
            Err(SessionError::HistoryIndexOutOfRange { .. }) => {
                format!("No history entry {position}.")
            }
            Err(e) => {
                tracing::error!("Replay failed: {}", e);
                format!("{}", GuideError::from(e))
            }
        }
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("session", &self.session)
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}
