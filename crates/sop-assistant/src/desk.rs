//! Operator-facing answer surface
//!
//! [`consult`] is the single point where QA failures are recovered into
//! the fixed fallback text. [`AnswerBoard`] is the display surface: each
//! post replaces the previous text, so a late answer simply overwrites
//! whatever is shown. Navigation state never passes through here.

use crate::client::Assistant;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Shown for any failed or unreachable QA exchange
pub const FALLBACK_MESSAGE: &str =
    "Connection to AI assistant failed. Please ensure the backend server is running.";

/// Shown while a question is outstanding
pub const PROCESSING_MESSAGE: &str = "Processing query...";

/// Ask one question and turn the outcome into display text
///
/// Returns `None` for a blank question; no request is made.
pub async fn consult(assistant: &dyn Assistant, question: &str) -> Option<String> {
    let question = question.trim();
    if question.is_empty() {
        return None;
    }

    match assistant.ask(question).await {
        Ok(answer) => Some(answer),
        Err(e) => {
            tracing::warn!("Error communicating with the assistant: {}", e);
            Some(FALLBACK_MESSAGE.to_string())
        }
    }
}

/// Last-write-wins answer display
#[derive(Debug, Clone)]
pub struct AnswerBoard {
    tx: Arc<watch::Sender<String>>,
}

impl AnswerBoard {
    /// Create an empty board
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(String::new());
        Self { tx: Arc::new(tx) }
    }

    /// Replace the displayed text
    pub fn post(&self, text: impl Into<String>) {
        self.tx.send_replace(text.into());
    }

    /// Currently displayed text
    #[must_use]
    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }

    /// Watch for new posts
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}

impl Default for AnswerBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Post [`PROCESSING_MESSAGE`] and answer `question` on a background task
///
/// Returns `None` without touching the board for a blank question. The
/// task is never cancelled; its answer lands on the board whenever it
/// arrives.
pub fn ask_in_background(
    assistant: Arc<dyn Assistant>,
    board: &AnswerBoard,
    question: &str,
) -> Option<JoinHandle<()>> {
    let question = question.trim().to_string();
    if question.is_empty() {
        return None;
    }

    board.post(PROCESSING_MESSAGE);
    let board = board.clone();
    Some(tokio::spawn(async move {
        if let Some(text) = consult(assistant.as_ref(), &question).await {
            board.post(text);
        }
    }))
}
