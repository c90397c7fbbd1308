//! Testing utilities for SOP Guide workspace
//!
//! Shared fixture catalogs, session helpers and a scripted QA stub.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use sop_assistant::{Assistant, AssistantError};
use sop_catalog::{Catalog, ProcedureDefinition, ProcedureKey, Step};
use sop_engine::Session;
use std::collections::VecDeque;
use std::sync::Arc;

/// Procedure with `steps` numbered steps, descriptions `"<key> step <n>"`
pub fn linear_procedure(key: &str, steps: usize) -> ProcedureDefinition {
    (1..=steps).fold(
        ProcedureDefinition::new(key, format!("SOP for {key}")),
        |procedure, n| {
            procedure.with_step(Step::new(n, format!("{key} step {n}"), format!("law {n}")))
        },
    )
}

/// Two procedures whose keywords both contain "card"
///
/// `card skimming` is registered before `card kyc fraud`.
pub fn overlapping_catalog() -> Catalog {
    Catalog::new([
        linear_procedure("card skimming", 3).with_keywords(["atm card", "skimmer"]),
        linear_procedure("card kyc fraud", 2).with_keywords(["card update", "kyc"]),
    ])
    .unwrap()
}

/// Small catalog with three keys, A/B/C for history scenarios
pub fn abc_catalog() -> Catalog {
    Catalog::new([
        linear_procedure("alpha", 2),
        linear_procedure("bravo", 3),
        linear_procedure("charlie", 1),
    ])
    .unwrap()
}

/// Built-in dataset behind an `Arc`
pub fn builtin_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin().unwrap())
}

/// Fresh idle session over a catalog
pub fn session_over(catalog: Catalog) -> Session {
    Session::new(Arc::new(catalog))
}

/// Shorthand for a normalized key
pub fn key(raw: &str) -> ProcedureKey {
    ProcedureKey::new(raw)
}

/// Scripted reply for [`ScriptedAssistant`]
#[derive(Debug, Clone)]
pub enum Reply {
    Answer(String),
    Status(u16),
}

/// [`Assistant`] that replays queued replies and records questions
///
/// An exhausted script answers with status 503.
#[derive(Debug, Default)]
pub struct ScriptedAssistant {
    replies: Mutex<VecDeque<Reply>>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedAssistant {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(answer: &str) -> Self {
        Self::new([Reply::Answer(answer.to_string())])
    }

    pub fn failing() -> Self {
        Self::new([Reply::Status(500)])
    }

    /// Questions received so far
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().clone()
    }
}

#[async_trait]
impl Assistant for ScriptedAssistant {
    async fn ask(&self, question: &str) -> Result<String, AssistantError> {
        self.questions.lock().push(question.to_string());
        match self.replies.lock().pop_front() {
            Some(Reply::Answer(answer)) => Ok(answer),
            Some(Reply::Status(code)) => Err(AssistantError::Status(code)),
            None => Err(AssistantError::Status(503)),
        }
    }
}
