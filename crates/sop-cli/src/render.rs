//! Plain-text rendering of view-model snapshots

use sop_catalog::Catalog;
use sop_engine::{HistoryEntry, SessionView, StepView, SummaryView};
use std::fmt::Write;

/// Advisory headlines shown once at startup
pub const BANNER_ITEMS: [&str; 3] = [
    "ALERT: New strain of phishing email targeting government employees detected.",
    "UPDATE: RBI issues new guidelines for digital payment security to combat rising online fraud.",
    "NEWS: Interpol launches global operation 'CyberSurge' against ransomware groups.",
];

/// Startup banner
#[must_use]
pub fn banner() -> String {
    BANNER_ITEMS.join(" ••• ")
}

/// Render the current session view
#[must_use]
pub fn render_view(view: &SessionView) -> String {
    match view {
        SessionView::Idle => "No procedure selected. Enter a crime type or keyword.".to_string(),
        SessionView::Step(step) => render_step(step),
        SessionView::Summary(summary) => render_summary(summary),
    }
}

/// Message for a query that matched nothing
#[must_use]
pub fn render_no_match(query: &str) -> String {
    format!("No SOP found for \"{query}\".")
}

fn render_step(step: &StepView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (Step {} of {})", step.title, step.ordinal, step.total);
    let _ = writeln!(out, "\nStep Description:\n  {}", step.description);

    out.push_str("\nEvidence Checklist:\n");
    push_items(&mut out, &step.evidence_checklist);

    if !step.coordination.is_empty() {
        out.push_str("\nCoordinate With:\n");
        push_items(&mut out, &step.coordination);
    }

    let _ = writeln!(out, "\nLegal Framework:\n  {}", step.legal_basis);

    if step.is_last() {
        out.push_str("\n[next] Finish procedure");
    } else {
        out.push_str("\n[next] Proceed to Next Step");
    }
    out
}

fn render_summary(summary: &SummaryView) -> String {
    let mut out = format!("End of Procedure: {}\n", summary.title);
    if !summary.registration_note.is_empty() {
        let _ = writeln!(out, "Registration: {}", summary.registration_note);
    }
    let _ = write!(out, "Note: {}", summary.closing_note);
    out
}

fn push_items(out: &mut String, items: &[String]) {
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

/// Render history entries, numbered from 1 in first-visit order
#[must_use]
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No investigations yet.".to_string();
    }

    let mut out = String::from("Investigation history:");
    for (index, entry) in entries.iter().enumerate() {
        let _ = write!(out, "\n  {}. {} [{}]", index + 1, entry.title, entry.key);
    }
    out
}

/// Render every procedure key and title in registration order
#[must_use]
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::from("Known procedures:");
    for procedure in catalog.iter() {
        let _ = write!(out, "\n  {:<28} {}", procedure.key.as_str(), procedure.title);
    }
    out
}
