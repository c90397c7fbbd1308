//! Console behaviour over scripted assistants

use pretty_assertions::assert_eq;
use sop_assistant::{FALLBACK_MESSAGE, PROCESSING_MESSAGE};
use sop_cli::{walkthrough, Console, GuideConfig, Reaction, ReplCommand};
use sop_engine::{Session, SessionView};
use sop_test_utils::{abc_catalog, builtin_catalog, key, session_over, ScriptedAssistant};
use std::sync::Arc;
use std::time::Duration;

fn console(assistant: ScriptedAssistant) -> Console {
    Console::new(session_over(abc_catalog()), Arc::new(assistant))
}

fn printed(reaction: Reaction) -> String {
    match reaction {
        Reaction::Print(text) => text,
        other => panic!("expected printed text, got {other:?}"),
    }
}

fn run(console: &mut Console, line: &str) -> String {
    printed(console.handle(ReplCommand::parse(line)))
}

#[tokio::test]
async fn search_next_and_summary() {
    let mut console = console(ScriptedAssistant::default());

    let first = run(&mut console, "alpha");
    assert!(first.starts_with("SOP for alpha (Step 1 of 2)"));
    assert!(first.contains("alpha step 1"));

    let second = run(&mut console, "next");
    assert!(second.contains("(Step 2 of 2)"));
    assert!(second.ends_with("Finish procedure"));

    let summary = run(&mut console, "n");
    assert!(summary.starts_with("End of Procedure: SOP for alpha"));

    let hint = run(&mut console, "next");
    assert!(hint.starts_with("Procedure complete."));
}

#[tokio::test]
async fn next_before_any_search_hints() {
    let mut console = console(ScriptedAssistant::default());
    assert_eq!(
        run(&mut console, "next"),
        "No procedure in progress. Search for one first."
    );
}

#[tokio::test]
async fn unknown_query_reports_no_match() {
    let mut console = console(ScriptedAssistant::default());
    assert_eq!(run(&mut console, "ransomware"), "No SOP found for \"ransomware\".");
    assert_eq!(console.session().history_len(), 0);
}

#[tokio::test]
async fn blank_search_asks_for_input() {
    let mut console = console(ScriptedAssistant::default());
    assert_eq!(
        run(&mut console, "search   "),
        "Please enter a crime type or keyword."
    );
}

#[tokio::test]
async fn history_and_replay() {
    let mut console = console(ScriptedAssistant::default());
    run(&mut console, "bravo");
    run(&mut console, "alpha");
    run(&mut console, "bravo");

    let history = run(&mut console, "history");
    assert!(history.contains("1. SOP for bravo [bravo]"));
    assert!(history.contains("2. SOP for alpha [alpha]"));
    assert!(!history.contains("3."));

    let replayed = run(&mut console, "replay 2");
    assert!(replayed.starts_with("SOP for alpha (Step 1 of 2)"));
    assert_eq!(console.session().history_len(), 2);

    assert_eq!(run(&mut console, "replay 5"), "No history entry 5.");
    assert!(run(&mut console, "replay zero").starts_with("usage: replay"));
}

#[tokio::test]
async fn list_shows_catalog_in_order() {
    let mut console = console(ScriptedAssistant::default());
    let listing = run(&mut console, "list");

    let alpha = listing.find("alpha").unwrap();
    let bravo = listing.find("bravo").unwrap();
    let charlie = listing.find("charlie").unwrap();
    assert!(alpha < bravo && bravo < charlie);
}

#[tokio::test]
async fn quit_and_blank_lines() {
    let mut console = console(ScriptedAssistant::default());
    assert_eq!(console.handle(ReplCommand::parse("quit")), Reaction::Quit);
    assert_eq!(console.handle(ReplCommand::parse("   ")), Reaction::Print(String::new()));
}

#[tokio::test]
async fn ask_posts_answer_without_moving_session() {
    let mut console = console(ScriptedAssistant::answering("Preserve the call logs"));
    run(&mut console, "alpha");

    let mut answers = console.board().subscribe();
    assert_eq!(console.handle(ReplCommand::parse("ask what next?")), Reaction::Pending);
    assert_eq!(console.board().current(), PROCESSING_MESSAGE);

    tokio::time::timeout(Duration::from_secs(5), async {
        while *answers.borrow_and_update() != "Preserve the call logs" {
            answers.changed().await.unwrap();
        }
    })
    .await
    .unwrap();

    assert_eq!(console.session().state().active_key(), Some(&key("alpha")));
    assert!(run(&mut console, "next").contains("(Step 2 of 2)"));
}

#[tokio::test]
async fn failed_ask_shows_fallback() {
    let mut console = console(ScriptedAssistant::failing());

    let mut answers = console.board().subscribe();
    assert_eq!(console.handle(ReplCommand::parse("ask anyone there?")), Reaction::Pending);

    tokio::time::timeout(Duration::from_secs(5), async {
        while *answers.borrow_and_update() != FALLBACK_MESSAGE {
            answers.changed().await.unwrap();
        }
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn blank_ask_is_rejected() {
    let mut console = console(ScriptedAssistant::default());
    assert_eq!(run(&mut console, "ask"), "Please type a question.");
    assert_eq!(console.board().current(), "");
}

#[test]
fn walkthrough_covers_every_step_then_summary() {
    let mut session = Session::new(builtin_catalog());
    let views = walkthrough(&mut session, "sim swap").unwrap().unwrap();

    assert_eq!(views.len(), 8);
    for (index, view) in views[..7].iter().enumerate() {
        match view {
            SessionView::Step(step) => {
                assert_eq!(step.ordinal, index + 1);
                assert_eq!(step.total, 7);
            }
            other => panic!("expected step view, got {other:?}"),
        }
    }
    assert!(matches!(views[7], SessionView::Summary(_)));
    assert!(session.is_complete());
}

#[test]
fn walkthrough_without_match_is_none() {
    let mut session = Session::new(builtin_catalog());
    assert!(walkthrough(&mut session, "ransomware").unwrap().is_none());
    assert!(walkthrough(&mut session, "  ").is_err());
}

#[test]
fn config_discovery() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        GuideConfig::discover(None, dir.path()).unwrap(),
        GuideConfig::default()
    );

    std::fs::write(
        dir.path().join(sop_cli::config::DEFAULT_CONFIG_FILE),
        "show_banner = false\n",
    )
    .unwrap();
    assert!(!GuideConfig::discover(None, dir.path()).unwrap().show_banner);

    let explicit = dir.path().join("other.toml");
    std::fs::write(&explicit, "[assistant]\nendpoint = \"http://qa/ask\"\n").unwrap();
    let config = GuideConfig::discover(Some(&explicit), dir.path()).unwrap();
    assert_eq!(config.assistant.endpoint, "http://qa/ask");
    assert!(config.show_banner);

    let missing = dir.path().join("missing.toml");
    assert!(GuideConfig::discover(Some(&missing), dir.path()).is_err());
}
