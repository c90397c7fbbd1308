//! Interactive loop over stdin/stdout

use crate::command::{ReplCommand, HELP};
use crate::console::{Console, Reaction};
use crate::render::banner;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const PROMPT: &str = "sop> ";

/// Run the REPL until `quit` or end of input
///
/// # Errors
/// Returns error if stdin or stdout fail.
pub async fn run(mut console: Console, show_banner: bool) -> std::io::Result<()> {
    if show_banner {
        println!("{}\n", banner());
    }
    println!("{HELP}\n");

    let mut answers = console.board().subscribe();
    let printer = tokio::spawn(async move {
        while answers.changed().await.is_ok() {
            let text = answers.borrow_and_update().clone();
            println!("\n[assistant] {text}");
            print!("{PROMPT}");
            let _ = std::io::stdout().flush();
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{PROMPT}");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match console.handle(ReplCommand::parse(&line)) {
            Reaction::Print(text) if text.is_empty() => {}
            Reaction::Print(text) => println!("{text}\n"),
            Reaction::Pending => {}
            Reaction::Quit => break,
        }
    }

    tracing::debug!(session = %console.session().id(), "Session closed");
    printer.abort();
    Ok(())
}
