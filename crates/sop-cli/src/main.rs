//! `sop-guide` binary
//!
//! Interactive SOP walkthrough plus one-shot `list`, `show` and `ask`
//! subcommands.

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use sop_assistant::{consult, HttpAssistant};
use sop_cli::render::{render_catalog, render_no_match, render_view};
use sop_cli::{load_catalog, repl, telemetry, walkthrough, Console, GuideConfig};
use sop_engine::Session;
use std::path::PathBuf;
use std::sync::Arc;

fn cli() -> Command {
    Command::new("sop-guide")
        .version(sop_cli::VERSION)
        .about("Stepwise guide through cyber-crime investigation SOPs")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file (default: ./sop-guide.toml if present)"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .global(true)
                .help("AI assistant endpoint URL"),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Procedure dataset file (.json, .yaml, .yml)"),
        )
        .subcommand(Command::new("run").about("Interactive guidance session (default)"))
        .subcommand(Command::new("list").about("List known procedures"))
        .subcommand(
            Command::new("show")
                .about("Print every step of the procedure matching a query")
                .arg(
                    Arg::new("query")
                        .required(true)
                        .num_args(1..)
                        .help("Crime type or keyword"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("ask")
                .about("Ask the AI assistant one question")
                .arg(
                    Arg::new("question")
                        .required(true)
                        .num_args(1..)
                        .help("Question text"),
                ),
        )
}

fn joined(args: &ArgMatches, id: &str) -> String {
    args.get_many::<String>(id)
        .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn resolve_config(matches: &ArgMatches) -> anyhow::Result<GuideConfig> {
    let cwd = std::env::current_dir().context("reading working directory")?;
    let explicit = matches.get_one::<PathBuf>("config");

    let mut config = GuideConfig::discover(explicit.map(PathBuf::as_path), &cwd)
        .context("loading configuration")?;

    if let Some(endpoint) = matches.get_one::<String>("endpoint") {
        config = config.with_endpoint(endpoint.clone());
    }
    if let Some(path) = matches.get_one::<PathBuf>("catalog") {
        config = config.with_catalog_path(path.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let config = resolve_config(&matches)?;
    telemetry::init_tracing(&config.log_filter);

    let catalog = Arc::new(load_catalog(&config).context("loading procedure catalog")?);
    let assistant = Arc::new(HttpAssistant::new(&config.assistant));
    tracing::info!(
        procedures = catalog.len(),
        endpoint = %assistant.endpoint(),
        "SOP guide starting"
    );

    match matches.subcommand() {
        Some(("list", _)) => {
            println!("{}", render_catalog(&catalog));
        }
        Some(("show", args)) => {
            let query = joined(args, "query");
            let mut session = Session::new(Arc::clone(&catalog));

            match walkthrough(&mut session, &query)? {
                None => println!("{}", render_no_match(&query)),
                Some(views) if args.get_flag("json") => {
                    println!("{}", serde_json::to_string_pretty(&views)?);
                }
                Some(views) => {
                    for view in &views {
                        println!("{}\n", render_view(view));
                    }
                }
            }
        }
        Some(("ask", args)) => {
            let question = joined(args, "question");
            if let Some(answer) = consult(assistant.as_ref(), &question).await {
                println!("{answer}");
            }
        }
        _ => {
            let console = Console::new(Session::new(catalog), assistant);
            repl::run(console, config.show_banner).await?;
        }
    }

    Ok(())
}
