//! Emotion Explorer CLI - browse the feelings wheel and journal how you feel.

use clap::Parser;
use emotion_explorer::cli::{Cli, Commands, ConfigCommands};
use emotion_explorer::commands::{self, Context, Output};
use emotion_explorer::config::{self, ConfigOverrides, OutputFormat};
use std::io::{self, IsTerminal};
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g., `debug`).
const LOG_ENV: &str = "EMX_LOG";

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let mut overrides = ConfigOverrides::new();
    if let Some(path) = cli.journal_path {
        overrides = overrides.with_journal_path(path);
    }
    if let Some(path) = cli.emotions_path {
        overrides = overrides.with_emotions_path(path);
    }
    if cli.human_readable {
        overrides = overrides.with_output_format(OutputFormat::Human);
    }

    if let Err(e) = run_command(cli.command, &overrides, cli.human_readable) {
        tracing::error!(error = %e, "command failed");
        // The config may not have resolved, so only the flag decides here
        if cli.human_readable {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

/// Log to stderr so stdout stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run_command(
    command: Option<Commands>,
    overrides: &ConfigOverrides,
    human_flag: bool,
) -> Result<(), emotion_explorer::Error> {
    // Config commands must work even when the taxonomy is broken
    let command = match command {
        Some(Commands::Config { command }) => return run_config(command, overrides, human_flag),
        other => other,
    };

    let ctx = Context::open(overrides)?;
    let human = ctx.config.output_format() == OutputFormat::Human;

    match command {
        None => output(&commands::status(&ctx)?, human),
        Some(Commands::Primary) => output(&commands::primary(&ctx), human),
        Some(Commands::Children { id }) => output(&commands::children(&ctx, &id), human),
        Some(Commands::Show { id }) => output(&commands::show(&ctx, &id)?, human),
        Some(Commands::Log { path }) => output(&commands::log(&ctx, &path)?, human),
        Some(Commands::Journal { limit }) => output(&commands::journal(&ctx, limit)?, human),
        Some(Commands::Doctor) => output(&commands::doctor(&ctx), human),
        Some(Commands::Explore) => {
            let mut nav = ctx.controller();
            let stdin = io::stdin();
            commands::explore(&mut nav, stdin.lock(), io::stdout().lock())?;
        }
        Some(Commands::Config { .. }) => unreachable!("handled above"),
    }

    Ok(())
}

fn run_config(
    command: ConfigCommands,
    overrides: &ConfigOverrides,
    human_flag: bool,
) -> Result<(), emotion_explorer::Error> {
    match command {
        ConfigCommands::Show => {
            let file = config::load_user_config()?;
            let resolved = config::resolve_config(&file, overrides)?;
            let human = human_flag || resolved.output_format() == OutputFormat::Human;
            output(&commands::config_show(&resolved), human);
        }
        ConfigCommands::Path => {
            println!("{}", config::config_kdl_path()?.display());
        }
    }
    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
