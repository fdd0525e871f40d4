//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads settings from the environment
//! - collects the query (prompts or flags)
//! - runs the pipeline and prints a summary

use clap::Parser;

use crate::cli::{BuildArgs, Command, OutputArgs};
use crate::config::Settings;
use crate::data::FriendsQuery;
use crate::error::AppError;
use crate::map::RenderMode;

pub mod logging;
pub mod pipeline;

/// Entry point for the `friends-map` binary.
pub fn run() -> Result<(), AppError> {
    // `friends-map` and `friends-map -v` behave like `friends-map prompt ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Prompt(args) => handle_prompt(args),
        Command::Build(args) => handle_build(args),
    }
}

fn handle_prompt(args: OutputArgs) -> Result<(), AppError> {
    let settings = settings_with_overrides(&args)?;
    let answers = crate::cli::prompt::prompt_for_query()?;
    let query = FriendsQuery::new(&answers.bearer, &answers.screen_name, &answers.count)?;

    let run = pipeline::run(&settings, &query, RenderMode::Page)?;
    println!("{}", crate::report::format_run_summary(&query, &run, Some(&settings.output)));
    Ok(())
}

fn handle_build(args: BuildArgs) -> Result<(), AppError> {
    let settings = settings_with_overrides(&args.output)?;
    let query = FriendsQuery::new(&args.bearer, &args.screen_name, &args.count)?;

    if args.fragment {
        let run = pipeline::run(&settings, &query, RenderMode::Fragment)?;
        eprintln!("{}", crate::report::format_run_summary(&query, &run, None));
        print!("{}", run.html);
        return Ok(());
    }

    let run = pipeline::run(&settings, &query, RenderMode::Page)?;
    println!("{}", crate::report::format_run_summary(&query, &run, Some(&settings.output)));
    Ok(())
}

/// Environment settings with CLI flags applied on top.
pub fn settings_with_overrides(args: &OutputArgs) -> Result<Settings, AppError> {
    let mut settings = Settings::from_env()?;
    apply_overrides(&mut settings, args);
    Ok(settings)
}

fn apply_overrides(settings: &mut Settings, args: &OutputArgs) {
    if let Some(path) = &args.output {
        settings.output = path.clone();
    }
    if let Some(ms) = args.geocode_delay_ms {
        settings.geocode_delay = std::time::Duration::from_millis(ms);
    }
}

/// Rewrite argv so `friends-map` defaults to `friends-map prompt`.
///
/// Rules:
/// - `friends-map`                       -> `friends-map prompt`
/// - `friends-map -v ...`                -> `friends-map prompt -v ...`
/// - `friends-map --help/--version/-h`   -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("prompt".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "prompt" | "build");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "prompt".to_string());
        return argv;
    }

    argv
}
