//! Command-line parsing for the friends map builder.
//!
//! Argument parsing and command dispatch stay separate from the pipeline code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "friends-map", version, about = "Map where a user's friends are")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask for the bearer token, screen name and count, then build the map.
    Prompt(OutputArgs),
    /// Build the map from flags (no prompts).
    Build(BuildArgs),
}

#[derive(Debug, Args, Clone, Default)]
pub struct OutputArgs {
    /// Where to save the map page. Defaults to `FRIENDS_MAP_OUTPUT` or `friends_map.html`.
    #[arg(short, long, value_name = "HTML")]
    pub output: Option<PathBuf>,

    /// Minimum delay between geocoder lookups, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub geocode_delay_ms: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct BuildArgs {
    /// Bearer token for the social API.
    #[arg(long, env = "FRIENDS_MAP_BEARER", hide_env_values = true)]
    pub bearer: String,

    /// Whose friends to map. Empty means `@BarackObama`.
    #[arg(short, long, default_value = "")]
    pub screen_name: String,

    /// How many friends to fetch. Empty means 2.
    #[arg(short, long, default_value = "")]
    pub count: String,

    /// Print an embeddable fragment to stdout instead of saving a page.
    #[arg(long)]
    pub fragment: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}
