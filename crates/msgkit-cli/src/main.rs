use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use msgkit_cli::cli::{group_summaries, load_messages, CliConfig, Transcript};
use msgkit_cli::tracing_setup::init_tracing;
use msgkit_core::models::{GroupingOption, MessageContainer, TimestampAnchor};
use msgkit_core::{Message, MessageLayout};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "msgkit")]
#[command(about = "Group chat messages and compute their layout flags")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, short, global = true)]
    pretty: bool,

    /// Path to JSON config file (view settings, custom renderers)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Bypass grouping: every message renders all of its chrome
    #[arg(long, global = true)]
    ungrouped: bool,

    /// Show the profile picture only on the last message of a group
    #[arg(long, global = true)]
    collapse_profile: bool,

    /// Show one header and one footer per group
    #[arg(long, global = true)]
    collapse_enclosing: bool,

    /// Show one timestamp per group at the given anchor
    #[arg(long, global = true, value_enum)]
    collapse_timestamps: Option<Anchor>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every message container as JSON
    Layout {
        /// Message file (JSON), or - for stdin
        file: PathBuf,
    },

    /// Print the message groups as JSON
    Groups {
        /// Message file (JSON), or - for stdin
        file: PathBuf,
    },

    /// Print a plain-text transcript
    Render {
        /// Message file (JSON), or - for stdin
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Anchor {
    Top,
    Bottom,
}

impl From<Anchor> for TimestampAnchor {
    fn from(anchor: Anchor) -> Self {
        match anchor {
            Anchor::Top => TimestampAnchor::Top,
            Anchor::Bottom => TimestampAnchor::Bottom,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Layout { file } => {
            let messages = load_messages(file)?;
            let containers = compute(&cli, &config, &messages)?;
            print_json(&containers, cli.pretty)
        }
        Commands::Groups { file } => {
            let messages = load_messages(file)?;
            let containers = compute(&cli, &config, &messages)?;
            print_json(&group_summaries(&containers), cli.pretty)
        }
        Commands::Render { file } => {
            let messages = load_messages(file)?;
            let containers = compute(&cli, &config, &messages)?;
            let dispatcher = config.dispatcher();
            let transcript = Transcript::new(&config.view, &dispatcher)?;
            for line in transcript.render(&containers) {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

/// Load the config file (if any) and apply command-line grouping overrides
fn load_config(cli: &Cli) -> Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    let grouping = &mut config.view.grouping;
    if cli.collapse_profile {
        grouping.insert(GroupingOption::CollapseProfilePicture);
    }
    if cli.collapse_enclosing {
        grouping.insert(GroupingOption::CollapseEnclosingViews);
    }
    if let Some(anchor) = cli.collapse_timestamps {
        grouping.insert(GroupingOption::CollapseTimestamps(anchor.into()));
    }

    Ok(config)
}

fn compute<'a>(cli: &Cli, config: &CliConfig, messages: &'a [Message]) -> Result<Vec<MessageContainer<'a>>> {
    let layout = MessageLayout::new(config.view.grouping).with_boundary(config.boundary());
    if cli.ungrouped {
        return Ok(layout.layout_ungrouped(messages));
    }
    layout
        .layout(messages)
        .with_context(|| format!("Failed to group {} messages", messages.len()))
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
