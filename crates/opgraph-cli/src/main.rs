#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
//! `opgraph` CLI - run plans of column operations described as chains
//!
//! Usage:
//!   `opgraph run --plan data/plan.yaml`
//!   `opgraph run --plan data/plan.yaml --scheme data/scheme.txt --all`
//!   `opgraph check --plan data/plan.yaml --scheme data/scheme.txt`
//!   `opgraph operations --plan data/plan.yaml`

mod output;
mod prompts;
mod run;
mod scheme_input;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use opgraph_core::settings::SETTINGS_FILE;
use opgraph_core::{GrammarKind, OperationRegistry, PlanConfig, Settings, TraversalScope};

#[derive(Parser)]
#[command(name = "opgraph")]
#[command(
    author,
    version,
    about = "opgraph CLI - run column operations wired as chains"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Settings file
    #[arg(long, global = true, env = "OPGRAPH_CONFIG", default_value = SETTINGS_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for summaries
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a scheme and run every reachable operation once
    Run {
        /// Plan file (discovered in the data directory if omitted)
        #[arg(short, long)]
        plan: Option<PathBuf>,

        /// Scheme file (read from stdin until `end` if omitted)
        #[arg(short, long)]
        scheme: Option<PathBuf>,

        /// Scheme tokens are operation ids instead of 1-based indices
        #[arg(long)]
        literal: bool,

        /// Also run operations unreachable from the first node
        #[arg(long)]
        all: bool,

        /// Directory searched for plan files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Results log path
        #[arg(short, long)]
        results: Option<PathBuf>,

        /// Output format (table, json)
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Validate a scheme against a plan without running it
    Check {
        /// Plan file
        #[arg(short, long)]
        plan: PathBuf,

        /// Scheme file
        #[arg(short, long)]
        scheme: PathBuf,

        /// Scheme tokens are operation ids instead of 1-based indices
        #[arg(long)]
        literal: bool,
    },

    /// List the operations configured in a plan
    Operations {
        /// Plan file
        #[arg(short, long)]
        plan: PathBuf,
    },

    /// List the built-in reducer functions
    Functions,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn grammar_kind(settings: &Settings, literal: bool) -> GrammarKind {
    if literal {
        GrammarKind::Literal
    } else {
        settings.scheme.grammar
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load_from_path(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;
    settings.validate()?;
    init_logging(&settings.logging.level);

    match cli.command {
        Commands::Run {
            plan,
            scheme,
            literal,
            all,
            data_dir,
            results,
            format,
        } => {
            let options = run::RunOptions {
                plan,
                scheme,
                grammar: grammar_kind(&settings, literal),
                scope: if all {
                    TraversalScope::AllNodes
                } else {
                    settings.traversal.scope
                },
                data_dir: data_dir.unwrap_or_else(|| settings.data.dir.clone()),
                results,
                format,
            };
            run::execute(&settings, &options)?;
        }
        Commands::Check {
            plan,
            scheme,
            literal,
        } => {
            let plan = run::load_plan(&plan)?;
            run::check(&plan, &scheme, grammar_kind(&settings, literal))?;
        }
        Commands::Operations { plan } => {
            let plan = PlanConfig::from_file(&plan)
                .with_context(|| format!("Failed to load plan {}", plan.display()))?;
            output::print_operations(&plan, &OperationRegistry::with_builtins());
        }
        Commands::Functions => {
            output::print_functions(&OperationRegistry::with_builtins());
        }
    }

    Ok(())
}
