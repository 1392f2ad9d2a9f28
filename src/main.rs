//! entity-match: associate recorded player names with a trusted roster.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use entity_match::{
    cli,
    config::{AppConfig, AssociateConfig, CliOverrides, OutputFormat},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "entity-match")]
#[command(version)]
#[command(about = "Associate recorded player names with a trusted roster", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Some source names have no candidate (with --fail-on-unmatched)
    3  Error occurred

EXAMPLES:
    # Greedy one-to-one matching by edit distance
    entity-match associate demo_players.txt roster.txt --metric levenshtein

    # Closest match, candidates may repeat, JSON with scores
    entity-match associate demo_players.txt roster.txt --metric difflib -o json --explain")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `associate` subcommand
#[derive(Parser)]
struct AssociateArgs {
    /// File with one source (recorded) name per line
    source: PathBuf,

    /// File with one candidate (roster) name per line
    candidates: PathBuf,

    /// Metric: lcss, hamming, levenshtein, jaro, or difflib
    #[arg(short, long, env = "ENTITY_MATCH_METRIC")]
    metric: Option<String>,

    /// Output format
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Source line that denotes a missing name
    #[arg(long)]
    missing_marker: Option<String>,

    /// Include the distance or ratio behind each match
    #[arg(long)]
    explain: bool,

    /// Exit with code 1 if any source name has no candidate
    #[arg(long)]
    fail_on_unmatched: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Associate source names with candidate names
    Associate(AssociateArgs),

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print the discovered config file path
    Path,
    /// Create a commented .entity-match.yaml in the current directory
    Init,
    /// Print the JSON Schema for the config file format
    Schema,
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            3
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Commands::Associate(args) => {
            let overrides = CliOverrides {
                metric: args.metric,
                missing_marker: args.missing_marker,
                output_format: args.output,
                output_file: args.output_file,
                explain: args.explain,
                fail_on_unmatched: args.fail_on_unmatched,
            };

            let (settings, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
            if let Some(path) = loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }

            cli::run_associate(AssociateConfig {
                source_file: args.source,
                candidate_file: args.candidates,
                settings,
            })
        }

        Commands::Config { action } => {
            run_config(action, cli.config.as_deref())?;
            Ok(0)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "entity-match", &mut io::stdout());
            Ok(0)
        }
    }
}

fn run_config(action: ConfigAction, explicit: Option<&std::path::Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = entity_match::config::load_or_default(explicit);
            match &loaded_from {
                Some(path) => eprintln!("# Loaded from: {}", path.display()),
                None => eprintln!("# No config file found; showing defaults"),
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => match entity_match::config::discover_config_file(explicit) {
            Some(path) => eprintln!("Active config file: {}", path.display()),
            None => eprintln!("No config file found."),
        },
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".entity-match.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = entity_match::config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
        ConfigAction::Schema => {
            println!("{}", entity_match::config::generate_json_schema());
        }
    }
    Ok(())
}
