//! Translation benchmark CLI
//!
//! Command-line interface for scoring machine translations and ranking
//! providers against each other.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use translation_benchmark_cli::commands::{compare, config, evaluate, CommandContext};
use translation_benchmark_cli::output::OutputFormat;
use translation_benchmark_common::{init_from_config, AppConfig, TelemetryConfig};

/// Output format for CLI commands
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum CliOutputFormat {
    /// JSON output
    Json,
    /// Table output (default)
    #[default]
    Table,
    /// Plain text output
    Plain,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mt-bench")]
#[command(author, version, about = "Machine translation benchmark CLI")]
#[command(long_about = "Score machine translations on language match, length ratio, repetition, \
    content preservation and semantic similarity, and rank providers by the fused score.")]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value = "table")]
    format: CliOutputFormat,

    /// Configuration file (merged over config/default and config/$APP_ENV)
    #[arg(short, long, global = true, env = "MTB_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one translation
    #[command(alias = "e", alias = "eval")]
    Evaluate {
        /// Source text
        #[arg(short, long)]
        source: String,

        /// Translated text
        #[arg(short, long)]
        target: String,

        /// Expected ISO 639-1 language of the translation
        #[arg(short = 'l', long)]
        target_lang: String,

        /// ISO 639-1 language of the source text
        #[arg(long)]
        source_lang: Option<String>,

        /// Provider that produced the translation
        #[arg(long, default_value = "manual")]
        provider: String,

        /// Model used by the provider
        #[arg(long, default_value = "default")]
        model: String,

        /// Identifier echoed back in the result (generated when omitted)
        #[arg(long)]
        translation_id: Option<String>,
    },

    /// Rank provider outputs from a run file
    #[command(alias = "c", alias = "cmp")]
    Compare {
        /// JSON run file with the source text and candidate outputs
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved configuration
    Show,
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mt-bench", &mut std::io::stdout());
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => AppConfig::load().context("Failed to load configuration"),
    }
}

/// Telemetry settings with `--verbose` forcing the debug level
fn effective_telemetry(config: &AppConfig, verbose: bool) -> TelemetryConfig {
    let mut telemetry = config.telemetry.clone();
    if verbose {
        telemetry.log_level = "debug".to_string();
    }
    telemetry
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;

    init_from_config(&effective_telemetry(&config, cli.verbose))?;

    let ctx = CommandContext::new(config, cli.format.into());

    match cli.command {
        Commands::Evaluate {
            source,
            target,
            target_lang,
            source_lang,
            provider,
            model,
            translation_id,
        } => {
            let args = evaluate::EvaluateArgs {
                source,
                target,
                target_lang,
                source_lang,
                provider,
                model,
                translation_id,
            };
            evaluate::evaluate(&ctx, args).await
        }

        Commands::Compare { input } => compare::compare(&ctx, &input).await,

        Commands::Config { command } => match command {
            Some(ConfigCommands::Show) | None => config::show(&ctx),
        },

        Commands::Completions { .. } => {
            // Already handled in main
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Handle completions command early (doesn't need config)
    if let Commands::Completions { shell } = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    let verbose = cli.verbose;
    if let Err(e) = run(cli).await {
        use colored::Colorize;
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        if verbose {
            eprintln!("\n{}", "Backtrace:".dimmed());
            eprintln!("{:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
