use crate::config::load_effective_config;
use crate::design::load_design;
use crate::generator::naming::{resolve, snake_case};
use crate::generator::write_module;
use crate::logging::{init_logging, LogConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for attrgen
///
/// Generates validation, defaulting, conversion and transform code from an
/// attribute design.
#[derive(Parser)]
#[command(name = "attrgen")]
#[command(about = "Attribute type-graph code generator", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a Rust module from a design
    Generate {
        /// Path to the design file (YAML or JSON)
        #[arg(short, long)]
        design: PathBuf,

        /// Output file for the generated module (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to the generator config (attrgen.toml)
        /// If not provided, will auto-detect alongside the design
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Check a design for structural problems
    Check {
        /// Path to the design file (YAML or JSON)
        #[arg(short, long)]
        design: PathBuf,
    },
    /// Print the Rust identifiers the given names resolve to
    Ident {
        /// Names to resolve
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,

        /// Keep the first word lowercase
        #[arg(long, default_value_t = false)]
        lower: bool,

        /// Produce snake_case identifiers (as used for fields)
        #[arg(long, default_value_t = false, conflicts_with = "lower")]
        snake: bool,
    },
}

/// Execute a parsed command
///
/// # Errors
///
/// Returns an error if the design cannot be loaded or generated, output
/// cannot be written, or `check` finds issues.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            design,
            output,
            config,
        } => {
            let config = load_effective_config(config.as_deref(), &design)?;
            let module = write_module(&design, output.as_deref(), &config)?;
            if output.is_none() {
                print!("{}", module.source);
            }
            Ok(())
        }
        Commands::Check { design } => {
            let loaded = load_design(&design)?;
            let issues = loaded.check();
            for issue in &issues {
                println!("{issue}");
                if let Some(suggestion) = &issue.suggestion {
                    println!("    suggestion: {suggestion}");
                }
            }
            if issues.is_empty() {
                println!("{}: no issues", design.display());
                Ok(())
            } else {
                anyhow::bail!("{} issue(s) found in {}", issues.len(), design.display())
            }
        }
        Commands::Ident { names, lower, snake } => {
            for name in &names {
                let ident = if snake {
                    snake_case(name)
                } else {
                    resolve(name, !lower)
                };
                println!("{ident}");
            }
            Ok(())
        }
    }
}

/// Parse the process arguments, set up logging and execute the command
///
/// # Errors
///
/// Returns an error if logging cannot be initialized or the command fails.
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    init_logging(&log_config)?;
    run(cli)?;
    Ok(())
}
