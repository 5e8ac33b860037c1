//! typofix - Entry Point

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use typofix::config::ResolvedConfig;
use typofix::model::AppError;
use typofix::patch::PatchQueue;
use typofix::session::{SessionGate, SessionOptions, run_fix};
use typofix::source::{InputSource, detect_input_source, read_all};

/// typofix - review and fix misspellings in source code documentation
#[derive(Parser, Debug)]
#[command(name = "typofix")]
#[command(version)]
#[command(about = "Review and fix misspelled words in code comments and docs")]
pub struct Args {
    /// What to do with the correction stream
    #[command(subcommand)]
    pub command: Mode,

    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Review corrections interactively and apply the accepted ones
    Fix {
        /// Correction stream (JSON lines); reads stdin if not provided
        file: Option<PathBuf>,
    },
    /// Apply corrections whose decision is already recorded in the stream
    Apply {
        /// Correction stream (JSON lines); reads stdin if not provided
        file: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = resolve_config(&args)?;

    typofix::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    match args.command {
        Mode::Fix { file } => {
            let source = detect_input_source(file)?;
            let gate = SessionGate::new();
            run_fix(&source, SessionOptions::from(&config), &gate).map_err(AppError::from)?;
        }
        Mode::Apply { file } => {
            let source = detect_input_source(file)?;
            apply(&source, &mut io::stdout().lock())?;
        }
    }

    Ok(())
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = typofix::config::load_config_with_precedence(args.config.clone())?;
    let merged = typofix::config::merge_config(config_file);
    let with_env = typofix::config::apply_env_overrides(merged);
    // Only an explicit --no-color overrides; absence keeps the resolved value.
    let color_override = if args.no_color { Some(false) } else { None };
    Ok(typofix::config::apply_cli_overrides(with_env, color_override))
}

/// Apply recorded decisions, writing one line per progress message to `out`.
///
/// A closed `out` stops the run quietly.
fn apply(source: &InputSource, out: &mut impl Write) -> Result<(), AppError> {
    let misspellings = read_all(source.open()?)?;
    let mut queue = PatchQueue::from_misspellings(&misspellings);

    while let Some(result) = queue.next() {
        let progress = result?;
        if let Err(e) = writeln!(out, "{}", progress) {
            if e.kind() == io::ErrorKind::BrokenPipe {
                debug!("Output closed, stopping apply");
                return Ok(());
            }
            return Err(e.into());
        }
    }

    let summary = queue.summary();
    info!(
        replaced = summary.replaced,
        mismatched = summary.mismatched,
        skipped = summary.skipped,
        "Apply finished"
    );
    Ok(())
}
