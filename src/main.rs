// Command-line entry point. The library in lib.rs holds all optimization logic.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use texture_optimizer_lib::processing::ImageCodec;
use texture_optimizer_lib::{BatchOptions, SummaryReporter, list_textures, optimize_textures_with};

#[derive(Parser, Debug)]
#[command(name = "texture-optimizer", version, about = "Batch-optimize game textures to power-of-two sizes")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Root directory to scan for textures
    #[arg(default_value = ".")]
    base_path: PathBuf,

    /// Texture configuration document
    #[arg(short, long, default_value = "texture-config.json", global = true)]
    config: PathBuf,

    /// Write optimized textures under this directory instead of in place
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include patterns (glob, relative to the base path). Defaults to all supported formats
    #[arg(long)]
    include: Vec<String>,

    /// Exclude patterns (glob). The backup folder is always excluded
    #[arg(long)]
    exclude: Vec<String>,

    /// Textures processed concurrently per batch
    #[arg(short = 'j', long, default_value = "4")]
    concurrency: NonZeroUsize,

    /// Do not restore textures that only exist in a backup folder
    #[arg(long)]
    skip_backup_only: bool,

    /// Write the full JSON report here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Debug logging and per-texture lines in the summary
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List texture names the config document overrides
    ListTextures,
}

impl Cli {
    fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            base_path: self.base_path.clone(),
            output_path: self.output.clone(),
            config_path: self.config.clone(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            concurrency: self.concurrency,
            include_backup_only: !self.skip_backup_only,
            verbose: self.verbose,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stderr)
        .compact()                // Use compact formatter instead of pretty
        .init();
}

/// Everything processed (or nothing to do).
const EXIT_OK: u8 = 0;
/// The run finished but at least one texture failed.
const EXIT_FILES_FAILED: u8 = 1;
/// Config or discovery error; no texture was touched.
const EXIT_FATAL: u8 = 2;

/// Maps a run outcome (`Ok(true)` when some texture failed) onto the process status.
fn exit_status(outcome: &anyhow::Result<bool>) -> u8 {
    match outcome {
        Ok(false) => EXIT_OK,
        Ok(true) => EXIT_FILES_FAILED,
        Err(_) => EXIT_FATAL,
    }
}

/// Runs the selected command. Returns whether any texture failed.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    if let Some(Command::ListTextures) = cli.command {
        let names = list_textures(&cli.config)?;
        for name in names {
            println!("{name}");
        }
        return Ok(false);
    }

    let options = cli.batch_options();
    let report = optimize_textures_with(&options, Arc::new(ImageCodec), |progress| {
        info!(
            "Chunk {}/{} done: {}/{} textures ({} failed)",
            progress.current_chunk,
            progress.total_chunks,
            progress.processed_files,
            progress.total_files,
            progress.failed_files
        );
    })
    .await?;

    print!("{}", SummaryReporter::new(&report, options.verbose));

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write report {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    Ok(report.has_failures())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("=== Texture Optimizer Starting ===");
    let outcome = run(cli).await;
    if let Err(e) = &outcome {
        error!("{e:#}");
    }
    ExitCode::from(exit_status(&outcome))
}
