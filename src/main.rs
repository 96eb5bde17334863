//! wavmerge CLI
//!
//! Command-line interface for merging WAV clips.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wavmerge::cli::{self, Cli, Commands};
use wavmerge::MergeError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logger
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("wavmerge v{}", env!("CARGO_PKG_VERSION"));

    match handle_command(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<MergeError>() {
                Some(merge_err) => {
                    eprintln!("error[{}]: {:#}", merge_err.error_code(), err);
                    for suggestion in merge_err.recovery_suggestions() {
                        eprintln!("  hint: {}", suggestion);
                    }
                }
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::MergeDir {
            dir,
            output,
            output_dir,
            extension,
            no_recursive,
            config,
        } => {
            let merge_config =
                cli::merge_config(config.as_deref(), output, output_dir, extension, no_recursive)
                    .context("failed to load merge settings")?;
            cli::commands::merge_dir(&dir, merge_config)
                .with_context(|| format!("failed to merge {}", dir.display()))
        }
        Commands::MergeFiles { files, output } => cli::commands::merge_files(&files, &output)
            .with_context(|| format!("failed to write {}", output.display())),
        Commands::Info { path, json } => cli::commands::info(&path, json)
            .with_context(|| format!("failed to inspect {}", path.display())),
    }
}
