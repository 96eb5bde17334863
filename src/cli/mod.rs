//! CLI Module
//!
//! Command-line interface for wavmerge.

pub mod commands;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::MergeConfig;
use crate::error::Result;

/// wavmerge - concatenate WAV clips into one file
#[derive(Parser, Debug)]
#[command(name = "wavmerge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge every WAV file under a directory, in path order
    #[command(name = "merge-dir")]
    MergeDir {
        /// Directory containing the clips
        dir: PathBuf,

        /// File name for the merged output
        #[arg(short, long)]
        output: Option<String>,

        /// Directory for the merged output (defaults to DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Extension of the files to merge
        #[arg(short, long)]
        extension: Option<String>,

        /// Only look at files directly inside DIR
        #[arg(long)]
        no_recursive: bool,

        /// JSON file with merge settings; flags override it
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Merge the given WAV files in the order listed
    #[command(name = "merge-files")]
    MergeFiles {
        /// Input clips
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Path of the merged output
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the format, duration and checksum of a WAV file
    #[command(name = "info")]
    Info {
        /// WAV file to inspect
        path: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Build the merge settings for `merge-dir` from a config file and flags
pub fn merge_config(
    config: Option<&Path>,
    output: Option<String>,
    output_dir: Option<PathBuf>,
    extension: Option<String>,
    no_recursive: bool,
) -> Result<MergeConfig> {
    let mut merged = match config {
        Some(path) => MergeConfig::load(path)?,
        None => MergeConfig::default(),
    };

    if let Some(name) = output {
        merged = merged.with_output_file_name(name);
    }
    if let Some(dir) = output_dir {
        merged = merged.with_output_dir(dir);
    }
    if let Some(ext) = extension {
        merged = merged.with_extension(ext);
    }
    if no_recursive {
        merged = merged.with_recursive(false);
    }

    Ok(merged)
}
