//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::config::MergeConfig;
use crate::engine::{concatenate_all, AudioBuffer, DirectoryMerge};
use crate::error::Result;

/// Merge every matching file under `dir`.
pub fn merge_dir(dir: &Path, config: MergeConfig) -> Result<()> {
    info!(dir = %dir.display(), "merging directory");

    let report = DirectoryMerge::new(config).run(dir)?;

    println!(
        "Merged {} file(s) from {}",
        report.sources.len(),
        dir.display()
    );
    for (i, source) in report.sources.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, source.display());
    }
    print_summary(&report.buffer);

    match &report.output_path {
        Some(path) => println!("Output written: {}", path.display()),
        None => println!("No output file requested (use --output to write one)"),
    }

    Ok(())
}

/// Merge explicit files in the order given.
pub fn merge_files(files: &[PathBuf], output: &Path) -> Result<()> {
    info!(count = files.len(), output = %output.display(), "merging files");

    let buffers = files
        .iter()
        .map(|path| AudioBuffer::from_file(path))
        .collect::<Result<Vec<_>>>()?;

    let merged = concatenate_all(&buffers)?;
    merged.persist(output)?;

    println!("Merged {} file(s)", files.len());
    print_summary(&merged);
    println!("Output written: {}", output.display());

    Ok(())
}

/// Summary of a WAV file for the `info` command
#[derive(Debug, Serialize)]
pub struct FileInfo {
    pub path: PathBuf,
    pub rate: u32,
    pub channels: u16,
    pub format: &'static str,
    pub frames: usize,
    pub duration_secs: f64,
    pub sha256: String,
}

impl FileInfo {
    /// Decode `path` and hash its bytes
    ///
    /// The digest covers the whole file, header included, so two clips with
    /// equal samples but different containers hash differently.
    pub fn inspect(path: &Path) -> Result<Self> {
        let buffer = AudioBuffer::from_file(path)?;
        let digest = Sha256::digest(fs::read(path)?);

        Ok(Self {
            path: path.to_path_buf(),
            rate: buffer.rate(),
            channels: buffer.channels(),
            format: buffer.sample_format(),
            frames: buffer.num_frames(),
            duration_secs: buffer.duration(),
            sha256: format!("{:x}", digest),
        })
    }
}

/// Print the format, duration and checksum of a WAV file.
pub fn info(path: &Path, json: bool) -> Result<()> {
    let file_info = FileInfo::inspect(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&file_info)?);
        return Ok(());
    }

    println!("File:     {}", file_info.path.display());
    println!("Rate:     {} Hz", file_info.rate);
    println!("Channels: {}", file_info.channels);
    println!("Format:   {}", file_info.format);
    println!("Frames:   {}", file_info.frames);
    println!("Duration: {:.3}s", file_info.duration_secs);
    println!("SHA-256:  {}", file_info.sha256);

    Ok(())
}

fn print_summary(buffer: &AudioBuffer) {
    println!("{:-<60}", "");
    println!(
        "Rate: {} Hz | Channels: {} | Format: {} | Duration: {:.3}s",
        buffer.rate(),
        buffer.channels(),
        buffer.sample_format(),
        buffer.duration()
    );
    println!("{:-<60}", "");
}
