//! Merge Engine
//!
//! Concatenates audio buffers end to end. Two buffers can be joined only
//! when their rate, channel count and sample format all match; the first
//! mismatch aborts the operation and nothing partial is returned.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::MergeConfig;
use crate::engine::buffer::{AudioBuffer, Samples};
use crate::engine::discovery::find_files;
use crate::error::{MergeError, Result};

/// Append `b` after `a` and return the result as a new buffer
///
/// # Errors
/// * `IncompatibleRate` - the sample rates differ
/// * `IncompatibleChannels` - the channel counts differ
/// * `IncompatibleFormat` - the sample formats differ
pub fn concatenate(a: &AudioBuffer, b: &AudioBuffer) -> Result<AudioBuffer> {
    join(a, std::slice::from_ref(b))
}

/// Concatenate buffers left to right, keeping the given order
///
/// # Errors
/// * `EmptyInput` - `buffers` is empty
/// * `IncompatibleRate` (and the other compatibility errors) - for the
///   first buffer that cannot be appended to the running result
pub fn concatenate_all(buffers: &[AudioBuffer]) -> Result<AudioBuffer> {
    let (first, rest) = buffers.split_first().ok_or(MergeError::EmptyInput)?;
    join(first, rest)
}

/// Merge every audio file under `dir` and optionally write the result
///
/// Files are found recursively, ordered by path and concatenated. When
/// `output_file_name` is given the result is written to
/// `output_dir/output_file_name`, or `dir/output_file_name` without an
/// `output_dir`.
///
/// # Errors
/// * `NoFilesFound` - no `.wav` files under `dir`
/// * `IncompatibleRate` - two files have different rates
/// * `Codec` / `Discovery` - a file could not be read or written
pub fn concatenate_directory(
    dir: &Path,
    output_file_name: Option<&str>,
    output_dir: Option<&Path>,
) -> Result<AudioBuffer> {
    let mut config = MergeConfig::default();
    if let Some(name) = output_file_name {
        config = config.with_output_file_name(name);
    }
    if let Some(out) = output_dir {
        config = config.with_output_dir(out);
    }

    DirectoryMerge::new(config)
        .run(dir)
        .map(|report| report.buffer)
}

// ============================================================================
// Directory Merge
// ============================================================================

/// Outcome of a directory merge
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// The merged audio
    pub buffer: AudioBuffer,
    /// Source files in merge order
    pub sources: Vec<PathBuf>,
    /// Where the merged audio was written, if it was
    pub output_path: Option<PathBuf>,
}

/// Directory merge with its configuration and an optional write observer
///
/// ```no_run
/// use std::path::Path;
/// use wavmerge::config::MergeConfig;
/// use wavmerge::engine::merge::DirectoryMerge;
///
/// let report = DirectoryMerge::new(MergeConfig::default().with_output_file_name("all.wav"))
///     .on_written(|path| println!("wrote {}", path.display()))
///     .run(Path::new("clips"))
///     .unwrap();
/// println!("{} files merged", report.sources.len());
/// ```
pub struct DirectoryMerge<'a> {
    config: MergeConfig,
    observer: Option<Box<dyn Fn(&Path) + 'a>>,
}

impl<'a> DirectoryMerge<'a> {
    pub fn new(config: MergeConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Call `observer` with the output path after the merged file is written
    pub fn on_written(mut self, observer: impl Fn(&Path) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Discover, decode, concatenate and optionally persist
    pub fn run(&self, dir: &Path) -> Result<MergeReport> {
        let sources = find_files(dir, &self.config.extension, self.config.recursive)?;
        if sources.is_empty() {
            return Err(MergeError::NoFilesFound {
                dir: dir.to_path_buf(),
            });
        }

        let buffers = sources
            .iter()
            .map(|path| AudioBuffer::from_file(path))
            .collect::<Result<Vec<_>>>()?;

        let buffer = concatenate_all(&buffers)?;

        let output_path = match self.config.output_path(dir) {
            Some(path) => {
                buffer.persist(&path)?;
                info!(path = %path.display(), "output file created");
                if let Some(observer) = &self.observer {
                    observer(&path);
                }
                Some(path)
            }
            None => None,
        };

        Ok(MergeReport {
            buffer,
            sources,
            output_path,
        })
    }
}

impl fmt::Debug for DirectoryMerge<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryMerge")
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Check that `next` can be appended to a running result shaped like `head`
fn check_compatible(head: &AudioBuffer, next: &AudioBuffer) -> Result<()> {
    if head.rate() != next.rate() {
        warn!(left = head.rate(), right = next.rate(), "rates are not compatible");
        return Err(MergeError::IncompatibleRate {
            left: head.rate(),
            right: next.rate(),
        });
    }

    if head.channels() != next.channels() {
        return Err(MergeError::IncompatibleChannels {
            left: head.channels(),
            right: next.channels(),
        });
    }

    if head.sample_format() != next.sample_format() {
        return Err(MergeError::IncompatibleFormat {
            left: head.sample_format(),
            right: next.sample_format(),
        });
    }

    Ok(())
}

/// Validate every part against `head`, then build the joined buffer once
///
/// The running result always carries `head`'s rate, channels and format, so
/// comparing each part with `head` finds the same first mismatch a pairwise
/// reduction would.
fn join(head: &AudioBuffer, rest: &[AudioBuffer]) -> Result<AudioBuffer> {
    for next in rest {
        check_compatible(head, next)?;
    }

    let samples = Samples::joined(head.samples(), rest.iter().map(AudioBuffer::samples))
        .ok_or(MergeError::IncompatibleFormat {
            left: head.sample_format(),
            right: "mixed",
        })?;

    debug!(
        parts = rest.len() + 1,
        rate = head.rate(),
        values = samples.len(),
        "concatenated buffers"
    );

    Ok(AudioBuffer::from_raw_parts(head.rate(), head.channels(), samples))
}

// ============================================================================
// Tests
// ============================================================================
