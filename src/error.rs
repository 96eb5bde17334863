//! Error handling for wavmerge
//!
//! Codec and filesystem failures are carried with their original error as
//! the source. Domain failures (rate mismatch, empty input) get their own
//! variants.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for wavmerge operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Main error type for wavmerge operations
#[derive(Error, Debug)]
pub enum MergeError {
    // Construction Errors
    #[error("Invalid audio buffer construction: {reason}")]
    InvalidConstruction { reason: String },

    // Compatibility Errors
    #[error("Rates are not compatible: {left} Hz vs {right} Hz")]
    IncompatibleRate { left: u32, right: u32 },

    #[error("Channel counts are not compatible: {left} vs {right}")]
    IncompatibleChannels { left: u16, right: u16 },

    #[error("Sample formats are not compatible: {left} vs {right}")]
    IncompatibleFormat {
        left: &'static str,
        right: &'static str,
    },

    // Input Errors
    #[error("Nothing to concatenate: input list is empty")]
    EmptyInput,

    #[error("No matching audio files found under {}", dir.display())]
    NoFilesFound { dir: PathBuf },

    // Codec Errors
    #[error("WAV codec error for {}: {source}", path.display())]
    Codec {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    // Filesystem Errors
    #[error("Directory walk failed: {0}")]
    Discovery(#[from] walkdir::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration Errors
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl MergeError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            MergeError::InvalidConstruction { .. } => "INVALID_CONSTRUCTION",
            MergeError::IncompatibleRate { .. } => "INCOMPATIBLE_RATE",
            MergeError::IncompatibleChannels { .. } => "INCOMPATIBLE_CHANNELS",
            MergeError::IncompatibleFormat { .. } => "INCOMPATIBLE_FORMAT",
            MergeError::EmptyInput => "EMPTY_INPUT",
            MergeError::NoFilesFound { .. } => "NO_FILES_FOUND",
            MergeError::Codec { .. } => "CODEC_ERROR",
            MergeError::Discovery(_) => "DISCOVERY_ERROR",
            MergeError::Io(_) => "IO_ERROR",
            MergeError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            MergeError::IncompatibleRate { .. } => vec![
                "Resample the clips to a common rate before merging",
                "Run 'wavmerge info <file>' to inspect each clip's rate",
            ],
            MergeError::IncompatibleChannels { .. } => vec![
                "Convert all clips to the same channel layout (mono or stereo)",
            ],
            MergeError::IncompatibleFormat { .. } => vec![
                "Export all clips with the same bit depth and sample format",
            ],
            MergeError::NoFilesFound { .. } => vec![
                "Check the directory path is correct",
                "Check the file extension filter (default: wav)",
            ],
            MergeError::Codec { .. } => vec![
                "Check the file is a valid PCM or IEEE float WAV file",
                "Check the output location is writable",
            ],
            _ => vec![],
        }
    }

    pub(crate) fn codec(path: impl Into<PathBuf>, source: hound::Error) -> Self {
        MergeError::Codec {
            path: path.into(),
            source,
        }
    }
}
