//! Merge configuration
//!
//! Settings for a directory merge. Can be loaded from a JSON file; missing
//! fields fall back to their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::discovery::WAV_EXTENSION;
use crate::error::Result;

/// Settings for [`DirectoryMerge`](crate::engine::merge::DirectoryMerge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Extension of the files to merge, without the leading dot
    pub extension: String,
    /// Descend into subdirectories
    pub recursive: bool,
    /// File name of the merged output; nothing is written when unset
    pub output_file_name: Option<String>,
    /// Directory for the merged output; defaults to the source directory
    pub output_dir: Option<PathBuf>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            extension: WAV_EXTENSION.to_string(),
            recursive: true,
            output_file_name: None,
            output_dir: None,
        }
    }
}

impl MergeConfig {
    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: MergeConfig = serde_json::from_str(&contents)?;
        Ok(config.normalized())
    }

    /// Set the output file name
    pub fn with_output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = Some(name.into());
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the extension filter; a leading dot is accepted
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self.normalized()
    }

    /// Toggle recursive discovery
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Where the merged file goes for a merge of `source_dir`, if anywhere
    pub fn output_path(&self, source_dir: &Path) -> Option<PathBuf> {
        let name = self.output_file_name.as_deref()?;
        let dir = self.output_dir.as_deref().unwrap_or(source_dir);
        Some(dir.join(name))
    }

    fn normalized(mut self) -> Self {
        if let Some(stripped) = self.extension.strip_prefix('.') {
            self.extension = stripped.to_string();
        }
        self
    }
}
