//! Audio file discovery
//!
//! Finds the files a directory merge will consume. The returned order is the
//! merge order, so callers control it through file naming (for example
//! zero-padded numeric prefixes).

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// Default extension for audio files
pub const WAV_EXTENSION: &str = "wav";

/// Find every file under `root` whose extension is `extension`
///
/// Matching is case-sensitive and `extension` is given without the leading
/// dot. Paths are returned in ascending order, compared component by
/// component. A symbolic link counts as a file when its target is a
/// regular file; linked directories are not descended into.
///
/// # Errors
/// * `Discovery` - `root` does not exist or a directory could not be read
pub fn find_files(root: &Path, extension: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut walker = WalkDir::new(root).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        // Resolves links, so a linked clip is kept under its link path
        if !entry.path().is_file() {
            continue;
        }
        if entry.path().extension().map_or(false, |ext| ext == extension) {
            files.push(entry.into_path());
        }
    }

    files.sort();

    debug!(
        root = %root.display(),
        count = files.len(),
        "discovered audio files"
    );

    Ok(files)
}

// ============================================================================
// Tests
// ============================================================================
