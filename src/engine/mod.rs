//! Audio Engine Module
//!
//! Core of wavmerge:
//! - Audio buffer and sample storage
//! - WAV file I/O
//! - Audio file discovery
//! - Concatenation and directory merges

pub mod buffer;
pub mod discovery;
pub mod io;
pub mod merge;

pub use buffer::{AudioBuffer, AudioSource, AudioView, Samples};
pub use discovery::{find_files, WAV_EXTENSION};
pub use io::{decode_wav, encode_wav, generate_test_tone, DecodedAudio};
pub use merge::{
    concatenate, concatenate_all, concatenate_directory, DirectoryMerge, MergeReport,
};
