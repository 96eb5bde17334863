//! wavmerge - WAV clip concatenation
//!
//! Reads WAV files into in-memory audio buffers, concatenates them in order
//! and writes the result back out as a WAV file.
//!
//! # Architecture
//!
//! - `engine::buffer`: the [`AudioBuffer`] value type
//! - `engine::merge`: pairwise, list and directory concatenation
//! - `engine::io` / `engine::discovery`: WAV codec and file discovery adapters
//! - `config`: settings for directory merges
//! - `cli`: command-line front end

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;

pub use config::MergeConfig;
pub use engine::{
    concatenate, concatenate_all, concatenate_directory, AudioBuffer, AudioSource, AudioView,
    DirectoryMerge, MergeReport, Samples,
};
pub use error::{MergeError, Result};
