//! Audio Buffer
//!
//! In-memory representation of one audio clip: a sample rate, a channel
//! count and the interleaved samples in the source's native format.
//! Duration is always derived from the sample count, never stored.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::engine::io::{decode_wav, encode_wav};
use crate::error::{MergeError, Result};

// ============================================================================
// Samples
// ============================================================================

/// Interleaved sample data, one variant per WAV PCM layout
///
/// 24-bit audio is held in `i32` the same way `hound` hands it out.
/// Float data compares NaN equal to NaN, so a clip containing NaN still
/// equals itself after a write/read round trip.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "format", content = "data", rename_all = "snake_case")]
pub enum Samples {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int24(Vec<i32>),
    Int32(Vec<i32>),
    Float32(Vec<f32>),
}

impl Samples {
    /// Total number of values across all channels
    pub fn len(&self) -> usize {
        match self {
            Samples::Int8(v) => v.len(),
            Samples::Int16(v) => v.len(),
            Samples::Int24(v) | Samples::Int32(v) => v.len(),
            Samples::Float32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the sample format, e.g. `"int16"`
    pub fn format_name(&self) -> &'static str {
        match self {
            Samples::Int8(_) => "int8",
            Samples::Int16(_) => "int16",
            Samples::Int24(_) => "int24",
            Samples::Int32(_) => "int32",
            Samples::Float32(_) => "float32",
        }
    }

    /// Bits per sample used when encoding this data
    pub fn bits_per_sample(&self) -> u16 {
        match self {
            Samples::Int8(_) => 8,
            Samples::Int16(_) => 16,
            Samples::Int24(_) => 24,
            Samples::Int32(_) | Samples::Float32(_) => 32,
        }
    }

    /// Join `head` and every part of `rest` into a new sequence, in order
    ///
    /// Returns `None` if any part has a different sample format than `head`.
    /// None of the inputs are modified.
    pub(crate) fn joined<'a, I>(head: &Samples, rest: I) -> Option<Samples>
    where
        I: IntoIterator<Item = &'a Samples>,
    {
        macro_rules! join {
            ($variant:ident, $head:expr) => {{
                let mut out = $head.clone();
                for part in rest {
                    match part {
                        Samples::$variant(values) => out.extend_from_slice(values),
                        _ => return None,
                    }
                }
                Some(Samples::$variant(out))
            }};
        }

        match head {
            Samples::Int8(v) => join!(Int8, v),
            Samples::Int16(v) => join!(Int16, v),
            Samples::Int24(v) => join!(Int24, v),
            Samples::Int32(v) => join!(Int32, v),
            Samples::Float32(v) => join!(Float32, v),
        }
    }
}

impl PartialEq for Samples {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Samples::Int8(a), Samples::Int8(b)) => a == b,
            (Samples::Int16(a), Samples::Int16(b)) => a == b,
            (Samples::Int24(a), Samples::Int24(b)) => a == b,
            (Samples::Int32(a), Samples::Int32(b)) => a == b,
            (Samples::Float32(a), Samples::Float32(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
            }
            _ => false,
        }
    }
}

impl From<Vec<i8>> for Samples {
    fn from(values: Vec<i8>) -> Self {
        Samples::Int8(values)
    }
}

impl From<Vec<i16>> for Samples {
    fn from(values: Vec<i16>) -> Self {
        Samples::Int16(values)
    }
}

impl From<Vec<i32>> for Samples {
    fn from(values: Vec<i32>) -> Self {
        Samples::Int32(values)
    }
}

impl From<Vec<f32>> for Samples {
    fn from(values: Vec<f32>) -> Self {
        Samples::Float32(values)
    }
}

// ============================================================================
// Construction
// ============================================================================

/// The two ways an [`AudioBuffer`] can come into existence
#[derive(Debug, Clone)]
pub enum AudioSource {
    /// Decode a WAV file
    File(PathBuf),
    /// Use sample data already in memory
    Samples {
        rate: u32,
        channels: u16,
        samples: Samples,
    },
}

// ============================================================================
// Audio Buffer
// ============================================================================

/// One audio clip held fully in memory
///
/// Buffers are values: merge operations never modify their inputs and
/// always return a fresh buffer.
///
/// # Example
/// ```
/// use wavmerge::engine::buffer::AudioBuffer;
///
/// let buffer = AudioBuffer::from_samples(21, vec![1i16, 2, 3]).unwrap();
/// assert_eq!(buffer.num_frames(), 3);
/// assert_eq!(buffer.duration(), 3.0 / 21.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    rate: u32,
    channels: u16,
    samples: Samples,
}

impl AudioBuffer {
    /// Build a buffer from either source
    pub fn new(source: AudioSource) -> Result<Self> {
        match source {
            AudioSource::File(path) => Self::from_file(&path),
            AudioSource::Samples {
                rate,
                channels,
                samples,
            } => Self::from_interleaved(rate, channels, samples),
        }
    }

    /// Build a buffer from optional parts
    ///
    /// A `filepath` takes precedence and any `rate`/`samples` given alongside
    /// it are ignored. Without a filepath both `rate` and `samples` are
    /// required and the data is taken as mono.
    ///
    /// # Errors
    /// * `InvalidConstruction` - neither a filepath nor a full (rate, samples) pair
    pub fn from_parts(
        rate: Option<u32>,
        samples: Option<Samples>,
        filepath: Option<&Path>,
    ) -> Result<Self> {
        match (filepath, rate, samples) {
            (Some(path), _, _) => Self::from_file(path),
            (None, Some(rate), Some(samples)) => Self::from_interleaved(rate, 1, samples),
            _ => Err(MergeError::InvalidConstruction {
                reason: "either a filepath or a (rate, samples) pair is required".to_string(),
            }),
        }
    }

    /// Create a mono buffer
    pub fn from_samples(rate: u32, samples: impl Into<Samples>) -> Result<Self> {
        Self::from_interleaved(rate, 1, samples)
    }

    /// Create a buffer from interleaved samples
    ///
    /// # Errors
    /// * `InvalidConstruction` - zero rate, zero channels, or a sample count
    ///   that is not a whole number of frames
    pub fn from_interleaved(rate: u32, channels: u16, samples: impl Into<Samples>) -> Result<Self> {
        let samples = samples.into();

        if rate == 0 {
            return Err(MergeError::InvalidConstruction {
                reason: "sample rate must be positive".to_string(),
            });
        }

        if channels == 0 {
            return Err(MergeError::InvalidConstruction {
                reason: "channel count must be positive".to_string(),
            });
        }

        if samples.len() % channels as usize != 0 {
            return Err(MergeError::InvalidConstruction {
                reason: format!(
                    "sample count {} is not divisible by channel count {}",
                    samples.len(),
                    channels
                ),
            });
        }

        Ok(Self::from_raw_parts(rate, channels, samples))
    }

    /// Decode a WAV file into a buffer
    pub fn from_file(path: &Path) -> Result<Self> {
        let decoded = decode_wav(path)?;
        Self::from_interleaved(decoded.rate, decoded.channels, decoded.samples)
    }

    /// Assemble a buffer whose parts were already validated
    pub(crate) fn from_raw_parts(rate: u32, channels: u16, samples: Samples) -> Self {
        Self {
            rate,
            channels,
            samples,
        }
    }

    /// Sample rate in Hz
    #[inline]
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Number of interleaved channels
    #[inline]
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Interleaved sample data
    #[inline]
    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    /// Number of frames (samples per channel)
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds, derived from the frame count and rate
    #[inline]
    pub fn duration(&self) -> f64 {
        self.num_frames() as f64 / self.rate as f64
    }

    /// Short name of the sample format, e.g. `"int16"`
    pub fn sample_format(&self) -> &'static str {
        self.samples.format_name()
    }

    /// Structured snapshot of this buffer
    pub fn to_view(&self) -> AudioView {
        AudioView {
            rate: self.rate,
            channels: self.channels,
            samples: self.samples.clone(),
            duration: self.duration(),
        }
    }

    /// Write this buffer to a WAV file, creating or overwriting it
    pub fn persist(&self, path: &Path) -> Result<()> {
        encode_wav(path, self.rate, self.channels, &self.samples)
    }
}

/// Read-only snapshot of an [`AudioBuffer`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioView {
    pub rate: u32,
    pub channels: u16,
    pub samples: Samples,
    pub duration: f64,
}

// ============================================================================
// Tests
// ============================================================================
