//! Audio file I/O for wavmerge
//!
//! Thin adapter over `hound`. Samples are read in the file's native format
//! (no float conversion, no resampling) so that a decode/encode round trip
//! is lossless. Every reader and writer lives inside a single function, so
//! file handles are released on all exit paths.

use std::io::{Read, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::debug;

use crate::engine::buffer::{AudioBuffer, Samples};
use crate::error::{MergeError, Result};

/// Raw contents of a decoded WAV file
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Sample rate in Hz
    pub rate: u32,
    /// Number of interleaved channels
    pub channels: u16,
    /// Interleaved samples
    pub samples: Samples,
}

/// Decode a WAV file
///
/// # Errors
/// * `Codec` - the file is missing, unreadable, malformed, or uses a
///   sample layout `hound` cannot represent
pub fn decode_wav(path: &Path) -> Result<DecodedAudio> {
    let reader = WavReader::open(path).map_err(|e| MergeError::codec(path, e))?;
    let spec = reader.spec();

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 1..=8) => Samples::Int8(read_all(reader, path)?),
        (SampleFormat::Int, 9..=16) => Samples::Int16(read_all(reader, path)?),
        (SampleFormat::Int, 17..=24) => Samples::Int24(read_all(reader, path)?),
        (SampleFormat::Int, 25..=32) => Samples::Int32(read_all(reader, path)?),
        (SampleFormat::Float, 32) => Samples::Float32(read_all(reader, path)?),
        _ => return Err(MergeError::codec(path, hound::Error::Unsupported)),
    };

    debug!(
        path = %path.display(),
        rate = spec.sample_rate,
        channels = spec.channels,
        format = samples.format_name(),
        "decoded wav"
    );

    Ok(DecodedAudio {
        rate: spec.sample_rate,
        channels: spec.channels,
        samples,
    })
}

/// Encode samples to a WAV file, creating or overwriting it
///
/// # Errors
/// * `Codec` - the path is not writable or a sample cannot be written
pub fn encode_wav(path: &Path, rate: u32, channels: u16, samples: &Samples) -> Result<()> {
    let spec = WavSpec {
        channels,
        sample_rate: rate,
        bits_per_sample: samples.bits_per_sample(),
        sample_format: match samples {
            Samples::Float32(_) => SampleFormat::Float,
            _ => SampleFormat::Int,
        },
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| MergeError::codec(path, e))?;

    let written = match samples {
        Samples::Int8(v) => write_all(&mut writer, v),
        Samples::Int16(v) => write_all(&mut writer, v),
        Samples::Int24(v) | Samples::Int32(v) => write_all(&mut writer, v),
        Samples::Float32(v) => write_all(&mut writer, v),
    };
    written.map_err(|e| MergeError::codec(path, e))?;

    writer.finalize().map_err(|e| MergeError::codec(path, e))?;

    debug!(path = %path.display(), rate, channels, "encoded wav");

    Ok(())
}

/// Generate a 16-bit mono sine tone at half of full scale
///
/// Useful for building test fixtures.
///
/// # Errors
/// * `InvalidConstruction` - `rate` is zero
pub fn generate_test_tone(frequency: f32, duration_secs: f32, rate: u32) -> Result<AudioBuffer> {
    let num_samples = (duration_secs * rate as f32) as usize;
    let angular_freq = 2.0 * std::f32::consts::PI * frequency / rate as f32;
    let amplitude = i16::MAX as f32 / 2.0;

    let samples: Vec<i16> = (0..num_samples)
        .map(|i| ((angular_freq * i as f32).sin() * amplitude) as i16)
        .collect();

    AudioBuffer::from_samples(rate, samples)
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Read every sample from the reader, consuming it
fn read_all<S, R>(reader: WavReader<R>, path: &Path) -> Result<Vec<S>>
where
    S: hound::Sample,
    R: Read,
{
    reader
        .into_samples::<S>()
        .collect::<std::result::Result<Vec<S>, _>>()
        .map_err(|e| MergeError::codec(path, e))
}

fn write_all<S, W>(writer: &mut WavWriter<W>, samples: &[S]) -> std::result::Result<(), hound::Error>
where
    S: hound::Sample + Copy,
    W: Write + Seek,
{
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
