//! Integration Tests
//!
//! End-to-end tests for decoding, merging and writing WAV clips.

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use wavmerge::engine::generate_test_tone;
use wavmerge::{
    concatenate, concatenate_all, concatenate_directory, AudioBuffer, AudioSource,
    DirectoryMerge, MergeConfig, MergeError, Samples,
};

/// Split a 16-bit mono buffer into `parts` consecutive slices
fn split_int16(buffer: &AudioBuffer, parts: usize) -> Vec<AudioBuffer> {
    let values = match buffer.samples() {
        Samples::Int16(values) => values,
        other => panic!("Expected int16 samples, got {}", other.format_name()),
    };
    let chunk_len = (values.len() + parts - 1) / parts;

    values
        .chunks(chunk_len)
        .map(|chunk| AudioBuffer::from_samples(buffer.rate(), chunk.to_vec()).unwrap())
        .collect()
}

/// Write `fragments` into `dir` as zero-padded, ordered file names
fn write_fragments(dir: &Path, fragments: &[AudioBuffer]) -> Vec<PathBuf> {
    fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| {
            let path = dir.join(format!("part_{:03}.wav", i));
            fragment.persist(&path).unwrap();
            path
        })
        .collect()
}

// === Construction ===

#[test]
fn test_construction_requires_source() {
    assert!(matches!(
        AudioBuffer::from_parts(None, None, None),
        Err(MergeError::InvalidConstruction { .. })
    ));

    let buffer = AudioBuffer::from_samples(21, vec![1i16, 2, 3]).unwrap();
    assert_eq!(buffer.duration(), 3.0 / 21.0);
}

#[test]
fn test_construction_from_file_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tone.wav");
    let tone = generate_test_tone(440.0, 0.25, 16000).unwrap();
    tone.persist(&path).unwrap();

    let loaded = AudioBuffer::new(AudioSource::File(path)).unwrap();
    assert_eq!(loaded.to_view(), tone.to_view());
}

// === Round Trip ===

#[test]
fn test_round_trip_preserves_view() {
    let dir = tempdir().unwrap();

    let buffers = vec![
        AudioBuffer::from_samples(44100, vec![0i16, 100, -100, i16::MAX, i16::MIN]).unwrap(),
        AudioBuffer::from_interleaved(48000, 2, vec![0.1f32, -0.1, 0.2, -0.2]).unwrap(),
        AudioBuffer::from_interleaved(96000, 1, Samples::Int24(vec![1, -1, 8_000_000])).unwrap(),
        AudioBuffer::from_samples(8000, Vec::<i16>::new()).unwrap(),
    ];

    for (i, original) in buffers.iter().enumerate() {
        let path = dir.path().join(format!("round_trip_{}.wav", i));
        original.persist(&path).unwrap();

        let loaded = AudioBuffer::from_file(&path).unwrap();
        assert_eq!(loaded.to_view(), original.to_view());
    }
}

#[test]
fn test_persist_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clip.wav");

    AudioBuffer::from_samples(8000, vec![1i16, 2, 3, 4]).unwrap().persist(&path).unwrap();
    let replacement = AudioBuffer::from_samples(8000, vec![9i16]).unwrap();
    replacement.persist(&path).unwrap();

    assert_eq!(AudioBuffer::from_file(&path).unwrap(), replacement);
}

// === Concatenation ===

#[test]
fn test_concatenate_pair() {
    let a = AudioBuffer::from_samples(24000, vec![1i16, 2, 3]).unwrap();
    let b = AudioBuffer::from_samples(24000, vec![4i16, 5, 6]).unwrap();

    let merged = concatenate(&a, &b).unwrap();

    let expected = AudioBuffer::from_samples(24000, vec![1i16, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(merged.to_view(), expected.to_view());
    assert_eq!(merged.duration(), 6.0 / 24000.0);
}

#[test]
fn test_concatenate_all_rate_mismatch_returns_no_result() {
    let buffers = vec![
        AudioBuffer::from_samples(18000, vec![1i16, 2, 3]).unwrap(),
        AudioBuffer::from_samples(24000, vec![4i16, 5, 6]).unwrap(),
    ];

    let result = concatenate_all(&buffers);
    assert!(matches!(result, Err(MergeError::IncompatibleRate { .. })));
}

#[test]
fn test_concatenate_all_keeps_order() {
    let buffers = vec![
        AudioBuffer::from_samples(24000, vec![0i16]).unwrap(),
        AudioBuffer::from_samples(24000, vec![1i16, 2, 3]).unwrap(),
        AudioBuffer::from_samples(24000, vec![4i16, 5, 6]).unwrap(),
    ];

    let merged = concatenate_all(&buffers).unwrap();

    assert_eq!(merged.samples(), &Samples::Int16(vec![0, 1, 2, 3, 4, 5, 6]));
    assert_relative_eq!(merged.duration(), 7.0 / 24000.0);
}

// === Directory Merge ===

#[test]
fn test_directory_merge_restores_original() {
    let source = tempdir().unwrap();
    let output = tempdir().unwrap();

    let original = generate_test_tone(440.0, 1.0, 22050).unwrap();
    let original_path = output.path().join("original.wav");
    original.persist(&original_path).unwrap();

    write_fragments(source.path(), &split_int16(&original, 7));

    let merged =
        concatenate_directory(source.path(), Some("merged.wav"), Some(output.path())).unwrap();

    let reference = AudioBuffer::from_file(&original_path).unwrap();
    assert_eq!(merged.to_view(), reference.to_view());

    let created = output.path().join("merged.wav");
    assert!(created.is_file());
    assert_eq!(AudioBuffer::from_file(&created).unwrap().to_view(), merged.to_view());
}

#[test]
fn test_directory_merge_without_output_writes_nothing() {
    let source = tempdir().unwrap();
    let tone = generate_test_tone(220.0, 0.2, 8000).unwrap();
    write_fragments(source.path(), &split_int16(&tone, 3));

    let merged = concatenate_directory(source.path(), None, None).unwrap();

    assert_eq!(merged, tone);
    let entries = std::fs::read_dir(source.path()).unwrap().count();
    assert_eq!(entries, 3);
}

#[test]
fn test_directory_merge_orders_by_full_path() {
    let source = tempdir().unwrap();
    let root = source.path();
    std::fs::create_dir_all(root.join("b_section")).unwrap();
    std::fs::create_dir_all(root.join("a_section")).unwrap();

    let clip = |values: Vec<i16>| AudioBuffer::from_samples(8000, values).unwrap();
    clip(vec![3]).persist(&root.join("b_section/01.wav")).unwrap();
    clip(vec![4]).persist(&root.join("b_section/02.wav")).unwrap();
    clip(vec![1]).persist(&root.join("a_section/09.wav")).unwrap();
    clip(vec![2]).persist(&root.join("a_section/10.wav")).unwrap();
    clip(vec![5]).persist(&root.join("c_last.wav")).unwrap();

    let merged = concatenate_directory(root, None, None).unwrap();

    assert_eq!(merged.samples(), &Samples::Int16(vec![1, 2, 3, 4, 5]));
}

#[cfg(unix)]
#[test]
fn test_directory_merge_follows_linked_clips() {
    let storage = tempdir().unwrap();
    let source = tempdir().unwrap();

    let linked = AudioBuffer::from_samples(8000, vec![1i16, 2]).unwrap();
    let real_path = storage.path().join("take_one.wav");
    linked.persist(&real_path).unwrap();
    std::os::unix::fs::symlink(&real_path, source.path().join("01.wav")).unwrap();
    AudioBuffer::from_samples(8000, vec![3i16])
        .unwrap()
        .persist(&source.path().join("02.wav"))
        .unwrap();

    let merged = concatenate_directory(source.path(), None, None).unwrap();

    assert_eq!(merged.samples(), &Samples::Int16(vec![1, 2, 3]));
}

#[test]
fn test_directory_merge_rate_mismatch() {
    let source = tempdir().unwrap();
    AudioBuffer::from_samples(18000, vec![1i16])
        .unwrap()
        .persist(&source.path().join("01.wav"))
        .unwrap();
    AudioBuffer::from_samples(24000, vec![2i16])
        .unwrap()
        .persist(&source.path().join("02.wav"))
        .unwrap();

    let result = concatenate_directory(source.path(), Some("merged.wav"), None);

    assert!(matches!(result, Err(MergeError::IncompatibleRate { .. })));
    assert!(!source.path().join("merged.wav").exists());
}

#[test]
fn test_directory_merge_empty_directory() {
    let source = tempdir().unwrap();

    match concatenate_directory(source.path(), None, None) {
        Err(MergeError::NoFilesFound { dir }) => assert_eq!(dir, source.path()),
        other => panic!("Expected NoFilesFound, got: {:?}", other),
    }
}

#[test]
fn test_directory_merge_corrupt_file() {
    let source = tempdir().unwrap();
    AudioBuffer::from_samples(8000, vec![1i16])
        .unwrap()
        .persist(&source.path().join("01.wav"))
        .unwrap();
    std::fs::write(source.path().join("02.wav"), b"not a wav file").unwrap();

    assert!(matches!(
        concatenate_directory(source.path(), None, None),
        Err(MergeError::Codec { .. })
    ));
}

#[test]
fn test_directory_merge_report() {
    let source = tempdir().unwrap();
    let tone = generate_test_tone(330.0, 0.3, 8000).unwrap();
    let written = write_fragments(source.path(), &split_int16(&tone, 4));

    let config = MergeConfig::default().with_output_file_name("all.wav");
    let report = DirectoryMerge::new(config).run(source.path()).unwrap();

    assert_eq!(report.sources, written);
    assert_eq!(report.buffer, tone);
    assert_eq!(report.output_path, Some(source.path().join("all.wav")));
}
