//! Integration tests for the comparison pipelines
//!
//! Inputs are synthetic chroma matrices and onset sequences standing in for
//! the external feature extractor: one-hot chroma frames cycling through a
//! note sequence, with the student side time-scaled to simulate tempo
//! errors.

use etude_dsp::{
    align_frames, compare_melody, compare_rhythm, rhythm::analyze_deviation, ChromaMatrix,
    CompareConfig, OnsetSequence, TempoStatus,
};
use ndarray::Array2;

const SAMPLE_RATE: u32 = 22050;
const HOP_LENGTH: u32 = 512;

/// One-hot chroma matrix playing `notes` in order, each held for
/// `frames_per_note` analysis frames
fn chroma_from_notes(notes: &[usize], frames_per_note: usize) -> ChromaMatrix {
    let n_frames = notes.len() * frames_per_note;
    let mut chroma = Array2::zeros((12, n_frames));
    for (note_idx, &class) in notes.iter().enumerate() {
        for k in 0..frames_per_note {
            chroma[(class % 12, note_idx * frames_per_note + k)] = 1.0;
        }
    }
    chroma
}

/// A scale run long enough for several resample windows
fn scale_notes() -> Vec<usize> {
    (0..48).map(|i| i % 12).collect()
}

#[test]
fn test_identical_recordings_yield_single_good_segment() {
    let chroma = chroma_from_notes(&scale_notes(), 8);
    let config = CompareConfig::default();

    let result = compare_rhythm(&chroma, &chroma, SAMPLE_RATE, HOP_LENGTH, &config).unwrap();

    assert!(result.total_duration > 0.0);
    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.segments[0].status, TempoStatus::Good);
    assert_eq!(result.segments[0].start, 0.0);
    assert_eq!(result.segments[0].end, result.total_duration);
}

#[test]
fn test_double_tempo_student_is_too_fast() {
    // The student plays the same notes in half the frames: reference time
    // advances twice per student second.
    let reference = chroma_from_notes(&scale_notes(), 8);
    let student = chroma_from_notes(&scale_notes(), 4);
    let config = CompareConfig::default();

    let result = compare_rhythm(&reference, &student, SAMPLE_RATE, HOP_LENGTH, &config).unwrap();

    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.segments[0].status, TempoStatus::TooFast);
    assert_eq!(result.segments[0].start, 0.0);
    assert_eq!(result.segments[0].end, result.total_duration);
}

#[test]
fn test_double_tempo_raw_classification_is_uniform() {
    let reference = chroma_from_notes(&scale_notes(), 8);
    let student = chroma_from_notes(&scale_notes(), 4);
    let config = CompareConfig::default();

    let curve = align_frames(&reference, &student, SAMPLE_RATE, HOP_LENGTH).unwrap();
    let timeline = analyze_deviation(&curve, &config);

    // Uniformly too fast before any merging.
    assert_eq!(timeline.segments.len(), 1);
    assert_eq!(timeline.segments[0].status, TempoStatus::TooFast);
}

#[test]
fn test_half_tempo_student_is_too_slow() {
    let reference = chroma_from_notes(&scale_notes(), 4);
    let student = chroma_from_notes(&scale_notes(), 8);
    let config = CompareConfig::default();

    let result = compare_rhythm(&reference, &student, SAMPLE_RATE, HOP_LENGTH, &config).unwrap();

    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.segments[0].status, TempoStatus::TooSlow);
}

#[test]
fn test_empty_chroma_is_degenerate_not_error() {
    let reference = chroma_from_notes(&scale_notes(), 8);
    let empty = Array2::<f32>::zeros((12, 0));
    let config = CompareConfig::default();

    for (a, b) in [(&reference, &empty), (&empty, &reference), (&empty, &empty)] {
        let result = compare_rhythm(a, b, SAMPLE_RATE, HOP_LENGTH, &config).unwrap();
        assert!(result.segments.is_empty());
        assert_eq!(result.total_duration, 0.0);
    }
}

#[test]
fn test_mismatched_bin_counts_are_rejected() {
    let reference = Array2::<f32>::zeros((12, 16));
    let student = Array2::<f32>::zeros((6, 16));
    let config = CompareConfig::default();

    assert!(compare_rhythm(&reference, &student, SAMPLE_RATE, HOP_LENGTH, &config).is_err());
}

#[test]
fn test_melody_self_comparison_is_perfect() {
    let times: Vec<f32> = (0..16).map(|i| i as f32 * 0.3).collect();
    let classes: Vec<u8> = (0..16).map(|i| (i % 12) as u8).collect();
    let seq = OnsetSequence::from_parts(&times, &classes).unwrap();

    let result = compare_melody(&seq, &seq, &CompareConfig::default()).unwrap();

    assert_eq!(result.distance, 0.0);
    assert_eq!(result.path[0], (0, 0));
    assert_eq!(
        result.path[result.path.len() - 1],
        (result.sample_len - 1, result.practice_len - 1)
    );
}

#[test]
fn test_melody_wrong_notes_score_worse_than_timing_drift() {
    let times: Vec<f32> = (0..8).map(|i| i as f32 * 0.4).collect();
    let classes: Vec<u8> = vec![0, 2, 4, 5, 7, 9, 11, 0];
    let sample = OnsetSequence::from_parts(&times, &classes).unwrap();

    // Same notes, slightly late.
    let drift_times: Vec<f32> = times.iter().map(|t| t + 0.1).collect();
    let drifted = OnsetSequence::from_parts(&drift_times, &classes).unwrap();

    // Same timing, wrong notes.
    let wrong_classes: Vec<u8> = vec![1, 3, 5, 6, 8, 10, 0, 1];
    let wrong = OnsetSequence::from_parts(&times, &wrong_classes).unwrap();

    let config = CompareConfig::default();
    let drift_score = compare_melody(&sample, &drifted, &config).unwrap();
    let wrong_score = compare_melody(&sample, &wrong, &config).unwrap();

    assert!(drift_score.distance < wrong_score.distance);
}

#[test]
fn test_rhythm_result_serializes_wire_names() {
    let chroma = chroma_from_notes(&scale_notes(), 8);
    let config = CompareConfig::default();
    let result = compare_rhythm(&chroma, &chroma, SAMPLE_RATE, HOP_LENGTH, &config).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["total_duration"].as_f64().unwrap() > 0.0);
    assert_eq!(json["segments"][0]["status"], "Good");
    assert!(json["segments"][0]["start"].is_number());
    assert!(json["segments"][0]["end"].is_number());
}
