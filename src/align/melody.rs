//! Melodic alignment between a reference and a practice take
//!
//! The external feature extractor reports, per recording, the detected note
//! onsets and the dominant pitch class at each onset (index of maximum
//! energy in the matching chroma frame). Both takes are quantized onto the
//! same time grid and aligned with scalar DTW.
//!
//! Pitch classes are compared as plain scalars: class 11 (B) and class 0 (C)
//! come out maximally distant even though they are one semitone apart on
//! the pitch circle. This matches the behavior the feedback thresholds were
//! tuned against and is kept as-is; see DESIGN.md.

use serde::{Deserialize, Serialize};

use crate::align::dtw::dtw_scalar;
use crate::align::quantize::quantize_events;
use crate::config::CompareConfig;
use crate::error::AlignError;
use crate::result::MelodyAlignResult;

/// One detected note onset and its dominant pitch class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchEvent {
    /// Onset time in seconds from the start of the recording
    pub time: f32,

    /// Dominant pitch class at the onset (0 = C, 1 = C#, ..., 11 = B)
    pub pitch_class: u8,
}

/// Ordered-by-time onset events of one recording
///
/// Produced once per recording by the feature extractor, immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnsetSequence {
    events: Vec<PitchEvent>,
}

impl OnsetSequence {
    /// Build a sequence from parallel time and pitch-class slices
    ///
    /// # Errors
    ///
    /// Returns `AlignError::InvalidInput` if the slices differ in length or
    /// a pitch class falls outside `[0, 11]`.
    pub fn from_parts(times: &[f32], pitch_classes: &[u8]) -> Result<Self, AlignError> {
        if times.len() != pitch_classes.len() {
            return Err(AlignError::InvalidInput(format!(
                "onset times and pitch classes differ in length: {} vs {}",
                times.len(),
                pitch_classes.len()
            )));
        }

        if let Some(&pc) = pitch_classes.iter().find(|&&pc| pc > 11) {
            return Err(AlignError::InvalidInput(format!(
                "pitch class out of range: {}",
                pc
            )));
        }

        let events = times
            .iter()
            .zip(pitch_classes.iter())
            .map(|(&time, &pitch_class)| PitchEvent { time, pitch_class })
            .collect();

        Ok(Self { events })
    }

    /// The events in input order
    pub fn events(&self) -> &[PitchEvent] {
        &self.events
    }

    /// Whether the sequence holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    fn times(&self) -> Vec<f32> {
        self.events.iter().map(|e| e.time).collect()
    }

    fn pitch_values(&self) -> Vec<f32> {
        self.events.iter().map(|e| f32::from(e.pitch_class)).collect()
    }
}

/// Align the melodic content of two recordings
///
/// Quantizes both onset sequences with `config.quantize_step` and runs
/// scalar DTW over the quantized pitch-class values.
///
/// # Arguments
///
/// * `sample` - Onset sequence of the reference recording
/// * `practice` - Onset sequence of the student recording
/// * `config` - Comparison parameters
///
/// # Returns
///
/// `MelodyAlignResult` with the accumulated cost, the index alignment path,
/// and both quantized lengths. Either sequence empty yields zero distance
/// and an empty path.
///
/// # Errors
///
/// Returns `AlignError::InvalidInput` for a non-positive quantize step.
pub fn align_melody(
    sample: &OnsetSequence,
    practice: &OnsetSequence,
    config: &CompareConfig,
) -> Result<MelodyAlignResult, AlignError> {
    let sample_seq = quantize_events(&sample.times(), &sample.pitch_values(), config.quantize_step)?;
    let practice_seq =
        quantize_events(&practice.times(), &practice.pitch_values(), config.quantize_step)?;

    let (distance, path) = dtw_scalar(&sample_seq, &practice_seq);

    log::debug!(
        "Melody alignment: {} vs {} quantized steps, distance {:.4}",
        sample_seq.len(),
        practice_seq.len(),
        distance
    );

    Ok(MelodyAlignResult {
        distance,
        path,
        sample_len: sample_seq.len(),
        practice_len: practice_seq.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(times: &[f32], classes: &[u8]) -> OnsetSequence {
        OnsetSequence::from_parts(times, classes).unwrap()
    }

    #[test]
    fn test_from_parts_mismatched() {
        let err = OnsetSequence::from_parts(&[0.0], &[0, 4]).unwrap_err();
        assert!(matches!(err, AlignError::InvalidInput(_)));
    }

    #[test]
    fn test_from_parts_pitch_class_range() {
        let err = OnsetSequence::from_parts(&[0.0], &[12]).unwrap_err();
        assert!(matches!(err, AlignError::InvalidInput(_)));
    }

    #[test]
    fn test_align_identical_sequences() {
        let seq = sequence(&[0.0, 0.5, 1.0, 1.5], &[0, 4, 7, 0]);
        let result = align_melody(&seq, &seq, &CompareConfig::default()).unwrap();
        assert_eq!(result.distance, 0.0);
        assert_eq!(result.sample_len, result.practice_len);
        assert_eq!(result.path[0], (0, 0));
        assert_eq!(
            result.path[result.path.len() - 1],
            (result.sample_len - 1, result.practice_len - 1)
        );
    }

    #[test]
    fn test_align_empty_practice() {
        let sample = sequence(&[0.0, 0.5], &[0, 4]);
        let practice = OnsetSequence::default();
        let result = align_melody(&sample, &practice, &CompareConfig::default()).unwrap();
        assert_eq!(result.distance, 0.0);
        assert!(result.path.is_empty());
        assert_eq!(result.sample_len, 3);
        assert_eq!(result.practice_len, 0);
    }

    #[test]
    fn test_align_divergent_melody_scores_worse() {
        let sample = sequence(&[0.0, 0.4, 0.8, 1.2], &[0, 4, 7, 0]);
        let close = sequence(&[0.0, 0.4, 0.8, 1.2], &[0, 4, 7, 2]);
        let far = sequence(&[0.0, 0.4, 0.8, 1.2], &[11, 11, 11, 11]);

        let config = CompareConfig::default();
        let close_result = align_melody(&sample, &close, &config).unwrap();
        let far_result = align_melody(&sample, &far, &config).unwrap();

        assert!(close_result.distance < far_result.distance);
    }

    #[test]
    fn test_pitch_classes_are_flat_scalars() {
        // B (11) against C (0) costs 11, not 1; the pitch circle is not
        // wrapped.
        let sample = sequence(&[0.0], &[11]);
        let practice = sequence(&[0.0], &[0]);
        let result = align_melody(&sample, &practice, &CompareConfig::default()).unwrap();
        assert_eq!(result.distance, 11.0);
    }
}
