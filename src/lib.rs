//! # Etude DSP
//!
//! Alignment-and-classification engine for automated music practice
//! feedback. Compares a learner's recording against a reference along two
//! independent axes:
//!
//! - **Melody**: dynamic time warping over quantized melodic onset
//!   sequences, yielding a similarity score and an index alignment path.
//! - **Rhythm**: dense frame-level DTW over full chroma energy matrices,
//!   from which a continuous tempo-deviation timeline is derived, smoothed,
//!   thresholded into discrete states, and denoised into coarse segments.
//!
//! The crate consumes features already computed by an external extractor
//! (onset times, dominant pitch classes, chroma matrices, frame geometry);
//! audio decoding and feature extraction are out of scope.
//!
//! ## Quick Start
//!
//! ```
//! use etude_dsp::{compare_melody, compare_rhythm, CompareConfig, OnsetSequence};
//! use ndarray::Array2;
//!
//! let config = CompareConfig::default();
//!
//! // Melody: onset times and dominant pitch classes from the extractor.
//! let sample = OnsetSequence::from_parts(&[0.0, 0.5, 1.0], &[0, 4, 7])?;
//! let practice = OnsetSequence::from_parts(&[0.0, 0.6, 1.1], &[0, 4, 7])?;
//! let melody = compare_melody(&sample, &practice, &config)?;
//! println!("melodic distance: {:.2}", melody.distance);
//!
//! // Rhythm: full 12-bin chroma matrices, one column per analysis frame.
//! let reference = Array2::<f32>::ones((12, 100));
//! let student = Array2::<f32>::ones((12, 100));
//! let rhythm = compare_rhythm(&reference, &student, 22050, 512, &config)?;
//! for segment in &rhythm.segments {
//!     println!("[{:.1}s-{:.1}s] {:?}", segment.start, segment.end, segment.status);
//! }
//! # Ok::<(), etude_dsp::AlignError>(())
//! ```
//!
//! ## Architecture
//!
//! The two pipelines share no state and may run independently per pair of
//! recordings:
//!
//! ```text
//! Onset events  → quantize → scalar DTW            → MelodyAlignResult
//! Chroma frames → dense DTW → tempo ratio timeline → merge → RhythmResult
//! ```
//!
//! Every operation is a pure synchronous function over its explicit inputs;
//! DTW cost is O(N·M) in the two input lengths, so hour-long recordings
//! must be chunked by the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod align;
pub mod config;
pub mod error;
pub mod result;
pub mod rhythm;

// Re-export main types
pub use align::{align_frames, align_melody, ChromaMatrix, OnsetSequence, PitchEvent, WarpCurve};
pub use config::CompareConfig;
pub use error::AlignError;
pub use result::{MelodyAlignResult, RhythmResult, RhythmSegment, TempoStatus};

/// Compare the melodic content of two recordings
///
/// Quantizes both onset sequences onto the grid given by
/// `config.quantize_step` and aligns them with scalar DTW.
///
/// # Arguments
///
/// * `sample` - Onset sequence of the reference recording
/// * `practice` - Onset sequence of the student recording
/// * `config` - Comparison parameters
///
/// # Returns
///
/// `MelodyAlignResult` with the accumulated alignment cost, the index
/// alignment path, and both quantized lengths. Empty input is not an
/// error; it yields zero distance and an empty path.
///
/// # Errors
///
/// Returns `AlignError::InvalidInput` for a non-positive quantize step.
pub fn compare_melody(
    sample: &OnsetSequence,
    practice: &OnsetSequence,
    config: &CompareConfig,
) -> Result<MelodyAlignResult, AlignError> {
    log::debug!(
        "Comparing melody: {} sample onsets vs {} practice onsets",
        sample.len(),
        practice.len()
    );
    align::melody::align_melody(sample, practice, config)
}

/// Compare the rhythm of two recordings
///
/// Runs dense DTW over the full chroma matrices, derives the local tempo
/// ratio from the resulting time-warp curve, classifies it against the
/// configured thresholds, and merges the classification into coarse
/// segments.
///
/// # Arguments
///
/// * `reference` - Chroma matrix of the reference recording, `(12, n_frames)`
/// * `student` - Chroma matrix of the student recording, `(12, n_frames)`
/// * `sample_rate` - Audio sample rate in Hz
/// * `hop_length` - Samples advanced between consecutive analysis frames
/// * `config` - Comparison parameters
///
/// # Returns
///
/// `RhythmResult` with the denoised segment timeline and the total student
/// duration. A degenerate alignment (empty matrices, or too short to
/// resample) is not an error; it yields no segments and the available
/// duration, possibly 0.
///
/// # Errors
///
/// Returns `AlignError::InvalidInput` for zero frame geometry or
/// mismatched chroma bin counts.
pub fn compare_rhythm(
    reference: &ChromaMatrix,
    student: &ChromaMatrix,
    sample_rate: u32,
    hop_length: u32,
    config: &CompareConfig,
) -> Result<RhythmResult, AlignError> {
    log::debug!(
        "Comparing rhythm: {} reference frames vs {} student frames",
        reference.ncols(),
        student.ncols()
    );

    let curve = align::frames::align_frames(reference, student, sample_rate, hop_length)?;
    let timeline = rhythm::deviation::analyze_deviation(&curve, config);
    let mut segments =
        rhythm::merge::merge_segments(&timeline.segments, config.min_segment_duration);

    // Raw runs close at the last resample point, which falls short of the
    // final warp time by up to one resample step. The reported timeline
    // covers the full duration.
    if let Some(last) = segments.last_mut() {
        last.end = timeline.total_duration;
    }

    Ok(RhythmResult {
        segments,
        total_duration: timeline.total_duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_compare_rhythm_empty_matrices() {
        let empty = Array2::<f32>::zeros((12, 0));
        let result =
            compare_rhythm(&empty, &empty, 22050, 512, &CompareConfig::default()).unwrap();
        assert!(result.segments.is_empty());
        assert_eq!(result.total_duration, 0.0);
    }

    #[test]
    fn test_compare_melody_empty_sequences() {
        let empty = OnsetSequence::default();
        let result = compare_melody(&empty, &empty, &CompareConfig::default()).unwrap();
        assert_eq!(result.distance, 0.0);
        assert!(result.path.is_empty());
        assert_eq!(result.sample_len, 0);
        assert_eq!(result.practice_len, 0);
    }
}
