//! Comparison result types

use serde::{Deserialize, Serialize};

/// Tempo state of one stretch of the student's performance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TempoStatus {
    /// Student is ahead of the reference cadence
    #[serde(rename = "Too Fast")]
    TooFast,

    /// Student is behind the reference cadence
    #[serde(rename = "Too Slow")]
    TooSlow,

    /// Student tracks the reference tempo
    Good,
}

/// A maximal run of one tempo state
///
/// A merged segment list is ordered, non-overlapping, and covers
/// `[0, total_duration]` without gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RhythmSegment {
    /// Segment start in seconds of student time
    pub start: f32,

    /// Segment end in seconds of student time
    pub end: f32,

    /// Tempo state over `[start, end]`
    pub status: TempoStatus,
}

impl RhythmSegment {
    /// Segment span in seconds
    pub fn duration(&self) -> f32 {
        self.end - self.start
    }
}

/// Result of aligning two quantized melodic sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MelodyAlignResult {
    /// Total accumulated DTW cost at the terminal cell
    ///
    /// Zero means the quantized sequences are identical; larger values mean
    /// larger melodic divergence. The scale depends on sequence length, so
    /// compare scores only between runs of similar duration.
    pub distance: f32,

    /// Index alignment `(sample_idx, practice_idx)`, anchored at `(0, 0)`
    /// and `(sample_len - 1, practice_len - 1)`, non-decreasing in both
    /// coordinates
    pub path: Vec<(usize, usize)>,

    /// Length of the quantized sample (reference) sequence
    pub sample_len: usize,

    /// Length of the quantized practice (student) sequence
    pub practice_len: usize,
}

/// Result of the rhythm comparison pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmResult {
    /// Denoised tempo-state timeline
    ///
    /// Empty when the alignment was degenerate (no usable warp points).
    pub segments: Vec<RhythmSegment>,

    /// Total student duration covered by the timeline, in seconds
    pub total_duration: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tempo_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TempoStatus::TooFast).unwrap(),
            "\"Too Fast\""
        );
        assert_eq!(
            serde_json::to_string(&TempoStatus::TooSlow).unwrap(),
            "\"Too Slow\""
        );
        assert_eq!(serde_json::to_string(&TempoStatus::Good).unwrap(), "\"Good\"");
    }

    #[test]
    fn test_segment_duration() {
        let seg = RhythmSegment {
            start: 1.0,
            end: 3.5,
            status: TempoStatus::Good,
        };
        assert!((seg.duration() - 2.5).abs() < 1e-6);
    }
}
