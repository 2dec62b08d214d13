//! Segment denoising
//!
//! The raw tempo-state timeline flips state on single resample steps where
//! the smoothed ratio grazes a threshold. Merging collapses those flickers
//! into the coarse feedback blocks shown to the learner.

use crate::result::RhythmSegment;

/// Merge adjacent same-state or too-short segments
///
/// Seeds the output with the first raw segment, then for each subsequent
/// raw segment: if its status equals the last kept segment's status, or its
/// own span is shorter than `min_duration`, the last kept segment is
/// extended to cover it; otherwise it starts a new output segment.
///
/// The threshold always tests the incoming segment's original span, never
/// the accumulated merged span. A chain of consecutive sub-threshold
/// segments of differing status is therefore absorbed whole into the
/// preceding block. That is the tuned production behavior; changing it
/// moves feedback boundaries.
///
/// The output covers exactly the same total range as the input and never
/// has more segments than the input. Empty input yields empty output.
pub fn merge_segments(segments: &[RhythmSegment], min_duration: f32) -> Vec<RhythmSegment> {
    let mut merged: Vec<RhythmSegment> = Vec::with_capacity(segments.len());

    for &segment in segments {
        match merged.last_mut() {
            None => merged.push(segment),
            Some(prev) => {
                if segment.status == prev.status || segment.duration() < min_duration {
                    prev.end = segment.end;
                } else {
                    merged.push(segment);
                }
            }
        }
    }

    if !merged.is_empty() {
        log::debug!(
            "Merged {} raw segments into {} (min duration {:.2}s)",
            segments.len(),
            merged.len(),
            min_duration
        );
    }

    merged
}
