//! Frame-level time alignment over full chroma matrices
//!
//! Where melodic alignment works on discrete onset events, the rhythm
//! pipeline needs a continuous time correspondence between the two
//! recordings. Dense DTW with cosine cost runs over every analysis frame of
//! both chroma matrices, and the resulting index path is converted to a
//! pair of parallel time arrays via the extractor's frame geometry
//! (`frame_index * hop_length / sample_rate`).

use ndarray::Array2;

use crate::align::dtw::dtw_chroma;
use crate::error::AlignError;

/// Per-frame pitch-class energies of one recording
///
/// Shape `(12, n_frames)`; one non-negative 12-bin energy vector per
/// analysis frame.
pub type ChromaMatrix = Array2<f32>;

/// Resampled frame-level time-warp relation
///
/// Parallel arrays; entry `k` states that student time `student_times[k]`
/// corresponds to reference time `reference_times[k]`. Student times are
/// non-decreasing by construction of the DTW path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WarpCurve {
    /// Student-side times in seconds
    pub student_times: Vec<f32>,

    /// Reference-side times in seconds, parallel to `student_times`
    pub reference_times: Vec<f32>,
}

impl WarpCurve {
    /// Whether the curve holds no warp points
    pub fn is_empty(&self) -> bool {
        self.student_times.is_empty()
    }

    /// Final student time, or 0 for an empty curve
    pub fn final_student_time(&self) -> f32 {
        self.student_times.last().copied().unwrap_or(0.0)
    }
}

/// Align two chroma matrices frame by frame
///
/// # Arguments
///
/// * `reference` - Chroma matrix of the reference recording
/// * `student` - Chroma matrix of the student recording
/// * `sample_rate` - Audio sample rate in Hz
/// * `hop_length` - Samples advanced between consecutive analysis frames
///
/// # Returns
///
/// A `WarpCurve` in forward time order. Either matrix empty yields an empty
/// curve, which downstream stages report as a degenerate alignment.
///
/// # Errors
///
/// Returns `AlignError::InvalidInput` for a zero sample rate or hop length,
/// or mismatched chroma bin counts.
pub fn align_frames(
    reference: &ChromaMatrix,
    student: &ChromaMatrix,
    sample_rate: u32,
    hop_length: u32,
) -> Result<WarpCurve, AlignError> {
    if sample_rate == 0 {
        return Err(AlignError::InvalidInput("sample rate must be positive".to_string()));
    }
    if hop_length == 0 {
        return Err(AlignError::InvalidInput("hop length must be positive".to_string()));
    }

    let (_, path) = dtw_chroma(student, reference)?;

    let frame_duration = hop_length as f32 / sample_rate as f32;
    let mut student_times = Vec::with_capacity(path.len());
    let mut reference_times = Vec::with_capacity(path.len());
    for (stu_idx, ref_idx) in path {
        student_times.push(stu_idx as f32 * frame_duration);
        reference_times.push(ref_idx as f32 * frame_duration);
    }

    log::debug!(
        "Frame alignment: {} student x {} reference frames, {} warp points",
        student.ncols(),
        reference.ncols(),
        student_times.len()
    );

    Ok(WarpCurve {
        student_times,
        reference_times,
    })
}
