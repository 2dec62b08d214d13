//! Onset sequence quantization
//!
//! Converts sparse, irregularly timed scalar events into a fixed-step dense
//! array so that a classic elementwise-distance DTW applies.
//!
//! Algorithm:
//! 1. Length = `floor(max_time / step) + 1`
//! 2. Every event lands in bucket `floor(time / step)`
//! 3. The last event (in input order) mapping to a bucket wins
//! 4. Buckets with no event stay at 0

use crate::error::AlignError;

/// Quantize sparse events onto a fixed time grid
///
/// # Arguments
///
/// * `times` - Event times in seconds (need not be sorted)
/// * `values` - Scalar value per event, parallel to `times`
/// * `step` - Grid step in seconds (must be positive)
///
/// # Returns
///
/// Dense array of length `floor(max_time / step) + 1`; empty input yields an
/// empty array.
///
/// # Errors
///
/// Returns `AlignError::InvalidInput` if the slices differ in length or the
/// step is not positive.
///
/// # Example
///
/// ```
/// use etude_dsp::align::quantize::quantize_events;
///
/// // Both events fall in bucket 0; the later one wins.
/// let seq = quantize_events(&[0.0, 0.05], &[0.0, 4.0], 0.2)?;
/// assert_eq!(seq, vec![4.0]);
/// # Ok::<(), etude_dsp::AlignError>(())
/// ```
pub fn quantize_events(
    times: &[f32],
    values: &[f32],
    step: f32,
) -> Result<Vec<f32>, AlignError> {
    if times.len() != values.len() {
        return Err(AlignError::InvalidInput(format!(
            "times and values differ in length: {} vs {}",
            times.len(),
            values.len()
        )));
    }

    if !(step > 0.0) {
        return Err(AlignError::InvalidInput(format!(
            "quantize step must be positive, got {}",
            step
        )));
    }

    if times.is_empty() {
        return Ok(Vec::new());
    }

    let max_time = times.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let num_steps = (max_time / step).floor() as usize + 1;
    let mut sequence = vec![0.0f32; num_steps];

    for (&time, &value) in times.iter().zip(values.iter()) {
        let index = (time / step).floor() as usize;
        if index < num_steps {
            sequence[index] = value;
        }
    }

    log::debug!(
        "Quantized {} events into {} buckets (step {:.3}s)",
        times.len(),
        num_steps,
        step
    );

    Ok(sequence)
}
