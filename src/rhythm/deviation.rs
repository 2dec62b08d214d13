//! Tempo deviation analysis
//!
//! Turns the frame-level time-warp curve into a discrete tempo-state
//! timeline.
//!
//! Algorithm:
//! 1. Resample the warp curve at a fixed step (`resample_dt`)
//! 2. Interpolate the reference time at each sample point
//! 3. Differentiate into a local tempo ratio: reference-time advance per
//!    unit of student time (1 = synchronized, >1 = student ahead,
//!    <1 = student behind)
//! 4. Smooth the ratio with a Gaussian kernel to suppress per-frame jitter
//! 5. Classify each sample against the fast/slow thresholds
//! 6. Run-length encode the classification into contiguous raw segments
//!
//! The raw segments still carry per-sample noise; `merge_segments` denoises
//! them afterwards.

use crate::align::frames::WarpCurve;
use crate::config::CompareConfig;
use crate::result::{RhythmSegment, TempoStatus};

/// Raw tempo-state timeline before denoising
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTimeline {
    /// Contiguous raw segments, one per classification run
    pub segments: Vec<RhythmSegment>,

    /// Final student time covered by the warp curve, in seconds
    pub total_duration: f32,
}

/// Analyze the tempo deviation of a warp curve
///
/// Returns an empty timeline with duration 0 when the curve is empty or
/// ends at or before time zero, and an empty timeline with the available
/// duration when fewer than two resample points fit. Neither case is an
/// error.
pub fn analyze_deviation(curve: &WarpCurve, config: &CompareConfig) -> RawTimeline {
    let final_time = curve.final_student_time();
    if curve.is_empty() || final_time <= 0.0 {
        log::debug!("Degenerate alignment: no usable warp points");
        return RawTimeline::default();
    }

    if !(config.resample_dt > 0.0) {
        log::warn!("Non-positive resample step {}, skipping analysis", config.resample_dt);
        return RawTimeline {
            segments: Vec::new(),
            total_duration: final_time,
        };
    }

    let sample_times = sample_grid(final_time, config.resample_dt);
    if sample_times.len() < 2 {
        log::debug!(
            "Degenerate alignment: {} resample points over {:.3}s",
            sample_times.len(),
            final_time
        );
        return RawTimeline {
            segments: Vec::new(),
            total_duration: final_time,
        };
    }

    let ref_interp = interpolate(&sample_times, &curve.student_times, &curve.reference_times);

    let ratios: Vec<f32> = ref_interp
        .windows(2)
        .map(|w| (w[1] - w[0]) / config.resample_dt)
        .collect();
    let smoothed = gaussian_smooth(&ratios, config.smoothing_sigma);

    let statuses: Vec<TempoStatus> = smoothed
        .iter()
        .map(|&ratio| classify(ratio, config))
        .collect();
    let segments = run_length_encode(&statuses, &sample_times);

    log::debug!(
        "Tempo deviation: {} samples, {} raw segments over {:.2}s",
        statuses.len(),
        segments.len(),
        final_time
    );

    RawTimeline {
        segments,
        total_duration: final_time,
    }
}

/// Sample times `0, dt, 2dt, ... < stop`
fn sample_grid(stop: f32, dt: f32) -> Vec<f32> {
    (0..)
        .map(|k| k as f32 * dt)
        .take_while(|&t| t < stop)
        .collect()
}

/// Piecewise-linear interpolation of `(xs, ys)` at each query point
///
/// Queries outside the span clamp to the endpoint values. Repeated x values
/// resolve last-wins: an exact hit takes the final matching pair, and
/// zero-width spans act as steps. The x values must be non-decreasing,
/// which the DTW path guarantees.
fn interpolate(queries: &[f32], xs: &[f32], ys: &[f32]) -> Vec<f32> {
    queries
        .iter()
        .map(|&t| {
            if t <= xs[0] {
                // Exact hit on a run of leading duplicates still resolves
                // last-wins.
                if t == xs[0] {
                    let last = xs.iter().take_while(|&&x| x == t).count() - 1;
                    return ys[last];
                }
                return ys[0];
            }
            if t >= xs[xs.len() - 1] {
                return ys[ys.len() - 1];
            }
            // Largest i with xs[i] <= t; xs[i + 1] > t, so the bracketing
            // span has positive width unless xs[i] == t.
            let i = xs.partition_point(|&x| x <= t) - 1;
            if xs[i] == t {
                return ys[i];
            }
            let frac = (t - xs[i]) / (xs[i + 1] - xs[i]);
            ys[i] + frac * (ys[i + 1] - ys[i])
        })
        .collect()
}

/// Smooth values with a normalized Gaussian kernel
///
/// Kernel radius is `ceil(4 * sigma)` and the boundary reflects
/// half-sample symmetric (`d c b a | a b c d | d c b a`).
fn gaussian_smooth(values: &[f32], sigma: f32) -> Vec<f32> {
    if values.is_empty() || sigma <= 0.0 {
        return values.to_vec();
    }

    let radius = (4.0 * sigma).ceil() as isize;
    let mut kernel = Vec::with_capacity(2 * radius as usize + 1);
    for offset in -radius..=radius {
        let x = offset as f32 / sigma;
        kernel.push((-0.5 * x * x).exp());
    }
    let norm: f32 = kernel.iter().sum();

    let n = values.len() as isize;
    (0..n)
        .map(|center| {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let idx = center + k as isize - radius;
                acc += weight * values[reflect(idx, n)];
            }
            acc / norm
        })
        .collect()
}

/// Reflect an out-of-range index back into `[0, n)`
fn reflect(mut idx: isize, n: isize) -> usize {
    loop {
        if idx < 0 {
            idx = -idx - 1;
        } else if idx >= n {
            idx = 2 * n - 1 - idx;
        } else {
            return idx as usize;
        }
    }
}

fn classify(ratio: f32, config: &CompareConfig) -> TempoStatus {
    if ratio > config.fast_threshold {
        TempoStatus::TooFast
    } else if ratio < config.slow_threshold {
        TempoStatus::TooSlow
    } else {
        TempoStatus::Good
    }
}

/// Fold a classification sequence into contiguous raw segments
///
/// A run of equal statuses over sample indices `[a, b)` becomes a segment
/// from `sample_times[a]` to `sample_times[b]`; the final run closes at the
/// last sample time.
fn run_length_encode(statuses: &[TempoStatus], sample_times: &[f32]) -> Vec<RhythmSegment> {
    let mut segments = Vec::new();
    let mut run_start = 0;

    for i in 1..=statuses.len() {
        if i == statuses.len() || statuses[i] != statuses[run_start] {
            segments.push(RhythmSegment {
                start: sample_times[run_start],
                end: sample_times[i.min(sample_times.len() - 1)],
                status: statuses[run_start],
            });
            run_start = i;
        }
    }

    segments
}
