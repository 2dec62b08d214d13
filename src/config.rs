//! Configuration parameters for recording comparison

/// Comparison configuration parameters
///
/// The defaults are the production constants; every field can be overridden
/// for experimentation.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    // Melody alignment
    /// Quantization step for onset sequences in seconds (default: 0.2)
    ///
    /// Sparse onset events are rasterized onto a grid of this step size so
    /// that a classic elementwise-distance DTW applies.
    pub quantize_step: f32,

    // Rhythm analysis
    /// Resample step for the time-warp curve in seconds (default: 0.5)
    pub resample_dt: f32,

    /// Tempo ratio above which a sample is classified as too fast (default: 1.25)
    pub fast_threshold: f32,

    /// Tempo ratio below which a sample is classified as too slow (default: 0.8)
    pub slow_threshold: f32,

    /// Standard deviation of the Gaussian smoothing kernel, in resample
    /// steps (default: 1.0)
    pub smoothing_sigma: f32,

    /// Minimum duration in seconds a segment must have to survive merging
    /// (default: 2.0; 1.5 is a documented alternative for finer output)
    pub min_segment_duration: f32,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            quantize_step: 0.2,
            resample_dt: 0.5,
            fast_threshold: 1.25,
            slow_threshold: 0.8,
            smoothing_sigma: 1.0,
            min_segment_duration: 2.0,
        }
    }
}
