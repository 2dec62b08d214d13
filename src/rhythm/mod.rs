//! Tempo deviation classification and denoising
//!
//! Consumes the warp curve produced by frame alignment and produces the
//! coarse tempo-state timeline reported to the learner.

pub mod deviation;
pub mod merge;

pub use deviation::{analyze_deviation, RawTimeline};
pub use merge::merge_segments;
