//! Sequence and frame alignment
//!
//! Both comparison pipelines start here: `quantize` + `melody` turn sparse
//! onset events into a melodic similarity score, `dtw` + `frames` turn full
//! chroma matrices into a continuous time-warp curve for rhythm analysis.

pub mod dtw;
pub mod frames;
pub mod melody;
pub mod quantize;

pub use dtw::AlignmentPath;
pub use frames::{align_frames, ChromaMatrix, WarpCurve};
pub use melody::{align_melody, OnsetSequence, PitchEvent};
pub use quantize::quantize_events;
