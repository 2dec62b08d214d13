//! Example: compare a synthetic practice take against its reference
//!
//! Simulates the output of the feature extractor for a reference recording
//! and a student take that rushes the second half, then runs both
//! comparison pipelines and prints the feedback.

use etude_dsp::{compare_melody, compare_rhythm, ChromaMatrix, CompareConfig, OnsetSequence};
use ndarray::Array2;

const SAMPLE_RATE: u32 = 22050;
const HOP_LENGTH: u32 = 512;

/// One-hot chroma frames playing each note for `frames_per_note` frames
fn chroma_from_notes(notes: &[usize], frames_per_note: &[usize]) -> ChromaMatrix {
    let n_frames: usize = frames_per_note.iter().sum();
    let mut chroma = Array2::zeros((12, n_frames));
    let mut frame = 0;
    for (&class, &held) in notes.iter().zip(frames_per_note.iter()) {
        for _ in 0..held {
            chroma[(class % 12, frame)] = 1.0;
            frame += 1;
        }
    }
    chroma
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = CompareConfig::default();
    let notes: Vec<usize> = (0..48).map(|i| [0, 2, 4, 5, 7, 9, 11][i % 7]).collect();

    // Reference: every note held 10 frames. Student: correct for the first
    // half, then rushing at double speed.
    let ref_hold = vec![10usize; notes.len()];
    let stu_hold: Vec<usize> = (0..notes.len()).map(|i| if i < 24 { 10 } else { 5 }).collect();

    let reference = chroma_from_notes(&notes, &ref_hold);
    let student = chroma_from_notes(&notes, &stu_hold);

    let rhythm = compare_rhythm(&reference, &student, SAMPLE_RATE, HOP_LENGTH, &config)?;
    println!("Rhythm feedback ({:.1}s of playing):", rhythm.total_duration);
    for segment in &rhythm.segments {
        println!(
            "  [{:5.1}s - {:5.1}s] {:?}",
            segment.start, segment.end, segment.status
        );
    }

    // Melody comparison over the onset sequences the extractor would report.
    let frame_dur = HOP_LENGTH as f32 / SAMPLE_RATE as f32;
    let ref_times: Vec<f32> = (0..notes.len()).map(|i| i as f32 * 10.0 * frame_dur).collect();
    let classes: Vec<u8> = notes.iter().map(|&n| n as u8).collect();
    let mut stu_times = Vec::new();
    let mut t = 0.0;
    for &held in &stu_hold {
        stu_times.push(t);
        t += held as f32 * frame_dur;
    }

    let sample = OnsetSequence::from_parts(&ref_times, &classes)?;
    let practice = OnsetSequence::from_parts(&stu_times, &classes)?;
    let melody = compare_melody(&sample, &practice, &config)?;

    println!(
        "Melody: distance {:.2} over a {} x {} alignment ({} path points)",
        melody.distance,
        melody.sample_len,
        melody.practice_len,
        melody.path.len()
    );

    Ok(())
}
