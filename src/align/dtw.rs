//! Dynamic time warping
//!
//! Two DTW variants share the same accumulation and backtracking core:
//! a scalar variant with absolute-difference local cost for quantized
//! melodic sequences, and a dense variant with cosine local cost for full
//! chroma matrices.
//!
//! The recurrence is the classic one:
//!
//! ```text
//! D[i,j] = d(a_i, b_j) + min(D[i-1,j], D[i,j-1], D[i-1,j-1])
//! D[0,0] = d(a_0, b_0)
//! ```
//!
//! and the path is reconstructed by backtracking from the terminal cell to
//! `(0, 0)`, ties broken diagonal first, then vertical, then horizontal.
//!
//! The full O(N·M) cost matrix is materialized; inputs are expected to be
//! practice clips of a few minutes, not hour-long recordings. Callers with
//! longer material must chunk it.

use ndarray::Array2;

use crate::error::AlignError;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// An index alignment between two sequences
///
/// Monotonic non-decreasing in both coordinates, starting at `(0, 0)` and
/// ending at `(len_a - 1, len_b - 1)`.
pub type AlignmentPath = Vec<(usize, usize)>;

/// Align two scalar sequences with absolute-difference local cost
///
/// Returns the accumulated cost at the terminal cell and the warp path.
/// Either input empty yields zero distance and an empty path.
pub fn dtw_scalar(a: &[f32], b: &[f32]) -> (f32, AlignmentPath) {
    if a.is_empty() || b.is_empty() {
        return (0.0, Vec::new());
    }

    let cost = |i: usize, j: usize| (a[i] - b[j]).abs();
    let acc = accumulate(a.len(), b.len(), cost);
    let distance = acc[a.len() * b.len() - 1];
    let path = backtrack(&acc, a.len(), b.len());

    log::debug!(
        "Scalar DTW: {}x{} cells, distance {:.4}, path length {}",
        a.len(),
        b.len(),
        distance,
        path.len()
    );

    (distance, path)
}

/// Align two chroma matrices with cosine local cost
///
/// Matrices are `(n_bins, n_frames)` with one energy vector per frame
/// column. Every frame participates; nothing is subsampled.
///
/// # Errors
///
/// Returns `AlignError::InvalidInput` if the matrices disagree on the
/// number of bins.
pub fn dtw_chroma(
    a: &Array2<f32>,
    b: &Array2<f32>,
) -> Result<(f32, AlignmentPath), AlignError> {
    if a.nrows() != b.nrows() {
        return Err(AlignError::InvalidInput(format!(
            "chroma bin counts differ: {} vs {}",
            a.nrows(),
            b.nrows()
        )));
    }

    let (n, m) = (a.ncols(), b.ncols());
    if n == 0 || m == 0 {
        return Ok((0.0, Vec::new()));
    }

    let cost = |i: usize, j: usize| cosine_distance(a.column(i), b.column(j));
    let acc = accumulate(n, m, cost);
    let distance = acc[n * m - 1];
    let path = backtrack(&acc, n, m);

    log::debug!(
        "Chroma DTW: {}x{} frames, distance {:.4}, path length {}",
        n,
        m,
        distance,
        path.len()
    );

    Ok((distance, path))
}

/// Cosine distance `1 - a.b / (|a||b|)` between two frame vectors
///
/// A zero-norm frame (silence) is treated as maximally distant from
/// everything, distance 1.0.
fn cosine_distance(a: ndarray::ArrayView1<f32>, b: ndarray::ArrayView1<f32>) -> f32 {
    let dot = a.dot(&b);
    let norm = a.dot(&a).sqrt() * b.dot(&b).sqrt();
    if norm < EPSILON {
        return 1.0;
    }
    1.0 - dot / norm
}

/// Fill the accumulated cost matrix, row-major `n x m`
fn accumulate<F: Fn(usize, usize) -> f32>(n: usize, m: usize, cost: F) -> Vec<f32> {
    let mut acc = vec![0.0f32; n * m];

    acc[0] = cost(0, 0);
    for j in 1..m {
        acc[j] = cost(0, j) + acc[j - 1];
    }
    for i in 1..n {
        acc[i * m] = cost(i, 0) + acc[(i - 1) * m];
        for j in 1..m {
            let best = acc[(i - 1) * m + j - 1]
                .min(acc[(i - 1) * m + j])
                .min(acc[i * m + j - 1]);
            acc[i * m + j] = cost(i, j) + best;
        }
    }

    acc
}

/// Backtrack the minimum-cost path from `(n-1, m-1)` to `(0, 0)`
///
/// Ties prefer the diagonal predecessor, then the vertical `(i-1, j)`, then
/// the horizontal `(i, j-1)`.
fn backtrack(acc: &[f32], n: usize, m: usize) -> AlignmentPath {
    let mut path = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (n - 1, m - 1);
    path.push((i, j));

    while i > 0 || j > 0 {
        if i == 0 {
            j -= 1;
        } else if j == 0 {
            i -= 1;
        } else {
            let diag = acc[(i - 1) * m + j - 1];
            let vert = acc[(i - 1) * m + j];
            let horiz = acc[i * m + j - 1];
            if diag <= vert && diag <= horiz {
                i -= 1;
                j -= 1;
            } else if vert <= horiz {
                i -= 1;
            } else {
                j -= 1;
            }
        }
        path.push((i, j));
    }

    path.reverse();
    path
}
