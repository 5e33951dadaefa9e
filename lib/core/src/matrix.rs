//! Dense pairwise similarity matrix
//!
//! Built once from normalized document vectors. Only the upper triangle is
//! computed; the lower triangle is mirrored so `get(i, j) == get(j, i)` holds
//! bit for bit.

use crate::sparse::SparseVector;
use rayon::prelude::*;

/// Row-major N×N matrix of cosine scores in `[0, 1]` with a unit diagonal
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Pairwise cosine similarity of L2-normalized vectors. Rows are scored
    /// in parallel.
    pub fn build(vectors: &[SparseVector]) -> Self {
        let n = vectors.len();

        let upper: Vec<Vec<f32>> = (0..n)
            .into_par_iter()
            .map(|i| {
                vectors[i + 1..]
                    .iter()
                    .map(|other| vectors[i].dot(other).clamp(0.0, 1.0))
                    .collect()
            })
            .collect();

        let mut scores = vec![0.0f32; n * n];
        for (i, row) in upper.iter().enumerate() {
            scores[i * n + i] = 1.0;
            for (offset, &score) in row.iter().enumerate() {
                let j = i + 1 + offset;
                scores[i * n + j] = score;
                scores[j * n + i] = score;
            }
        }

        Self { n, scores }
    }

    /// Number of rows (and columns)
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.n
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Score between `i` and `j`, or `None` when either is out of range
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.n && j < self.n {
            Some(self.scores[i * self.n + j])
        } else {
            None
        }
    }

    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i < self.n {
            Some(&self.scores[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }
}
