//! Distance metrics and the scoring kernels behind every search.

use serde::{Deserialize, Serialize};

/// Distance metric scoring a query against stored vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Angle-based similarity in `[-1, 1]`; magnitude is ignored.
    Cosine,

    /// Raw inner product; favours long vectors aligned with the query.
    Dot,

    /// Straight-line L2 distance; smaller means closer.
    Euclid,
}

impl DistanceMetric {
    /// Scores a pair of vectors.
    ///
    /// The sign convention follows [`DistanceMetric::higher_is_better`]:
    /// Cosine and Dot grow with similarity, Euclid shrinks.
    ///
    /// # Panics
    ///
    /// Panics if the vectors differ in length.
    #[must_use]
    pub fn calculate(&self, a: &[f32], b: &[f32]) -> f32 {
        assert_eq!(a.len(), b.len(), "vector dimensions must match");

        match self {
            Self::Cosine => cosine(a, b),
            Self::Dot => inner(a, b),
            Self::Euclid => squared_l2(a, b).sqrt(),
        }
    }

    /// Scores every row of a contiguous row-major matrix against the query.
    ///
    /// `matrix.len()` must be a multiple of `dim`, and `query.len()` must
    /// equal `dim`.
    #[must_use]
    pub fn score_rows(&self, query: &[f32], matrix: &[f32], dim: usize) -> Vec<f32> {
        matrix
            .chunks_exact(dim)
            .map(|row| self.calculate(query, row))
            .collect()
    }

    /// Returns whether higher scores indicate more similarity.
    #[must_use]
    pub const fn higher_is_better(&self) -> bool {
        matches!(self, Self::Cosine | Self::Dot)
    }
}

fn inner(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).fold(0.0, |acc, (x, y)| acc + x * y)
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).fold(0.0, |acc, (x, y)| {
        let d = x - y;
        acc + d * d
    })
}

/// One fused pass accumulating the numerator and both squared norms.
fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let mut num = 0.0f32;
    let mut a_sq = 0.0f32;
    let mut b_sq = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        num += x * y;
        a_sq += x * x;
        b_sq += y * y;
    }

    // A zero vector has no direction; score it as orthogonal to everything.
    if a_sq == 0.0 || b_sq == 0.0 {
        return 0.0;
    }
    num / (a_sq * b_sq).sqrt()
}
