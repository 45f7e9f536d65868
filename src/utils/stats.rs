//! Per-call statistics reported by the orthogonalizers.

use faer::Mat;

#[derive(Clone, Debug)]
pub struct OrthoStats<T> {
    /// Number of vectors in the result (numerical rank, including the offset)
    pub rank: usize,
    /// Input positions of the vectors dropped as linearly dependent
    pub removed: Vec<usize>,
    /// Extra projection passes run over all vectors
    pub reiterations: usize,
    /// Coefficients with A = Q R, shape rank × n; only when requested
    pub r: Option<Mat<T>>,
}

impl<T> OrthoStats<T> {
    /// True if no input vector was dropped.
    pub fn full_rank(&self) -> bool {
        self.removed.is_empty()
    }
}
