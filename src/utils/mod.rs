//! Statistics and accuracy checks shared by the orthogonalizers.

pub mod check;
pub mod stats;

pub use check::{gram_matrix, orthogonality_error};
pub use stats::OrthoStats;
