use thiserror::Error;

// Unified error type for orthokit

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrthoError {
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },
    #[error("result not orthogonal (max err={max_err:e})")]
    NotOrthogonal { max_err: f64 },
    #[error("null pointer passed across the foreign boundary")]
    NullPointer,
}

impl OrthoError {
    /// Negative status code reported by the C ABI.
    pub fn code(&self) -> i64 {
        match self {
            OrthoError::NullPointer => -1,
            OrthoError::InvalidConfiguration(_) => -2,
            OrthoError::DimensionMismatch { .. } => -3,
            OrthoError::NotOrthogonal { .. } => -4,
            OrthoError::IndexOutOfRange { .. } => -5,
        }
    }
}
