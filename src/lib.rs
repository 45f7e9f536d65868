//! orthokit: Gram-Schmidt orthogonalization of vector arrays over faer
//!
//! This crate orthonormalizes a sequence of vectors under a configurable inner product using
//! modified (or classical) Gram-Schmidt with selective, bounded re-orthogonalization.
//! Linearly dependent vectors are detected with absolute and relative tolerances and removed,
//! so the result is an orthonormal basis of the span of the input, in input order.
//!
//! Scalars may be `f32`, `f64` or their [`Complex`] counterparts (see [`Field`]); norms and
//! tolerances are always real.
//!
//! Arrays can be owned lists of vectors, dense row-major storage, or borrowed caller buffers;
//! a C ABI is exported for foreign callers (see [`ffi`]).

pub mod parallel;

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod ffi;
pub mod ortho;
pub mod utils;
pub mod vectorarray;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use crate::core::*;
pub use error::*;
pub use ortho::{
    ClassicalGramSchmidt, ModifiedGramSchmidt, Orthogonalizer, gram_schmidt, gram_schmidt_in_place,
};
pub use utils::*;
pub use vectorarray::*;

pub use num_complex::Complex;
