//! Core traits and their implementations for slices and faer matrices.

pub mod scalar;
pub mod traits;
pub mod wrappers;

pub use scalar::Field;
pub use traits::{InnerProduct, VectorArray};
pub use wrappers::{DiagonalInnerProduct, FnInnerProduct, OperatorInnerProduct};
