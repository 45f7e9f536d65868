//! Context types for configuring orthogonalization runs.
//!
//! A context bundles the choice of Gram-Schmidt variant with its options and takes care of
//! the copy/in-place decision.
//!
//! # Example
//! ```rust
//! use orthokit::context::{OrthoContext, OrthoKind};
//! use orthokit::{GramSchmidtOptions, ListVectorArray, VectorArray};
//!
//! let ctx = OrthoContext::<f64>::new(OrthoKind::Classical, GramSchmidtOptions::default());
//! let mut a = ListVectorArray::from_rows(vec![vec![1.0, 1.0], vec![1.0, -1.0]]).unwrap();
//! let out = ctx.apply(&mut a, &()).unwrap();
//! assert_eq!(out.array.unwrap().len(), 2);
//! ```

pub mod ortho_context;
pub use ortho_context::{OrthoContext, OrthoKind, OrthoOutcome};
