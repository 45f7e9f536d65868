//! Shared-memory parallelism over independent orthogonalization problems.
//!
//! A single Gram-Schmidt run is inherently sequential; concurrency comes from processing
//! several arrays at once. The Euclidean inner product additionally reduces long vectors in
//! parallel (see [`crate::core::wrappers`]).

pub mod batch;

pub use batch::{init_global_pool, orthogonalize_batch};
