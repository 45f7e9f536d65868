//! Vector array containers and index selections.

pub mod dense;
pub mod indices;
pub mod list;

pub use dense::{DenseVectorArray, RowMajorViewMut};
pub use indices::Indices;
pub use list::ListVectorArray;
