//! Core linear-algebra traits for orthokit.

use crate::core::scalar::Field;
use crate::error::OrthoError;
use crate::vectorarray::indices::Indices;
use num_traits::{Float, Zero};

/// Inner products & norms.
///
/// `dot` is linear in `y` and conjugate-linear in `x`, so `(x, y) = conj((y, x))`; for real
/// scalars this is an ordinary symmetric bilinear form.
pub trait InnerProduct<V: ?Sized> {
    /// Associated scalar type.
    type Scalar: Field;
    /// Compute (x, y).
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute the induced norm sqrt((x, x)).
    fn norm(&self, x: &V) -> <Self::Scalar as Field>::Real {
        // round-off can push (x, x) slightly below zero for x ≈ 0
        let sq = self.dot(x, x).re();
        sq.max(<Self::Scalar as Field>::Real::zero()).sqrt()
    }
    /// Dimension this inner product is defined on, if it is restricted to one.
    fn dim(&self) -> Option<usize> {
        None
    }
}

/// An ordered, mutable sequence of equally sized vectors.
///
/// Implementors only need to hand out row slices and support deletion; scaling and
/// `axpy` are provided on top of `vector_mut`.
pub trait VectorArray<T: Field> {
    /// Number of vectors in the array.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Common length of the vectors.
    fn dim(&self) -> usize;

    /// Borrow vector `i`.
    fn vector(&self, i: usize) -> &[T];

    /// Mutably borrow vector `i`.
    fn vector_mut(&mut self, i: usize) -> &mut [T];

    /// Delete the selected vectors, preserving the order of the rest.
    fn delete_vectors(&mut self, indices: &Indices) -> Result<(), OrthoError>;

    /// v_i ← alpha · v_i
    fn scal(&mut self, i: usize, alpha: T) {
        for vk in self.vector_mut(i) {
            *vk = *vk * alpha;
        }
    }

    /// v_i ← v_i + alpha · x
    fn axpy(&mut self, i: usize, alpha: T, x: &[T]) -> Result<(), OrthoError> {
        let vi = self.vector_mut(i);
        if vi.len() != x.len() {
            return Err(OrthoError::DimensionMismatch { expected: vi.len(), found: x.len() });
        }
        for (vk, xk) in vi.iter_mut().zip(x) {
            *vk = *vk + alpha * *xk;
        }
        Ok(())
    }

    /// Check that every vector has length `dim()`.
    fn check_dims(&self) -> Result<(), OrthoError> {
        let dim = self.dim();
        for i in 0..self.len() {
            let found = self.vector(i).len();
            if found != dim {
                return Err(OrthoError::DimensionMismatch { expected: dim, found });
            }
        }
        Ok(())
    }

    /// Copy all vectors out as owned rows.
    fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.len()).map(|i| self.vector(i).to_vec()).collect()
    }
}
