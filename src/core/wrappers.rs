//! Inner-product implementations over `[T]` slices.
//!
//! This module provides the concrete inner products accepted by the orthogonalizers:
//! - The Euclidean dot product `xᴴ y`, implemented on the unit type `()`, with optional Rayon
//!   parallelism for long vectors.
//! - [`FnInnerProduct`], wrapping any closure `Fn(&[T], &[T]) -> T`.
//! - [`DiagonalInnerProduct`], a weighted dot product `Σ w_k conj(x_k) y_k`.
//! - [`OperatorInnerProduct`], the product `xᴴ A y` induced by a Hermitian positive definite
//!   `faer::Mat`.
//!
//! For real scalars the conjugations are no-ops.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-traits crate documentation](https://docs.rs/num-traits)

use crate::core::scalar::Field;
use crate::core::traits::InnerProduct;
use crate::error::OrthoError;
use faer::Mat;
use num_traits::{Float, One, Zero};

/// Vectors shorter than this are reduced serially even with the `rayon` feature.
#[cfg(feature = "rayon")]
const PAR_THRESHOLD: usize = 4096;

/// Euclidean inner product `xᴴ y`.
///
/// If the `rayon` feature is enabled, long vectors are reduced with parallel iterators.
impl<T: Field> InnerProduct<[T]> for () {
    type Scalar = T;
    fn dot(&self, x: &[T], y: &[T]) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        #[cfg(feature = "rayon")]
        {
            if x.len() >= PAR_THRESHOLD {
                use rayon::prelude::*;
                // fixed-size chunks keep the summation order independent of scheduling
                let partials: Vec<T> = x
                    .par_chunks(PAR_THRESHOLD)
                    .zip(y.par_chunks(PAR_THRESHOLD))
                    .map(|(xc, yc)| serial_dot(xc, yc))
                    .collect();
                return partials.into_iter().fold(T::zero(), |acc, v| acc + v);
            }
        }
        serial_dot(x, y)
    }
}

fn serial_dot<T: Field>(x: &[T], y: &[T]) -> T {
    x.iter()
        .zip(y.iter())
        .fold(T::zero(), |acc, (xi, yi)| acc + xi.conj() * *yi)
}

/// Implements `InnerProduct` for `Vec<T>` by delegating to the slice impl.
impl<T: Field> InnerProduct<Vec<T>> for () {
    type Scalar = T;
    fn dot(&self, x: &Vec<T>, y: &Vec<T>) -> T {
        <() as InnerProduct<[T]>>::dot(self, x.as_slice(), y.as_slice())
    }
}

/// Inner product defined by a closure.
///
/// The closure must be bilinear, symmetric and positive definite on the vectors it is
/// applied to; this is not checked.
#[derive(Clone)]
pub struct FnInnerProduct<F> {
    f: F,
    dim: Option<usize>,
}

impl<F> FnInnerProduct<F> {
    pub fn new(f: F) -> Self {
        Self { f, dim: None }
    }

    /// Restrict the product to vectors of length `dim`.
    pub fn with_dim(mut self, dim: usize) -> Self {
        self.dim = Some(dim);
        self
    }
}

impl<T, F> InnerProduct<[T]> for FnInnerProduct<F>
where
    T: Field,
    F: Fn(&[T], &[T]) -> T,
{
    type Scalar = T;
    fn dot(&self, x: &[T], y: &[T]) -> T {
        (self.f)(x, y)
    }
    fn dim(&self) -> Option<usize> {
        self.dim
    }
}

/// Weighted inner product `(x, y) = Σ w_k conj(x_k) y_k` with positive real weights,
/// i.e. `xᴴ D y` for `D = diag(w)`.
///
/// `R` is the real type of the weights; the product applies to any scalar whose
/// [`Field::Real`] is `R`.
#[derive(Clone, Debug)]
pub struct DiagonalInnerProduct<R> {
    weights: Vec<R>,
}

impl<R: Float> DiagonalInnerProduct<R> {
    /// Build from the diagonal of `D`. All weights must be finite and strictly positive.
    pub fn new(weights: Vec<R>) -> Result<Self, OrthoError> {
        if let Some(k) = weights.iter().position(|w| !(w.is_finite() && *w > R::zero())) {
            return Err(OrthoError::InvalidConfiguration(format!(
                "weight {k} of a diagonal inner product must be positive and finite"
            )));
        }
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &[R] {
        &self.weights
    }
}

impl<T: Field> InnerProduct<[T]> for DiagonalInnerProduct<T::Real> {
    type Scalar = T;
    fn dot(&self, x: &[T], y: &[T]) -> T {
        assert_eq!(x.len(), self.weights.len(), "Vector x has incorrect length");
        assert_eq!(y.len(), self.weights.len(), "Vector y has incorrect length");
        self.weights
            .iter()
            .zip(x.iter().zip(y))
            .fold(T::zero(), |acc, (w, (xi, yi))| acc + T::from_real(*w) * xi.conj() * *yi)
    }
    fn dim(&self) -> Option<usize> {
        Some(self.weights.len())
    }
}

/// Inner product `(x, y) = xᴴ A y` induced by a Hermitian positive definite operator.
///
/// Hermitian symmetry is checked on construction; definiteness is the caller's responsibility.
pub struct OperatorInnerProduct<T> {
    op: Mat<T>,
}

impl<T: Field> OperatorInnerProduct<T> {
    pub fn new(op: Mat<T>) -> Result<Self, OrthoError> {
        let n = op.nrows();
        if op.ncols() != n {
            return Err(OrthoError::DimensionMismatch { expected: n, found: op.ncols() });
        }
        let one = T::Real::one();
        let tol = T::Real::epsilon() * num_traits::cast::<usize, T::Real>(n.max(1) * 16).unwrap_or(one);
        for i in 0..n {
            for j in i..n {
                let (aij, aji) = (op[(i, j)], op[(j, i)]);
                let scale = aij.modulus().max(aji.modulus()).max(one);
                if (aij - aji.conj()).modulus() > tol * scale {
                    return Err(OrthoError::InvalidConfiguration(format!(
                        "operator of an inner product must be Hermitian (entry ({i}, {j}))"
                    )));
                }
            }
        }
        Ok(Self { op })
    }

    pub fn operator(&self) -> &Mat<T> {
        &self.op
    }
}

impl<T: Field> InnerProduct<[T]> for OperatorInnerProduct<T> {
    type Scalar = T;
    fn dot(&self, x: &[T], y: &[T]) -> T {
        let n = self.op.nrows();
        assert_eq!(x.len(), n, "Vector x has incorrect length");
        assert_eq!(y.len(), n, "Vector y has incorrect length");
        let mut acc = T::zero();
        for i in 0..n {
            let mut ay = T::zero();
            for j in 0..n {
                ay = ay + self.op[(i, j)] * y[j];
            }
            acc = acc + x[i].conj() * ay;
        }
        acc
    }
    fn dim(&self) -> Option<usize> {
        Some(self.op.nrows())
    }
}
