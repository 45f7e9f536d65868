//! Gram matrices and orthogonality measures.

use crate::core::scalar::Field;
use crate::core::traits::{InnerProduct, VectorArray};
use faer::Mat;
use num_traits::{Float, Zero};

/// Gram matrix `G[i, j] = (a_i, a_j)` of all vectors in `a`; Hermitian for complex scalars.
pub fn gram_matrix<T, A, P>(a: &A, ip: &P) -> Mat<T>
where
    T: Field,
    A: VectorArray<T> + ?Sized,
    P: InnerProduct<[T], Scalar = T> + ?Sized,
{
    let n = a.len();
    let mut g = Mat::from_fn(n, n, |_, _| T::zero());
    for i in 0..n {
        for j in i..n {
            let gij = ip.dot(a.vector(i), a.vector(j));
            g[(i, j)] = gij;
            g[(j, i)] = gij.conj();
        }
    }
    g
}

/// Largest deviation from orthogonality of rows `offset..` against all rows.
///
/// With `normalized`, this is `max |(a_i, a_j) − δ_ij|`. Otherwise only directions are
/// compared: `max |(a_i, a_j)| / (‖a_i‖ ‖a_j‖)` over `i ≠ j`.
pub fn orthogonality_error<T, A, P>(
    a: &A,
    ip: &P,
    offset: usize,
    normalized: bool,
) -> T::Real
where
    T: Field,
    A: VectorArray<T> + ?Sized,
    P: InnerProduct<[T], Scalar = T> + ?Sized,
{
    let n = a.len();
    let norms: Vec<T::Real> = if normalized {
        Vec::new()
    } else {
        (0..n).map(|i| ip.norm(a.vector(i))).collect()
    };
    let mut err = T::Real::zero();
    for i in offset..n {
        for j in 0..n {
            let gij = ip.dot(a.vector(i), a.vector(j));
            let e = if normalized {
                if i == j { (gij - T::one()).modulus() } else { gij.modulus() }
            } else if i == j {
                T::Real::zero()
            } else {
                gij.modulus() / (norms[i] * norms[j])
            };
            // NaN must surface as an error, so never let it be swallowed by max
            if e.is_nan() {
                return e;
            }
            err = err.max(e);
        }
    }
    err
}
