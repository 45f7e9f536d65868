//! Gram-Schmidt orthogonalizers.
//!
//! Both variants share one driver: each vector is projected against the vectors accepted so
//! far, re-projected while its norm keeps collapsing (bounded by `max_reiterations`), and then
//! either accepted (optionally normalized) or dropped as linearly dependent. Dropped vectors
//! are deleted from the array once all vectors have been processed, so the result keeps the
//! input order.
//!
//! The variants differ only in how one projection pass is formed:
//! - [`ModifiedGramSchmidt`] subtracts each component as soon as it is computed;
//! - [`ClassicalGramSchmidt`] computes all components from the vector at the start of the
//!   pass and subtracts them together.
//!
//! # References
//! - Björck, Å. (1994). Numerics of Gram-Schmidt orthogonalization. Linear Algebra Appl. 197.
//! - Giraud, L. et al. (2005). Rounding error analysis of the classical Gram-Schmidt
//!   orthogonalization process. Numer. Math. 101.

use crate::config::options::GramSchmidtOptions;
use crate::core::scalar::Field;
use crate::core::traits::{InnerProduct, VectorArray};
use crate::error::OrthoError;
use crate::utils::check::orthogonality_error;
use crate::utils::stats::OrthoStats;
use crate::vectorarray::indices::Indices;
use faer::Mat;
use num_traits::{Float, One};
use tracing::{debug, trace, warn};

pub mod cgs;
pub mod mgs;

pub use cgs::ClassicalGramSchmidt;
pub use mgs::ModifiedGramSchmidt;

/// Common interface of the orthogonalization variants.
pub trait Orthogonalizer<A, P> {
    type Scalar;
    /// Orthogonalize `a` in place under `ip`.
    ///
    /// Dependent vectors are removed from `a`. The `copy` option is not consulted here;
    /// use [`crate::gram_schmidt`] or [`crate::context::OrthoContext`] for non-destructive runs.
    fn orthogonalize(&self, a: &mut A, ip: &P) -> Result<OrthoStats<Self::Scalar>, OrthoError>;
}

/// w ← w + alpha · x
pub(crate) fn axpy_slice<T: Field>(w: &mut [T], alpha: T, x: &[T]) {
    for (wk, xk) in w.iter_mut().zip(x) {
        *wk = *wk + alpha * *xk;
    }
}

fn as_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

/// Gram-Schmidt driver shared by all variants.
///
/// `pass` runs one projection of `w` against the accepted vectors `basis`; on return
/// `coeffs[k] = (u_k, w) / (u_k, u_k)` holds the coefficient subtracted along `basis[k]`.
pub(crate) fn gram_schmidt_with<T, A, P>(
    a: &mut A,
    ip: &P,
    opts: &GramSchmidtOptions<T::Real>,
    pass: fn(&mut [T], &A, &[usize], &P, &[T::Real], bool, &mut Vec<T>),
) -> Result<OrthoStats<T>, OrthoError>
where
    T: Field,
    A: VectorArray<T> + ?Sized,
    P: InnerProduct<[T], Scalar = T> + ?Sized,
{
    let n = a.len();
    let dim = a.dim();
    opts.validate_for(n)?;
    a.check_dims()?;
    if let Some(expected) = ip.dim() {
        if n > 0 && expected != dim {
            return Err(OrthoError::DimensionMismatch { expected, found: dim });
        }
    }

    let mut r = opts
        .return_r
        .then(|| Mat::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() }));
    let mut basis: Vec<usize> = (0..opts.offset).collect();
    let mut sq_norms: Vec<T::Real> =
        basis.iter().map(|&j| ip.dot(a.vector(j), a.vector(j)).re()).collect();
    let mut removed = Vec::new();
    let mut reiterations = 0;
    let mut w = vec![T::zero(); dim];
    let mut coeffs = Vec::with_capacity(n);

    for i in opts.offset..n {
        w.copy_from_slice(a.vector(i));
        let initial_norm = ip.norm(&w);
        if initial_norm <= opts.atol {
            debug!(index = i, norm = as_f64(initial_norm), "dropping numerically zero vector");
            removed.push(i);
            continue;
        }

        let mut norm = initial_norm;
        let mut passes = 0;
        let accepted = loop {
            pass(&mut w, a, &basis, ip, &sq_norms, opts.normalize, &mut coeffs);
            if let Some(r) = r.as_mut() {
                for (&j, &c) in basis.iter().zip(&coeffs) {
                    r[(j, i)] = r[(j, i)] + c;
                }
            }
            let old_norm = norm;
            norm = ip.norm(&w);
            if norm <= opts.atol || norm <= opts.rtol * initial_norm {
                debug!(
                    index = i,
                    initial_norm = as_f64(initial_norm),
                    norm = as_f64(norm),
                    "dropping linearly dependent vector"
                );
                break false;
            }
            if opts.reiterate
                && passes < opts.max_reiterations
                && norm < opts.reiteration_threshold * old_norm
            {
                passes += 1;
                reiterations += 1;
                debug!(index = i, pass = passes, "orthogonalizing vector again");
                continue;
            }
            break true;
        };

        if !accepted {
            removed.push(i);
            continue;
        }
        if opts.normalize {
            let inv = T::from_real(norm.recip());
            for wk in w.iter_mut() {
                *wk = *wk * inv;
            }
            if let Some(r) = r.as_mut() {
                r[(i, i)] = T::from_real(norm);
            }
            sq_norms.push(T::Real::one());
        } else {
            sq_norms.push(norm * norm);
        }
        a.vector_mut(i).copy_from_slice(&w);
        basis.push(i);
    }

    if !removed.is_empty() {
        a.delete_vectors(&Indices::from(removed.as_slice()))?;
    }
    let r = r.map(|r| Mat::from_fn(basis.len(), n, |k, j| r[(basis[k], j)]));

    if opts.check {
        let err = orthogonality_error(a, ip, opts.offset, opts.normalize);
        if err.is_nan() || err >= opts.check_tol {
            warn!(max_err = as_f64(err), "Gram-Schmidt result is not orthogonal");
            return Err(OrthoError::NotOrthogonal { max_err: as_f64(err) });
        }
    }

    trace!(
        vectors = n,
        rank = basis.len(),
        removed = removed.len(),
        reiterations,
        "Gram-Schmidt finished"
    );
    Ok(OrthoStats { rank: basis.len(), removed, reiterations, r })
}

/// Orthogonalize a copy of `a` with modified Gram-Schmidt, leaving `a` untouched.
///
/// # Example
/// ```
/// use orthokit::{gram_schmidt, GramSchmidtOptions, ListVectorArray, VectorArray};
///
/// let a = ListVectorArray::from_rows(vec![
///     vec![1.0, 2.0, 3.0],
///     vec![4.0, 5.0, 6.0],
///     vec![7.0, 8.0, 9.0],
/// ])
/// .unwrap();
/// let (q, stats) = gram_schmidt(&a, &(), &GramSchmidtOptions::default()).unwrap();
/// assert_eq!(q.len(), 2);
/// assert_eq!(stats.removed, vec![2]);
/// ```
pub fn gram_schmidt<T, A, P>(
    a: &A,
    ip: &P,
    options: &GramSchmidtOptions<T::Real>,
) -> Result<(A, OrthoStats<T>), OrthoError>
where
    T: Field,
    A: VectorArray<T> + Clone,
    P: InnerProduct<[T], Scalar = T> + ?Sized,
{
    let mut q = a.clone();
    let stats = gram_schmidt_in_place(&mut q, ip, options)?;
    Ok((q, stats))
}

/// Orthogonalize `a` in place with modified Gram-Schmidt.
pub fn gram_schmidt_in_place<T, A, P>(
    a: &mut A,
    ip: &P,
    options: &GramSchmidtOptions<T::Real>,
) -> Result<OrthoStats<T>, OrthoError>
where
    T: Field,
    A: VectorArray<T> + ?Sized,
    P: InnerProduct<[T], Scalar = T> + ?Sized,
{
    gram_schmidt_with(a, ip, options, mgs::modified_pass::<T, A, P>)
}
