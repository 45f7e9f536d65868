//! Modified Gram-Schmidt (MGS) with selective re-orthogonalization.
//!
//! Each component `(w, u_j) u_j` is removed from the working vector before the next
//! coefficient is computed, which keeps the loss of orthogonality proportional to the
//! condition number of the input rather than its square. Vectors whose norm collapses during
//! a pass are projected again (at most `max_reiterations` times).

use crate::config::options::GramSchmidtOptions;
use crate::core::scalar::Field;
use crate::core::traits::{InnerProduct, VectorArray};
use crate::error::OrthoError;
use crate::ortho::{Orthogonalizer, axpy_slice, gram_schmidt_with};
use crate::utils::stats::OrthoStats;

/// Modified Gram-Schmidt orthogonalizer.
///
/// # Type Parameters
/// * `T` - Scalar type (e.g., f32, f64)
#[derive(Clone, Debug)]
pub struct ModifiedGramSchmidt<T: Field> {
    pub options: GramSchmidtOptions<T::Real>,
}

impl<T: Field> ModifiedGramSchmidt<T> {
    pub fn new(options: GramSchmidtOptions<T::Real>) -> Self {
        Self { options }
    }
}

impl<T: Field> Default for ModifiedGramSchmidt<T> {
    fn default() -> Self {
        Self::new(GramSchmidtOptions::default())
    }
}

/// One MGS pass: coefficients are computed against the running vector.
pub(crate) fn modified_pass<T, A, P>(
    w: &mut [T],
    a: &A,
    basis: &[usize],
    ip: &P,
    sq_norms: &[T::Real],
    normalized: bool,
    coeffs: &mut Vec<T>,
) where
    T: Field,
    A: VectorArray<T> + ?Sized,
    P: InnerProduct<[T], Scalar = T> + ?Sized,
{
    coeffs.clear();
    for (&j, &sq) in basis.iter().zip(sq_norms) {
        let u = a.vector(j);
        let mut c = ip.dot(u, w);
        if !normalized {
            c = c / T::from_real(sq);
        }
        axpy_slice(w, -c, u);
        coeffs.push(c);
    }
}

impl<T, A, P> Orthogonalizer<A, P> for ModifiedGramSchmidt<T>
where
    T: Field,
    A: VectorArray<T>,
    P: InnerProduct<[T], Scalar = T>,
{
    type Scalar = T;

    fn orthogonalize(&self, a: &mut A, ip: &P) -> Result<OrthoStats<T>, OrthoError> {
        gram_schmidt_with(a, ip, &self.options, modified_pass::<T, A, P>)
    }
}
