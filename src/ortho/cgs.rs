//! Classical Gram-Schmidt (CGS) with re-orthogonalization.
//!
//! All coefficients of a pass are computed from the vector as it was at the start of the
//! pass, then subtracted together. A single CGS pass loses orthogonality quickly on
//! ill-conditioned input; with re-orthogonalization enabled (the default) it behaves like
//! "twice is enough" CGS2 and matches modified Gram-Schmidt to working precision.

use crate::config::options::GramSchmidtOptions;
use crate::core::scalar::Field;
use crate::core::traits::{InnerProduct, VectorArray};
use crate::error::OrthoError;
use crate::ortho::{Orthogonalizer, axpy_slice, gram_schmidt_with};
use crate::utils::stats::OrthoStats;

/// Classical Gram-Schmidt orthogonalizer.
#[derive(Clone, Debug)]
pub struct ClassicalGramSchmidt<T: Field> {
    pub options: GramSchmidtOptions<T::Real>,
}

impl<T: Field> ClassicalGramSchmidt<T> {
    pub fn new(options: GramSchmidtOptions<T::Real>) -> Self {
        Self { options }
    }
}

impl<T: Field> Default for ClassicalGramSchmidt<T> {
    fn default() -> Self {
        Self::new(GramSchmidtOptions::default())
    }
}

/// One CGS pass: every coefficient uses the vector from the start of the pass.
pub(crate) fn classical_pass<T, A, P>(
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
        let c = ip.dot(a.vector(j), w);
        coeffs.push(if normalized { c } else { c / T::from_real(sq) });
    }
    for (&j, &c) in basis.iter().zip(coeffs.iter()) {
        axpy_slice(w, -c, a.vector(j));
    }
}

impl<T, A, P> Orthogonalizer<A, P> for ClassicalGramSchmidt<T>
where
    T: Field,
    A: VectorArray<T>,
    P: InnerProduct<[T], Scalar = T>,
{
    type Scalar = T;

    fn orthogonalize(&self, a: &mut A, ip: &P) -> Result<OrthoStats<T>, OrthoError> {
        gram_schmidt_with(a, ip, &self.options, classical_pass::<T, A, P>)
    }
}
