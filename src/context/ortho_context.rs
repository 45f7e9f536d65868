//! Factory for Gram-Schmidt orthogonalizers.
//!
//! `OrthoContext` selects a variant and holds its options, so callers can configure one
//! object and apply it to many arrays.

use crate::config::options::GramSchmidtOptions;
use crate::core::scalar::Field;
use crate::core::traits::{InnerProduct, VectorArray};
use crate::error::OrthoError;
use crate::ortho::{ClassicalGramSchmidt, ModifiedGramSchmidt, Orthogonalizer};
use crate::utils::stats::OrthoStats;

/// Available orthogonalization variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrthoKind {
    /// Modified Gram-Schmidt
    #[default]
    Modified,
    /// Classical Gram-Schmidt
    Classical,
}

/// Result of [`OrthoContext::apply`].
#[derive(Clone, Debug)]
pub struct OrthoOutcome<A, T> {
    /// The orthogonalized copy when `options.copy` is set, `None` for in-place runs.
    pub array: Option<A>,
    pub stats: OrthoStats<T>,
}

/// Variant selection plus options for arrays of scalar `T`.
#[derive(Clone, Debug)]
pub struct OrthoContext<T: Field> {
    pub kind: OrthoKind,
    pub options: GramSchmidtOptions<T::Real>,
}

impl<T: Field> Default for OrthoContext<T> {
    fn default() -> Self {
        Self::new(OrthoKind::default(), GramSchmidtOptions::default())
    }
}

impl<T: Field> OrthoContext<T> {
    pub fn new(kind: OrthoKind, options: GramSchmidtOptions<T::Real>) -> Self {
        Self { kind, options }
    }

    pub fn with_kind(mut self, kind: OrthoKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_options(mut self, options: GramSchmidtOptions<T::Real>) -> Self {
        self.options = options;
        self
    }

    /// Orthogonalize `a` in place with the configured variant, ignoring `options.copy`.
    pub fn orthogonalize<A, P>(&self, a: &mut A, ip: &P) -> Result<OrthoStats<T>, OrthoError>
    where
        A: VectorArray<T>,
        P: InnerProduct<[T], Scalar = T>,
    {
        match self.kind {
            OrthoKind::Modified => ModifiedGramSchmidt::<T>::new(self.options).orthogonalize(a, ip),
            OrthoKind::Classical => {
                ClassicalGramSchmidt::<T>::new(self.options).orthogonalize(a, ip)
            }
        }
    }

    /// Orthogonalize `a`, honouring `options.copy`.
    ///
    /// With `copy`, the result is returned in [`OrthoOutcome::array`] and `a` is left
    /// unchanged. Otherwise `a` is mutated and `array` is `None`.
    pub fn apply<A, P>(&self, a: &mut A, ip: &P) -> Result<OrthoOutcome<A, T>, OrthoError>
    where
        A: VectorArray<T> + Clone,
        P: InnerProduct<[T], Scalar = T>,
    {
        if self.options.copy {
            let mut q = a.clone();
            let stats = self.orthogonalize(&mut q, ip)?;
            Ok(OrthoOutcome { array: Some(q), stats })
        } else {
            let stats = self.orthogonalize(a, ip)?;
            Ok(OrthoOutcome { array: None, stats })
        }
    }
}
