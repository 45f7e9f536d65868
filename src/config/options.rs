//! Options for Gram-Schmidt orthogonalization.
//!
//! This module provides the `GramSchmidtOptions` struct, which collects every knob of the
//! orthogonalizers: dependency tolerances, the re-orthogonalization policy, normalization,
//! copy-vs-in-place operation, and the optional accuracy check. Options are built with
//! chained `with_*` calls and validated before any computation starts.

use crate::error::OrthoError;
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gram-Schmidt parameters.
///
/// `T` is the real type of norms and tolerances: `f64` for both `f64` and `Complex<f64>`
/// vectors. Default dependency tolerances are 1e-13, raised to `100 * T::epsilon()` for
/// single precision.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, bound(deserialize = "T: Deserialize<'de> + Float"))
)]
pub struct GramSchmidtOptions<T> {
    /// Vectors whose norm falls to `atol` or below are dropped
    pub atol: T,

    /// Vectors whose norm falls to `rtol` times their initial norm or below are dropped
    pub rtol: T,

    /// Re-run the projection when the norm drops strongly during one pass
    pub reiterate: bool,

    /// Reiterate when norm_after / norm_before < threshold; must lie in (0, 1]
    pub reiteration_threshold: T,

    /// Upper bound on extra projection passes per vector
    pub max_reiterations: usize,

    /// Scale accepted vectors to unit norm
    pub normalize: bool,

    /// Work on a copy and leave the input untouched
    pub copy: bool,

    /// Leading vectors already orthonormal; they are neither modified nor re-checked
    pub offset: usize,

    /// Verify orthogonality of the result
    pub check: bool,

    /// Largest accepted deviation from orthogonality when `check` is set
    pub check_tol: T,

    /// Also compute the coefficient matrix R with A = Q R
    pub return_r: bool,
}

impl<T: Float> Default for GramSchmidtOptions<T> {
    fn default() -> Self {
        Self {
            atol: default_tol(),
            rtol: default_tol(),
            reiterate: true,
            reiteration_threshold: cast(0.9),
            max_reiterations: 3,
            normalize: true,
            copy: true,
            offset: 0,
            check: true,
            check_tol: cast(1e-3),
            return_r: false,
        }
    }
}

/// 1e-13, or 100 ulps when the scalar type cannot resolve 1e-13.
fn default_tol<T: Float>() -> T {
    cast::<T>(1e-13).max(T::epsilon() * cast(100.0))
}

fn cast<T: Float>(x: f64) -> T {
    // every Float can represent these constants (possibly rounded)
    T::from(x).unwrap_or_else(T::epsilon)
}

impl<T: Float> GramSchmidtOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_atol(mut self, atol: T) -> Self {
        self.atol = atol;
        self
    }

    pub fn with_rtol(mut self, rtol: T) -> Self {
        self.rtol = rtol;
        self
    }

    /// Enable or disable re-orthogonalization.
    pub fn with_reiterate(mut self, reiterate: bool) -> Self {
        self.reiterate = reiterate;
        self
    }

    pub fn with_reiteration_threshold(mut self, threshold: T) -> Self {
        self.reiteration_threshold = threshold;
        self
    }

    pub fn with_max_reiterations(mut self, max: usize) -> Self {
        self.max_reiterations = max;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_copy(mut self, copy: bool) -> Self {
        self.copy = copy;
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Enable the accuracy check with tolerance `check_tol`.
    pub fn with_check(mut self, check: bool, check_tol: T) -> Self {
        self.check = check;
        self.check_tol = check_tol;
        self
    }

    pub fn with_return_r(mut self, return_r: bool) -> Self {
        self.return_r = return_r;
        self
    }

    /// Reject malformed options.
    ///
    /// # Errors
    /// `InvalidConfiguration` if a tolerance is negative or not finite, the reiteration
    /// threshold lies outside (0, 1], or the check tolerance is not positive.
    pub fn validate(&self) -> Result<(), OrthoError> {
        let bad = |msg: &str| Err(OrthoError::InvalidConfiguration(msg.to_string()));
        if !(self.atol.is_finite() && self.atol >= T::zero()) {
            return bad("atol must be finite and non-negative");
        }
        if !(self.rtol.is_finite() && self.rtol >= T::zero()) {
            return bad("rtol must be finite and non-negative");
        }
        if !(self.reiteration_threshold > T::zero() && self.reiteration_threshold <= T::one()) {
            return bad("reiteration_threshold must lie in (0, 1]");
        }
        if self.check && !(self.check_tol.is_finite() && self.check_tol > T::zero()) {
            return bad("check_tol must be finite and positive");
        }
        Ok(())
    }

    /// Validate against an array of `len` vectors.
    pub fn validate_for(&self, len: usize) -> Result<(), OrthoError> {
        self.validate()?;
        if self.offset > len {
            return Err(OrthoError::InvalidConfiguration(format!(
                "offset {} exceeds the number of vectors {len}",
                self.offset
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let opts = GramSchmidtOptions::<f64>::default();
        assert!(opts.validate().is_ok());
        assert_eq!(opts.atol, 1e-13);
        assert_eq!(opts.reiteration_threshold, 0.9);
        assert!(opts.reiterate && opts.normalize && opts.copy && opts.check);
        assert!(GramSchmidtOptions::<f32>::default().validate().is_ok());
    }

    #[test]
    fn default_tolerances_follow_precision() {
        let single = GramSchmidtOptions::<f32>::default();
        assert_eq!(single.atol, f32::EPSILON * 100.0);
        assert_eq!(single.rtol, f32::EPSILON * 100.0);
        assert_eq!(GramSchmidtOptions::<f64>::default().rtol, 1e-13);
    }

    #[test]
    fn negative_or_nan_tolerances_are_rejected() {
        let opts = GramSchmidtOptions::<f64>::new();
        assert!(opts.with_atol(-1e-12).validate().is_err());
        assert!(opts.with_rtol(f64::NAN).validate().is_err());
        assert!(opts.with_atol(0.0).with_rtol(0.0).validate().is_ok());
    }

    #[test]
    fn threshold_must_lie_in_unit_interval() {
        let opts = GramSchmidtOptions::<f64>::new();
        assert!(opts.with_reiteration_threshold(0.0).validate().is_err());
        assert!(opts.with_reiteration_threshold(1.5).validate().is_err());
        assert!(opts.with_reiteration_threshold(1.0).validate().is_ok());
    }

    #[test]
    fn check_tol_only_matters_when_checking() {
        let opts = GramSchmidtOptions::<f64>::new();
        assert!(opts.with_check(true, 0.0).validate().is_err());
        assert!(opts.with_check(false, 0.0).validate().is_ok());
    }

    #[test]
    fn offset_is_bounded_by_length() {
        let opts = GramSchmidtOptions::<f64>::new().with_offset(3);
        assert!(opts.validate_for(3).is_ok());
        assert!(matches!(opts.validate_for(2), Err(OrthoError::InvalidConfiguration(_))));
    }
}
