//! Foreign boundary: orthogonalization of caller-owned contiguous buffers.
//!
//! Every **row** of the `rows x cols` buffer is one vector, whatever the memory layout. On
//! success the accepted vectors occupy the first `rank` rows in input order and the remaining
//! rows are zero-filled. The C entry points return `rank`, or the negative
//! [`OrthoError::code`] of the failure.

use crate::config::options::GramSchmidtOptions;
use crate::core::scalar::Field;
use crate::core::traits::{InnerProduct, VectorArray};
use crate::error::OrthoError;
use crate::ortho::gram_schmidt_in_place;
use crate::vectorarray::{DenseVectorArray, RowMajorViewMut};
use bitflags::bitflags;
use num_traits::Float;

/// Memory layout of a foreign buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub enum Layout {
    /// Element `(i, k)` at `i * cols + k`.
    RowMajor,
    /// Element `(i, k)` at `k * rows + i`.
    ColMajor,
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct GsFlags: u32 {
        const NORMALIZE = 0b0001;
        const REITERATE = 0b0010;
        const CHECK     = 0b0100;
        const DEFAULT   = Self::NORMALIZE.bits() | Self::REITERATE.bits() | Self::CHECK.bits();
    }
}

/// C view of [`GramSchmidtOptions`]. Unknown flag bits are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct GsOptionsC {
    pub atol: f64,
    pub rtol: f64,
    pub reiteration_threshold: f64,
    pub max_reiterations: u32,
    pub check_tol: f64,
    pub flags: u32,
}

impl GsOptionsC {
    /// Defaults of [`GramSchmidtOptions<R>`], so tolerances match the precision of `R`.
    pub fn for_scalar<R: Float>() -> Self {
        let o = GramSchmidtOptions::<R>::default();
        let f = |x: R| x.to_f64().unwrap_or(f64::NAN);
        Self {
            atol: f(o.atol),
            rtol: f(o.rtol),
            reiteration_threshold: f(o.reiteration_threshold),
            max_reiterations: o.max_reiterations as u32,
            check_tol: f(o.check_tol),
            flags: GsFlags::DEFAULT.bits(),
        }
    }
}

impl Default for GsOptionsC {
    fn default() -> Self {
        Self::for_scalar::<f64>()
    }
}

impl<T: Float> TryFrom<&GsOptionsC> for GramSchmidtOptions<T> {
    type Error = OrthoError;

    fn try_from(c: &GsOptionsC) -> Result<Self, Self::Error> {
        let flags = GsFlags::from_bits(c.flags).ok_or_else(|| {
            OrthoError::InvalidConfiguration(format!("unknown flag bits {:#x}", c.flags))
        })?;
        let cast = |name: &str, x: f64| {
            T::from(x).ok_or_else(|| {
                OrthoError::InvalidConfiguration(format!("{name}={x} not representable"))
            })
        };
        let opts = GramSchmidtOptions::default()
            .with_atol(cast("atol", c.atol)?)
            .with_rtol(cast("rtol", c.rtol)?)
            .with_reiterate(flags.contains(GsFlags::REITERATE))
            .with_reiteration_threshold(cast("reiteration_threshold", c.reiteration_threshold)?)
            .with_max_reiterations(c.max_reiterations as usize)
            .with_normalize(flags.contains(GsFlags::NORMALIZE))
            .with_check(flags.contains(GsFlags::CHECK), cast("check_tol", c.check_tol)?)
            .with_copy(false);
        opts.validate()?;
        Ok(opts)
    }
}

/// Orthogonalize the rows of `buf` in place under `ip`; returns the rank.
///
/// Validation failures leave `buf` untouched. When the accuracy check fails the buffer
/// already holds the compacted result that was checked.
pub fn orthogonalize_buffer_with<T, P>(
    buf: &mut [T],
    rows: usize,
    cols: usize,
    layout: Layout,
    ip: &P,
    options: &GramSchmidtOptions<T::Real>,
) -> Result<usize, OrthoError>
where
    T: Field,
    P: InnerProduct<[T], Scalar = T> + ?Sized,
{
    match layout {
        Layout::RowMajor => {
            let mut view = RowMajorViewMut::new(buf, rows, cols)?;
            gram_schmidt_in_place(&mut view, ip, options)?;
            Ok(view.len())
        }
        Layout::ColMajor => {
            let expected = rows.checked_mul(cols).ok_or_else(|| {
                OrthoError::InvalidConfiguration(format!("buffer shape {rows}x{cols} overflows usize"))
            })?;
            if buf.len() != expected {
                return Err(OrthoError::DimensionMismatch { expected, found: buf.len() });
            }
            let mut a = DenseVectorArray::zeros(rows, cols)?;
            for i in 0..rows {
                for (k, x) in a.vector_mut(i).iter_mut().enumerate() {
                    *x = buf[k * rows + i];
                }
            }
            let result = gram_schmidt_in_place(&mut a, ip, options);
            if let Err(e) = &result {
                if !matches!(e, OrthoError::NotOrthogonal { .. }) {
                    return Err(e.clone());
                }
            }
            buf.fill(T::zero());
            for i in 0..a.len() {
                for (k, &x) in a.vector(i).iter().enumerate() {
                    buf[k * rows + i] = x;
                }
            }
            result.map(|_| a.len())
        }
    }
}

/// Euclidean [`orthogonalize_buffer_with`].
pub fn orthogonalize_buffer<T>(
    buf: &mut [T],
    rows: usize,
    cols: usize,
    layout: Layout,
    options: &GramSchmidtOptions<T::Real>,
) -> Result<usize, OrthoError>
where
    T: Field,
{
    orthogonalize_buffer_with(buf, rows, cols, layout, &(), options)
}

/// # Safety
/// `data` must be null or valid for reads and writes of `nrows * ncols` elements;
/// `opts` must be null or point to a valid `GsOptionsC`.
unsafe fn gram_schmidt_raw<T: Field>(
    data: *mut T,
    nrows: usize,
    ncols: usize,
    opts: *const GsOptionsC,
) -> i64 {
    if data.is_null() {
        return OrthoError::NullPointer.code();
    }
    let copts = if opts.is_null() {
        GsOptionsC::for_scalar::<T::Real>()
    } else {
        unsafe { *opts }
    };
    let options = match GramSchmidtOptions::<T::Real>::try_from(&copts) {
        Ok(o) => o,
        Err(e) => return e.code(),
    };
    let Some(len) = nrows.checked_mul(ncols) else {
        return OrthoError::InvalidConfiguration("buffer shape overflows usize".into()).code();
    };
    let buf = unsafe { std::slice::from_raw_parts_mut(data, len) };
    match orthogonalize_buffer(buf, nrows, ncols, Layout::RowMajor, &options) {
        Ok(rank) => rank as i64,
        Err(e) => e.code(),
    }
}

/// Default options for [`orthokit_gram_schmidt_f64`].
#[unsafe(no_mangle)]
pub extern "C" fn orthokit_default_options() -> GsOptionsC {
    GsOptionsC::default()
}

/// Default options for [`orthokit_gram_schmidt_f32`]; tolerances are scaled to single precision.
#[unsafe(no_mangle)]
pub extern "C" fn orthokit_default_options_f32() -> GsOptionsC {
    GsOptionsC::for_scalar::<f32>()
}

/// Orthogonalize the rows of a row-major `nrows x ncols` `f64` buffer in place.
///
/// Returns the rank, or a negative error code. A null `opts` selects
/// [`orthokit_default_options`].
///
/// # Safety
/// `data` must be valid for reads and writes of `nrows * ncols` doubles and `opts` must be
/// null or point to a valid `GsOptionsC`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn orthokit_gram_schmidt_f64(
    data: *mut f64,
    nrows: usize,
    ncols: usize,
    opts: *const GsOptionsC,
) -> i64 {
    unsafe { gram_schmidt_raw(data, nrows, ncols, opts) }
}

/// `f32` variant of [`orthokit_gram_schmidt_f64`]. A null `opts` selects
/// [`orthokit_default_options_f32`].
///
/// # Safety
/// Same requirements as [`orthokit_gram_schmidt_f64`] for `f32` data.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn orthokit_gram_schmidt_f32(
    data: *mut f32,
    nrows: usize,
    ncols: usize,
    opts: *const GsOptionsC,
) -> i64 {
    unsafe { gram_schmidt_raw(data, nrows, ncols, opts) }
}
