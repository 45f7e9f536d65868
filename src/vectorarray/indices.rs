//! Selections of vectors inside a vector array.
//!
//! An [`Indices`] value is resolved against the length of the array it is applied to, so the
//! same selection can describe "the last vector" or "every second vector" regardless of size.
//! Semantics follow the usual sequence-indexing conventions:
//!
//! - negative list entries count from the end (`-1` is the last vector);
//! - slices are half-open, strided ranges whose bounds are clamped to the sequence, and a
//!   negative step walks backwards.

use crate::error::OrthoError;
use std::collections::BTreeSet;
use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Indices {
    /// Every vector of the array.
    All,
    /// Explicit positions; may contain negative entries and duplicates.
    List(Vec<isize>),
    /// Strided range `start..stop` by `step`.
    Slice {
        start: Option<isize>,
        stop: Option<isize>,
        step: isize,
    },
}

impl Indices {
    pub fn single(index: isize) -> Self {
        Indices::List(vec![index])
    }

    pub fn slice(start: Option<isize>, stop: Option<isize>, step: isize) -> Self {
        Indices::Slice { start, stop, step }
    }

    /// Resolve to positions `0 <= i < len`, in selection order.
    pub fn resolve(&self, len: usize) -> Result<Vec<usize>, OrthoError> {
        match self {
            Indices::All => Ok((0..len).collect()),
            Indices::List(list) => list.iter().map(|&i| positive_index(i, len)).collect(),
            Indices::Slice { start, stop, step } => slice_indices(*start, *stop, *step, len),
        }
    }

    /// Number of selected positions for a sequence of length `len`.
    pub fn count(&self, len: usize) -> Result<usize, OrthoError> {
        Ok(self.resolve(len)?.len())
    }

    /// Selected positions, sorted and deduplicated.
    pub fn unique(&self, len: usize) -> Result<BTreeSet<usize>, OrthoError> {
        Ok(self.resolve(len)?.into_iter().collect())
    }

    /// Positions *not* selected, in ascending order.
    pub fn complement(&self, len: usize) -> Result<Vec<usize>, OrthoError> {
        let removed = self.unique(len)?;
        Ok((0..len).filter(|i| !removed.contains(i)).collect())
    }
}

impl From<usize> for Indices {
    fn from(index: usize) -> Self {
        Indices::List(vec![index as isize])
    }
}

impl From<Vec<usize>> for Indices {
    fn from(indices: Vec<usize>) -> Self {
        Indices::List(indices.into_iter().map(|i| i as isize).collect())
    }
}

impl From<&[usize]> for Indices {
    fn from(indices: &[usize]) -> Self {
        Indices::List(indices.iter().map(|&i| i as isize).collect())
    }
}

impl From<Range<usize>> for Indices {
    fn from(range: Range<usize>) -> Self {
        Indices::Slice { start: Some(range.start as isize), stop: Some(range.end as isize), step: 1 }
    }
}

// a valid index i for a sequence of length n fulfills -n <= i <= n - 1
fn positive_index(index: isize, len: usize) -> Result<usize, OrthoError> {
    let n = len as isize;
    let i = if index < 0 { index + n } else { index };
    if i < 0 || i >= n {
        return Err(OrthoError::IndexOutOfRange { index, len });
    }
    Ok(i as usize)
}

fn slice_indices(
    start: Option<isize>,
    stop: Option<isize>,
    step: isize,
    len: usize,
) -> Result<Vec<usize>, OrthoError> {
    if step == 0 {
        return Err(OrthoError::InvalidConfiguration("slice step cannot be zero".into()));
    }
    let n = len as isize;
    let adjust = |v: isize, lo: isize, hi: isize| (if v < 0 { v + n } else { v }).clamp(lo, hi);
    let (start, stop) = if step > 0 {
        (start.map_or(0, |s| adjust(s, 0, n)), stop.map_or(n, |s| adjust(s, 0, n)))
    } else {
        // -1 marks "before the first element" when walking backwards
        (start.map_or(n - 1, |s| adjust(s, -1, n - 1)), stop.map_or(-1, |s| adjust(s, -1, n - 1)))
    };
    let mut out = Vec::new();
    let mut i = start;
    while (step > 0 && i < stop) || (step < 0 && i > stop) {
        out.push(i as usize);
        i += step;
    }
    Ok(out)
}
