//! Dense vector arrays on contiguous row-major storage, with faer interop.
//!
//! Vector `i` occupies `data[i * dim..(i + 1) * dim]`. [`DenseVectorArray`] owns its buffer
//! and shrinks when vectors are deleted; [`RowMajorViewMut`] borrows a caller buffer of fixed
//! shape and compacts surviving rows to the front instead.

use crate::core::scalar::Field;
use crate::core::traits::VectorArray;
use crate::error::OrthoError;
use crate::vectorarray::indices::Indices;
use faer::Mat;

fn shape_len(rows: usize, dim: usize) -> Result<usize, OrthoError> {
    rows.checked_mul(dim).ok_or_else(|| {
        OrthoError::InvalidConfiguration(format!("buffer shape {rows}x{dim} overflows usize"))
    })
}

fn check_len(data_len: usize, rows: usize, dim: usize) -> Result<(), OrthoError> {
    let expected = shape_len(rows, dim)?;
    if data_len != expected {
        return Err(OrthoError::DimensionMismatch { expected, found: data_len });
    }
    Ok(())
}

/// Owned row-major vector array.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseVectorArray<T> {
    data: Vec<T>,
    len: usize,
    dim: usize,
}

impl<T: Field> DenseVectorArray<T> {
    /// Wrap row-major `data` holding `len` vectors of length `dim`.
    pub fn new(data: Vec<T>, len: usize, dim: usize) -> Result<Self, OrthoError> {
        check_len(data.len(), len, dim)?;
        Ok(Self { data, len, dim })
    }

    /// `len` zero vectors of length `dim`.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `len * dim` overflows `usize`.
    pub fn zeros(len: usize, dim: usize) -> Result<Self, OrthoError> {
        let size = shape_len(len, dim)?;
        Ok(Self { data: vec![T::zero(); size], len, dim })
    }

    /// Build from rows; all rows must have the length of the first one.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, OrthoError> {
        let dim = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * dim);
        for row in rows {
            if row.len() != dim {
                return Err(OrthoError::DimensionMismatch { expected: dim, found: row.len() });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, len: rows.len(), dim })
    }

    /// Each row of `mat` becomes one vector.
    pub fn from_mat(mat: &Mat<T>) -> Self {
        let (len, dim) = (mat.nrows(), mat.ncols());
        let mut data = Vec::with_capacity(len * dim);
        for i in 0..len {
            for j in 0..dim {
                data.push(mat[(i, j)]);
            }
        }
        Self { data, len, dim }
    }

    /// Vectors as the rows of a faer matrix.
    pub fn to_mat(&self) -> Mat<T> {
        Mat::from_fn(self.len, self.dim, |i, j| self.data[i * self.dim + j])
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }

    /// Copy the selected vectors into a new array.
    pub fn select(&self, indices: &Indices) -> Result<Self, OrthoError> {
        let selected = indices.resolve(self.len)?;
        let mut data = Vec::with_capacity(selected.len() * self.dim);
        for &i in &selected {
            data.extend_from_slice(self.vector(i));
        }
        Ok(Self { data, len: selected.len(), dim: self.dim })
    }
}

impl<T: Field> VectorArray<T> for DenseVectorArray<T> {
    fn len(&self) -> usize {
        self.len
    }
    fn dim(&self) -> usize {
        self.dim
    }
    fn vector(&self, i: usize) -> &[T] {
        assert!(i < self.len, "vector index {i} out of range");
        &self.data[i * self.dim..(i + 1) * self.dim]
    }
    fn vector_mut(&mut self, i: usize) -> &mut [T] {
        assert!(i < self.len, "vector index {i} out of range");
        &mut self.data[i * self.dim..(i + 1) * self.dim]
    }
    fn delete_vectors(&mut self, indices: &Indices) -> Result<(), OrthoError> {
        let kept = indices.complement(self.len)?;
        let kept_len = compact_rows(&mut self.data, self.dim, &kept);
        self.data.truncate(kept_len * self.dim);
        self.len = kept_len;
        Ok(())
    }
}

/// Borrowed row-major buffer of fixed shape.
///
/// Deleting vectors moves the surviving rows to the front in their original order and
/// zero-fills the rows freed at the end; `len()` reports the surviving count while
/// `rows()` keeps the buffer shape.
#[derive(Debug)]
pub struct RowMajorViewMut<'a, T> {
    data: &'a mut [T],
    rows: usize,
    len: usize,
    dim: usize,
}

impl<'a, T: Field> RowMajorViewMut<'a, T> {
    pub fn new(data: &'a mut [T], rows: usize, dim: usize) -> Result<Self, OrthoError> {
        check_len(data.len(), rows, dim)?;
        Ok(Self { data, rows, len: rows, dim })
    }

    /// Number of rows of the underlying buffer.
    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl<T: Field> VectorArray<T> for RowMajorViewMut<'_, T> {
    fn len(&self) -> usize {
        self.len
    }
    fn dim(&self) -> usize {
        self.dim
    }
    fn vector(&self, i: usize) -> &[T] {
        assert!(i < self.len, "vector index {i} out of range");
        &self.data[i * self.dim..(i + 1) * self.dim]
    }
    fn vector_mut(&mut self, i: usize) -> &mut [T] {
        assert!(i < self.len, "vector index {i} out of range");
        &mut self.data[i * self.dim..(i + 1) * self.dim]
    }
    fn delete_vectors(&mut self, indices: &Indices) -> Result<(), OrthoError> {
        let kept = indices.complement(self.len)?;
        let kept_len = compact_rows(self.data, self.dim, &kept);
        for x in &mut self.data[kept_len * self.dim..] {
            *x = T::zero();
        }
        self.len = kept_len;
        Ok(())
    }
}

// Move rows `kept` (ascending) to the front; returns the number of rows kept.
fn compact_rows<T: Copy>(data: &mut [T], dim: usize, kept: &[usize]) -> usize {
    for (dst, &src) in kept.iter().enumerate() {
        if dst != src {
            data.copy_within(src * dim..(src + 1) * dim, dst * dim);
        }
    }
    kept.len()
}
