//! Vector array backed by a list of individually owned vectors.

use crate::core::scalar::Field;
use crate::core::traits::VectorArray;
use crate::error::OrthoError;
use crate::vectorarray::indices::Indices;

/// A vector array holding one `Vec<T>` per vector.
///
/// Appending and deleting vectors is cheap; vectors are never reallocated when their
/// neighbours are removed.
#[derive(Clone, Debug, PartialEq)]
pub struct ListVectorArray<T> {
    vectors: Vec<Vec<T>>,
    dim: usize,
}

impl<T: Field> ListVectorArray<T> {
    /// Create an array of vectors with length `dim`.
    ///
    /// # Errors
    /// `DimensionMismatch` if any vector has a different length.
    pub fn new(vectors: Vec<Vec<T>>, dim: usize) -> Result<Self, OrthoError> {
        let array = Self { vectors, dim };
        array.check_dims()?;
        Ok(array)
    }

    /// An empty array for vectors of length `dim`.
    pub fn empty(dim: usize) -> Self {
        Self { vectors: Vec::new(), dim }
    }

    /// Create from rows, taking the dimension from the first row.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, OrthoError> {
        let dim = rows.first().map_or(0, Vec::len);
        Self::new(rows, dim)
    }

    pub fn vectors(&self) -> &[Vec<T>] {
        &self.vectors
    }

    pub fn into_rows(self) -> Vec<Vec<T>> {
        self.vectors
    }

    /// Append a single vector.
    pub fn push(&mut self, vector: Vec<T>) -> Result<(), OrthoError> {
        if vector.len() != self.dim {
            return Err(OrthoError::DimensionMismatch { expected: self.dim, found: vector.len() });
        }
        self.vectors.push(vector);
        Ok(())
    }

    /// Append copies of the selected vectors of `other`.
    pub fn append(&mut self, other: &Self, indices: &Indices) -> Result<(), OrthoError> {
        if other.dim != self.dim {
            return Err(OrthoError::DimensionMismatch { expected: self.dim, found: other.dim });
        }
        let selected = indices.resolve(other.len())?;
        self.vectors.reserve(selected.len());
        self.vectors.extend(selected.into_iter().map(|i| other.vectors[i].clone()));
        Ok(())
    }

    /// Copy the selected vectors into a new array.
    pub fn select(&self, indices: &Indices) -> Result<Self, OrthoError> {
        let vectors = indices
            .resolve(self.len())?
            .into_iter()
            .map(|i| self.vectors[i].clone())
            .collect();
        Ok(Self { vectors, dim: self.dim })
    }
}

impl<T: Field> VectorArray<T> for ListVectorArray<T> {
    fn len(&self) -> usize {
        self.vectors.len()
    }
    fn dim(&self) -> usize {
        self.dim
    }
    fn vector(&self, i: usize) -> &[T] {
        &self.vectors[i]
    }
    fn vector_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.vectors[i]
    }
    fn delete_vectors(&mut self, indices: &Indices) -> Result<(), OrthoError> {
        let removed = indices.unique(self.len())?;
        let mut pos = 0;
        self.vectors.retain(|_| {
            let keep = !removed.contains(&pos);
            pos += 1;
            keep
        });
        Ok(())
    }
}
