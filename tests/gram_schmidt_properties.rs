//! Properties of the Gram-Schmidt result on random and hand-built inputs.
//!
//! Every test orthogonalizes a set of row vectors and checks one property of the output:
//! orthonormality, span preservation, rank detection, idempotence, determinism, or the
//! reconstruction `A = Q R`.

use approx::assert_abs_diff_eq;
use orthokit::{
    ClassicalGramSchmidt, DenseVectorArray, GramSchmidtOptions, Indices, InnerProduct,
    ListVectorArray, ModifiedGramSchmidt, OrthoError, Orthogonalizer, VectorArray, gram_schmidt,
    gram_schmidt_in_place, orthogonality_error,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Helper to generate `n` random vectors of length `dim` with entries in [-1, 1).
fn random_rows(rng: &mut StdRng, n: usize, dim: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect()
}

fn dot(x: &[f64], y: &[f64]) -> f64 {
    <() as InnerProduct<[f64]>>::dot(&(), x, y)
}

/// Residual of `x` after projecting onto the span of the orthonormal rows of `q`.
fn projection_residual(q: &ListVectorArray<f64>, x: &[f64]) -> f64 {
    let mut r = x.to_vec();
    for k in 0..q.len() {
        let c = dot(x, q.vector(k));
        for (ri, qi) in r.iter_mut().zip(q.vector(k)) {
            *ri -= c * qi;
        }
    }
    dot(&r, &r).sqrt()
}

/// The 3x3 example with a dependent third row.
///
/// - Exactly two vectors survive.
/// - They are orthonormal and span the first two input rows.
/// - Modified and classical Gram-Schmidt agree up to sign.
#[test]
fn three_by_three_dependent_rows() {
    let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]];
    let a = ListVectorArray::from_rows(rows.clone()).unwrap();
    let (q, stats) = gram_schmidt(&a, &(), &GramSchmidtOptions::default()).unwrap();
    assert_eq!(q.len(), 2);
    assert_eq!(stats.rank, 2);
    assert_eq!(stats.removed, vec![2]);
    assert!(orthogonality_error(&q, &(), 0, true) < 1e-14);
    for row in &rows {
        assert!(projection_residual(&q, row) < 1e-12);
    }

    let mut c = a.clone();
    ClassicalGramSchmidt::<f64>::default().orthogonalize(&mut c, &()).unwrap();
    assert_eq!(c.len(), 2);
    for k in 0..2 {
        let s = dot(q.vector(k), c.vector(k)).signum();
        for (x, y) in q.vector(k).iter().zip(c.vector(k)) {
            assert_abs_diff_eq!(*x, s * y, epsilon = 1e-12);
        }
    }
}

/// Random full-rank input: all vectors are kept, and the result is orthonormal and spans the input.
#[test]
fn random_full_rank_is_orthonormal_and_spans_input() {
    let mut rng = StdRng::seed_from_u64(7);
    let rows = random_rows(&mut rng, 12, 20);
    let a = ListVectorArray::from_rows(rows.clone()).unwrap();
    let (q, stats) = gram_schmidt(&a, &(), &GramSchmidtOptions::default()).unwrap();
    assert!(stats.full_rank());
    assert_eq!(q.len(), 12);
    assert!(orthogonality_error(&q, &(), 0, true) < 1e-13);
    for row in &rows {
        assert!(projection_residual(&q, row) < 1e-12);
    }
}

/// More vectors than dimensions: the rank is capped by the dimension.
#[test]
fn rank_is_capped_by_dimension() {
    let mut rng = StdRng::seed_from_u64(11);
    let a = ListVectorArray::from_rows(random_rows(&mut rng, 9, 5)).unwrap();
    let variants: [&dyn Orthogonalizer<ListVectorArray<f64>, (), Scalar = f64>; 2] = [
        &ModifiedGramSchmidt::<f64>::default(),
        &ClassicalGramSchmidt::<f64>::default(),
    ];
    for orth in variants {
        let mut q = a.clone();
        let stats = orth.orthogonalize(&mut q, &()).unwrap();
        assert_eq!(stats.rank, 5);
        assert_eq!(stats.removed, vec![5, 6, 7, 8]);
        assert!(orthogonality_error(&q, &(), 0, true) < 1e-13);
    }
}

/// A row that is the sum of two other rows is detected and removed.
#[test]
fn sum_of_rows_is_dependent() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut rows = random_rows(&mut rng, 2, 6);
    let sum: Vec<f64> = rows[0].iter().zip(&rows[1]).map(|(x, y)| x + y).collect();
    rows.push(sum);
    rows.extend(random_rows(&mut rng, 1, 6));
    let a = DenseVectorArray::from_rows(&rows).unwrap();
    let (q, stats) = gram_schmidt(&a, &(), &GramSchmidtOptions::default()).unwrap();
    assert_eq!(stats.rank, 3);
    assert_eq!(stats.removed, vec![2]);
    assert_eq!(q.len(), 3);
}

/// Orthogonalizing an orthonormal result again changes nothing beyond rounding.
#[test]
fn orthogonalization_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(5);
    let a = ListVectorArray::from_rows(random_rows(&mut rng, 8, 10)).unwrap();
    let opts = GramSchmidtOptions::default();
    let (q1, _) = gram_schmidt(&a, &(), &opts).unwrap();
    let (q2, stats) = gram_schmidt(&q1, &(), &opts).unwrap();
    assert_eq!(stats.rank, q1.len());
    assert_eq!(stats.reiterations, 0);
    for k in 0..q1.len() {
        for (x, y) in q1.vector(k).iter().zip(q2.vector(k)) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-13);
        }
    }
}

/// Repeated calls on identical input give bit-identical output.
#[test]
fn repeated_runs_are_bit_identical() {
    let mut rng = StdRng::seed_from_u64(13);
    let a = DenseVectorArray::from_rows(&random_rows(&mut rng, 6, 5000)).unwrap();
    let opts = GramSchmidtOptions::default();
    let (q1, _) = gram_schmidt(&a, &(), &opts).unwrap();
    let (q2, _) = gram_schmidt(&a, &(), &opts).unwrap();
    assert_eq!(q1, q2);
}

/// With `return_r`, the kept vectors and R reconstruct every input vector.
#[test]
fn q_times_r_reconstructs_input() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut rows = random_rows(&mut rng, 5, 8);
    let combo: Vec<f64> = rows[1].iter().zip(&rows[3]).map(|(x, y)| 2.0 * x - y).collect();
    rows.insert(2, combo);
    let a = ListVectorArray::from_rows(rows.clone()).unwrap();
    let opts = GramSchmidtOptions::default().with_return_r(true);
    let (q, stats) = gram_schmidt(&a, &(), &opts).unwrap();
    assert_eq!(stats.removed, vec![4]);
    let r = stats.r.unwrap();
    assert_eq!((r.nrows(), r.ncols()), (q.len(), rows.len()));
    for (j, row) in rows.iter().enumerate() {
        for (t, &x) in row.iter().enumerate() {
            let rec: f64 = (0..q.len()).map(|k| r[(k, j)] * q.vector(k)[t]).sum();
            assert_abs_diff_eq!(rec, x, epsilon = 1e-12);
        }
    }
    // R is upper triangular over the kept columns
    assert_abs_diff_eq!(r[(1, 0)], 0.0);
}

/// Unnormalized mode keeps mutually orthogonal but unscaled vectors.
#[test]
fn unnormalized_result_is_orthogonal() {
    let mut rng = StdRng::seed_from_u64(19);
    let a = ListVectorArray::from_rows(random_rows(&mut rng, 6, 9)).unwrap();
    let opts = GramSchmidtOptions::default().with_normalize(false);
    let (q, _) = gram_schmidt(&a, &(), &opts).unwrap();
    assert_eq!(q.vector(0), a.vector(0));
    assert!(orthogonality_error(&q, &(), 0, false) < 1e-13);
}

/// Leading `offset` vectors are trusted and left as they are.
#[test]
fn offset_vectors_are_kept_verbatim() {
    let mut rng = StdRng::seed_from_u64(23);
    let basis = ListVectorArray::from_rows(random_rows(&mut rng, 3, 7)).unwrap();
    let (mut q, _) = gram_schmidt(&basis, &(), &GramSchmidtOptions::default()).unwrap();
    let head = q.clone();
    for row in random_rows(&mut rng, 2, 7) {
        q.push(row).unwrap();
    }
    let opts = GramSchmidtOptions::default().with_offset(3);
    let (q2, stats) = gram_schmidt(&q, &(), &opts).unwrap();
    assert_eq!(stats.rank, 5);
    for k in 0..3 {
        assert_eq!(q2.vector(k), head.vector(k));
    }
    assert!(orthogonality_error(&q2, &(), 0, true) < 1e-13);
}

/// A too strict accuracy check reports the measured error.
#[test]
fn failed_check_reports_error() {
    let eps = 1e-8;
    let rows = vec![vec![1.0, eps, 0.0, 0.0], vec![1.0, 0.0, eps, 0.0], vec![1.0, 0.0, 0.0, eps]];
    let a = ListVectorArray::from_rows(rows).unwrap();
    let opts = GramSchmidtOptions::default().with_reiterate(false);
    let mut c = a.clone();
    let err = ClassicalGramSchmidt::<f64>::new(opts).orthogonalize(&mut c, &()).unwrap_err();
    assert!(matches!(err, OrthoError::NotOrthogonal { max_err } if max_err > 0.1));
}

/// User array type that does not enforce equal lengths; `dim` is the first row's length.
#[derive(Clone, Debug, PartialEq)]
struct Ragged {
    rows: Vec<Vec<f64>>,
}

impl VectorArray<f64> for Ragged {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn dim(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    fn vector(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    fn vector_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.rows[i]
    }

    fn delete_vectors(&mut self, indices: &Indices) -> Result<(), OrthoError> {
        let removed = indices.unique(self.len())?;
        let mut pos = 0;
        self.rows.retain(|_| {
            pos += 1;
            !removed.contains(&(pos - 1))
        });
        Ok(())
    }
}

/// Vectors of unequal length in a custom array are rejected before anything is modified.
#[test]
fn ragged_custom_array_is_rejected_untouched() {
    let input = Ragged { rows: vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0], vec![7.0, 8.0, 9.0]] };
    let mut a = input.clone();
    let err = gram_schmidt_in_place(&mut a, &(), &GramSchmidtOptions::default()).unwrap_err();
    assert_eq!(err, OrthoError::DimensionMismatch { expected: 3, found: 2 });
    assert_eq!(a, input);

    for kind in 0..2 {
        let mut b = input.clone();
        let opts = GramSchmidtOptions::default();
        let err = if kind == 0 {
            ModifiedGramSchmidt::<f64>::new(opts).orthogonalize(&mut b, &()).unwrap_err()
        } else {
            ClassicalGramSchmidt::<f64>::new(opts).orthogonalize(&mut b, &()).unwrap_err()
        };
        assert!(matches!(err, OrthoError::DimensionMismatch { .. }));
        assert_eq!(b, input);
    }
}
