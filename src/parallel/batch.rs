//! Rayon-based batch orthogonalization.

use crate::config::options::GramSchmidtOptions;
use crate::core::scalar::Field;
use crate::core::traits::{InnerProduct, VectorArray};
use crate::error::OrthoError;
use crate::ortho::gram_schmidt_in_place;
use crate::utils::stats::OrthoStats;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Orthogonalize every array in `arrays` independently, in place.
///
/// Arrays are processed concurrently on the global rayon pool when the `rayon` feature is
/// enabled and serially otherwise. Results are returned in input order; a failure for one
/// array leaves that array untouched and does not affect the others.
#[cfg(feature = "rayon")]
pub fn orthogonalize_batch<T, A, P>(
    arrays: &mut [A],
    ip: &P,
    options: &GramSchmidtOptions<T::Real>,
) -> Vec<Result<OrthoStats<T>, OrthoError>>
where
    T: Field,
    A: VectorArray<T> + Send,
    P: InnerProduct<[T], Scalar = T> + Sync + ?Sized,
{
    arrays
        .par_iter_mut()
        .map(|a| gram_schmidt_in_place(a, ip, options))
        .collect()
}

#[cfg(not(feature = "rayon"))]
pub fn orthogonalize_batch<T, A, P>(
    arrays: &mut [A],
    ip: &P,
    options: &GramSchmidtOptions<T::Real>,
) -> Vec<Result<OrthoStats<T>, OrthoError>>
where
    T: Field,
    A: VectorArray<T>,
    P: InnerProduct<[T], Scalar = T> + ?Sized,
{
    arrays
        .iter_mut()
        .map(|a| gram_schmidt_in_place(a, ip, options))
        .collect()
}

/// Size the global rayon pool to the number of logical CPUs.
///
/// Returns the number of worker threads of the global pool. Calling this after the pool has
/// been initialized is harmless; the existing pool is kept.
#[cfg(feature = "rayon")]
pub fn init_global_pool() -> usize {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get())
        .build_global()
        .ok();
    rayon::current_num_threads()
}

#[cfg(not(feature = "rayon"))]
pub fn init_global_pool() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorarray::ListVectorArray;

    #[test]
    fn batch_reports_per_array_results() {
        let mut arrays = vec![
            ListVectorArray::from_rows(vec![vec![1.0, 0.0], vec![2.0, 0.0]]).unwrap(),
            ListVectorArray::from_rows(vec![vec![1.0, 1.0], vec![1.0, -1.0]]).unwrap(),
            ListVectorArray::empty(2),
        ];
        let results = orthogonalize_batch(&mut arrays, &(), &GramSchmidtOptions::default());
        let ranks: Vec<usize> = results.into_iter().map(|r| r.unwrap().rank).collect();
        assert_eq!(ranks, vec![1, 2, 0]);
        assert_eq!(arrays[0].len(), 1);
    }

    #[test]
    fn failure_is_isolated() {
        let opts = GramSchmidtOptions::default().with_offset(2);
        let mut arrays = vec![
            ListVectorArray::from_rows(vec![vec![1.0, 0.0]]).unwrap(),
            ListVectorArray::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap(),
        ];
        let results = orthogonalize_batch(&mut arrays, &(), &opts);
        assert!(matches!(results[0], Err(OrthoError::InvalidConfiguration(_))));
        assert_eq!(results[1].as_ref().unwrap().rank, 2);
    }

    #[test]
    fn pool_has_workers() {
        assert!(init_global_pool() >= 1);
    }
}
