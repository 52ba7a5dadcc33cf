use num_traits::Num;
use rayon::prelude::*;

/// Sets each element to the same value.
/// `chunk_size` is break the work into tasks for multi-threading.
pub fn set_value<NumType: Num + Copy + Send + Sync>(
    a_slice: &mut [NumType],
    value: NumType,
    chunk_size: usize,
) {
    a_slice
        .par_chunks_mut(chunk_size)
        .for_each(|a_chunk: &mut [NumType]| {
            for a in a_chunk {
                *a = value;
            }
        });
}

/// Whether any element is NaN or infinite.
pub fn any_non_finite(a_slice: &[f64], chunk_size: usize) -> bool {
    a_slice
        .par_chunks(chunk_size)
        .any(|a_chunk: &[f64]| a_chunk.iter().any(|a| !a.is_finite()))
}

/// Largest absolute value, `0.0` for an empty slice.
pub fn max_abs(a_slice: &[f64], chunk_size: usize) -> f64 {
    a_slice
        .par_chunks(chunk_size)
        .map(|a_chunk: &[f64]| {
            a_chunk.iter().fold(0.0f64, |acc, a| acc.max(a.abs()))
        })
        .reduce(|| 0.0, f64::max)
}
