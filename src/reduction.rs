//! Max absolute change between two time levels.
//!
//! Each chunk computes its local maximum, the partial results are then
//! merged with `f64::max`. Max is exact in floating point, so the result
//! is the same for every chunk size and every schedule.
//! `f64::max` drops NaN operands, a diverged field therefore does not
//! show up here; see `par_slice::any_non_finite`.

use crate::domain::*;
use crate::util::*;
use rayon::prelude::*;

/// `max |next - current|` over interior cells, `0.0` if there are none.
pub fn par_max_change<
    const GRID_DIMENSION: usize,
    DomainType: DomainView<GRID_DIMENSION>,
>(
    current: &DomainType,
    next: &DomainType,
    chunk_size: usize,
) -> f64 {
    profiling::scope!("reduction::par_max_change");
    debug_assert_eq!(current.aabb(), next.aabb());
    let aabb = current.aabb();
    next.buffer()
        .par_chunks(chunk_size)
        .zip(current.buffer().par_chunks(chunk_size))
        .enumerate()
        .map(|(i, (next_chunk, current_chunk))| {
            chunk_max_change(aabb, i * chunk_size, next_chunk, current_chunk)
        })
        .reduce(|| 0.0, f64::max)
}

fn chunk_max_change<const GRID_DIMENSION: usize>(
    aabb: &AABB<GRID_DIMENSION>,
    offset: usize,
    next_chunk: &[f64],
    current_chunk: &[f64],
) -> f64 {
    let mut local_max = 0.0f64;
    for (world_coord, (n, c)) in aabb
        .coord_iter_from(offset)
        .zip(next_chunk.iter().zip(current_chunk))
    {
        if !aabb.is_boundary(&world_coord) {
            local_max = local_max.max((n - c).abs());
        }
    }
    local_max
}

/// Single threaded reference for `par_max_change`.
pub fn max_change<
    const GRID_DIMENSION: usize,
    DomainType: DomainView<GRID_DIMENSION>,
>(
    current: &DomainType,
    next: &DomainType,
) -> f64 {
    debug_assert_eq!(current.aabb(), next.aabb());
    let aabb = current.aabb();
    aabb.coord_iter()
        .filter(|c| !aabb.is_boundary(c))
        .map(|c| (next.view(&c) - current.view(&c)).abs())
        .fold(0.0, f64::max)
}
