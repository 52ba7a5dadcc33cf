//! Parallel stencil passes over the interior of a field.
//!
//! Every pass reads only from its input domains and writes each
//! interior cell of the output exactly once, so the output can be
//! split into arbitrary chunks across the rayon pool.
//! Boundary cells of the output are never touched.

use crate::domain::*;
use crate::stencil::*;
use rayon::prelude::*;

/// Write `f(linear_index)` into every interior cell of `output`.
pub fn apply_interior<const GRID_DIMENSION: usize, DomainType, F>(
    output: &mut DomainType,
    chunk_size: usize,
    f: F,
) where
    DomainType: DomainView<GRID_DIMENSION>,
    F: Fn(usize) -> f64 + Sync,
{
    output
        .par_modify_access(chunk_size)
        .for_each(|mut d: DomainChunk<'_, GRID_DIMENSION>| {
            let aabb = *d.aabb();
            d.indexed_iter_mut().for_each(|(linear_index, world_coord, value_mut)| {
                if !aabb.is_boundary(&world_coord) {
                    *value_mut = f(linear_index);
                }
            })
        })
}

/// One Jacobi style pass, `output = stencil(input)` on the interior.
pub fn apply<
    Operation: StencilOperation<NEIGHBORHOOD_SIZE>,
    const GRID_DIMENSION: usize,
    const NEIGHBORHOOD_SIZE: usize,
    DomainType: DomainView<GRID_DIMENSION>,
>(
    stencil: &Stencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
    input: &DomainType,
    output: &mut DomainType,
    chunk_size: usize,
) {
    profiling::scope!("par_stencil::apply");
    debug_assert_eq!(input.aabb(), output.aabb());
    debug_assert!(stencil.radius() <= 1);
    let linear_offsets = input.aabb().coord_offset_to_linear(stencil.offsets());
    let ib = input.buffer();
    apply_interior(output, chunk_size, |linear_index| {
        stencil.apply(&gather_args(ib, linear_index, &linear_offsets))
    });
}

/// One leapfrog pass over the interior of `next`.
pub fn apply_leapfrog<
    Operation: StencilOperation<NEIGHBORHOOD_SIZE>,
    const GRID_DIMENSION: usize,
    const NEIGHBORHOOD_SIZE: usize,
    DomainType: DomainView<GRID_DIMENSION>,
>(
    stencil: &LeapfrogStencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
    old: &DomainType,
    current: &DomainType,
    next: &mut DomainType,
    chunk_size: usize,
) {
    profiling::scope!("par_stencil::apply_leapfrog");
    debug_assert_eq!(old.aabb(), current.aabb());
    debug_assert_eq!(current.aabb(), next.aabb());
    debug_assert!(stencil.spatial().radius() <= 1);
    let linear_offsets = current
        .aabb()
        .coord_offset_to_linear(stencil.spatial().offsets());
    let cb = current.buffer();
    let ob = old.buffer();
    apply_interior(next, chunk_size, |linear_index| {
        stencil.apply(
            cb[linear_index],
            ob[linear_index],
            &gather_args(cb, linear_index, &linear_offsets),
        )
    });
}
