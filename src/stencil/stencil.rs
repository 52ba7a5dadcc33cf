use crate::util::*;

/// The per-cell update of a stencil, evaluated on the gathered
/// neighbor values in offset order.
pub trait StencilOperation<const NEIGHBORHOOD_SIZE: usize>:
    Fn(&[f64; NEIGHBORHOOD_SIZE]) -> f64 + Send + Sync
{
}

impl<const NEIGHBORHOOD_SIZE: usize, F> StencilOperation<NEIGHBORHOOD_SIZE> for F where
    F: Fn(&[f64; NEIGHBORHOOD_SIZE]) -> f64 + Send + Sync
{
}

/// For linear stencils, we can extract the weight for a neighbor
/// by passing in 1.0 for that neighbor and 0.0 for the others.
pub fn extract_weights<
    const NEIGHBORHOOD_SIZE: usize,
    F: Fn(&[f64; NEIGHBORHOOD_SIZE]) -> f64,
>(
    f: F,
) -> Values<NEIGHBORHOOD_SIZE> {
    let mut weights = Values::zero();
    let mut arg_buffer = [0.0; NEIGHBORHOOD_SIZE];
    for n in 0..NEIGHBORHOOD_SIZE {
        arg_buffer[n] = 1.0;
        weights[n] = f(&arg_buffer);
        arg_buffer[n] = 0.0;
    }
    weights
}

/// Neighbor values of `index` in a flat buffer, with offsets from
/// `AABB::coord_offset_to_linear`.
#[inline]
pub fn gather_args<const NEIGHBORHOOD_SIZE: usize>(
    buffer: &[f64],
    index: usize,
    linear_offsets: &[isize; NEIGHBORHOOD_SIZE],
) -> [f64; NEIGHBORHOOD_SIZE] {
    std::array::from_fn(|n| buffer[index.wrapping_add_signed(linear_offsets[n])])
}

/// A stencil is a set of neighbor offsets plus the operation combining
/// their values. The operation is evaluated as written, the weights
/// extracted from it describe the stencil but are not used to apply it.
#[derive(Clone)]
pub struct Stencil<
    Operation,
    const GRID_DIMENSION: usize,
    const NEIGHBORHOOD_SIZE: usize,
> {
    operation: Operation,
    weights: Values<NEIGHBORHOOD_SIZE>,
    offsets: [Coord<GRID_DIMENSION>; NEIGHBORHOOD_SIZE],
}

impl<
        Operation: StencilOperation<NEIGHBORHOOD_SIZE>,
        const GRID_DIMENSION: usize,
        const NEIGHBORHOOD_SIZE: usize,
    > Stencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>
{
    pub fn new(
        offsets: [[i32; GRID_DIMENSION]; NEIGHBORHOOD_SIZE],
        operation: Operation,
    ) -> Self {
        let weights = extract_weights(&operation);
        Stencil {
            operation,
            offsets: std::array::from_fn(|i| {
                Coord::from_column_slice(&offsets[i])
            }),
            weights,
        }
    }

    pub fn weights(&self) -> &Values<NEIGHBORHOOD_SIZE> {
        &self.weights
    }

    pub fn offsets(&self) -> &[Coord<GRID_DIMENSION>; NEIGHBORHOOD_SIZE] {
        &self.offsets
    }

    /// Largest reach of any neighbor along any axis.
    /// Cells closer than this to the edge cannot be updated.
    pub fn radius(&self) -> i32 {
        self.offsets
            .iter()
            .flat_map(|o| o.iter().map(|d| d.abs()))
            .max()
            .unwrap_or(0)
    }

    #[inline]
    pub fn apply(&self, args: &[f64; NEIGHBORHOOD_SIZE]) -> f64 {
        (self.operation)(args)
    }
}

/// Explicit second order time step around a spatial stencil,
/// `next = 2 current - old + tau_sq * spatial(current)`.
#[derive(Clone)]
pub struct LeapfrogStencil<
    Operation,
    const GRID_DIMENSION: usize,
    const NEIGHBORHOOD_SIZE: usize,
> {
    spatial: Stencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
    tau_sq: f64,
}

impl<
        Operation: StencilOperation<NEIGHBORHOOD_SIZE>,
        const GRID_DIMENSION: usize,
        const NEIGHBORHOOD_SIZE: usize,
    > LeapfrogStencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>
{
    pub fn new(
        spatial: Stencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
        tau_sq: f64,
    ) -> Self {
        LeapfrogStencil { spatial, tau_sq }
    }

    pub fn spatial(&self) -> &Stencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE> {
        &self.spatial
    }

    pub fn tau_sq(&self) -> f64 {
        self.tau_sq
    }

    /// `middle` and `old` are the updated cell at the current and
    /// previous time levels, `args` its neighborhood in `current`.
    #[inline]
    pub fn apply(&self, middle: f64, old: f64, args: &[f64; NEIGHBORHOOD_SIZE]) -> f64 {
        2.0 * middle - old + self.tau_sq * self.spatial.apply(args)
    }
}
