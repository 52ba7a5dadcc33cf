use crate::config::*;
use crate::domain::*;
use crate::par_stencil;
use crate::rotation::*;
use crate::solver::*;
use crate::stencil::*;

/// Leapfrog time marching over three buffers.
/// Boundary cells keep whatever the initial levels held,
/// which makes the edge a fixed (Dirichlet) boundary.
pub struct LeapfrogSolver<
    Operation,
    const GRID_DIMENSION: usize,
    const NEIGHBORHOOD_SIZE: usize,
> {
    stencil: LeapfrogStencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
    buffers: BufferTriple<GRID_DIMENSION>,
    chunk_size: usize,
}

impl<
        Operation: StencilOperation<NEIGHBORHOOD_SIZE>,
        const GRID_DIMENSION: usize,
        const NEIGHBORHOOD_SIZE: usize,
    > LeapfrogSolver<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>
{
    /// See `standard_stencils::wave_2d` for the stencil.
    /// The first `next` buffer starts as a copy of `current`.
    pub fn new(
        stencil: LeapfrogStencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
        old: OwnedDomain<GRID_DIMENSION>,
        current: OwnedDomain<GRID_DIMENSION>,
        chunk_size: usize,
    ) -> Self {
        assert!(chunk_size > 0);
        assert_eq!(old.aabb(), current.aabb());
        let next = current.clone();
        LeapfrogSolver {
            stencil,
            buffers: BufferTriple::new([old, current, next]),
            chunk_size,
        }
    }

    /// Start at rest: `initial` is loaded into both the old and
    /// current levels.
    pub fn from_config(
        stencil: LeapfrogStencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
        config: &WaveConfig<GRID_DIMENSION>,
        initial: OwnedDomain<GRID_DIMENSION>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        check_shape(&config.aabb(), initial.aabb())?;
        let old = initial.clone();
        Ok(Self::new(stencil, old, initial, config.chunk_size))
    }

    pub fn old(&self) -> &OwnedDomain<GRID_DIMENSION> {
        self.buffers.role(0)
    }

    pub fn into_current(self) -> OwnedDomain<GRID_DIMENSION> {
        self.buffers.into_current()
    }
}

impl<
        Operation: StencilOperation<NEIGHBORHOOD_SIZE>,
        const GRID_DIMENSION: usize,
        const NEIGHBORHOOD_SIZE: usize,
    > SolverInterface<GRID_DIMENSION>
    for LeapfrogSolver<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>
{
    fn step(&mut self) -> Option<f64> {
        let [old, current, next] = self.buffers.roles_mut();
        par_stencil::apply_leapfrog(
            &self.stencil,
            &*old,
            &*current,
            next,
            self.chunk_size,
        );
        self.buffers.rotate();
        None
    }

    fn current(&self) -> &OwnedDomain<GRID_DIMENSION> {
        self.buffers.current()
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn print_report(&self) {
        println!("LeapfrogSolver {{");
        println!("  grid: {}", self.buffers.current().aabb());
        println!("  tau_sq: {}", self.stencil.tau_sq());
        println!(
            "  spatial weights: {:?}",
            self.stencil.spatial().weights().as_slice()
        );
        println!("  steps: {}", self.buffers.rotations());
        println!("}}");
    }
}
