use crate::config::*;
use crate::domain::*;
use crate::par_stencil;
use crate::reduction;
use crate::rotation::*;
use crate::solver::*;
use crate::stencil::*;

/// Jacobi relaxation over two buffers.
pub struct JacobiSolver<
    Operation,
    const GRID_DIMENSION: usize,
    const NEIGHBORHOOD_SIZE: usize,
> {
    stencil: Stencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
    buffers: BufferPair<GRID_DIMENSION>,
    chunk_size: usize,
}

impl<
        Operation: StencilOperation<NEIGHBORHOOD_SIZE>,
        const GRID_DIMENSION: usize,
        const NEIGHBORHOOD_SIZE: usize,
    > JacobiSolver<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>
{
    /// Both buffers start as copies of `initial`.
    pub fn new(
        stencil: Stencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
        initial: OwnedDomain<GRID_DIMENSION>,
        chunk_size: usize,
    ) -> Self {
        assert!(chunk_size > 0);
        JacobiSolver {
            stencil,
            buffers: BufferPair::from_initial(&initial),
            chunk_size,
        }
    }

    /// Validate `config`, build its initial field and solver.
    pub fn from_config(
        stencil: Stencil<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>,
        config: &RelaxationConfig<GRID_DIMENSION>,
    ) -> Result<Self, ConfigError> {
        let initial = config.initial_field()?;
        Ok(Self::new(stencil, initial, config.chunk_size))
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
    for JacobiSolver<Operation, GRID_DIMENSION, NEIGHBORHOOD_SIZE>
{
    fn step(&mut self) -> Option<f64> {
        let [current, next] = self.buffers.roles_mut();
        par_stencil::apply(&self.stencil, &*current, next, self.chunk_size);
        let max_change =
            reduction::par_max_change(&*current, &*next, self.chunk_size);
        self.buffers.rotate();
        Some(max_change)
    }

    fn current(&self) -> &OwnedDomain<GRID_DIMENSION> {
        self.buffers.current()
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn print_report(&self) {
        println!("JacobiSolver {{");
        println!("  grid: {}", self.buffers.current().aabb());
        println!("  weights: {:?}", self.stencil.weights().as_slice());
        println!("  passes: {}", self.buffers.rotations());
        println!("}}");
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::stencil::standard_stencils::*;
    use crate::util::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn face_stays_clamped() {
        let config = RelaxationConfig::new([6, 6, 6]);
        let mut solver = JacobiSolver::from_config(jacobi_3d(), &config).unwrap();
        for _ in 0..10 {
            let change = solver.step().unwrap();
            assert!(change > 0.0);
            let current = solver.current();
            for c in current.aabb().coord_iter() {
                if c[0] == 0 {
                    assert_eq!(current.view(&c), 100.0);
                }
            }
        }
    }

    #[test]
    fn first_pass_change() {
        // Cells next to the hot face pick up 100 / 6 on the first pass.
        let config = RelaxationConfig::new([5, 5, 5]);
        let mut solver = JacobiSolver::from_config(jacobi_3d(), &config).unwrap();
        let change = solver.step().unwrap();
        assert_approx_eq!(f64, change, 100.0 / 6.0, ulps = 2);
        assert_approx_eq!(
            f64,
            solver.current().view(&vector![1, 2, 2]),
            100.0 / 6.0,
            ulps = 2
        );
        assert_eq!(solver.current().view(&vector![2, 2, 2]), 0.0);
    }

    #[test]
    fn uniform_field_is_converged() {
        let aabb = AABB::from_extents(&[7, 7]);
        let mut solver =
            JacobiSolver::new(jacobi_2d(), OwnedDomain::filled(aabb, 2.0), 5);
        assert_eq!(solver.step(), Some(0.0));
        assert_eq!(solver.into_current(), OwnedDomain::filled(aabb, 2.0));
    }
}
