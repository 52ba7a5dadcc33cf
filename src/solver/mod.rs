mod controller;
mod jacobi;
mod leapfrog;

pub use controller::*;
pub use jacobi::*;
pub use leapfrog::*;

use crate::domain::*;

/// All regime solvers adhere to this interface.
/// A step is one full kernel pass followed by a buffer rotation;
/// it either happens completely or not at all.
pub trait SolverInterface<const GRID_DIMENSION: usize> {
    /// Returns the max change of the pass when the regime tracks it.
    fn step(&mut self) -> Option<f64>;

    /// The most recently committed time level.
    fn current(&self) -> &OwnedDomain<GRID_DIMENSION>;

    fn chunk_size(&self) -> usize;

    fn print_report(&self);
}
