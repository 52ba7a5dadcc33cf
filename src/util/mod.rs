pub use nalgebra::{matrix, vector};
pub use num_traits::{Num, One, Zero};

mod aabb;
pub mod indexing;
pub use aabb::*;

/// Integer world coordinate, one component per grid axis.
pub type Coord<const GRID_DIMENSION: usize> =
    nalgebra::SVector<i32, { GRID_DIMENSION }>;

/// Inclusive `[min, max]` per axis, one row per axis.
pub type Bounds<const GRID_DIMENSION: usize> =
    nalgebra::SMatrix<i32, { GRID_DIMENSION }, 2>;

/// Per-neighbor stencil values (arguments or weights).
pub type Values<const NEIGHBORHOOD_SIZE: usize> =
    nalgebra::SVector<f64, { NEIGHBORHOOD_SIZE }>;
