use super::*;
use crate::util::*;

/// A grid field that owns its values.
/// The shape is fixed at allocation.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedDomain<const GRID_DIMENSION: usize> {
    aabb: AABB<GRID_DIMENSION>,
    buffer: Vec<f64>,
}

impl<const GRID_DIMENSION: usize> OwnedDomain<GRID_DIMENSION> {
    /// Allocate a zero filled field.
    pub fn new(aabb: AABB<GRID_DIMENSION>) -> Self {
        Self::filled(aabb, 0.0)
    }

    pub fn filled(aabb: AABB<GRID_DIMENSION>, value: f64) -> Self {
        debug_assert!(aabb.check_validity());
        let buffer = vec![value; aabb.buffer_size()];
        OwnedDomain { aabb, buffer }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_buffer(aabb: AABB<GRID_DIMENSION>, buffer: Vec<f64>) -> Self {
        assert_eq!(
            buffer.len(),
            aabb.buffer_size(),
            "buffer does not match {aabb}"
        );
        OwnedDomain { aabb, buffer }
    }

    /// Number of cells the stencil kernel updates.
    pub fn interior_size(&self) -> usize {
        self.aabb.interior_size()
    }
}

impl<const GRID_DIMENSION: usize> DomainView<GRID_DIMENSION>
    for OwnedDomain<GRID_DIMENSION>
{
    fn aabb(&self) -> &AABB<GRID_DIMENSION> {
        &self.aabb
    }

    fn buffer(&self) -> &[f64] {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut [f64] {
        &mut self.buffer
    }

    fn aabb_buffer_mut(&mut self) -> (&AABB<GRID_DIMENSION>, &mut [f64]) {
        (&self.aabb, &mut self.buffer)
    }

    #[track_caller]
    fn view(&self, world_coord: &Coord<GRID_DIMENSION>) -> f64 {
        debug_assert!(
            self.aabb.contains(world_coord),
            "{:?} does not contain {:?}",
            self.aabb,
            world_coord
        );
        let index = self.aabb.coord_to_linear(world_coord);
        self.buffer[index]
    }

    #[track_caller]
    fn set_coord(&mut self, world_coord: &Coord<GRID_DIMENSION>, value: f64) {
        debug_assert!(
            self.aabb.contains(world_coord),
            "{:?} does not contain {:?}",
            self.aabb,
            world_coord
        );
        let index = self.aabb.coord_to_linear(world_coord);
        self.buffer[index] = value;
    }
}
