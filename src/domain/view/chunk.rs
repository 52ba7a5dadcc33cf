use crate::util::*;

/// A contiguous piece of a domain buffer handed to one parallel task.
pub struct DomainChunk<'a, const GRID_DIMENSION: usize> {
    offset: usize,
    aabb: &'a AABB<GRID_DIMENSION>,
    buffer: &'a mut [f64],
}

impl<'a, const GRID_DIMENSION: usize> DomainChunk<'a, GRID_DIMENSION> {
    pub fn new(
        offset: usize,
        aabb: &'a AABB<GRID_DIMENSION>,
        buffer: &'a mut [f64],
    ) -> Self {
        DomainChunk {
            offset,
            aabb,
            buffer,
        }
    }

    pub fn aabb(&self) -> &AABB<GRID_DIMENSION> {
        self.aabb
    }

    pub fn coord_iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (Coord<GRID_DIMENSION>, &mut f64)> {
        self.aabb
            .coord_iter_from(self.offset)
            .zip(self.buffer.iter_mut())
    }

    /// Like `coord_iter_mut`, but also yields the linear index
    /// of each value within the whole domain buffer.
    pub fn indexed_iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (usize, Coord<GRID_DIMENSION>, &mut f64)> {
        let offset = self.offset;
        self.coord_iter_mut()
            .enumerate()
            .map(move |(i, (coord, value))| (offset + i, coord, value))
    }
}
