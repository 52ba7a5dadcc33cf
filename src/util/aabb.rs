use crate::util::indexing::*;
use crate::util::*;

/// Axis Aligned Bounding Box (AABB) for coordinate types.
/// Each instance is inclusive of both corners.
/// This class is responsible for alot of indexing operations,
/// where we map between a linear buffer and coordinates.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq)]
pub struct AABB<const DIMENSION: usize> {
    pub bounds: Bounds<DIMENSION>,
}

impl<const GRID_DIMENSION: usize> std::fmt::Display for AABB<GRID_DIMENSION> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        write!(f, "{:?}", self.bounds)
    }
}

impl<const DIMENSION: usize> AABB<DIMENSION> {
    /// Create AABB from raw bounds.
    #[inline]
    pub fn new(bounds: Bounds<DIMENSION>) -> Self {
        AABB { bounds }
    }

    /// Create AABB anchored at the origin with the given number
    /// of cells along each axis.
    pub fn from_extents(extents: &[usize; DIMENSION]) -> Self {
        let mut bounds = Bounds::zero();
        for d in 0..DIMENSION {
            debug_assert!(extents[d] > 0);
            bounds[(d, 1)] = extents[d] as i32 - 1;
        }
        AABB { bounds }
    }

    /// Moving min to the origin, returns the exclusie size in each direction
    /// i.e. [0, 9]  would have exclusive size of 10.
    pub fn exclusive_bounds(&self) -> Coord<DIMENSION> {
        (self.bounds.column(1) - self.bounds.column(0)).add_scalar(1)
    }

    /// Return the number of coordinates contained in the instance.
    #[inline]
    pub fn buffer_size(&self) -> usize {
        real_buffer_size(&self.exclusive_bounds())
    }

    /// Return the number of coordinates not on the outer layer.
    #[inline]
    pub fn interior_size(&self) -> usize {
        interior_buffer_size(&self.exclusive_bounds())
    }

    /// The box with one layer of cells removed from every face.
    /// `None` when some axis has fewer than three cells.
    pub fn interior(&self) -> Option<Self> {
        let mut result = *self;
        for d in 0..DIMENSION {
            result.bounds[(d, 0)] += 1;
            result.bounds[(d, 1)] -= 1;
        }
        if result.check_validity() {
            Some(result)
        } else {
            None
        }
    }

    /// Whether a contained coordinate lies on the outer layer.
    pub fn is_boundary(&self, coord: &Coord<DIMENSION>) -> bool {
        debug_assert!(self.contains(coord));
        for d in 0..DIMENSION {
            if coord[d] == self.bounds[(d, 0)] || coord[d] == self.bounds[(d, 1)]
            {
                return true;
            }
        }
        false
    }

    /// Return the linear index for a coord in the instance
    pub fn coord_to_linear(&self, coord: &Coord<DIMENSION>) -> usize {
        coord_to_linear(&(coord - self.min()), &self.exclusive_bounds())
    }

    /// Return the coordinate in the instance for a given linear index.
    pub fn linear_to_coord(&self, index: usize) -> Coord<DIMENSION> {
        linear_to_coord(index, &self.exclusive_bounds()) + self.min()
    }

    /// Check whether the instance contains a coordinate.
    pub fn contains(&self, coord: &Coord<DIMENSION>) -> bool {
        for d in 0..DIMENSION {
            if coord[d] < self.bounds[(d, 0)] || coord[d] > self.bounds[(d, 1)]
            {
                return false;
            }
        }
        true
    }


    /// Return min corner.
    pub fn min(&self) -> Coord<DIMENSION> {
        self.bounds.column(0).into()
    }

    /// Return max corner
    pub fn max(&self) -> Coord<DIMENSION> {
        self.bounds.column(1).into()
    }

    /// Check that max >= min
    pub fn check_validity(&self) -> bool {
        for d in 0..DIMENSION {
            if self.bounds[(d, 0)] > self.bounds[(d, 1)] {
                return false;
            }
        }
        true
    }

    /// Return iterator over contained coords
    /// in linear ordering.
    pub fn coord_iter(&self) -> impl Iterator<Item = Coord<DIMENSION>> {
        self.coord_iter_from(0)
    }

    /// Iterate contained coords in linear ordering, starting at
    /// a linear index. Walks the box like an odometer so only the
    /// first coordinate needs the division based conversion.
    pub fn coord_iter_from(
        &self,
        start: usize,
    ) -> impl Iterator<Item = Coord<DIMENSION>> {
        let min = self.min();
        let max = self.max();
        let first = (start < self.buffer_size())
            .then(|| self.linear_to_coord(start));
        std::iter::successors(first, move |coord| {
            let mut next = *coord;
            for d in (0..DIMENSION).rev() {
                if next[d] < max[d] {
                    next[d] += 1;
                    return Some(next);
                }
                next[d] = min[d];
            }
            None
        })
    }

    /// Convert neighbor offsets into offsets in the linear buffer.
    pub fn coord_offset_to_linear<const NEIGHBORHOOD_SIZE: usize>(
        &self,
        coord_offsets: &[Coord<DIMENSION>; NEIGHBORHOOD_SIZE],
    ) -> [isize; NEIGHBORHOOD_SIZE] {
        // highest dimension goes the fastest
        let exclusive_bounds = self.exclusive_bounds();
        let mut linear_offsets = [0; NEIGHBORHOOD_SIZE];
        let mut accumulator = 1;
        for d in (0..DIMENSION).rev() {
            for o in 0..NEIGHBORHOOD_SIZE {
                linear_offsets[o] += coord_offsets[o][d] as isize * accumulator;
            }
            accumulator *= exclusive_bounds[d] as isize;
        }

        linear_offsets
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use nalgebra::{matrix, vector};

    #[test]
    fn buffer_size_test() {
        {
            let bound = AABB::new(matrix![0, 9]);
            assert_eq!(bound.buffer_size(), 10);
            assert_eq!(bound.interior_size(), 8);
        }

        {
            let bound = AABB::new(matrix![0, 9; 0, 4; 0, 2]);
            assert_eq!(bound.buffer_size(), 10 * 5 * 3);
            assert_eq!(bound.interior_size(), 8 * 3);
        }

        {
            let bound = AABB::from_extents(&[100, 100, 100]);
            assert_eq!(bound.buffer_size(), 1_000_000);
            assert_eq!(bound.interior_size(), 98 * 98 * 98);
        }
    }

    #[test]
    fn from_extents_test() {
        let bound = AABB::from_extents(&[10, 20]);
        assert_eq!(bound, AABB::new(matrix![0, 9; 0, 19]));
        assert_eq!(bound.exclusive_bounds(), vector![10, 20]);
    }

    #[test]
    fn interior_test() {
        {
            let bound = AABB::new(matrix![0, 9; 0, 4]);
            let interior = bound.interior().unwrap();
            assert_eq!(interior, AABB::new(matrix![1, 8; 1, 3]));
            assert_eq!(interior.buffer_size(), bound.interior_size());
        }

        {
            let bound = AABB::new(matrix![0, 2; 0, 2]);
            assert_eq!(bound.interior().unwrap().buffer_size(), 1);
        }

        {
            let bound = AABB::new(matrix![0, 1; 0, 9]);
            assert!(bound.interior().is_none());
        }
    }

    #[test]
    fn is_boundary_test() {
        let bound = AABB::new(matrix![0, 4; 0, 4; 0, 4]);
        let mut boundary_count = 0;
        for c in bound.coord_iter() {
            let expected = bound.interior().map_or(true, |i| !i.contains(&c));
            assert_eq!(bound.is_boundary(&c), expected);
            if bound.is_boundary(&c) {
                boundary_count += 1;
            }
        }
        assert_eq!(boundary_count, 125 - 27);
    }

    #[test]
    fn coord_to_linear_in_box_test() {
        let bound = AABB::new(matrix![2, 5; 3, 9]);
        assert_eq!(bound.coord_to_linear(&vector![2, 3]), 0);
        assert_eq!(bound.coord_to_linear(&vector![3, 4]), 7 + 1);
        assert_eq!(bound.linear_to_coord(8), vector![3, 4]);
    }

    #[test]
    fn coord_iter_from_test() {
        let bound = AABB::new(matrix![1, 3; 2, 4; 0, 2]);
        let from_linear: Vec<_> =
            (5..bound.buffer_size()).map(|i| bound.linear_to_coord(i)).collect();
        let walked: Vec<_> = bound.coord_iter_from(5).collect();
        assert_eq!(walked, from_linear);
        assert_eq!(bound.coord_iter().count(), 27);
        assert_eq!(bound.coord_iter_from(27).count(), 0);
    }

    #[test]
    fn contains_test() {
        let bound = AABB::new(matrix![0, 9; 0, 9]);
        assert!(bound.contains(&vector![0, 0]));
        assert!(bound.contains(&vector![9, 9]));
        assert!(!bound.contains(&vector![-1, 0]));
        assert!(!bound.contains(&vector![0, 10]));
    }

    #[test]
    fn check_validity_test() {
        assert!(AABB::new(matrix![0, 0]).check_validity());
        assert!(!AABB::new(matrix![0, 4; 3, 2]).check_validity());
    }

    #[test]
    fn offset_conversion_test() {
        {
            let aabb = AABB::new(matrix![0, 9; 0, 9]);
            let coord_offsets = [
                vector![0, 0],
                vector![-1, 0],
                vector![1, 0],
                vector![0, -1],
                vector![0, 1],
            ];
            let linear_offsets = aabb.coord_offset_to_linear(&coord_offsets);
            assert_eq!(linear_offsets, [0, -10, 10, -1, 1]);
        }

        {
            let aabb = AABB::new(matrix![0, 3; 0, 4; 0, 5]);
            let coord_offsets = [vector![1, 0, 0], vector![0, -1, 0]];
            let linear_offsets = aabb.coord_offset_to_linear(&coord_offsets);
            assert_eq!(linear_offsets, [30, -6]);
        }
    }
}
