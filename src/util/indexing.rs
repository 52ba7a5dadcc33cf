use crate::util::*;

pub fn real_buffer_size<const DIMENSION: usize>(
    exclusive_bound: &Coord<DIMENSION>,
) -> usize {
    let mut accumulator = 1;
    for d in exclusive_bound {
        accumulator *= *d as usize;
    }
    accumulator
}

/// Number of cells strictly inside the outer layer of a grid,
/// i.e. the product of `extent - 2` over all axes.
/// Axes shorter than three cells have no interior.
pub fn interior_buffer_size<const DIMENSION: usize>(
    exclusive_bound: &Coord<DIMENSION>,
) -> usize {
    let mut accumulator = 1;
    for d in exclusive_bound {
        accumulator *= (*d - 2).max(0) as usize;
    }
    accumulator
}

/// Row-major mapping, the last axis is contiguous.
pub fn coord_to_linear<const GRID_DIMENSION: usize>(
    coord: &Coord<GRID_DIMENSION>,
    exclusive_bounds: &Coord<GRID_DIMENSION>,
) -> usize {
    let mut accumulator = 0;
    let mut stride = 1;
    for d in (0..GRID_DIMENSION).rev() {
        debug_assert!(coord[d] >= 0);
        accumulator += coord[d] as usize * stride;
        stride *= exclusive_bounds[d] as usize;
    }
    accumulator
}

pub fn linear_to_coord<const GRID_DIMENSION: usize>(
    linear_index: usize,
    exclusive_bounds: &Coord<GRID_DIMENSION>,
) -> Coord<GRID_DIMENSION> {
    let mut result = Coord::zero();
    let mut index_accumulator = linear_index;
    for d in (0..GRID_DIMENSION).rev() {
        let extent = exclusive_bounds[d] as usize;
        result[d] = (index_accumulator % extent) as i32;
        index_accumulator /= extent;
    }
    result
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn buffer_size_test() {
        {
            let dimensions = vector![5];
            assert_eq!(real_buffer_size(&dimensions), 5);
            assert_eq!(interior_buffer_size(&dimensions), 3);
        }

        {
            let dimensions = vector![5, 7, 9];
            assert_eq!(real_buffer_size(&dimensions), 5 * 7 * 9);
            assert_eq!(interior_buffer_size(&dimensions), 3 * 5 * 7);
        }

        {
            let dimensions = vector![2, 7];
            assert_eq!(interior_buffer_size(&dimensions), 0);
        }
    }

    #[test]
    fn coord_to_linear_index_test() {
        {
            let index = vector![5, 7, 11];
            let bound = vector![20, 20, 20];
            assert_eq!(
                coord_to_linear(&index, &bound),
                5 * 20 * 20 + 7 * 20 + 11
            );
        }

        {
            let index = vector![5, 7];
            let bound = vector![20, 30];
            assert_eq!(coord_to_linear(&index, &bound), 5 * 30 + 7);
        }

        {
            let index = vector![5];
            let bound = vector![20];
            assert_eq!(coord_to_linear(&index, &bound), 5);
        }
    }

    #[test]
    fn linear_to_coord_test() {
        {
            let index = 67;
            let bound = vector![10, 10];
            assert_eq!(linear_to_coord(index, &bound), vector![6, 7]);
        }

        {
            let index = 67;
            let bound = vector![100];
            assert_eq!(linear_to_coord(index, &bound), vector![67]);
        }

        {
            let index = 0;
            let bound = vector![10, 10, 8, 10];
            assert_eq!(linear_to_coord(index, &bound), vector![0, 0, 0, 0]);
        }

        {
            let bound = vector![4, 5, 6];
            for i in 0..real_buffer_size(&bound) {
                let c = linear_to_coord(i, &bound);
                assert_eq!(coord_to_linear(&c, &bound), i);
            }
        }
    }
}
