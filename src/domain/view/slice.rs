use super::*;
use crate::util::*;

/// Immutable row-major copy of a two dimensional piece of a field.
/// Rows follow the first free axis, columns the second.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice2D {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Slice2D {
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Self {
        assert_eq!(rows * cols, values.len(), "slice shape mismatch");
        Slice2D { rows, cols, values }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn row(&self, r: usize) -> &[f64] {
        &self.values[r * self.cols..(r + 1) * self.cols]
    }

    pub fn get(&self, r: usize, c: usize) -> f64 {
        debug_assert!(r < self.rows && c < self.cols);
        self.values[r * self.cols + c]
    }

    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.cols.max(1)).take(self.rows)
    }
}

/// Copy a whole two dimensional field.
pub fn slice_2d<DomainType: DomainView<2>>(domain: &DomainType) -> Slice2D {
    let exclusive_bounds = domain.aabb().exclusive_bounds();
    Slice2D::new(
        exclusive_bounds[0] as usize,
        exclusive_bounds[1] as usize,
        domain.buffer().to_vec(),
    )
}

/// Copy the plane of a three dimensional field where `axis` equals `index`.
/// The two remaining axes keep their order.
pub fn slice_3d<DomainType: DomainView<3>>(
    domain: &DomainType,
    axis: usize,
    index: i32,
) -> Slice2D {
    debug_assert!(axis < 3);
    let aabb = domain.aabb();
    debug_assert!(
        index >= aabb.bounds[(axis, 0)] && index <= aabb.bounds[(axis, 1)],
        "{index} out of range for axis {axis} of {aabb}"
    );
    let (row_axis, col_axis) = match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    let mut values = Vec::with_capacity(
        aabb.exclusive_bounds()[row_axis] as usize
            * aabb.exclusive_bounds()[col_axis] as usize,
    );
    let mut coord = Coord::<3>::zero();
    coord[axis] = index;
    for r in aabb.bounds[(row_axis, 0)]..=aabb.bounds[(row_axis, 1)] {
        coord[row_axis] = r;
        for c in aabb.bounds[(col_axis, 0)]..=aabb.bounds[(col_axis, 1)] {
            coord[col_axis] = c;
            values.push(domain.view(&coord));
        }
    }
    Slice2D::new(
        aabb.exclusive_bounds()[row_axis] as usize,
        aabb.exclusive_bounds()[col_axis] as usize,
        values,
    )
}
