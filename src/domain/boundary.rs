use crate::domain::*;
use crate::util::*;

/// Which end of an axis a face sits on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Low,
    High,
}

/// A face of the grid held at a constant (Dirichlet) value.
/// The stencil kernel only writes interior cells, so once assigned
/// the face keeps its value for the whole run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundaryFace {
    pub axis: usize,
    pub side: Side,
    pub value: f64,
}

impl BoundaryFace {
    pub fn new(axis: usize, side: Side, value: f64) -> Self {
        BoundaryFace { axis, side, value }
    }

    /// World index of the face along its axis.
    pub fn index<const GRID_DIMENSION: usize>(
        &self,
        aabb: &AABB<GRID_DIMENSION>,
    ) -> i32 {
        match self.side {
            Side::Low => aabb.bounds[(self.axis, 0)],
            Side::High => aabb.bounds[(self.axis, 1)],
        }
    }

    pub fn apply<
        const GRID_DIMENSION: usize,
        DomainType: DomainView<GRID_DIMENSION>,
    >(
        &self,
        domain: &mut DomainType,
        chunk_size: usize,
    ) {
        let index = self.index(domain.aabb());
        domain.par_set_face(self.axis, index, self.value, chunk_size);
    }
}

/// Apply faces in order, later faces win on shared edges.
pub fn apply_faces<
    const GRID_DIMENSION: usize,
    DomainType: DomainView<GRID_DIMENSION>,
>(
    faces: &[BoundaryFace],
    domain: &mut DomainType,
    chunk_size: usize,
) {
    for face in faces {
        face.apply(domain, chunk_size);
    }
}
