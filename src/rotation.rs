//! Role rotation over a fixed set of field buffers.
//!
//! Roles are positions relative to a head index, ordered from the
//! oldest time level to the one being written:
//! `[current, next]` for two buffers, `[old, current, next]` for three.
//! Rotating moves the head, so the freshly written buffer becomes
//! `current` and the oldest buffer is recycled as `next`.
//! Values are never copied.

use crate::domain::*;

pub struct BufferRing<const GRID_DIMENSION: usize, const BUFFERS: usize> {
    buffers: [OwnedDomain<GRID_DIMENSION>; BUFFERS],
    head: usize,
    rotations: usize,
}

/// `[current, next]`
pub type BufferPair<const GRID_DIMENSION: usize> =
    BufferRing<GRID_DIMENSION, 2>;

/// `[old, current, next]`
pub type BufferTriple<const GRID_DIMENSION: usize> =
    BufferRing<GRID_DIMENSION, 3>;

impl<const GRID_DIMENSION: usize, const BUFFERS: usize>
    BufferRing<GRID_DIMENSION, BUFFERS>
{
    /// Buffers are given in role order, oldest first.
    pub fn new(buffers: [OwnedDomain<GRID_DIMENSION>; BUFFERS]) -> Self {
        assert!(BUFFERS >= 2, "a ring needs at least two buffers");
        debug_assert!(buffers.iter().all(|b| b.aabb() == buffers[0].aabb()));
        BufferRing {
            buffers,
            head: 0,
            rotations: 0,
        }
    }

    /// Every role starts from a copy of the same field,
    /// so boundary values agree whichever buffer holds a role.
    pub fn from_initial(initial: &OwnedDomain<GRID_DIMENSION>) -> Self {
        Self::new(std::array::from_fn(|_| initial.clone()))
    }

    fn slot(&self, role: usize) -> usize {
        (self.head + role) % BUFFERS
    }

    /// Buffer holding a role, `0` is the oldest, `BUFFERS - 1` is `next`.
    pub fn role(&self, role: usize) -> &OwnedDomain<GRID_DIMENSION> {
        debug_assert!(role < BUFFERS);
        &self.buffers[self.slot(role)]
    }

    pub fn current(&self) -> &OwnedDomain<GRID_DIMENSION> {
        self.role(BUFFERS - 2)
    }

    pub fn next(&self) -> &OwnedDomain<GRID_DIMENSION> {
        self.role(BUFFERS - 1)
    }

    /// Distinct mutable handles in role order.
    /// Callers read the leading roles and write only the last one.
    pub fn roles_mut(&mut self) -> [&mut OwnedDomain<GRID_DIMENSION>; BUFFERS] {
        let mut roles = self.buffers.each_mut();
        roles.rotate_left(self.head);
        roles
    }

    /// Promote `next` to `current`, and so on down the ring.
    pub fn rotate(&mut self) {
        self.head = (self.head + 1) % BUFFERS;
        self.rotations += 1;
    }

    pub fn rotations(&self) -> usize {
        self.rotations
    }

    pub fn into_current(self) -> OwnedDomain<GRID_DIMENSION> {
        let slot = self.slot(BUFFERS - 2);
        Vec::from(self.buffers).swap_remove(slot)
    }
}
