//! This module has things for managing the grid field,
//! which really means retrieving values based on world coordinates.
//! Fields are stored as one flat row-major buffer and
//! the bounding box translates world coordinates into buffer offsets.

mod boundary;
mod view;

pub use boundary::*;
pub use view::*;
