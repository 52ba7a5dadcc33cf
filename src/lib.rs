pub mod build_info;
pub mod config;
pub mod domain;
pub mod example_util;
pub mod image;
pub mod init;
pub mod laplace_3d_example;
pub mod par_slice;
pub mod par_stencil;
pub mod reduction;
pub mod rotation;
pub mod snapshot;
pub mod solver;
pub mod stencil;
pub mod util;
pub mod wave_2d_example;
