//! Re-export public algorithms.

pub mod boundary;
pub mod communicator;
pub mod driver;
pub mod halo;
pub mod stencil;
pub mod wire;

pub use boundary::apply_dirichlet;
pub use driver::{WaveSolver, run_in_process};
pub use halo::exchange_ghosts;
