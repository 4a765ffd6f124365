//! Data module: ghost-bordered fields and initial data

pub mod field;
pub mod init;

pub use field::{Field, Level, TimeLevels};
pub use init::{Grid, gaussian_pulse, seed_gaussian};
