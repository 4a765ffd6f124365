#![cfg_attr(docsrs, feature(doc_cfg))]
//! # wavetoy
//!
//! wavetoy is an explicit finite-difference solver for the 2D scalar wave
//! equation `u_tt = c² (u_xx + u_yy)` on the square `(-1, 1)²`, split across
//! two cooperating ranks that exchange one ghost column per time level and
//! step.
//!
//! ## Features
//! - Column-block domain decomposition with per-side adjacency
//! - Ghost-bordered contiguous field storage with three rotating time levels
//! - Gaussian-pulse initial data, homogeneous Dirichlet boundaries
//! - Five-point stencil with a first-order bootstrap step and a two-level recurrence
//! - Pluggable communication backends (serial, in-process threads, MPI) for ghost exchange
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! wavetoy = "0.1"
//! # features = ["mpi-support"]
//! ```
//!
//! A two-rank run inside one process:
//!
//! ```
//! use wavetoy::prelude::*;
//!
//! let config = WaveConfig::new(8, 8, 4);
//! let reports = run_in_process(&config, 2).unwrap();
//! assert_eq!(reports.len(), 2);
//! ```
//!
//! Under MPI, build a [`WaveSolver`](algs::driver::WaveSolver) over
//! `MpiComm` on each of two processes and call `run`.
//!
//! ## Step ordering
//!
//! Each step applies the boundary conditions, then exchanges ghosts, then
//! evaluates the stencil, then rotates the levels. Ghost values are only
//! meaningful right after the first two stages.
//!
//! ## Recurrence
//!
//! The default [`Recurrence::Literal`](config::Recurrence::Literal) computes
//! `next = 2·cur + prev + C²·L(cur)`, reproducing the reference program
//! including its `+prev` term; the standard leapfrog scheme uses `-prev` and
//! is available as [`Recurrence::Leapfrog`](config::Recurrence::Leapfrog).

pub mod algs;
pub mod config;
pub mod data;
pub mod debug_invariants;
pub mod topology;
pub mod wave_error;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::communicator::{Communicator, LocalComm, NoComm};
    #[cfg(feature = "mpi-support")]
    pub use crate::algs::communicator::MpiComm;
    pub use crate::algs::driver::{RankReport, WaveSolver, run_in_process, stitch};
    pub use crate::config::{Recurrence, WaveConfig};
    pub use crate::data::field::{Field, TimeLevels};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::topology::decomposition::{Decomposition, Side};
    pub use crate::wave_error::WaveError;
}
