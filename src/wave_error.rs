//! WaveError: unified error type for wavetoy public APIs
//!
//! Every fallible operation in the crate (configuration, decomposition,
//! field access, halo exchange) reports through this enum instead of
//! panicking.

use thiserror::Error;

/// Unified error type for wavetoy operations.
#[derive(Debug, Error)]
pub enum WaveError {
    /// Grid has a zero extent along some axis.
    #[error("Invalid grid: nx = {nx}, ny = {ny} (both must be at least 1)")]
    InvalidGrid { nx: usize, ny: usize },
    /// `nx` cannot be split evenly among the ranks.
    #[error("Cannot split nx = {nx} evenly across {size} ranks")]
    UnevenSplit { nx: usize, size: usize },
    /// Only one (serial) or two ranks are supported.
    #[error("Unsupported rank count {0}: the solver runs on exactly 1 or 2 ranks")]
    UnsupportedRankCount(usize),
    /// Rank identity outside `0..size`.
    #[error("Rank {rank} out of range for communicator of size {size}")]
    RankOutOfRange { rank: usize, size: usize },
    /// `dt = 1/(steps-1)` needs at least two steps.
    #[error("Invalid step count {0}: at least 2 steps are required")]
    InvalidStepCount(usize),
    /// Wave speed must be finite and positive.
    #[error("Invalid wave speed {0}")]
    InvalidWaveSpeed(f64),
    /// Local field index outside the ghost-inclusive bounds.
    #[error("Index ({i}, {j}) out of bounds for local field [0, {max_i}] x [0, {max_j}]")]
    IndexOutOfBounds {
        i: usize,
        j: usize,
        max_i: usize,
        max_j: usize,
    },
    /// Field storage does not match its declared extents.
    #[error("Field holds {got} values, expected {expected}")]
    FieldSizeMismatch { expected: usize, got: usize },
    /// A rank report does not fit the global grid it is stitched into.
    #[error(
        "Report of rank {rank} ({nx_local} columns from {first_column}, {ny} rows) \
         does not fit a {nx} x {grid_ny} grid"
    )]
    ReportOutOfGrid {
        rank: usize,
        first_column: usize,
        nx_local: usize,
        ny: usize,
        nx: usize,
        grid_ny: usize,
    },
    /// Communication with a neighbour failed.
    #[error("Communication error with rank {neighbor}: {source}")]
    CommError {
        neighbor: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A received message had an unexpected length.
    #[error("Buffer size mismatch from rank {neighbor}: expected {expected} bytes, got {got}")]
    BufferSizeMismatch {
        neighbor: usize,
        expected: usize,
        got: usize,
    },
    /// MPI could not be initialised (or was already initialised).
    #[error("MPI initialization failed")]
    MpiInit,
    /// A rank thread of an in-process run panicked.
    #[error("Rank {0} panicked during an in-process run")]
    RankPanicked(usize),
    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for WaveError {
    fn from(e: serde_json::Error) -> Self {
        WaveError::Config(e.to_string())
    }
}
