//! Column-block decomposition of the global grid.
//!
//! The global grid of `nx × ny` interior points is split along x into
//! contiguous blocks of `nx_local = nx / size` columns; rows are never
//! split. Every rank stores its block with a one-cell ghost border, so
//! local column indices run `0..=nx_local+1` and local rows `0..=ny+1`,
//! with the owned interior at `1..=nx_local` × `1..=ny`.
//!
//! Each side of the local block is either a physical domain edge or an
//! interface with a neighbouring rank; [`Decomposition::neighbor`] tells
//! the two apart so boundary conditions and halo exchange are driven by
//! adjacency rather than by rank number.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::debug_invariants::DebugInvariants;
use crate::wave_error::WaveError;

/// Largest supported communicator: one serial rank or two cooperating ranks.
pub const MAX_RANKS: usize = 2;

/// A side of a rank's local block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Low-x edge, local column 0.
    Left,
    /// High-x edge, local column `nx_local + 1`.
    Right,
    /// Low-y edge, local row 0.
    Bottom,
    /// High-y edge, local row `ny + 1`.
    Top,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Bottom, Side::Top];
}

/// Peers of one rank per side; `None` marks a physical boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Index mapping of one rank's share of the global grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    nx: usize,
    ny: usize,
    rank: usize,
    size: usize,
    nx_local: usize,
    neighbors: Neighbors,
}

impl Decomposition {
    /// Decompose an `nx × ny` grid for `rank` out of `size` ranks.
    ///
    /// # Errors
    /// * [`WaveError::InvalidGrid`] if `nx` or `ny` is zero.
    /// * [`WaveError::UnsupportedRankCount`] unless `size` is 1 or 2.
    /// * [`WaveError::RankOutOfRange`] if `rank >= size`.
    /// * [`WaveError::UnevenSplit`] if `nx` is not a multiple of `size`.
    pub fn new(nx: usize, ny: usize, rank: usize, size: usize) -> Result<Self, WaveError> {
        if nx == 0 || ny == 0 {
            return Err(WaveError::InvalidGrid { nx, ny });
        }
        if size == 0 || size > MAX_RANKS {
            return Err(WaveError::UnsupportedRankCount(size));
        }
        if rank >= size {
            return Err(WaveError::RankOutOfRange { rank, size });
        }
        if nx % size != 0 {
            return Err(WaveError::UnevenSplit { nx, size });
        }
        let neighbors = Neighbors {
            left: rank.checked_sub(1),
            right: (rank + 1 < size).then_some(rank + 1),
        };
        let decomp = Self {
            nx,
            ny,
            rank,
            size,
            nx_local: nx / size,
            neighbors,
        };
        decomp.debug_assert_invariants();
        log::debug!(
            "rank {rank}/{size}: owns global columns {:?} of {nx} x {ny}, neighbors {:?}",
            decomp.owned_columns(),
            decomp.neighbors
        );
        Ok(decomp)
    }

    /// Serial decomposition: one rank owning the whole grid.
    pub fn serial(nx: usize, ny: usize) -> Result<Self, WaveError> {
        Self::new(nx, ny, 0, 1)
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Owned interior columns on this rank.
    pub fn nx_local(&self) -> usize {
        self.nx_local
    }

    /// Global column index of local column 0 (the left ghost column).
    pub fn offset(&self) -> usize {
        self.rank * self.nx_local
    }

    /// Global (1-based) column indices owned by this rank.
    pub fn owned_columns(&self) -> RangeInclusive<usize> {
        self.offset() + 1..=self.offset() + self.nx_local
    }

    /// Ghost-inclusive local column bounds, `0..=nx_local+1`.
    pub fn local_columns(&self) -> RangeInclusive<usize> {
        0..=self.nx_local + 1
    }

    /// Ghost-inclusive local row bounds, `0..=ny+1`.
    pub fn local_rows(&self) -> RangeInclusive<usize> {
        0..=self.ny + 1
    }

    /// Owned interior local columns, `1..=nx_local`.
    pub fn interior_columns(&self) -> RangeInclusive<usize> {
        1..=self.nx_local
    }

    /// Interior rows, `1..=ny`.
    pub fn interior_rows(&self) -> RangeInclusive<usize> {
        1..=self.ny
    }

    /// Global column of local column `i` (ghosts included).
    pub fn local_to_global(&self, i: usize) -> usize {
        self.offset() + i
    }

    /// Local column of an owned global column, `None` if another rank owns it.
    pub fn global_to_local(&self, gi: usize) -> Option<usize> {
        self.owned_columns()
            .contains(&gi)
            .then(|| gi - self.offset())
    }

    pub fn neighbors(&self) -> Neighbors {
        self.neighbors
    }

    /// Peer rank across `side`, or `None` for a physical boundary.
    pub fn neighbor(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.neighbors.left,
            Side::Right => self.neighbors.right,
            Side::Bottom | Side::Top => None,
        }
    }

    /// Whether `side` lies on the global domain edge.
    pub fn is_physical(&self, side: Side) -> bool {
        self.neighbor(side).is_none()
    }

    /// Local ghost column on `side` (`Left`/`Right` only).
    pub fn ghost_column(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => Some(0),
            Side::Right => Some(self.nx_local + 1),
            Side::Bottom | Side::Top => None,
        }
    }

    /// Owned column adjacent to the ghost column on `side` (`Left`/`Right` only).
    pub fn edge_column(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => Some(1),
            Side::Right => Some(self.nx_local),
            Side::Bottom | Side::Top => None,
        }
    }

    /// Number of scalars in one ghost-inclusive local array.
    pub fn local_len(&self) -> usize {
        (self.nx_local + 2) * (self.ny + 2)
    }
}

impl DebugInvariants for Decomposition {
    fn validate_invariants(&self) -> Result<(), WaveError> {
        if self.nx_local * self.size != self.nx {
            return Err(WaveError::UnevenSplit {
                nx: self.nx,
                size: self.size,
            });
        }
        if self.rank >= self.size {
            return Err(WaveError::RankOutOfRange {
                rank: self.rank,
                size: self.size,
            });
        }
        if self.nx_local == 0 || self.ny == 0 {
            return Err(WaveError::InvalidGrid {
                nx: self.nx,
                ny: self.ny,
            });
        }
        Ok(())
    }
}
