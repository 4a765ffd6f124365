//! Time loop of one rank, and an in-process launcher for a whole run.
//!
//! Every step runs, in this order:
//!
//! 1. Dirichlet conditions on previous and current,
//! 2. halo exchange of previous and current,
//! 3. stencil update into next,
//! 4. rotation of the three levels.
//!
//! Before the loop, the seeded "previous" level is exchanged once and the
//! bootstrap step fills "current".

use serde::{Deserialize, Serialize};

use crate::algs::boundary::apply_dirichlet_levels;
use crate::algs::communicator::{Communicator, LocalComm};
use crate::algs::halo::{exchange_ghosts, exchange_levels};
use crate::algs::stencil::{bootstrap, step};
use crate::config::{Recurrence, WaveConfig};
use crate::data::field::TimeLevels;
use crate::data::init::seed_gaussian;
use crate::topology::decomposition::Decomposition;
use crate::wave_error::WaveError;

/// Final state of one rank after a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankReport {
    pub rank: usize,
    pub size: usize,
    pub steps: usize,
    /// First global (1-based) column owned by the rank.
    pub first_column: usize,
    pub nx_local: usize,
    pub ny: usize,
    /// Owned interior of the final "current" level, column-major,
    /// `nx_local` columns of `ny` values.
    pub values: Vec<f64>,
    pub max_abs: f64,
}

impl RankReport {
    /// Value at global column `gi`, row `j`, if this rank owns it.
    pub fn value(&self, gi: usize, j: usize) -> Option<f64> {
        let li = gi.checked_sub(self.first_column)?;
        if li >= self.nx_local || !(1..=self.ny).contains(&j) {
            return None;
        }
        self.values.get(li * self.ny + j - 1).copied()
    }
}

/// Solver state of one rank.
pub struct WaveSolver<'c, C: Communicator> {
    config: WaveConfig,
    decomp: Decomposition,
    levels: TimeLevels,
    comm: &'c C,
    steps_taken: usize,
}

impl<'c, C: Communicator> WaveSolver<'c, C> {
    /// Validate `config`, decompose for `comm`'s rank and allocate the levels.
    pub fn new(config: WaveConfig, comm: &'c C) -> Result<Self, WaveError> {
        config.validate()?;
        let decomp = Decomposition::new(config.nx, config.ny, comm.rank(), comm.size())?;
        if config.recurrence == Recurrence::Leapfrog {
            log::warn!(
                "using the leapfrog recurrence (next = 2*cur - prev + ...) instead of the literal one"
            );
        }
        let levels = TimeLevels::new(&decomp);
        Ok(Self {
            config,
            decomp,
            levels,
            comm,
            steps_taken: 0,
        })
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn decomposition(&self) -> &Decomposition {
        &self.decomp
    }

    pub fn levels(&self) -> &TimeLevels {
        &self.levels
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Seed "previous" with the Gaussian pulse, exchange it and bootstrap "current".
    pub fn initialize(&mut self) -> Result<(), WaveError> {
        seed_gaussian(self.levels.previous_mut(), &self.decomp);
        exchange_ghosts(self.levels.previous_mut(), &self.decomp, self.comm)?;
        bootstrap(&mut self.levels, self.config.courant_sq());
        self.steps_taken = 0;
        log::debug!("rank {}: bootstrap complete", self.decomp.rank());
        Ok(())
    }

    /// One time step: boundaries, exchange, stencil, rotation.
    pub fn advance(&mut self) -> Result<(), WaveError> {
        apply_dirichlet_levels(&mut self.levels, &self.decomp);
        exchange_levels(&mut self.levels, &self.decomp, self.comm)?;
        step(&mut self.levels, self.config.courant_sq(), self.config.recurrence);
        self.levels.rotate();
        self.steps_taken += 1;
        log::debug!(
            "rank {}: step {} done, max |u| = {:e}",
            self.decomp.rank(),
            self.steps_taken,
            self.levels.current().interior_max_abs()
        );
        Ok(())
    }

    /// Initialise and take `config.steps` steps.
    pub fn run(&mut self) -> Result<RankReport, WaveError> {
        self.initialize()?;
        for _ in 0..self.config.steps {
            self.advance()?;
        }
        log::info!(
            "process {} of {} finished",
            self.decomp.rank() + 1,
            self.decomp.size()
        );
        Ok(self.report())
    }

    /// `(global column, row, value)` of every owned cell of "current".
    pub fn owned_interior(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let cur = self.levels.current();
        self.decomp.interior_columns().flat_map(move |i| {
            let gi = self.decomp.local_to_global(i);
            cur.column(i)
                .iter()
                .enumerate()
                .map(move |(r, &v)| (gi, r + 1, v))
        })
    }

    /// Snapshot of the current level.
    pub fn report(&self) -> RankReport {
        let cur = self.levels.current();
        RankReport {
            rank: self.decomp.rank(),
            size: self.decomp.size(),
            steps: self.steps_taken,
            first_column: *self.decomp.owned_columns().start(),
            nx_local: self.decomp.nx_local(),
            ny: self.decomp.ny(),
            values: self
                .decomp
                .interior_columns()
                .flat_map(|i| cur.column(i).iter().copied())
                .collect(),
            max_abs: cur.interior_max_abs(),
        }
    }
}

/// Run every rank of `config` on scoped threads connected by [`LocalComm`].
///
/// `ranks` is 1 for a serial run or 2 for the split run. Reports come back
/// ordered by rank.
pub fn run_in_process(config: &WaveConfig, ranks: usize) -> Result<Vec<RankReport>, WaveError> {
    // Fail before spawning, so a bad layout cannot leave a peer blocked.
    config.validate()?;
    for rank in 0..ranks {
        Decomposition::new(config.nx, config.ny, rank, ranks)?;
    }
    let comms = LocalComm::universe(ranks);
    std::thread::scope(|s| {
        let handles: Vec<_> = comms
            .iter()
            .map(|comm| {
                let config = config.clone();
                s.spawn(move || WaveSolver::new(config, comm)?.run())
            })
            .collect();
        handles
            .into_iter()
            .enumerate()
            .map(|(rank, h)| h.join().map_err(|_| WaveError::RankPanicked(rank))?)
            .collect()
    })
}

/// Assemble the global `nx × ny` interior, indexed `[gi - 1][j - 1]`, from rank reports.
///
/// Fails if a report's columns or rows fall outside the grid, or if its
/// values do not fill `nx_local × ny`.
pub fn stitch(reports: &[RankReport], nx: usize, ny: usize) -> Result<Vec<Vec<f64>>, WaveError> {
    let mut global = vec![vec![0.0; ny]; nx];
    for r in reports {
        let out_of_grid = || WaveError::ReportOutOfGrid {
            rank: r.rank,
            first_column: r.first_column,
            nx_local: r.nx_local,
            ny: r.ny,
            nx,
            grid_ny: ny,
        };
        let start = r.first_column.checked_sub(1).ok_or_else(out_of_grid)?;
        let end = start.checked_add(r.nx_local).ok_or_else(out_of_grid)?;
        if r.ny != ny || end > nx {
            return Err(out_of_grid());
        }
        let expected = r.nx_local * ny;
        if r.values.len() != expected {
            return Err(WaveError::FieldSizeMismatch {
                expected,
                got: r.values.len(),
            });
        }
        if ny == 0 {
            continue;
        }
        for (column, values) in global[start..end]
            .iter_mut()
            .zip(r.values.chunks(ny))
        {
            column.copy_from_slice(values);
        }
    }
    Ok(global)
}
