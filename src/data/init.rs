//! Initial data: grid-to-physical coordinate mapping and the Gaussian pulse.

use itertools::iproduct;

use crate::data::field::Field;
use crate::topology::decomposition::Decomposition;

/// Width parameter `w` of the pulse `exp(-x²/w - y²/w)`.
pub const PULSE_WIDTH: f64 = 0.01;

/// Affine map from global grid indices to the physical square `(-1, 1)²`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    pub dx: f64,
    pub dy: f64,
}

impl Grid {
    /// Spacing for `nx × ny` interior points spanning `(-1, 1)` on both axes.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            dx: 2.0 / (nx as f64 + 1.0),
            dy: 2.0 / (ny as f64 + 1.0),
        }
    }

    pub fn for_decomposition(decomp: &Decomposition) -> Self {
        Self::new(decomp.nx(), decomp.ny())
    }

    /// Physical `(x, y)` of global point `(gi, j)`, both 1-based.
    pub fn coords(&self, gi: usize, j: usize) -> (f64, f64) {
        (-1.0 + gi as f64 * self.dx, -1.0 + j as f64 * self.dy)
    }
}

/// Narrow Gaussian centred at the origin, peak value 1.
pub fn gaussian_pulse(x: f64, y: f64) -> f64 {
    (-x * x / PULSE_WIDTH - y * y / PULSE_WIDTH).exp()
}

/// Write `profile(x, y)` into every owned interior cell of `field`.
///
/// Ghost cells are neither read nor written.
pub fn seed_with<F>(field: &mut Field, decomp: &Decomposition, profile: F)
where
    F: Fn(f64, f64) -> f64,
{
    let grid = Grid::for_decomposition(decomp);
    for (i, j) in iproduct!(decomp.interior_columns(), decomp.interior_rows()) {
        let (x, y) = grid.coords(decomp.local_to_global(i), j);
        field.set(i, j, profile(x, y));
    }
    log::debug!(
        "rank {}: seeded {} x {} owned cells",
        decomp.rank(),
        decomp.nx_local(),
        decomp.ny()
    );
}

/// Seed `field` with [`gaussian_pulse`].
pub fn seed_gaussian(field: &mut Field, decomp: &Decomposition) {
    seed_with(field, decomp, gaussian_pulse);
}
