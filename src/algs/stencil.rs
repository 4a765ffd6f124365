//! Five-point stencil and the two-level time recurrence.
//!
//! Both updates read ghost cells, so boundary conditions and the halo
//! exchange for the levels being read must be complete before calling them.
//! Only owned interior cells `1..=nx_local` × `1..=ny` are written.

use itertools::iproduct;

use crate::config::Recurrence;
use crate::data::field::{Field, TimeLevels};

/// Five-point Laplacian (without the `1/dx²` factor) at interior `(i, j)`.
#[inline]
pub fn laplacian(f: &Field, i: usize, j: usize) -> f64 {
    let c = f.get(i, j);
    let d2x = f.get(i + 1, j) - 2.0 * c + f.get(i - 1, j);
    let d2y = f.get(i, j + 1) - 2.0 * c + f.get(i, j - 1);
    d2x + d2y
}

/// First step from rest: `current = previous + ½·C²·L(previous)`.
///
/// `courant_sq` is `c²·(dt/dx)²`. The initial time derivative is zero, so
/// the first-order Taylor step needs only the seeded level.
pub fn bootstrap(levels: &mut TimeLevels, courant_sq: f64) {
    let (prev, cur) = levels.bootstrap_views();
    for (i, j) in iproduct!(1..=prev.nx_local(), 1..=prev.ny()) {
        let value = prev.get(i, j) + 0.5 * courant_sq * laplacian(prev, i, j);
        cur.set(i, j, value);
    }
}

/// Evaluate "next" from "previous" and "current".
///
/// * [`Recurrence::Literal`]: `next = 2·cur + prev + C²·L(cur)`.
/// * [`Recurrence::Leapfrog`]: `next = 2·cur − prev + C²·L(cur)`.
pub fn step(levels: &mut TimeLevels, courant_sq: f64, recurrence: Recurrence) {
    let sign = match recurrence {
        Recurrence::Literal => 1.0,
        Recurrence::Leapfrog => -1.0,
    };
    let (prev, cur, next) = levels.stencil_views();
    for (i, j) in iproduct!(1..=cur.nx_local(), 1..=cur.ny()) {
        let value =
            2.0 * cur.get(i, j) + sign * prev.get(i, j) + courant_sq * laplacian(cur, i, j);
        next.set(i, j, value);
    }
}
