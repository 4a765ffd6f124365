//! Homogeneous Dirichlet conditions on the physical domain edges.
//!
//! Only sides without a neighbouring rank are physical. The top and bottom
//! ghost rows are always physical and are zeroed in full, which includes the
//! four corner cells; on a rank interface the ghost column is left to the
//! halo exchange.

use crate::data::field::{Field, TimeLevels};
use crate::topology::decomposition::{Decomposition, Side};

/// Zero every physical side of `field`'s ghost border.
pub fn apply_dirichlet(field: &mut Field, decomp: &Decomposition) {
    for side in Side::ALL {
        if !decomp.is_physical(side) {
            continue;
        }
        match side {
            Side::Left | Side::Right => {
                if let Some(i) = decomp.ghost_column(side) {
                    field.fill_column(i, 0.0);
                }
            }
            Side::Bottom => field.fill_row(0, 0.0),
            Side::Top => field.fill_row(decomp.ny() + 1, 0.0),
        }
    }
}

/// Apply [`apply_dirichlet`] to the previous and current levels.
pub fn apply_dirichlet_levels(levels: &mut TimeLevels, decomp: &Decomposition) {
    apply_dirichlet(levels.previous_mut(), decomp);
    apply_dirichlet(levels.current_mut(), decomp);
}
