//! Ghost-bordered scalar fields and the three time levels of the solver.
//!
//! A [`Field`] stores `(nx_local + 2) × (ny + 2)` values in one contiguous
//! `Vec<f64>`, column-major: column `i` is the contiguous run
//! `data[i * (ny + 2) .. (i + 1) * (ny + 2)]`. Interface columns can
//! therefore be shipped to a neighbour as a single slice.

use crate::debug_invariants::DebugInvariants;
use crate::topology::decomposition::Decomposition;
use crate::wave_error::WaveError;

/// One rank-local scalar field including its ghost border.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    nx_local: usize,
    ny: usize,
    data: Vec<f64>,
}

impl Field {
    /// Zero-filled field with `nx_local` owned columns and `ny` interior rows.
    pub fn new(nx_local: usize, ny: usize) -> Self {
        let field = Self {
            nx_local,
            ny,
            data: vec![0.0; (nx_local + 2) * (ny + 2)],
        };
        field.debug_assert_invariants();
        field
    }

    /// Field sized for `decomp`'s local block.
    pub fn for_decomposition(decomp: &Decomposition) -> Self {
        Self::new(decomp.nx_local(), decomp.ny())
    }

    pub fn nx_local(&self) -> usize {
        self.nx_local
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Length of one stored column (`ny + 2`).
    #[inline]
    fn stride(&self) -> usize {
        self.ny + 2
    }

    #[inline]
    fn in_bounds(&self, i: usize, j: usize) -> bool {
        i <= self.nx_local + 1 && j <= self.ny + 1
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            self.in_bounds(i, j),
            "field index ({i}, {j}) out of bounds [0, {}] x [0, {}]",
            self.nx_local + 1,
            self.ny + 1
        );
        i * self.stride() + j
    }

    fn out_of_bounds(&self, i: usize, j: usize) -> WaveError {
        WaveError::IndexOutOfBounds {
            i,
            j,
            max_i: self.nx_local + 1,
            max_j: self.ny + 1,
        }
    }

    /// Value at local `(i, j)`.
    ///
    /// # Panics
    /// If `(i, j)` lies outside `[0, nx_local+1] × [0, ny+1]`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.offset(i, j)]
    }

    /// Store `value` at local `(i, j)`.
    ///
    /// # Panics
    /// If `(i, j)` lies outside `[0, nx_local+1] × [0, ny+1]`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let k = self.offset(i, j);
        self.data[k] = value;
    }

    /// Non-panicking variant of [`get`](Self::get).
    pub fn try_get(&self, i: usize, j: usize) -> Result<f64, WaveError> {
        if self.in_bounds(i, j) {
            Ok(self.data[i * self.stride() + j])
        } else {
            Err(self.out_of_bounds(i, j))
        }
    }

    /// Non-panicking variant of [`set`](Self::set).
    pub fn try_set(&mut self, i: usize, j: usize, value: f64) -> Result<(), WaveError> {
        if self.in_bounds(i, j) {
            let k = i * self.stride() + j;
            self.data[k] = value;
            Ok(())
        } else {
            Err(self.out_of_bounds(i, j))
        }
    }

    /// Interior rows `1..=ny` of column `i`.
    pub fn column(&self, i: usize) -> &[f64] {
        let start = self.offset(i, 1);
        &self.data[start..start + self.ny]
    }

    /// Mutable interior rows `1..=ny` of column `i`.
    pub fn column_mut(&mut self, i: usize) -> &mut [f64] {
        let start = self.offset(i, 1);
        let ny = self.ny;
        &mut self.data[start..start + ny]
    }

    /// Set every entry of column `i`, ghost rows included.
    pub fn fill_column(&mut self, i: usize, value: f64) {
        let start = self.offset(i, 0);
        let stride = self.stride();
        self.data[start..start + stride].fill(value);
    }

    /// Set entry `j` of every column, ghost columns included.
    pub fn fill_row(&mut self, j: usize, value: f64) {
        assert!(j <= self.ny + 1, "field row {j} out of bounds [0, {}]", self.ny + 1);
        let stride = self.stride();
        self.data
            .iter_mut()
            .skip(j)
            .step_by(stride)
            .for_each(|v| *v = value);
    }

    /// Raw column-major storage, ghosts included.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Largest absolute value over the owned interior.
    pub fn interior_max_abs(&self) -> f64 {
        (1..=self.nx_local)
            .flat_map(|i| self.column(i).iter())
            .fold(0.0_f64, |m, v| m.max(v.abs()))
    }
}

impl DebugInvariants for Field {
    fn validate_invariants(&self) -> Result<(), WaveError> {
        let expected = (self.nx_local + 2) * (self.ny + 2);
        if self.data.len() != expected {
            return Err(WaveError::FieldSizeMismatch {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }
}

/// Logical time level of a [`TimeLevels`] slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Level {
    Previous,
    Current,
    Next,
}

/// Three equally sized fields rotated through the previous, current and
/// next time levels without reallocation.
#[derive(Clone, Debug)]
pub struct TimeLevels {
    // [previous, current, next]
    levels: [Field; 3],
}

impl TimeLevels {
    /// Three zeroed fields for `decomp`'s local block.
    pub fn new(decomp: &Decomposition) -> Self {
        let field = Field::for_decomposition(decomp);
        Self {
            levels: [field.clone(), field.clone(), field],
        }
    }

    fn index(level: Level) -> usize {
        match level {
            Level::Previous => 0,
            Level::Current => 1,
            Level::Next => 2,
        }
    }

    pub fn get(&self, level: Level) -> &Field {
        &self.levels[Self::index(level)]
    }

    pub fn get_mut(&mut self, level: Level) -> &mut Field {
        &mut self.levels[Self::index(level)]
    }

    pub fn previous(&self) -> &Field {
        self.get(Level::Previous)
    }

    pub fn current(&self) -> &Field {
        self.get(Level::Current)
    }

    pub fn next(&self) -> &Field {
        self.get(Level::Next)
    }

    pub fn previous_mut(&mut self) -> &mut Field {
        self.get_mut(Level::Previous)
    }

    pub fn current_mut(&mut self) -> &mut Field {
        self.get_mut(Level::Current)
    }

    /// `(&previous, &mut current)`, for the bootstrap update.
    pub fn bootstrap_views(&mut self) -> (&Field, &mut Field) {
        let (prev, rest) = self.levels.split_at_mut(1);
        (&prev[0], &mut rest[0])
    }

    /// `(&previous, &current, &mut next)`, for the per-step update.
    pub fn stencil_views(&mut self) -> (&Field, &Field, &mut Field) {
        let (head, next) = self.levels.split_at_mut(2);
        (&head[0], &head[1], &mut next[0])
    }

    /// next → current, current → previous; the old previous becomes next.
    pub fn rotate(&mut self) {
        self.levels.rotate_left(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_major_layout() {
        let mut f = Field::new(2, 3);
        assert_eq!(f.as_slice().len(), 4 * 5);
        f.set(1, 2, 7.0);
        assert_eq!(f.as_slice()[5 + 2], 7.0);
        assert_eq!(f.column(1), &[0.0, 7.0, 0.0]);
    }

    #[test]
    fn column_excludes_ghost_rows() {
        let mut f = Field::new(1, 2);
        f.fill_column(2, 3.0);
        assert_eq!(f.column(2), &[3.0, 3.0]);
        assert_eq!(f.get(2, 0), 3.0);
        assert_eq!(f.get(2, 3), 3.0);
        f.column_mut(0).copy_from_slice(&[1.0, 2.0]);
        assert_eq!(f.get(0, 0), 0.0);
        assert_eq!(f.get(0, 1), 1.0);
        assert_eq!(f.get(0, 2), 2.0);
    }

    #[test]
    fn fill_row_touches_every_column() {
        let mut f = Field::new(2, 2);
        f.fill_row(3, -1.0);
        for i in 0..=3 {
            assert_eq!(f.get(i, 3), -1.0);
            assert_eq!(f.get(i, 2), 0.0);
        }
    }

    #[test]
    fn try_accessors_report_out_of_bounds() {
        let mut f = Field::new(2, 2);
        assert!(f.try_set(3, 3, 1.0).is_ok());
        assert_eq!(f.try_get(3, 3).unwrap(), 1.0);
        assert!(matches!(
            f.try_get(4, 0),
            Err(WaveError::IndexOutOfBounds { i: 4, j: 0, max_i: 3, max_j: 3 })
        ));
        assert!(f.try_set(0, 4, 1.0).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_panics_outside_ghost_border() {
        Field::new(2, 2).get(0, 4);
    }

    #[test]
    fn interior_max_abs_ignores_ghosts() {
        let mut f = Field::new(2, 2);
        f.set(0, 1, 100.0);
        f.set(2, 2, -3.0);
        assert_eq!(f.interior_max_abs(), 3.0);
    }

    #[test]
    fn rotation_cycles_levels() {
        let d = Decomposition::serial(2, 2).unwrap();
        let mut levels = TimeLevels::new(&d);
        levels.previous_mut().set(1, 1, 1.0);
        levels.current_mut().set(1, 1, 2.0);
        {
            let (_, _, next) = levels.stencil_views();
            next.set(1, 1, 3.0);
        }
        levels.rotate();
        assert_eq!(levels.previous().get(1, 1), 2.0);
        assert_eq!(levels.current().get(1, 1), 3.0);
        assert_eq!(levels.next().get(1, 1), 1.0);
    }
}
