use proptest::prelude::*;

use wavetoy::algs::boundary::apply_dirichlet;
use wavetoy::data::field::Field;
use wavetoy::data::init::{Grid, seed_gaussian};
use wavetoy::prelude::*;

proptest! {
    #[test]
    fn two_ranks_cover_columns_exactly(half in 1usize..500, ny in 1usize..50) {
        let nx = 2 * half;
        let d0 = Decomposition::new(nx, ny, 0, 2).unwrap();
        let d1 = Decomposition::new(nx, ny, 1, 2).unwrap();
        let r0 = d0.owned_columns();
        let r1 = d1.owned_columns();
        prop_assert_eq!(*r0.start(), 1);
        prop_assert_eq!(*r0.end() + 1, *r1.start());
        prop_assert_eq!(*r1.end(), nx);
        prop_assert_eq!(d0.nx_local(), d1.nx_local());
        for gi in 1..=nx {
            let owners = [&d0, &d1].iter().filter(|d| d.global_to_local(gi).is_some()).count();
            prop_assert_eq!(owners, 1);
        }
    }

    #[test]
    fn odd_column_counts_are_rejected(half in 0usize..500, ny in 1usize..10) {
        let nx = 2 * half + 1;
        prop_assert!(
            matches!(
                Decomposition::new(nx, ny, 0, 2),
                Err(WaveError::UnevenSplit { .. })
            ),
            "odd nx must not be split"
        );
    }

    #[test]
    fn dirichlet_is_idempotent(
        rank in 0usize..2,
        half in 1usize..8,
        ny in 1usize..8,
        values in proptest::collection::vec(-10.0f64..10.0, 400),
    ) {
        let d = Decomposition::new(2 * half, ny, rank, 2).unwrap();
        let mut f = Field::for_decomposition(&d);
        let mut it = values.iter().cycle();
        for i in d.local_columns() {
            for j in d.local_rows() {
                f.set(i, j, *it.next().unwrap());
            }
        }
        apply_dirichlet(&mut f, &d);
        let once = f.clone();
        apply_dirichlet(&mut f, &d);
        prop_assert_eq!(once, f);
    }

    #[test]
    fn seeding_only_writes_owned_interior(rank in 0usize..2, half in 1usize..20, ny in 1usize..20) {
        let d = Decomposition::new(2 * half, ny, rank, 2).unwrap();
        let mut f = Field::for_decomposition(&d);
        seed_gaussian(&mut f, &d);
        for j in d.local_rows() {
            prop_assert_eq!(f.get(0, j), 0.0);
            prop_assert_eq!(f.get(half + 1, j), 0.0);
        }
        for i in d.local_columns() {
            prop_assert_eq!(f.get(i, 0), 0.0);
            prop_assert_eq!(f.get(i, ny + 1), 0.0);
        }
    }
}

#[test]
fn gaussian_peak_sits_at_cell_nearest_origin() {
    let (nx, ny) = (4, 4);
    let grid = Grid::new(nx, ny);
    let mut best = (0.0f64, 0usize, 0usize);
    for rank in 0..2 {
        let d = Decomposition::new(nx, ny, rank, 2).unwrap();
        let mut f = Field::for_decomposition(&d);
        seed_gaussian(&mut f, &d);
        for i in d.interior_columns() {
            for j in d.interior_rows() {
                let v = f.get(i, j);
                if v > best.0 {
                    best = (v, d.local_to_global(i), j);
                }
            }
        }
        // Extreme corners of the grid are essentially zero.
        let corner = if rank == 0 { f.get(1, 1) } else { f.get(2, 4) };
        assert!(corner < 1e-30);
    }
    // x = ±0.2 are the grid lines closest to the origin.
    let (x, y) = grid.coords(best.1, best.2);
    assert!(x.abs() < 0.21 && y.abs() < 0.21);
    assert!((best.0 - (-8.0f64).exp()).abs() < 1e-12);
}
