//! Ghost-column exchange across rank interfaces.
//!
//! Each interface carries exactly one column of `ny` values in each
//! direction (ghost rows 0 and `ny + 1` are not sent). With blocking
//! synchronous sends the two sides of an interface must not both send
//! first, so the order is fixed by which side the peer lies on:
//!
//! * peer on the **right**: send own column `nx_local` ([`HaloTag::Eastward`]),
//!   then receive ghost column `nx_local + 1` ([`HaloTag::Westward`]);
//! * peer on the **left**: receive ghost column `0` ([`HaloTag::Eastward`]),
//!   then send own column `1` ([`HaloTag::Westward`]).
//!
//! Left interfaces are handled before right ones, so in a chain of ranks every
//! send meets a receive that is already posted or about to be.

use crate::algs::communicator::Communicator;
use crate::algs::wire::{HaloTag, cast_slice, cast_slice_mut};
use crate::data::field::{Field, TimeLevels};
use crate::topology::decomposition::{Decomposition, Side};
use crate::wave_error::WaveError;

fn send_column<C: Communicator>(
    field: &Field,
    i: usize,
    peer: usize,
    tag: HaloTag,
    comm: &C,
) -> Result<(), WaveError> {
    log::trace!(
        "rank {} -> {peer}: column {i} ({tag:?}, {} values)",
        comm.rank(),
        field.ny()
    );
    comm.send(peer, tag.as_u16(), cast_slice(field.column(i)))
}

fn recv_column<C: Communicator>(
    field: &mut Field,
    i: usize,
    peer: usize,
    tag: HaloTag,
    comm: &C,
) -> Result<(), WaveError> {
    comm.recv_into(peer, tag.as_u16(), cast_slice_mut(field.column_mut(i)))?;
    log::trace!("rank {} <- {peer}: ghost column {i} ({tag:?})", comm.rank());
    Ok(())
}

/// Refresh the interface ghost columns of `field` from the neighbouring ranks.
///
/// Physical sides are skipped; a serial decomposition exchanges nothing.
/// Blocks until every neighbour has completed its half of the exchange.
pub fn exchange_ghosts<C: Communicator>(
    field: &mut Field,
    decomp: &Decomposition,
    comm: &C,
) -> Result<(), WaveError> {
    if let Some(peer) = decomp.neighbor(Side::Left) {
        recv_column(field, 0, peer, HaloTag::Eastward, comm)?;
        send_column(field, 1, peer, HaloTag::Westward, comm)?;
    }
    if let Some(peer) = decomp.neighbor(Side::Right) {
        let nx_local = decomp.nx_local();
        send_column(field, nx_local, peer, HaloTag::Eastward, comm)?;
        recv_column(field, nx_local + 1, peer, HaloTag::Westward, comm)?;
    }
    Ok(())
}

/// Exchange "previous" and then "current".
///
/// Only "current" changed since the last exchange; "previous" is refreshed
/// too so both levels carry this step's ghost values.
pub fn exchange_levels<C: Communicator>(
    levels: &mut TimeLevels,
    decomp: &Decomposition,
    comm: &C,
) -> Result<(), WaveError> {
    exchange_ghosts(levels.previous_mut(), decomp, comm)?;
    exchange_ghosts(levels.current_mut(), decomp, comm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::communicator::{LocalComm, NoComm};

    fn filled(decomp: &Decomposition, base: f64) -> Field {
        let mut f = Field::for_decomposition(decomp);
        for i in decomp.interior_columns() {
            for j in decomp.interior_rows() {
                f.set(i, j, base + 10.0 * i as f64 + j as f64);
            }
        }
        f
    }

    #[test]
    fn two_rank_exchange_fills_interface_ghosts() {
        let comms = LocalComm::universe(2);
        let results: Vec<Field> = std::thread::scope(|s| {
            let handles: Vec<_> = comms
                .iter()
                .map(|comm| {
                    s.spawn(move || {
                        let d = Decomposition::new(6, 4, comm.rank(), 2).unwrap();
                        let mut f = filled(&d, 100.0 * comm.rank() as f64);
                        exchange_ghosts(&mut f, &d, comm).unwrap();
                        f
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        let (f0, f1) = (&results[0], &results[1]);
        // Rank 0's right ghost column is rank 1's first owned column.
        assert_eq!(f0.column(4), f1.column(1));
        // Rank 1's left ghost column is rank 0's last owned column.
        assert_eq!(f1.column(0), f0.column(3));
        // Ghost rows and physical sides untouched.
        assert_eq!(f0.get(4, 0), 0.0);
        assert_eq!(f0.get(4, 5), 0.0);
        assert!(f0.column(0).iter().all(|&v| v == 0.0));
        assert!(f1.column(4).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn short_ghost_column_is_rejected() {
        let comms = LocalComm::universe(2);
        let d = Decomposition::new(4, 3, 0, 2).unwrap();
        let mut f = filled(&d, 0.0);
        let err = std::thread::scope(|s| {
            let peer = &comms[1];
            s.spawn(move || {
                let mut edge = [0u8; 24];
                peer.recv_into(0, HaloTag::Eastward.as_u16(), &mut edge).unwrap();
                peer.send(0, HaloTag::Westward.as_u16(), &[0u8; 3]).unwrap();
            });
            exchange_ghosts(&mut f, &d, &comms[0]).unwrap_err()
        });
        assert!(matches!(
            err,
            WaveError::BufferSizeMismatch { neighbor: 1, expected: 24, got: 3 }
        ));
        assert!(f.column(3).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn serial_exchange_is_a_no_op() {
        let d = Decomposition::serial(3, 3).unwrap();
        let mut f = filled(&d, 0.0);
        let before = f.clone();
        exchange_ghosts(&mut f, &d, &NoComm).unwrap();
        assert_eq!(f, before);
    }

    #[test]
    fn exchange_levels_refreshes_both_levels() {
        let comms = LocalComm::universe(2);
        let results: Vec<TimeLevels> = std::thread::scope(|s| {
            let handles: Vec<_> = comms
                .iter()
                .map(|comm| {
                    s.spawn(move || {
                        let d = Decomposition::new(4, 3, comm.rank(), 2).unwrap();
                        let mut levels = TimeLevels::new(&d);
                        *levels.previous_mut() = filled(&d, 1000.0 + comm.rank() as f64);
                        *levels.current_mut() = filled(&d, 2000.0 + comm.rank() as f64);
                        exchange_levels(&mut levels, &d, comm).unwrap();
                        levels
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        let picks: [fn(&TimeLevels) -> &Field; 2] = [TimeLevels::previous, TimeLevels::current];
        for pick in picks {
            let (f0, f1) = (pick(&results[0]), pick(&results[1]));
            assert_eq!(f0.column(3), f1.column(1));
            assert_eq!(f1.column(0), f0.column(2));
        }
    }
}
