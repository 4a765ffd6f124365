//! Thin façade over in-process or inter-process (MPI) message passing.
//!
//! Messages are *contiguous byte slices* (no zero-copy guarantees).
//! `isend`/`irecv` hand back waitable handles; the blocking [`Communicator::send`]
//! and [`Communicator::recv_into`] helpers post and wait in one call, which is
//! all the halo exchange needs.
//!
//! Sends are **synchronous** on every backend: a send completes only once the
//! matching receive has taken the payload. Two ranks that both send first
//! therefore deadlock, exactly as they would under `MPI_Ssend`.

use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use static_assertions::assert_impl_all;

use crate::wave_error::WaveError;

/// Point-to-point communication interface (minimal by design).
pub trait Communicator {
    /// Handle returned by `isend`.
    type SendHandle: Wait;
    /// Handle returned by `irecv`.
    type RecvHandle: Wait;

    /// Post a send of `buf` to `peer` with `tag`.
    fn isend(&self, peer: usize, tag: u16, buf: &[u8]) -> Self::SendHandle;
    /// Post a receive of `len` bytes from `peer` with `tag`.
    fn irecv(&self, peer: usize, tag: u16, len: usize) -> Self::RecvHandle;

    /// This process's rank.
    fn rank(&self) -> usize;
    /// Number of ranks in the communicator.
    fn size(&self) -> usize;

    /// Blocking send; returns once `peer` has taken the message.
    fn send(&self, peer: usize, tag: u16, buf: &[u8]) -> Result<(), WaveError> {
        self.isend(peer, tag, buf).wait();
        Ok(())
    }

    /// Blocking receive of exactly `buf.len()` bytes into `buf`.
    fn recv_into(&self, peer: usize, tag: u16, buf: &mut [u8]) -> Result<(), WaveError> {
        let raw = self
            .irecv(peer, tag, buf.len())
            .wait()
            .ok_or_else(|| WaveError::CommError {
                neighbor: peer,
                source: format!("no data received for tag {tag}").into(),
            })?;
        if raw.len() != buf.len() {
            return Err(WaveError::BufferSizeMismatch {
                neighbor: peer,
                expected: buf.len(),
                got: raw.len(),
            });
        }
        buf.copy_from_slice(&raw);
        Ok(())
    }
}

/// Anything that can be waited on.
pub trait Wait {
    /// Wait for completion and return the received data (if any).
    fn wait(self) -> Option<Vec<u8>>;
}

impl Wait for () {
    fn wait(self) -> Option<Vec<u8>> {
        None
    }
}

/// Single-rank communicator for serial runs; it has no peers to talk to.
#[derive(Clone, Debug, Default)]
pub struct NoComm;

impl Communicator for NoComm {
    type SendHandle = ();
    type RecvHandle = ();

    fn isend(&self, _peer: usize, _tag: u16, _buf: &[u8]) {}
    fn irecv(&self, _peer: usize, _tag: u16, _len: usize) {}
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
}

// --- LocalComm: ranks as threads of one process ---
type Key = (usize, usize, u16); // (src, dst, tag)
type Mailbox = Arc<DashMap<Key, Bytes>>;

/// In-process communicator; every rank of a universe shares one mailbox.
#[derive(Clone, Debug)]
pub struct LocalComm {
    rank: usize,
    size: usize,
    mailbox: Mailbox,
}

assert_impl_all!(LocalComm: Send, Sync, Clone);

impl LocalComm {
    /// One communicator per rank, all connected to a fresh mailbox.
    pub fn universe(size: usize) -> Vec<LocalComm> {
        let mailbox: Mailbox = Arc::new(DashMap::new());
        (0..size)
            .map(|rank| LocalComm {
                rank,
                size,
                mailbox: Arc::clone(&mailbox),
            })
            .collect()
    }
}

/// Completes once the receiver has removed the posted message.
pub struct LocalSendHandle {
    key: Key,
    mailbox: Mailbox,
}

impl Wait for LocalSendHandle {
    fn wait(self) -> Option<Vec<u8>> {
        while self.mailbox.contains_key(&self.key) {
            std::thread::yield_now();
        }
        None
    }
}

/// Completes once a message with the matching key has arrived.
pub struct LocalRecvHandle {
    key: Key,
    mailbox: Mailbox,
}

impl Wait for LocalRecvHandle {
    fn wait(self) -> Option<Vec<u8>> {
        loop {
            if let Some((_, bytes)) = self.mailbox.remove(&self.key) {
                return Some(bytes.to_vec());
            }
            std::thread::yield_now();
        }
    }
}

impl Communicator for LocalComm {
    type SendHandle = LocalSendHandle;
    type RecvHandle = LocalRecvHandle;

    fn isend(&self, peer: usize, tag: u16, buf: &[u8]) -> LocalSendHandle {
        let key = (self.rank, peer, tag);
        let payload = Bytes::copy_from_slice(buf);
        // A previous message on the same key must be consumed first (FIFO per key).
        loop {
            let parked = match self.mailbox.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(payload.clone());
                    true
                }
                Entry::Occupied(_) => false,
            };
            if parked {
                break;
            }
            std::thread::yield_now();
        }
        LocalSendHandle {
            key,
            mailbox: Arc::clone(&self.mailbox),
        }
    }

    fn irecv(&self, peer: usize, tag: u16, _len: usize) -> LocalRecvHandle {
        LocalRecvHandle {
            key: (peer, self.rank, tag),
            mailbox: Arc::clone(&self.mailbox),
        }
    }

    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }
}

// --- MPI backend (feature = "mpi-support") ---
#[cfg(feature = "mpi-support")]
mod mpi_backend {
    use super::{Communicator, Wait, WaveError};
    use mpi::datatype::Equivalence;
    use mpi::environment::Universe;
    use mpi::point_to_point::{Destination, Source};
    use mpi::topology::Communicator as _;
    use mpi::topology::SimpleCommunicator;

    /// `MPI_COMM_WORLD` with blocking, synchronous-mode point-to-point calls.
    pub struct MpiComm {
        // Finalizes MPI on drop.
        _universe: Universe,
        pub world: SimpleCommunicator,
        pub rank: usize,
        pub size: usize,
    }

    impl MpiComm {
        /// Initialise MPI. Fails if MPI was already initialised.
        pub fn new() -> Result<Self, WaveError> {
            let universe = mpi::initialize().ok_or(WaveError::MpiInit)?;
            let world = universe.world();
            let rank = world.rank() as usize;
            let size = world.size() as usize;
            Ok(Self {
                _universe: universe,
                world,
                rank,
                size,
            })
        }
    }

    /// A receive already completed by the blocking MPI call.
    pub struct MpiRecvHandle(Vec<u8>);

    impl Wait for MpiRecvHandle {
        fn wait(self) -> Option<Vec<u8>> {
            Some(self.0)
        }
    }

    impl Communicator for MpiComm {
        type SendHandle = ();
        type RecvHandle = MpiRecvHandle;

        fn isend(&self, peer: usize, tag: u16, buf: &[u8]) {
            self.world
                .process_at_rank(peer as i32)
                .synchronous_send_with_tag(buf, i32::from(tag));
        }

        fn irecv(&self, peer: usize, tag: u16, len: usize) -> MpiRecvHandle {
            let mut buf = vec![0u8; len];
            let status = self
                .world
                .process_at_rank(peer as i32)
                .receive_into_with_tag(&mut buf[..], i32::from(tag));
            buf.truncate(status.count(u8::equivalent_datatype()) as usize);
            MpiRecvHandle(buf)
        }

        fn rank(&self) -> usize {
            self.rank
        }

        fn size(&self) -> usize {
            self.size
        }
    }
}

#[cfg(feature = "mpi-support")]
pub use mpi_backend::MpiComm;
