//! Thin façade over intra-process (simulated ranks) or inter-process (MPI)
//! message passing.
//!
//! Messages are *contiguous byte slices*. Sends return immediately with a
//! waitable handle; receives hand back a handle whose `.wait()` blocks until
//! the matching message is available. Between one sender and one receiver,
//! messages with the same tag are delivered in the order they were sent.

use bytes::Bytes;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::Arc;

/// Non-blocking communication interface (minimal by design).
pub trait Communicator {
    /// Handle returned by `isend`.
    type SendHandle: Wait;
    /// Handle returned by `irecv`.
    type RecvHandle: Wait;

    /// Rank of the calling process within its group.
    fn rank(&self) -> usize;
    /// Number of ranks in the group.
    fn size(&self) -> usize;

    /// Post a send of `buf` to `peer`. Returns without waiting for delivery.
    fn isend(&self, peer: usize, tag: u16, buf: &[u8]) -> Self::SendHandle;
    /// Post a receive from `peer` sized for `buf`. The payload is returned by
    /// `wait()` on the handle; callers check its length.
    fn irecv(&self, peer: usize, tag: u16, buf: &mut [u8]) -> Self::RecvHandle;

    /// True for the [`NoComm`] stand-in.
    fn is_no_comm(&self) -> bool {
        false
    }
}

/// Anything that can be waited on.
pub trait Wait {
    /// Wait for completion and return the received data (if any).
    fn wait(self) -> Option<Vec<u8>>;
}

/// A family of message tags rooted at one base value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommTag(pub u16);

impl CommTag {
    #[inline]
    pub const fn base(self) -> u16 {
        self.0
    }

    /// The `k`-th tag of this family (wrapping).
    #[inline]
    pub const fn offset(self, k: u16) -> u16 {
        self.0.wrapping_add(k)
    }
}

impl Wait for () {
    fn wait(self) -> Option<Vec<u8>> {
        None
    }
}

/// Compile-time no-op comm: one rank, sends vanish, receives come back empty.
#[derive(Clone, Debug, Default)]
pub struct NoComm;

impl Communicator for NoComm {
    type SendHandle = ();
    type RecvHandle = ();

    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
    fn isend(&self, _peer: usize, _tag: u16, _buf: &[u8]) {}
    fn irecv(&self, _peer: usize, _tag: u16, _buf: &mut [u8]) {}
    fn is_no_comm(&self) -> bool {
        true
    }
}

// --- LocalComm: simulated ranks sharing one process ---
type Key = (usize, usize, u16); // (src, dst, tag)

/// Per-(src, dst, tag) FIFO queues plus a doorbell for blocked receivers.
#[derive(Default)]
struct Mailbox {
    queues: DashMap<Key, VecDeque<Bytes>>,
    bell: Mutex<()>,
    rung: Condvar,
}

impl Mailbox {
    fn post(&self, key: Key, data: Bytes) {
        self.queues.entry(key).or_default().push_back(data);
        let _bell = self.bell.lock();
        self.rung.notify_all();
    }

    fn try_take(&self, key: &Key) -> Option<Bytes> {
        self.queues.get_mut(key).and_then(|mut q| q.pop_front())
    }

    /// Block until a message for `key` is queued. No timeout: a message that
    /// is never sent blocks forever.
    fn take(&self, key: Key) -> Bytes {
        let mut bell = self.bell.lock();
        loop {
            // Senders ring only while holding `bell`, so a post between this
            // check and `wait` cannot be missed.
            if let Some(bytes) = self.try_take(&key) {
                return bytes;
            }
            self.rung.wait(&mut bell);
        }
    }
}

static MAILBOX: Lazy<Arc<Mailbox>> = Lazy::new(|| Arc::new(Mailbox::default()));

/// Pending receive on a [`LocalComm`]; the blocking happens in `wait`.
///
/// The payload comes back whole, whatever size the receive was posted with,
/// so an oversized message is visible to the caller instead of being cut.
pub struct LocalHandle {
    mailbox: Arc<Mailbox>,
    key: Key,
}

impl Wait for LocalHandle {
    fn wait(self) -> Option<Vec<u8>> {
        Some(self.mailbox.take(self.key).to_vec())
    }
}

/// In-process endpoint of a simulated multi-rank group.
///
/// Every endpoint of a group shares one mailbox. Sends copy the payload and
/// complete immediately; nothing else is shared between ranks.
#[derive(Clone)]
pub struct LocalComm {
    rank: usize,
    size: usize,
    mailbox: Arc<Mailbox>,
}

impl std::fmt::Debug for LocalComm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalComm")
            .field("rank", &self.rank)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl LocalComm {
    /// Endpoint on the process-wide mailbox. Unrelated groups built this way
    /// see each other's traffic, so they must keep their tags apart.
    pub fn new(rank: usize, size: usize) -> Self {
        Self {
            rank,
            size,
            mailbox: Arc::clone(&MAILBOX),
        }
    }

    /// All `size` endpoints of a fresh, isolated group, in rank order.
    pub fn ring(size: usize) -> Vec<Self> {
        let mailbox = Arc::new(Mailbox::default());
        (0..size)
            .map(|rank| Self {
                rank,
                size,
                mailbox: Arc::clone(&mailbox),
            })
            .collect()
    }
}

impl Communicator for LocalComm {
    type SendHandle = ();
    type RecvHandle = LocalHandle;

    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn isend(&self, peer: usize, tag: u16, buf: &[u8]) -> Self::SendHandle {
        self.mailbox
            .post((self.rank, peer, tag), Bytes::copy_from_slice(buf));
    }

    fn irecv(&self, peer: usize, tag: u16, _buf: &mut [u8]) -> Self::RecvHandle {
        LocalHandle {
            mailbox: Arc::clone(&self.mailbox),
            key: (peer, self.rank, tag),
        }
    }
}

// --- MPI backend (feature = "mpi-support") ---
#[cfg(feature = "mpi-support")]
mod mpi_backend {
    use super::{Communicator, Wait};
    use crate::heat_error::HeatError;
    use mpi::environment::Universe;
    use mpi::request::StaticScope;
    use mpi::topology::SimpleCommunicator;
    use mpi::traits::{Communicator as _, Destination, Equivalence, Source};

    /// World communicator; MPI is finalized when it is dropped.
    pub struct MpiComm {
        pub world: SimpleCommunicator,
        rank: usize,
        size: usize,
        _universe: Universe,
    }

    impl MpiComm {
        pub fn new() -> Result<Self, HeatError> {
            let universe =
                mpi::initialize().ok_or(HeatError::CommInit("MPI already initialized"))?;
            let world = universe.world();
            let rank = world.rank() as usize;
            let size = world.size() as usize;
            Ok(Self {
                world,
                rank,
                size,
                _universe: universe,
            })
        }
    }

    /// An in-flight MPI request together with the buffer it owns.
    ///
    /// Completing it (by `wait` or on drop) releases the buffer, so a handle
    /// abandoned on an error path never leaves MPI writing freed memory.
    pub struct MpiHandle(Option<Box<dyn FnOnce() -> Option<Vec<u8>>>>);

    impl Wait for MpiHandle {
        fn wait(mut self) -> Option<Vec<u8>> {
            self.0.take().and_then(|finish| finish())
        }
    }

    impl Drop for MpiHandle {
        fn drop(&mut self) {
            if let Some(finish) = self.0.take() {
                finish();
            }
        }
    }

    fn leak(data: Vec<u8>) -> *mut [u8] {
        Box::into_raw(data.into_boxed_slice())
    }

    impl Communicator for MpiComm {
        type SendHandle = MpiHandle;
        type RecvHandle = MpiHandle;

        fn rank(&self) -> usize {
            self.rank
        }

        fn size(&self) -> usize {
            self.size
        }

        fn isend(&self, peer: usize, tag: u16, buf: &[u8]) -> MpiHandle {
            let raw = leak(buf.to_vec());
            // SAFETY: `raw` is only reclaimed after the request completes.
            let staged: &'static [u8] = unsafe { &*raw };
            let req = self
                .world
                .process_at_rank(peer as i32)
                .immediate_send_with_tag(StaticScope, staged, i32::from(tag));
            MpiHandle(Some(Box::new(move || {
                req.wait();
                // SAFETY: the send completed; MPI no longer reads the buffer.
                drop(unsafe { Box::from_raw(raw) });
                None
            })))
        }

        fn irecv(&self, peer: usize, tag: u16, buf: &mut [u8]) -> MpiHandle {
            let raw = leak(vec![0u8; buf.len()]);
            // SAFETY: as in `isend`; nothing else touches `raw` until completion.
            let landing: &'static mut [u8] = unsafe { &mut *raw };
            let req = self
                .world
                .process_at_rank(peer as i32)
                .immediate_receive_into_with_tag(StaticScope, landing, i32::from(tag));
            MpiHandle(Some(Box::new(move || {
                let status = req.wait();
                // SAFETY: the receive completed; the buffer is ours again.
                let mut data = unsafe { Box::from_raw(raw) }.into_vec();
                data.truncate(status.count(u8::equivalent_datatype()) as usize);
                Some(data)
            })))
        }
    }
}

#[cfg(feature = "mpi-support")]
pub use mpi_backend::MpiComm;
