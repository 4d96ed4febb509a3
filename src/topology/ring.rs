//! Ring process topology.
//!
//! Each rank talks to exactly two neighbours and the ends wrap, so the
//! first and last ranks are neighbours of each other. Periodicity of the global
//! domain comes from this wrap; the steppers never special-case the global
//! edges.

use crate::algs::communicator::Communicator;
use crate::heat_error::HeatError;

/// `(left, right)` neighbours of `rank` in a ring of `size` ranks.
///
/// `size` must be non-zero and `rank < size`; [`RingTopology::new`] checks
/// both.
#[inline]
pub fn neighbors(rank: usize, size: usize) -> (usize, usize) {
    ((rank + size - 1) % size, (rank + 1) % size)
}

/// Immutable per-rank view of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RingTopology {
    rank: usize,
    size: usize,
    left: usize,
    right: usize,
}

impl RingTopology {
    pub fn new(rank: usize, size: usize) -> Result<Self, HeatError> {
        if size == 0 {
            return Err(HeatError::EmptyGroup);
        }
        if rank >= size {
            return Err(HeatError::RankOutOfRange { rank, size });
        }
        let (left, right) = neighbors(rank, size);
        Ok(Self {
            rank,
            size,
            left,
            right,
        })
    }

    /// Topology of the calling rank within `comm`'s group.
    pub fn of<C: Communicator>(comm: &C) -> Result<Self, HeatError> {
        Self::new(comm.rank(), comm.size())
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Rank holding the chunk just before ours (wrapping).
    #[inline]
    pub fn left(&self) -> usize {
        self.left
    }

    /// Rank holding the chunk just after ours (wrapping).
    #[inline]
    pub fn right(&self) -> usize {
        self.right
    }

    /// A one-rank ring is its own left and right neighbour.
    pub fn is_single(&self) -> bool {
        self.size == 1
    }
}
