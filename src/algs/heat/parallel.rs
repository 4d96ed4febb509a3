//! Ring-decomposed stepper with overlapped ghost exchange.
//!
//! Every rank owns one contiguous chunk of the periodic domain. Each step it
//! needs exactly two foreign values: the right edge of its left neighbour and
//! the left edge of its right neighbour. The exchange is arranged so that the
//! network works while the rank computes:
//!
//! 1. stage both own edge values and post non-blocking sends to both
//!    neighbours,
//! 2. update the interior, which needs no foreign data,
//! 3. block on the right neighbour's value, finish the right edge,
//! 4. block on the left neighbour's value, finish the left edge,
//! 5. swap time levels.
//!
//! The two sends are awaited right before the next step restages the ghost
//! slots, and once more after the final step.
//!
//! The ring wraps, so the first and last ranks exchange with each other and
//! no global-boundary branch exists. With a single rank both messages go to
//! the rank itself; per-tag FIFO delivery then hands the right receive the
//! rank's own left edge and the left receive its own right edge, which is
//! exactly the serial wrap-around.

use log::{debug, trace};

use super::{euler_point, prepare, update_interior};
use crate::algs::communicator::{CommTag, Communicator, Wait};
use crate::algs::wire::{GHOST_BYTES, WireScalar};
use crate::data::buffer::DoubleBuffer;
use crate::heat_error::HeatError;
use crate::topology::ring::RingTopology;

/// Tag carried by every ghost message unless overridden with
/// [`ParallelStepper::with_tag`].
pub const GHOST_TAG: CommTag = CommTag(0x4E70);

/// Ghost-slot layout, identical for both sides: `OWN` holds this rank's edge
/// value staged for sending, `GHOST` the neighbour's value once received.
const OWN: usize = 0;
const GHOST: usize = 1;

/// Integrate this rank's `chunk` for `nt` steps, exchanging ghost values with
/// its ring neighbours in `comm`.
///
/// Every rank of the group must call this with the same `dx`, `dt` and `nt`.
/// A neighbour that never sends leaves this rank blocked forever.
///
/// # Errors
/// Input errors as for [`heat_serial`](super::heat_serial), group errors from
/// [`RingTopology::new`], and [`HeatError::MissingGhost`] /
/// [`HeatError::GhostSize`] if a receive yields no payload or a payload of the
/// wrong size. On error `chunk` is left unmodified.
pub fn heat_parallel<C: Communicator>(
    chunk: &mut [f64],
    dx: f64,
    dt: f64,
    nt: usize,
    comm: &C,
) -> Result<(), HeatError> {
    ParallelStepper::new(comm)?.run(chunk, dx, dt, nt)
}

/// Ghost-exchanging stepper bound to one rank of a communicator.
#[derive(Debug)]
pub struct ParallelStepper<'c, C: Communicator> {
    comm: &'c C,
    ring: RingTopology,
    tag: CommTag,
}

impl<'c, C: Communicator> ParallelStepper<'c, C> {
    pub fn new(comm: &'c C) -> Result<Self, HeatError> {
        Ok(Self {
            comm,
            ring: RingTopology::of(comm)?,
            tag: GHOST_TAG,
        })
    }

    /// Use `tag` for every ghost message of this stepper's runs.
    pub fn with_tag(mut self, tag: CommTag) -> Self {
        self.tag = tag;
        self
    }

    pub fn topology(&self) -> &RingTopology {
        &self.ring
    }

    /// Integrate `chunk` in place; see [`heat_parallel`].
    pub fn run(&self, chunk: &mut [f64], dx: f64, dt: f64, nt: usize) -> Result<(), HeatError> {
        let nu = prepare(chunk.len(), dx, dt)?;
        let mut levels = DoubleBuffer::from_chunk(chunk)?;
        let (left, right) = (self.ring.left(), self.ring.right());
        let tag = self.tag.base();
        debug!(
            "heat_parallel: rank {}/{} nx={} nu={nu} steps={nt} left={left} right={right}",
            self.ring.rank(),
            self.ring.size(),
            chunk.len()
        );

        let mut left_ghost = [0.0f64; 2];
        let mut right_ghost = [0.0f64; 2];
        let mut in_flight: Option<(C::SendHandle, C::SendHandle)> = None;

        for step in 0..nt {
            if let Some(sends) = in_flight.take() {
                await_sends(sends);
                trace!("step {step}: previous sends complete");
            }

            let (cur, next) = levels.split();
            let last = cur.len() - 1;

            left_ghost[OWN] = cur[0];
            right_ghost[OWN] = cur[last];
            let to_left = self
                .comm
                .isend(left, tag, WireScalar::of(left_ghost[OWN]).as_bytes());
            let to_right = self
                .comm
                .isend(right, tag, WireScalar::of(right_ghost[OWN]).as_bytes());
            trace!("step {step}: sends posted");

            update_interior(cur, next, nu);
            trace!("step {step}: interior computed");

            right_ghost[GHOST] = self.recv_ghost(right, step)?;
            next[last] = euler_point(cur[last - 1], cur[last], right_ghost[GHOST], nu);
            trace!("step {step}: right edge from rank {right}");

            left_ghost[GHOST] = self.recv_ghost(left, step)?;
            next[0] = euler_point(left_ghost[GHOST], cur[0], cur[1], nu);
            trace!("step {step}: left edge from rank {left}");

            levels.swap();
            in_flight = Some((to_left, to_right));
        }

        if let Some(sends) = in_flight.take() {
            await_sends(sends);
        }
        levels.copy_into(chunk)?;
        debug!("heat_parallel: rank {} finished {nt} steps", self.ring.rank());
        Ok(())
    }

    /// Blocking receive of one ghost value from `peer`.
    fn recv_ghost(&self, peer: usize, step: usize) -> Result<f64, HeatError> {
        let mut landing = [0u8; GHOST_BYTES];
        let raw = self
            .comm
            .irecv(peer, self.tag.base(), &mut landing)
            .wait()
            .ok_or(HeatError::MissingGhost { peer, step })?;
        WireScalar::decode(&raw).map_err(|got| HeatError::GhostSize {
            peer,
            step,
            expected: GHOST_BYTES,
            got,
        })
    }
}

fn await_sends<S: Wait>((to_left, to_right): (S, S)) {
    to_left.wait();
    to_right.wait();
}
