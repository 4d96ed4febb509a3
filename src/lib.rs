#![cfg_attr(docsrs, feature(doc_cfg))]
//! # ring-heat
//!
//! ring-heat integrates the 1-D heat equation `u_t = u_xx` on a periodic
//! domain with explicit Forward-Euler time stepping, either on one process or
//! across a ring of message-passing ranks that each own a contiguous chunk.
//!
//! ## Features
//! - [`heat_serial`]: whole-domain reference stepper with explicit wrap-around
//! - [`heat_parallel`]: chunk stepper that overlaps the per-step ghost exchange
//!   with interior computation (sends posted early, receives as late as possible)
//! - Pluggable communication backends behind [`Communicator`](algs::communicator::Communicator):
//!   an in-process simulated group ([`LocalComm`](algs::communicator::LocalComm))
//!   and MPI (`mpi-support` feature)
//! - Fail-fast [`HeatError`] for every detectable contract violation
//!
//! ## Stability
//!
//! The scheme is bounded only for `nu = dt / dx^2 <= 0.5`. The steppers do not
//! enforce this; they log a warning. Use [`HeatParams::check_stability`] to
//! reject such runs up front.
//!
//! ## Usage
//!
//! ```
//! use ring_heat::prelude::*;
//!
//! let mut u = vec![1.0, 0.0, 0.0, 0.0];
//! heat_serial(&mut u, 1.0, 0.25, 1)?;
//!
//! let comm = LocalComm::ring(1).pop().unwrap();
//! let mut v = vec![1.0, 0.0, 0.0, 0.0];
//! heat_parallel(&mut v, 1.0, 0.25, 1, &comm)?;
//! assert_eq!(u, v);
//! # Ok::<(), HeatError>(())
//! ```
//!
//! Splitting a global array into chunks, starting the ranks and gathering the
//! result are the caller's job.

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod heat_error;
pub mod params;
pub mod topology;

pub use algs::heat::{heat_parallel, heat_serial};
pub use debug_invariants::DebugInvariants;
pub use heat_error::HeatError;
pub use params::HeatParams;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::communicator::{CommTag, Communicator, LocalComm, NoComm, Wait};
    #[cfg(feature = "mpi-support")]
    pub use crate::algs::communicator::MpiComm;
    pub use crate::algs::heat::{GHOST_TAG, ParallelStepper, heat_parallel, heat_serial};
    pub use crate::data::buffer::array_copy;
    pub use crate::heat_error::HeatError;
    pub use crate::params::{HeatParams, STABILITY_LIMIT};
    pub use crate::topology::ring::{RingTopology, neighbors};
}
