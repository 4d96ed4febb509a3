//! Top-level module for process topology.
//!
//! The only topology the steppers use is the ring: rank `r` of `p` exchanges
//! with `r - 1` and `r + 1`, both taken modulo `p`.

pub mod ring;

pub use ring::{RingTopology, neighbors};
