//! Re-export public algorithms.

pub mod communicator;
pub mod heat;
pub mod wire;

pub use heat::{heat_parallel, heat_serial};
