//! Data module: owned working storage for the steppers
#![warn(missing_docs)]

pub mod buffer;

pub use buffer::{DoubleBuffer, MIN_POINTS, array_copy};
