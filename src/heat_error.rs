//! HeatError: unified error type for ring-heat public APIs
//!
//! Every caller-contract violation the steppers can detect is reported here
//! before it can corrupt memory. Nothing is retried or recovered internally.

use std::collections::TryReserveError;
use thiserror::Error;

/// Unified error type for ring-heat operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HeatError {
    /// The chunk is too short for the three-point stencil.
    #[error("chunk has {len} points; the three-point stencil needs at least 3")]
    TooFewPoints { len: usize },
    /// Grid spacing must be finite and strictly positive.
    #[error("grid spacing dx must be finite and positive, got {0}")]
    InvalidSpacing(f64),
    /// Time step must be finite and non-negative.
    #[error("time step dt must be finite and non-negative, got {0}")]
    InvalidTimeStep(f64),
    /// Diffusion number beyond the explicit scheme's stability limit.
    #[error("diffusion number {nu} exceeds the Forward-Euler stability limit {limit}")]
    Unstable { nu: f64, limit: f64 },
    /// `array_copy` asked for more elements than one of the slices holds.
    #[error("cannot copy {len} values: destination holds {dest}, source holds {src}")]
    CopyOutOfRange { len: usize, dest: usize, src: usize },
    /// The two time levels of a working buffer disagree in length.
    #[error("working buffer levels differ in length: current {current}, next {next}")]
    LevelMismatch { current: usize, next: usize },
    /// Working storage could not be obtained.
    #[error("failed to allocate a working buffer of {len} values")]
    Allocation {
        len: usize,
        #[source]
        source: TryReserveError,
    },
    /// A process group with no ranks.
    #[error("process group has no ranks")]
    EmptyGroup,
    /// Rank not contained in its own group.
    #[error("rank {rank} is outside a group of size {size}")]
    RankOutOfRange { rank: usize, size: usize },
    /// A blocking receive completed without a payload.
    #[error("no ghost value arrived from rank {peer} at step {step}")]
    MissingGhost { peer: usize, step: usize },
    /// A ghost message of the wrong byte length.
    #[error("ghost message from rank {peer} at step {step}: expected {expected} bytes, got {got}")]
    GhostSize {
        peer: usize,
        step: usize,
        expected: usize,
        got: usize,
    },
    /// The message-passing runtime could not be brought up.
    #[error("communicator initialization failed: {0}")]
    CommInit(&'static str),
}
