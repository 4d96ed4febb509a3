//! Working storage for the steppers.
//!
//! [`array_copy`] is an explicit element-wise copy, so stepper storage never
//! aliases the caller's chunk. [`DoubleBuffer`] owns the two time levels and
//! rotates them by exchanging the vectors, not their contents.

use crate::debug_invariants::DebugInvariants;
use crate::heat_error::HeatError;

/// Smallest chunk the three-point stencil can update.
pub const MIN_POINTS: usize = 3;

/// Overwrite `dest[..len]` with `src[..len]`.
///
/// # Errors
/// Returns [`HeatError::CopyOutOfRange`] if `len` exceeds either slice; `dest`
/// is left untouched in that case.
pub fn array_copy(dest: &mut [f64], src: &[f64], len: usize) -> Result<(), HeatError> {
    if len > dest.len() || len > src.len() {
        return Err(HeatError::CopyOutOfRange {
            len,
            dest: dest.len(),
            src: src.len(),
        });
    }
    dest[..len].copy_from_slice(&src[..len]);
    Ok(())
}

fn try_alloc(len: usize) -> Result<Vec<f64>, HeatError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|source| HeatError::Allocation { len, source })?;
    v.resize(len, 0.0);
    Ok(v)
}

/// Two equally sized time levels with rotating roles.
///
/// `current` is the readable source of a step, `next` its write target.
/// [`split`](Self::split) borrows them disjointly.
#[derive(Debug, Clone)]
pub struct DoubleBuffer {
    current: Vec<f64>,
    next: Vec<f64>,
}

impl DoubleBuffer {
    /// Allocate both levels for `chunk.len()` points and copy `chunk` into
    /// `current`.
    pub fn from_chunk(chunk: &[f64]) -> Result<Self, HeatError> {
        let len = chunk.len();
        if len < MIN_POINTS {
            return Err(HeatError::TooFewPoints { len });
        }
        let mut current = try_alloc(len)?;
        let next = try_alloc(len)?;
        array_copy(&mut current, chunk, len)?;
        let buf = Self { current, next };
        buf.debug_assert_invariants();
        Ok(buf)
    }

    /// Number of points per level.
    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Always false: construction rejects chunks shorter than [`MIN_POINTS`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// The level holding the latest solution.
    #[inline]
    pub fn current(&self) -> &[f64] {
        &self.current
    }

    /// `(current, next)` for one step.
    #[inline]
    pub fn split(&mut self) -> (&[f64], &mut [f64]) {
        (&self.current, &mut self.next)
    }

    /// Make `next` the new `current`.
    #[inline]
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Copy the current level back into the caller's chunk.
    pub fn copy_into(&self, chunk: &mut [f64]) -> Result<(), HeatError> {
        array_copy(chunk, &self.current, self.len())
    }
}

impl DebugInvariants for DoubleBuffer {
    fn validate_invariants(&self) -> Result<(), HeatError> {
        if self.current.len() < MIN_POINTS {
            return Err(HeatError::TooFewPoints {
                len: self.current.len(),
            });
        }
        if self.next.len() != self.current.len() {
            return Err(HeatError::LevelMismatch {
                current: self.current.len(),
                next: self.next.len(),
            });
        }
        Ok(())
    }
}
