//! Structural self-checks for the stepper's working storage.

use crate::heat_error::HeatError;

/// Types that can validate their own structural invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation found.
    fn validate_invariants(&self) -> Result<(), HeatError>;

    /// Panic on a violation when invariant checking is compiled in.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "invariant violated");
    }
}

/// Run a fallible check and panic with context on error, but only in debug
/// builds or with `strict-invariants` / `check-invariants` enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
