//! Explicit Forward-Euler steppers for the periodic 1-D heat equation.
//!
//! Both steppers apply the three-point update
//!
//! ```text
//! u_i' = u_i + nu * (u_{i-1} - 2 u_i + u_{i+1}),   nu = dt / dx^2
//! ```
//!
//! [`heat_serial`] owns the whole domain and wraps its two ends onto each other.
//! [`heat_parallel`] owns one chunk of a ring-decomposed domain and borrows
//! its two edge neighbours from the adjacent ranks every step.

pub mod parallel;
pub mod serial;

pub use parallel::{GHOST_TAG, ParallelStepper, heat_parallel};
pub use serial::heat_serial;

use log::warn;

use crate::data::buffer::MIN_POINTS;
use crate::heat_error::HeatError;
use crate::params::{STABILITY_LIMIT, diffusion_number, validate_step};

/// One Forward-Euler update of `mid` from its two neighbours.
#[inline(always)]
pub(crate) fn euler_point(left: f64, mid: f64, right: f64, nu: f64) -> f64 {
    mid + nu * (left - 2.0 * mid + right)
}

/// Update every point strictly between the two edges of `cur` into `next`.
#[inline]
pub(crate) fn update_interior(cur: &[f64], next: &mut [f64], nu: f64) {
    let last = cur.len() - 1;
    for (out, w) in next[1..last].iter_mut().zip(cur.windows(3)) {
        *out = euler_point(w[0], w[1], w[2], nu);
    }
}

/// Check a stepper's inputs and return the diffusion number.
///
/// Unstable diffusion numbers are allowed but logged.
pub(crate) fn prepare(len: usize, dx: f64, dt: f64) -> Result<f64, HeatError> {
    if len < MIN_POINTS {
        return Err(HeatError::TooFewPoints { len });
    }
    validate_step(dx, dt)?;
    let nu = diffusion_number(dx, dt);
    if nu > STABILITY_LIMIT {
        warn!("diffusion number {nu} exceeds {STABILITY_LIMIT}; Forward Euler is not bounded here");
    }
    Ok(nu)
}
