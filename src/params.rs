//! Run parameters shared by both steppers.
//!
//! [`HeatParams`] is plain data with serde derives so a driver can load it from
//! whatever format it already uses. Every rank of a parallel run must use the
//! same values.

use serde::{Deserialize, Serialize};

use crate::algs::communicator::Communicator;
use crate::algs::heat::{heat_parallel, heat_serial};
use crate::heat_error::HeatError;

/// Largest diffusion number for which Forward Euler stays bounded.
pub const STABILITY_LIMIT: f64 = 0.5;

/// Diffusion number `dt / dx^2`.
#[inline]
pub fn diffusion_number(dx: f64, dt: f64) -> f64 {
    dt / (dx * dx)
}

/// Reject spacings and time steps the scheme cannot use.
pub fn validate_step(dx: f64, dt: f64) -> Result<(), HeatError> {
    if !(dx.is_finite() && dx > 0.0) {
        return Err(HeatError::InvalidSpacing(dx));
    }
    if !(dt.is_finite() && dt >= 0.0) {
        return Err(HeatError::InvalidTimeStep(dt));
    }
    Ok(())
}

/// Grid spacing, time step and step count of one integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatParams {
    pub dx: f64,
    pub dt: f64,
    #[serde(default)]
    pub steps: usize,
}

impl Default for HeatParams {
    fn default() -> Self {
        Self {
            dx: 1.0,
            dt: 0.25,
            steps: 0,
        }
    }
}

impl HeatParams {
    pub fn new(dx: f64, dt: f64, steps: usize) -> Self {
        Self { dx, dt, steps }
    }

    /// Parameters using the largest stable time step for `dx`.
    pub fn stable(dx: f64, steps: usize) -> Self {
        Self::new(dx, Self::stable_dt(dx), steps)
    }

    /// Largest `dt` with `nu <= STABILITY_LIMIT`.
    pub fn stable_dt(dx: f64) -> f64 {
        STABILITY_LIMIT * dx * dx
    }

    #[inline]
    pub fn nu(&self) -> f64 {
        diffusion_number(self.dx, self.dt)
    }

    pub fn validate(&self) -> Result<(), HeatError> {
        validate_step(self.dx, self.dt)
    }

    pub fn is_stable(&self) -> bool {
        self.nu() <= STABILITY_LIMIT
    }

    /// Like [`validate`](Self::validate), but also reject unstable diffusion
    /// numbers. The steppers themselves only warn.
    pub fn check_stability(&self) -> Result<(), HeatError> {
        self.validate()?;
        if self.is_stable() {
            Ok(())
        } else {
            Err(HeatError::Unstable {
                nu: self.nu(),
                limit: STABILITY_LIMIT,
            })
        }
    }

    /// Integrate a whole periodic domain on this process.
    pub fn run_serial(&self, u: &mut [f64]) -> Result<(), HeatError> {
        heat_serial(u, self.dx, self.dt, self.steps)
    }

    /// Integrate this rank's chunk of a ring-decomposed domain.
    pub fn run_parallel<C: Communicator>(&self, chunk: &mut [f64], comm: &C) -> Result<(), HeatError> {
        heat_parallel(chunk, self.dx, self.dt, self.steps, comm)
    }
}
