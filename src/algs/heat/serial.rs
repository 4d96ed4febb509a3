//! Single-process reference stepper.

use log::debug;

use super::{euler_point, prepare, update_interior};
use crate::data::buffer::DoubleBuffer;
use crate::heat_error::HeatError;

/// Integrate the whole periodic domain `u` for `nt` steps of size `dt`.
///
/// `u[0]` takes `u[len-1]` as its left neighbour and `u[len-1]` takes `u[0]`
/// as its right one. `u` is only overwritten once all steps are done.
///
/// # Errors
/// [`HeatError::TooFewPoints`] for fewer than three points,
/// [`HeatError::InvalidSpacing`] / [`HeatError::InvalidTimeStep`] for unusable
/// `dx` / `dt`, [`HeatError::Allocation`] if working storage is unavailable.
pub fn heat_serial(u: &mut [f64], dx: f64, dt: f64, nt: usize) -> Result<(), HeatError> {
    let nu = prepare(u.len(), dx, dt)?;
    let mut levels = DoubleBuffer::from_chunk(u)?;
    debug!("heat_serial: nx={} nu={nu} steps={nt}", u.len());

    for _ in 0..nt {
        let (cur, next) = levels.split();
        let last = cur.len() - 1;
        update_interior(cur, next, nu);
        next[0] = euler_point(cur[last], cur[0], cur[1], nu);
        next[last] = euler_point(cur[last - 1], cur[last], cur[0], nu);
        levels.swap();
    }

    levels.copy_into(u)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_step_by_hand() {
        let mut u = [1.0, 0.0, 0.0, 0.0];
        heat_serial(&mut u, 1.0, 1.0, 1).unwrap();
        assert_eq!(u, [-1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn zero_steps_is_identity() {
        let mut u = [0.3, -2.0, 7.5];
        heat_serial(&mut u, 0.1, 0.004, 0).unwrap();
        assert_eq!(u, [0.3, -2.0, 7.5]);
    }

    #[test]
    fn constant_field_is_steady() {
        let mut u = [2.5; 6];
        heat_serial(&mut u, 1.0, 0.5, 40).unwrap();
        assert!(u.iter().all(|&x| x == 2.5));
    }

    #[test]
    fn bad_input_leaves_u_untouched() {
        let mut u = [1.0, 2.0];
        assert_eq!(
            heat_serial(&mut u, 1.0, 0.1, 1),
            Err(HeatError::TooFewPoints { len: 2 })
        );
        let mut u = [1.0, 2.0, 3.0];
        assert_eq!(
            heat_serial(&mut u, 0.0, 0.1, 1),
            Err(HeatError::InvalidSpacing(0.0))
        );
        assert_eq!(u, [1.0, 2.0, 3.0]);
    }
}
