#![allow(dead_code)]
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ring_heat::prelude::*;

/// Split `global` into `p` equal contiguous chunks, in rank order.
pub fn split_even(global: &[f64], p: usize) -> Vec<Vec<f64>> {
    assert_eq!(global.len() % p, 0, "{p} ranks must divide {}", global.len());
    global.chunks(global.len() / p).map(<[f64]>::to_vec).collect()
}

/// Run `heat_parallel` on `p` simulated ranks (one thread each) and gather the
/// chunks back in rank order.
pub fn run_ring(global: &[f64], p: usize, dx: f64, dt: f64, nt: usize) -> Result<Vec<f64>, HeatError> {
    let chunks = split_even(global, p);
    let comms = LocalComm::ring(p);
    let per_rank: Vec<Result<Vec<f64>, HeatError>> = std::thread::scope(|s| {
        let handles: Vec<_> = chunks
            .into_iter()
            .zip(comms)
            .map(|(mut chunk, comm)| {
                s.spawn(move || heat_parallel(&mut chunk, dx, dt, nt, &comm).map(|()| chunk))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("rank thread panicked"))
            .collect()
    });
    per_rank
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map(|chunks| chunks.concat())
}

/// Same as [`run_ring`] on the serial stepper, for comparison.
pub fn run_serial(global: &[f64], dx: f64, dt: f64, nt: usize) -> Vec<f64> {
    let mut u = global.to_vec();
    heat_serial(&mut u, dx, dt, nt).expect("serial run");
    u
}

/// Reproducible values in [-1, 1).
pub fn random_field(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

pub fn assert_close(got: &[f64], want: &[f64], tol: f64) {
    assert_eq!(got.len(), want.len(), "length mismatch");
    for (i, (g, w)) in got.iter().zip(want).enumerate() {
        assert!(
            (g - w).abs() <= tol,
            "index {i}: got {g}, want {w} (tol {tol})\n got={got:?}\nwant={want:?}"
        );
    }
}

pub fn total(u: &[f64]) -> f64 {
    u.iter().sum()
}
