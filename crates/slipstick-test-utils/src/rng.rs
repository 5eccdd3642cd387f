//! Seeded random sources for load sweeps and irregular sample clocks.

use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha8 generator seeded from `seed`. Same seed, same stream.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// `len` values drawn uniformly from `range`.
///
/// An empty range yields `range.start` repeated.
pub fn uniform_vec(len: usize, range: Range<f64>, seed: u64) -> Vec<f64> {
    if range.is_empty() {
        return vec![range.start; len];
    }
    let mut rng = seeded_rng(seed);
    (0..len).map(|_| rng.gen_range(range.clone())).collect()
}

/// `len` strictly increasing sample times starting at zero.
///
/// Each step is `dt` scaled by a factor in `[1 - jitter, 1 + jitter)`, with
/// `jitter` clamped to `[0, 0.9]` so steps stay positive.
pub fn jittered_times(len: usize, dt: f64, jitter: f64, seed: u64) -> Vec<f64> {
    let jitter = jitter.clamp(0.0, 0.9);
    let mut rng = seeded_rng(seed);
    let mut time = 0.0;
    let mut times = Vec::with_capacity(len);
    for _ in 0..len {
        times.push(time);
        let scale = if jitter > 0.0 {
            rng.gen_range(1.0 - jitter..1.0 + jitter)
        } else {
            1.0
        };
        time += dt * scale;
    }
    times
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_loads() {
        let a = uniform_vec(64, 0.0..500.0, 7);
        let b = uniform_vec(64, 0.0..500.0, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|f| (0.0..500.0).contains(f)));
        assert_ne!(a, uniform_vec(64, 0.0..500.0, 8));
    }

    #[test]
    fn empty_range_is_constant() {
        let v = uniform_vec(4, 2.0..2.0, 1);
        assert_eq!(v, vec![2.0; 4]);
    }

    #[test]
    fn jittered_clock_is_strictly_increasing() {
        let times = jittered_times(1000, 0.001, 0.5, 3);
        assert_eq!(times.len(), 1000);
        assert!(times[0].abs() < f64::EPSILON);
        for w in times.windows(2) {
            let step = w[1] - w[0];
            assert!(step > 0.000_5 - 1e-12 && step < 0.001_5 + 1e-12);
        }
    }

    #[test]
    fn zero_jitter_is_regular() {
        let times = jittered_times(5, 0.25, 0.0, 9);
        for (t, k) in times.iter().zip(0_u32..) {
            assert!((t - 0.25 * f64::from(k)).abs() < 1e-12);
        }
    }
}
