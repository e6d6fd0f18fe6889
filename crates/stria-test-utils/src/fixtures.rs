//! Reusable load-history fixtures.
//!
//! - [`triangular_series`]: `cycles` full `0 → amplitude → 0` swings.
//! - [`literal_series`]: the five-sample history `[2, 5, 1, 6, 0]`, whose
//!   rainflow content is worked out by hand in the fatigue tests.
//! - [`random_walk`] / [`uniform_noise`]: seeded `ChaCha8Rng` histories.
//! - [`closed_loop`]: rotates a history so it starts and ends at its
//!   global maximum.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Bin count under which [`literal_series`] maps every sample to its own
/// integer value.
pub const LITERAL_NUM_BINS: usize = 7;

/// `[2, 5, 1, 6, 0]`.
pub fn literal_series() -> Vec<f64> {
    vec![2.0, 5.0, 1.0, 6.0, 0.0]
}

/// `0, A, 0, A, …, 0` with `cycles` peaks (`2 * cycles + 1` samples).
pub fn triangular_series(amplitude: f64, cycles: usize) -> Vec<f64> {
    (0..=2 * cycles)
        .map(|i| if i % 2 == 1 { amplitude } else { 0.0 })
        .collect()
}

/// Strictly increasing `0, 1, …, len - 1`.
pub fn monotonic_ramp(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}

/// Random walk with steps uniform in `[-step, step]`.
pub fn random_walk(seed: u64, len: usize, step: f64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut x = 0.0;
    (0..len)
        .map(|_| {
            x += rng.random_range(-step..=step);
            x
        })
        .collect()
}

/// Independent samples uniform in `[lo, hi)`.
pub fn uniform_noise(seed: u64, len: usize, lo: f64, hi: f64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| lo + (hi - lo) * rng.random::<f64>()).collect()
}

/// Rotate `series` to start at its first global maximum and append that
/// maximum again, so the history forms a closed loop.
pub fn closed_loop(series: &[f64]) -> Vec<f64> {
    let Some(peak) = series
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
    else {
        return Vec::new();
    };
    let mut out: Vec<f64> = series[peak..]
        .iter()
        .chain(&series[..peak])
        .copied()
        .collect();
    out.push(series[peak]);
    out
}

/// `steps` symmetric 3×3 tensors stored time-last, i.e. with element
/// strides `[1, 3 * steps, steps]` for axes `[time, row, col]`.
///
/// Tensor `t` is `diag(t, 2t, 3t)` plus a shear `0.5 t` in the `(0, 1)`
/// and `(1, 0)` slots.
pub fn stress_series_time_last(steps: usize) -> Vec<f64> {
    let mut buf = vec![0.0; 9 * steps];
    for t in 0..steps {
        let tf = t as f64;
        let at = |r: usize, c: usize| t + steps * (3 * r + c);
        buf[at(0, 0)] = tf;
        buf[at(1, 1)] = 2.0 * tf;
        buf[at(2, 2)] = 3.0 * tf;
        buf[at(0, 1)] = 0.5 * tf;
        buf[at(1, 0)] = 0.5 * tf;
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangular_has_expected_peaks() {
        assert_eq!(triangular_series(4.0, 2), vec![0.0, 4.0, 0.0, 4.0, 0.0]);
    }

    #[test]
    fn seeded_series_are_reproducible() {
        assert_eq!(random_walk(7, 64, 1.0), random_walk(7, 64, 1.0));
        assert_ne!(random_walk(7, 64, 1.0), random_walk(8, 64, 1.0));
        assert!(uniform_noise(3, 100, -2.0, 2.0)
            .iter()
            .all(|&v| (-2.0..2.0).contains(&v)));
    }

    #[test]
    fn closed_loop_starts_and_ends_at_peak() {
        let looped = closed_loop(&[1.0, 3.0, -2.0, 3.0, 0.0]);
        assert_eq!(looped, vec![3.0, -2.0, 3.0, 0.0, 1.0, 3.0]);
        assert!(closed_loop(&[]).is_empty());
    }
}
