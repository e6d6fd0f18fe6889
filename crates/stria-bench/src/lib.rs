//! Benchmark profiles for the stria workspace.
//!
//! - [`reference_history`]: 100K-sample seeded random walk
//! - [`reference_config`]: 64-bin counter with a steel-like S-N curve
//! - [`tensor_series`]: time-last 3×3 stress series for the principal solver

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use stria_fatigue::{RainflowConfig, SnCurve};

/// Samples in the reference load history.
pub const REFERENCE_SAMPLES: usize = 100_000;

/// Seeded random walk of `REFERENCE_SAMPLES` samples with unit steps.
pub fn reference_history(seed: u64) -> Vec<f64> {
    stria_test_utils::random_walk(seed, REFERENCE_SAMPLES, 1.0)
}

/// 64 bins, Goodman `M = 0.3`, `S_E = 100`, `N_E = 2e6`, `k = 5`.
pub fn reference_config() -> RainflowConfig {
    RainflowConfig {
        num_bins: 64,
        mean_stress_coefficient: 0.3,
        sn_curve: Some(SnCurve::new(100.0, 2e6, 5.0)),
    }
}

/// `steps` tensors stored time-last; see
/// [`stria_test_utils::stress_series_time_last`].
pub fn tensor_series(steps: usize) -> Vec<f64> {
    stria_test_utils::stress_series_time_last(steps)
}
