//! Test utilities for stria development.
//!
//! Load histories with known rainflow content, seeded random series for
//! property tests and benchmarks, and stress-tensor buffers laid out the
//! ways callers actually store them.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    closed_loop, literal_series, monotonic_ramp, random_walk, stress_series_time_last,
    triangular_series, uniform_noise, LITERAL_NUM_BINS,
};
