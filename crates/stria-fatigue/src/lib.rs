//! Rainflow fatigue counting over strided stress histories.
//!
//! [`RainflowCounter`] turns a 1-D stress series into a rainflow matrix and
//! a Palmgren-Miner damage sum:
//!
//! 1. **Binning** ([`BinGrid`]): `num_bins` centres spanning the series'
//!    range; one bin width is also the noise threshold.
//! 2. **Turning points** ([`extrema::extract`]): alternating maxima and
//!    minima, reversals smaller than a bin width discarded.
//! 3. **Counting** ([`cycles`]): four-point stack method over the
//!    bin-coded turning points, then again over the residual repeated
//!    twice so that half cycles close.
//! 4. **Damage** ([`damage`]): Goodman-corrected amplitudes against a
//!    Basquin [`SnCurve`].
//!
//! [`principal`] computes principal stresses and multiaxial scaling for
//! `[steps, 3, 3]` tensor series, which callers typically reduce to the
//! scalar history fed to the counter. [`critical_plane`] instead projects
//! the normal stress onto a sweep of planes and counts each one.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bins;
pub mod config;
pub mod counter;
pub mod critical_plane;
pub mod cycles;
pub mod damage;
pub mod extrema;
pub mod metrics;
pub mod principal;

pub use bins::BinGrid;
pub use config::{RainflowConfig, SnCurve};
pub use counter::RainflowCounter;
pub use critical_plane::{critical_plane_damage, normal_stress_history, rotation_two_angle};
pub use cycles::{CycleStack, PassOutcome, RainflowMatrix, StackPhase};
pub use damage::Cycle;
pub use extrema::Extremum;
pub use metrics::RainflowMetrics;
pub use principal::{
    is_zero_tensor, multiaxial_scale_factor, principal_stress_series, principal_stresses,
    scale_multiaxial, ZERO_STRESS_EPS,
};
