//! Rainflow counter configuration.

use stria_core::numeric::ensure_not_nan;
use stria_core::StriaError;

/// Basquin S-N curve `N(S) = N_E · (S_E / S)^k`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnCurve {
    /// Reference stress amplitude `S_E`. Must be positive.
    pub reference_amplitude: f64,
    /// Cycles to failure at `S_E`. Must be positive.
    pub reference_cycles: f64,
    /// Basquin exponent `k`. Must be positive.
    pub slope: f64,
}

impl SnCurve {
    /// Curve through `(S_E, N_E)` with exponent `k`.
    pub fn new(reference_amplitude: f64, reference_cycles: f64, slope: f64) -> Self {
        Self {
            reference_amplitude,
            reference_cycles,
            slope,
        }
    }

    /// Check that every parameter is a positive finite number.
    ///
    /// # Errors
    ///
    /// `NanInput` for a NaN parameter, `InvalidConfig` for a non-positive
    /// or infinite one.
    pub fn validate(&self) -> Result<(), StriaError> {
        let params = [
            ("S-N reference amplitude", self.reference_amplitude),
            ("S-N reference cycles", self.reference_cycles),
            ("S-N slope", self.slope),
        ];
        for (what, value) in params {
            ensure_not_nan(value, what)?;
            if value <= 0.0 || value.is_infinite() {
                return Err(StriaError::config(format!(
                    "{what} must be positive and finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Damage contributed by one cycle of (corrected) amplitude `s`.
    pub fn damage_per_cycle(&self, s: f64) -> f64 {
        (s / self.reference_amplitude).powf(self.slope) / self.reference_cycles
    }
}

/// Configuration for a [`RainflowCounter`](crate::RainflowCounter).
///
/// Validated when the counter is built and whenever a setter changes a
/// field; fields are public so callers can start from `Default` and
/// override what they need.
#[derive(Clone, Debug, PartialEq)]
pub struct RainflowConfig {
    /// Number of amplitude bins. Also fixes the noise threshold: one bin
    /// width, `(max - min) / (num_bins - 1)`.
    ///
    /// Default: 64. Must be at least 2.
    pub num_bins: usize,

    /// Goodman mean-stress coefficient `M`. Default: 0 (no correction).
    pub mean_stress_coefficient: f64,

    /// S-N curve. `compute` refuses to run until one is set.
    pub sn_curve: Option<SnCurve>,
}

impl RainflowConfig {
    /// Default bin count.
    pub const DEFAULT_NUM_BINS: usize = 64;

    /// Default mean-stress coefficient.
    pub const DEFAULT_MEAN_STRESS_COEFFICIENT: f64 = 0.0;

    /// Config with `num_bins` bins and defaults elsewhere.
    pub fn new(num_bins: usize) -> Self {
        Self {
            num_bins,
            mean_stress_coefficient: Self::DEFAULT_MEAN_STRESS_COEFFICIENT,
            sn_curve: None,
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), StriaError> {
        if self.num_bins < 2 {
            return Err(StriaError::config(format!(
                "at least 2 bins are required, got {}",
                self.num_bins
            )));
        }
        ensure_not_nan(self.mean_stress_coefficient, "mean stress coefficient")?;
        if self.mean_stress_coefficient.is_infinite() {
            return Err(StriaError::config("mean stress coefficient must be finite"));
        }
        if let Some(curve) = &self.sn_curve {
            curve.validate()?;
        }
        Ok(())
    }
}

impl Default for RainflowConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NUM_BINS)
    }
}
