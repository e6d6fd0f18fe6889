//! The rainflow counter: configure once, compute over fresh series.

use std::time::Instant;

use stria_core::numeric::{ensure_not_nan, first_infinite, first_nan, min_max};
use stria_core::StriaError;
use stria_view::StridedView;

use crate::bins::BinGrid;
use crate::config::{RainflowConfig, SnCurve};
use crate::cycles::{count_pass, count_residual, RainflowMatrix};
use crate::damage::{cycles, miner_damage, Cycle};
use crate::extrema::{extract, Extremum};
use crate::metrics::RainflowMetrics;

/// Rainflow cycle counter and Palmgren-Miner damage accumulator.
///
/// The counter borrows the stress series for `'a`; nothing is copied
/// until [`compute`](Self::compute) extracts turning points.
///
/// ```
/// use stria_fatigue::RainflowCounter;
/// use stria_view::StridedView;
///
/// let series = [2.0, 5.0, 1.0, 6.0, 0.0];
/// let view = StridedView::from_slice(&series).unwrap();
///
/// let mut counter = RainflowCounter::new(7).unwrap();
/// counter.set_stresses(&view).unwrap();
/// counter.set_sn_curve_parameters(1.0, 1.0, 1.0).unwrap();
/// assert_eq!(counter.compute().unwrap(), 5.0);
/// assert_eq!(counter.residual(), &[2, 5, 1, 6, 0]);
/// ```
#[derive(Debug)]
pub struct RainflowCounter<'a> {
    config: RainflowConfig,
    series: Option<StridedView<'a, f64>>,
    grid: Option<BinGrid>,
    extrema: Vec<Extremum>,
    matrix: RainflowMatrix,
    residual: Vec<usize>,
    damage: Option<f64>,
    metrics: RainflowMetrics,
}

impl<'a> RainflowCounter<'a> {
    /// Counter with `num_bins` bins, no mean-stress correction and no S-N
    /// curve.
    pub fn new(num_bins: usize) -> Result<Self, StriaError> {
        Self::from_config(RainflowConfig::new(num_bins))
    }

    /// Counter from a full configuration.
    pub fn from_config(config: RainflowConfig) -> Result<Self, StriaError> {
        config.validate()?;
        Ok(Self {
            matrix: RainflowMatrix::new(config.num_bins),
            config,
            series: None,
            grid: None,
            extrema: Vec::new(),
            residual: Vec::new(),
            damage: None,
            metrics: RainflowMetrics::default(),
        })
    }

    /// Attach a stress history and derive its bin grid.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the view is not 1-D, holds fewer than two
    /// samples, is constant, or spans a range too wide to bin; `NanInput`
    /// if any sample is NaN and `NonFinite` if any sample is infinite.
    pub fn set_stresses(&mut self, series: &StridedView<'a, f64>) -> Result<(), StriaError> {
        if series.ndim() != 1 {
            return Err(StriaError::config(format!(
                "stress series must be one-dimensional, got shape {:?}",
                series.shape()
            )));
        }
        if series.len() < 2 {
            return Err(StriaError::config(format!(
                "stress series needs at least 2 samples, got {}",
                series.len()
            )));
        }
        if let Some(position) = first_nan(series.iter().copied()) {
            return Err(StriaError::NanInput {
                what: "stress series",
                position: Some(position),
            });
        }
        if let Some(position) = first_infinite(series.iter().copied()) {
            return Err(StriaError::NonFinite {
                what: "stress series",
                position: Some(position),
            });
        }
        let (lo, hi) = min_max(series.iter().copied())
            .ok_or_else(|| StriaError::config("stress series is empty"))?;
        let grid = BinGrid::new(lo, hi, self.config.num_bins)?;

        self.series = Some(series.clone());
        self.grid = Some(grid);
        self.damage = None;
        Ok(())
    }

    /// Set the Goodman mean-stress coefficient `M`.
    pub fn set_mean_stress_correction(&mut self, m: f64) -> Result<(), StriaError> {
        ensure_not_nan(m, "mean stress coefficient")?;
        if m.is_infinite() {
            return Err(StriaError::config("mean stress coefficient must be finite"));
        }
        self.config.mean_stress_coefficient = m;
        self.damage = None;
        Ok(())
    }

    /// Set the Basquin parameters `(S_E, N_E, k)`.
    pub fn set_sn_curve_parameters(
        &mut self,
        reference_amplitude: f64,
        reference_cycles: f64,
        slope: f64,
    ) -> Result<(), StriaError> {
        let curve = SnCurve::new(reference_amplitude, reference_cycles, slope);
        curve.validate()?;
        self.config.sn_curve = Some(curve);
        self.damage = None;
        Ok(())
    }

    /// Extract turning points, count cycles in two passes and sum damage.
    ///
    /// Every derived quantity is recomputed from the current series and
    /// parameters. On error `damage()` is `None` and the matrix, residual
    /// and metrics are left in an unspecified state.
    pub fn compute(&mut self) -> Result<f64, StriaError> {
        let started = Instant::now();
        self.damage = None;
        self.metrics = RainflowMetrics::default();

        let (Some(series), Some(grid)) = (self.series.as_ref(), self.grid.as_ref()) else {
            return Err(StriaError::config("no stress series set"));
        };
        let curve = self
            .config
            .sn_curve
            .ok_or_else(|| StriaError::config("no S-N curve parameters set"))?;

        self.extrema = extract(series, grid)?;
        self.matrix.clear();
        let primary = count_pass(self.extrema.iter().map(|e| e.bin), &mut self.matrix);
        let repeated = count_residual(&primary.residual, &mut self.matrix);

        let damage = miner_damage(
            &self.matrix,
            grid,
            self.config.mean_stress_coefficient,
            &curve,
        );

        self.metrics = RainflowMetrics {
            samples: series.len(),
            extrema: self.extrema.len(),
            primary_cycles: primary.cycles,
            residual_cycles: repeated.cycles,
            residual_len: primary.residual.len(),
            compute_us: started.elapsed().as_micros() as u64,
        };
        self.residual = primary.residual;
        self.damage = Some(damage);
        Ok(damage)
    }

    /// Active configuration.
    pub fn config(&self) -> &RainflowConfig {
        &self.config
    }

    /// Number of bins.
    pub fn num_bins(&self) -> usize {
        self.config.num_bins
    }

    /// Bin grid of the current series.
    pub fn grid(&self) -> Option<&BinGrid> {
        self.grid.as_ref()
    }

    /// Bin centres of the current series, empty before `set_stresses`.
    pub fn bin_centers(&self) -> Vec<f64> {
        self.grid.map(|g| g.centers()).unwrap_or_default()
    }

    /// Turning points from the last `compute()`.
    pub fn extrema(&self) -> &[Extremum] {
        &self.extrema
    }

    /// Cycle counts from the last `compute()`, both passes included.
    pub fn matrix(&self) -> &RainflowMatrix {
        &self.matrix
    }

    /// Bins left unmatched by the primary pass.
    pub fn residual(&self) -> &[usize] {
        &self.residual
    }

    /// Populated cycle cells with amplitude and mean.
    pub fn cycles(&self) -> Vec<Cycle> {
        match &self.grid {
            Some(grid) => cycles(&self.matrix, grid),
            None => Vec::new(),
        }
    }

    /// Damage from the last successful `compute()`.
    pub fn damage(&self) -> Option<f64> {
        self.damage
    }

    /// Statistics from the last `compute()`.
    pub fn metrics(&self) -> &RainflowMetrics {
        &self.metrics
    }
}
