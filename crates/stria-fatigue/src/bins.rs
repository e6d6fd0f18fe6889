//! Uniform amplitude bins spanning a series' range.

use std::cmp::Ordering;

use stria_core::StriaError;

/// `num_bins` equally spaced centres from `min` to `max` inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinGrid {
    min: f64,
    max: f64,
    width: f64,
    num_bins: usize,
}

impl BinGrid {
    /// Grid over `[min, max]`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `num_bins < 2`, the range is empty (a constant
    /// series has no cycles to count), or the bin width is not a positive
    /// finite number.
    pub fn new(min: f64, max: f64, num_bins: usize) -> Result<Self, StriaError> {
        if num_bins < 2 {
            return Err(StriaError::config(format!(
                "at least 2 bins are required, got {num_bins}"
            )));
        }
        if max.partial_cmp(&min) != Some(Ordering::Greater) {
            return Err(StriaError::config(format!(
                "stress series is constant ({min}); nothing to count"
            )));
        }
        let width = (max - min) / (num_bins - 1) as f64;
        if !(width.is_finite() && width > 0.0) {
            return Err(StriaError::config(format!(
                "bin width over [{min}, {max}] with {num_bins} bins is {width}"
            )));
        }
        Ok(Self {
            min,
            max,
            width,
            num_bins,
        })
    }

    /// Lowest bin centre (the series minimum).
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Highest bin centre (the series maximum).
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Spacing between centres, also the extrema noise threshold.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Number of bins.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Centre of bin `i`.
    pub fn center(&self, i: usize) -> f64 {
        self.min + i as f64 * self.width
    }

    /// All centres, ascending.
    pub fn centers(&self) -> Vec<f64> {
        (0..self.num_bins).map(|i| self.center(i)).collect()
    }

    /// Nearest bin of `value`, clamped to the grid.
    pub fn bin_of(&self, value: f64) -> usize {
        let raw = ((value - self.min) / self.width + 0.5).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.num_bins - 1)
        }
    }
}
