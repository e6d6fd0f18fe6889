//! Palmgren-Miner damage with Goodman mean-stress correction.

use crate::bins::BinGrid;
use crate::config::SnCurve;
use crate::cycles::RainflowMatrix;

/// One populated cell of a rainflow matrix, in stress units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cycle {
    /// Bin the cycle starts from.
    pub from_bin: usize,
    /// Bin the cycle turns at.
    pub to_bin: usize,
    /// Number of cycles in the cell.
    pub count: u32,
    /// Half the range between the two bin centres.
    pub amplitude: f64,
    /// Midpoint of the two bin centres.
    pub mean: f64,
}

/// Populated cells of `matrix` converted to amplitude and mean.
pub fn cycles(matrix: &RainflowMatrix, grid: &BinGrid) -> Vec<Cycle> {
    matrix
        .iter_nonzero()
        .map(|(from_bin, to_bin, count)| {
            let (a, b) = (grid.center(from_bin), grid.center(to_bin));
            Cycle {
                from_bin,
                to_bin,
                count,
                amplitude: (a - b).abs() / 2.0,
                mean: (a + b) / 2.0,
            }
        })
        .collect()
}

/// Goodman-corrected amplitude.
///
/// A mean above `-amplitude` shifts the amplitude by `M · mean`; deeper
/// compressive means reduce it by `M · amplitude` instead.
pub fn corrected_amplitude(amplitude: f64, mean: f64, m: f64) -> f64 {
    if mean >= -amplitude {
        amplitude + m * mean
    } else {
        amplitude - m * amplitude
    }
}

/// Sum of `count / N_E · (corrected / S_E)^k` over every populated cell.
pub fn miner_damage(matrix: &RainflowMatrix, grid: &BinGrid, m: f64, curve: &SnCurve) -> f64 {
    cycles(matrix, grid)
        .iter()
        .map(|c| {
            let s = corrected_amplitude(c.amplitude, c.mean, m);
            f64::from(c.count) * curve.damage_per_cycle(s)
        })
        .sum()
}
