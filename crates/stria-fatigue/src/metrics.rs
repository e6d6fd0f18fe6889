//! Per-run statistics for the rainflow counter.

/// Counts and timing recorded by the most recent successful `compute()`.
///
/// Reset to all-zero at the start of every run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RainflowMetrics {
    /// Samples in the stress series.
    pub samples: usize,
    /// Turning points retained after noise filtering.
    pub extrema: usize,
    /// Cycles closed by the primary pass.
    pub primary_cycles: usize,
    /// Cycles closed by the repeated-residual pass.
    pub residual_cycles: usize,
    /// Entries left on the stack after the primary pass.
    pub residual_len: usize,
    /// Wall-clock time of the run, in microseconds.
    pub compute_us: u64,
}

impl RainflowMetrics {
    /// Cycles closed by both passes.
    pub fn total_cycles(&self) -> usize {
        self.primary_cycles + self.residual_cycles
    }
}
