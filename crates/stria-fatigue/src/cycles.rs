//! Four-point rainflow counting over bin-coded turning points.

use stria_core::StriaError;
use stria_view::StridedView;

/// Square table of closed-cycle counts indexed by `(from_bin, to_bin)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RainflowMatrix {
    num_bins: usize,
    counts: Vec<u32>,
}

impl RainflowMatrix {
    /// All-zero `num_bins × num_bins` matrix.
    pub fn new(num_bins: usize) -> Self {
        Self {
            num_bins,
            counts: vec![0; num_bins * num_bins],
        }
    }

    /// Side length.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Count of cycles from bin `from` to bin `to`; 0 outside the table.
    pub fn get(&self, from: usize, to: usize) -> u32 {
        if from < self.num_bins && to < self.num_bins {
            self.counts[from * self.num_bins + to]
        } else {
            0
        }
    }

    pub(crate) fn increment(&mut self, from: usize, to: usize) {
        self.counts[from * self.num_bins + to] += 1;
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        self.counts.fill(0);
    }

    /// Total number of closed cycles.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// `(from, to, count)` for every nonzero cell, row-major.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        let n = self.num_bins;
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(move |(k, &c)| (k / n, k % n, c))
    }

    /// The counts as a 2-D `[from, to]` view.
    pub fn as_view(&self) -> Result<StridedView<'_, u32>, StriaError> {
        StridedView::contiguous(&self.counts, &[self.num_bins, self.num_bins])
    }
}

/// What the cycle stack can do with its current contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackPhase {
    /// Nothing pushed yet.
    Empty,
    /// One or two entries: a non-reversal can be dropped, no cycle can close.
    Growing,
    /// Three or more entries: the four-point test applies.
    Reducible,
}

/// Stack of unmatched turning points (bin indices).
#[derive(Clone, Debug, Default)]
pub struct CycleStack {
    entries: Vec<usize>,
}

impl CycleStack {
    /// Empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> StackPhase {
        match self.entries.len() {
            0 => StackPhase::Empty,
            1 | 2 => StackPhase::Growing,
            _ => StackPhase::Reducible,
        }
    }

    /// Unmatched entries, oldest first.
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    /// Feed one coded sample, closing cycles into `matrix`. Returns how many
    /// cycles closed.
    pub fn push(&mut self, s: usize, matrix: &mut RainflowMatrix) -> usize {
        let mut closed = 0;
        loop {
            let reduced = match self.phase() {
                StackPhase::Empty => false,
                StackPhase::Growing => self.drop_non_reversal(s),
                StackPhase::Reducible => {
                    if self.drop_non_reversal(s) {
                        true
                    } else if self.close_inner(s, matrix) {
                        closed += 1;
                        true
                    } else {
                        false
                    }
                }
            };
            if !reduced {
                break;
            }
        }
        self.entries.push(s);
        closed
    }

    /// Pop `last` if it lies between `second` and `s`: not a reversal.
    fn drop_non_reversal(&mut self, s: usize) -> bool {
        let &[.., second, last] = self.entries.as_slice() else {
            return false;
        };
        if (s as i64 - last as i64) * (last as i64 - second as i64) < 0 {
            return false;
        }
        self.entries.pop();
        true
    }

    /// Four-point test: close `(second, last)` when its range is enclosed
    /// by both neighbouring ranges.
    fn close_inner(&mut self, s: usize, matrix: &mut RainflowMatrix) -> bool {
        let &[.., third, second, last] = self.entries.as_slice() else {
            return false;
        };
        let inner = last.abs_diff(second);
        if inner > second.abs_diff(third) || inner > s.abs_diff(last) {
            return false;
        }
        matrix.increment(second, last);
        self.entries.truncate(self.entries.len() - 2);
        true
    }

    /// Consume the stack, returning its entries.
    pub fn into_residual(self) -> Vec<usize> {
        self.entries
    }
}

/// Outcome of one counting pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassOutcome {
    /// Entries left on the stack.
    pub residual: Vec<usize>,
    /// Cycles closed during the pass.
    pub cycles: usize,
}

/// Run the four-point method over `bins` on a fresh stack, accumulating
/// into `matrix`.
pub fn count_pass<I>(bins: I, matrix: &mut RainflowMatrix) -> PassOutcome
where
    I: IntoIterator<Item = usize>,
{
    let mut stack = CycleStack::new();
    let cycles = bins.into_iter().map(|s| stack.push(s, matrix)).sum();
    PassOutcome {
        residual: stack.into_residual(),
        cycles,
    }
}

/// Close the half cycles left in `residual` by counting it twice in a row,
/// as if the history repeated.
pub fn count_residual(residual: &[usize], matrix: &mut RainflowMatrix) -> PassOutcome {
    count_pass(residual.iter().chain(residual).copied(), matrix)
}
