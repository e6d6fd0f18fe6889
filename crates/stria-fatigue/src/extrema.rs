//! Turning-point extraction with a one-bin noise filter.

use stria_core::StriaError;
use stria_view::StridedView;

use crate::bins::BinGrid;

/// A retained turning point of the load history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extremum {
    /// Position in the raw series.
    pub index: usize,
    /// Raw sample value.
    pub value: f64,
    /// Nearest bin of `value`.
    pub bin: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Seeking {
    Max,
    Min,
}

/// Extract alternating maxima and minima from a 1-D series.
///
/// A sample must move more than one bin width away from the tracked
/// extremum before that extremum is committed, which discards reversals
/// smaller than the bin resolution. The first and last samples are always
/// kept.
///
/// # Errors
///
/// `InvalidConfig` if the series has fewer than two samples or no sample
/// departs from the first by at least one bin width.
pub fn extract(series: &StridedView<'_, f64>, grid: &BinGrid) -> Result<Vec<Extremum>, StriaError> {
    let width = grid.width();
    let mut samples = series.iter().copied().enumerate();
    let Some((_, first)) = samples.next() else {
        return Err(StriaError::config("stress series is empty"));
    };
    let last_index = series.len() - 1;
    if last_index == 0 {
        return Err(StriaError::config("stress series needs at least 2 samples"));
    }

    let mut samples = samples.skip_while(|&(_, v)| (v - first).abs() < width).peekable();
    let mut seeking = match samples.peek() {
        Some(&(_, v)) if v > first => Seeking::Max,
        Some(_) => Seeking::Min,
        None => {
            return Err(StriaError::config(format!(
                "no sample departs from the first by a full bin width ({width})"
            )))
        }
    };

    let mut indices = vec![0];
    let (mut max_index, mut max_value) = (0, f64::NEG_INFINITY);
    let (mut min_index, mut min_value) = (0, f64::INFINITY);
    for (i, v) in samples {
        if v > max_value {
            (max_index, max_value) = (i, v);
        }
        if v < min_value {
            (min_index, min_value) = (i, v);
        }
        match seeking {
            Seeking::Max if v < max_value - width => {
                indices.push(max_index);
                (min_index, min_value) = (i, v);
                seeking = Seeking::Min;
            }
            Seeking::Min if v > min_value + width => {
                indices.push(min_index);
                (max_index, max_value) = (i, v);
                seeking = Seeking::Max;
            }
            _ => {}
        }
    }
    if indices.last() != Some(&last_index) {
        indices.push(last_index);
    }

    indices
        .into_iter()
        .map(|index| {
            let value = *series.get(&[index])?;
            Ok(Extremum {
                index,
                value,
                bin: grid.bin_of(value),
            })
        })
        .collect()
}
