//! Scalar helpers shared by the view consumers and the fatigue engine.

use crate::error::StriaError;

/// Return `Err(NanInput)` if `value` is NaN.
pub fn ensure_not_nan(value: f64, what: &'static str) -> Result<f64, StriaError> {
    if value.is_nan() {
        return Err(StriaError::NanInput {
            what,
            position: None,
        });
    }
    Ok(value)
}

/// Position of the first NaN in `values`, if any.
pub fn first_nan<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().position(f64::is_nan)
}

/// Position of the first infinite value in `values`, if any.
///
/// NaN is not reported here; screen with [`first_nan`] first.
pub fn first_infinite<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().position(f64::is_infinite)
}

/// Smallest and largest value of a sequence, or `None` if it is empty.
///
/// Callers are expected to have rejected NaN beforehand; a NaN never
/// replaces a running extremum.
pub fn min_max<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = values.into_iter();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| {
        (if v < lo { v } else { lo }, if v > hi { v } else { hi })
    }))
}

/// Locate `x` in the ascending table `values` by exponential search from
/// index 0 followed by bisection.
///
/// Equivalent to [`hunt_from`] with a guess of 0.
pub fn hunt(values: &[f64], x: f64, order: usize) -> Result<usize, StriaError> {
    hunt_from(values, x, order, 0)
}

/// Locate `x` in the ascending table `values`, starting from `guess`.
///
/// Returns the first index of the `order`-point stencil that brackets `x`:
/// the bracketing interval `[values[j], values[j + 1])` is found first,
/// then the stencil is centred on it and clamped to `[0, len - order]`.
/// Values outside the table land on the first or last stencil, which is
/// what linear extrapolation needs.
///
/// # Errors
///
/// `InvalidConfig` if the table has fewer than 2 entries or `order` is not
/// in `[2, len]`; `NanInput` if `x` is NaN.
pub fn hunt_from(values: &[f64], x: f64, order: usize, guess: usize) -> Result<usize, StriaError> {
    let n = values.len();
    if n < 2 || order < 2 || order > n {
        return Err(StriaError::config(format!(
            "hunt needs at least 2 table entries and 2 <= order <= len, got len {n}, order {order}"
        )));
    }
    ensure_not_nan(x, "hunt argument")?;

    let mut jl = guess.min(n - 1);
    let mut ju;
    let mut inc = 1usize;
    if x >= values[jl] {
        loop {
            ju = jl + inc;
            if ju >= n - 1 {
                ju = n - 1;
                break;
            } else if x < values[ju] {
                break;
            }
            jl = ju;
            inc += inc;
        }
    } else {
        ju = jl;
        loop {
            if inc >= jl {
                jl = 0;
                break;
            }
            jl -= inc;
            if x >= values[jl] {
                break;
            }
            ju = jl;
            inc += inc;
        }
    }

    while ju > jl + 1 {
        let jm = (ju + jl) >> 1;
        if x >= values[jm] {
            jl = jm;
        } else {
            ju = jm;
        }
    }

    let centred = jl.saturating_sub((order - 2) >> 1);
    Ok(centred.min(n - order))
}
