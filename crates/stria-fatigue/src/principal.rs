//! Principal stresses of symmetric 3×3 tensors read through strided views.
//!
//! Tensors are read from the upper triangle. Series are `[time, 3, 3]`
//! views; each time step is handled through a sub-view, so any storage
//! order the caller uses (time-first, time-last, padded) works unchanged.

use std::f64::consts::PI;

use stria_core::StriaError;
use stria_view::{StridedView, StridedViewMut};

/// Entries at or below this magnitude count as zero.
pub const ZERO_STRESS_EPS: f64 = 1e-8;

fn expect_shape(what: &str, shape: &[usize], want: &[usize]) -> Result<(), StriaError> {
    if shape != want {
        return Err(StriaError::config(format!(
            "{what} must have shape {want:?}, got {shape:?}"
        )));
    }
    Ok(())
}

pub(crate) fn series_steps(series: &[usize]) -> Result<usize, StriaError> {
    match series {
        [steps, 3, 3] => Ok(*steps),
        _ => Err(StriaError::config(format!(
            "stress series must have shape [steps, 3, 3], got {series:?}"
        ))),
    }
}

/// Read a 3×3 tensor into a dense array, rejecting NaN and infinities.
fn read_tensor(tensor: &StridedView<'_, f64>) -> Result<[[f64; 3]; 3], StriaError> {
    expect_shape("stress tensor", tensor.shape(), &[3, 3])?;
    let mut s = [[0.0; 3]; 3];
    for (k, (index, &v)) in tensor.positions().zip(tensor.iter()).enumerate() {
        if v.is_nan() {
            return Err(StriaError::NanInput {
                what: "stress tensor",
                position: Some(k),
            });
        }
        if v.is_infinite() {
            return Err(StriaError::NonFinite {
                what: "stress tensor",
                position: Some(k),
            });
        }
        s[index[0]][index[1]] = v;
    }
    Ok(s)
}

fn all_within<I>(values: I, eps: f64) -> bool
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().all(|v| v.abs() <= eps)
}

/// `true` if every entry of `tensor` is within `eps` of zero.
pub fn is_zero_tensor(tensor: &StridedView<'_, f64>, eps: f64) -> bool {
    all_within(tensor.iter().copied(), eps)
}

/// Principal values of a symmetric tensor, ascending.
///
/// Closed form from the invariants `I1, I2, I3` and the Lode angle.
pub fn principal_values(s: &[[f64; 3]; 3]) -> [f64; 3] {
    if all_within(s.iter().flatten().copied(), ZERO_STRESS_EPS) {
        return [0.0; 3];
    }
    let (s01, s12, s02) = (s[0][1], s[1][2], s[0][2]);
    let i1 = s[0][0] + s[1][1] + s[2][2];
    let i2 = s[0][0] * s[1][1] + s[1][1] * s[2][2] + s[2][2] * s[0][0]
        - s01 * s01
        - s12 * s12
        - s02 * s02;
    let i3 = s[0][0] * s[1][1] * s[2][2]
        - s[0][0] * s12 * s12
        - s[1][1] * s02 * s02
        - s[2][2] * s01 * s01
        + 2.0 * s01 * s12 * s02;

    let disc = i1 * i1 - 3.0 * i2;
    // Hydrostatic: all three roots coincide.
    if disc <= f64::EPSILON * i1 * i1 {
        return [i1 / 3.0; 3];
    }
    let arg = (2.0 * i1 * i1 * i1 - 9.0 * i1 * i2 + 27.0 * i3) / (2.0 * disc.powf(1.5));
    let phi = arg.clamp(-1.0, 1.0).acos() / 3.0;
    let r = 2.0 / 3.0 * disc.sqrt();
    let mut ps = [0.0, 1.0, 2.0].map(|i: f64| i1 / 3.0 + r * (phi + 2.0 / 3.0 * PI * i).cos());
    ps.sort_by(f64::total_cmp);
    ps
}

/// Principal stresses of a 3×3 `tensor`, written ascending into `out`.
///
/// # Errors
///
/// `InvalidConfig` if `tensor` is not 3×3 or `out` is not a 3-vector;
/// `NanInput` if the tensor holds NaN.
pub fn principal_stresses(
    tensor: &StridedView<'_, f64>,
    out: &mut StridedViewMut<'_, f64>,
) -> Result<(), StriaError> {
    expect_shape("principal stress output", out.shape(), &[3])?;
    let ps = principal_values(&read_tensor(tensor)?);
    out.copy_from(&ps)
}

/// Principal stresses for every step of a `[steps, 3, 3]` series, written
/// into the `[steps, 3]` view `out`.
pub fn principal_stress_series(
    series: &StridedView<'_, f64>,
    out: &mut StridedViewMut<'_, f64>,
) -> Result<(), StriaError> {
    let steps = series_steps(series.shape())?;
    expect_shape("principal stress series output", out.shape(), &[steps, 3])?;
    for t in 0..steps {
        let tensor = series.subview(0, t)?;
        let mut row = out.subview_mut(0, t)?;
        principal_stresses(&tensor, &mut row)?;
    }
    Ok(())
}

/// Multiaxiality scale factor `f = 1 + (1 - k) · V`.
///
/// `V` is the ratio of the smaller to the larger outer principal stress
/// by magnitude: -1 for pure shear, 0 for uniaxial, 1 for hydrostatic.
/// A tensor with both outer principals at zero is left unscaled.
pub fn multiaxial_scale_factor(ps: &[f64; 3], k: f64) -> f64 {
    let (lo, hi) = (ps[0], ps[2]);
    let v = if lo.abs() > hi.abs() && lo.abs() > ZERO_STRESS_EPS {
        hi / lo
    } else if hi.abs() > ZERO_STRESS_EPS {
        lo / hi
    } else {
        return 1.0;
    };
    1.0 + (1.0 - k) * v
}

/// Scale every tensor of a `[steps, 3, 3]` series in place by its
/// [`multiaxial_scale_factor`].
pub fn scale_multiaxial(series: &mut StridedViewMut<'_, f64>, k: f64) -> Result<(), StriaError> {
    stria_core::numeric::ensure_not_nan(k, "multiaxial exponent")?;
    let steps = series_steps(series.shape())?;
    for t in 0..steps {
        let mut tensor = series.subview_mut(0, t)?;
        let ps = principal_values(&read_tensor(&tensor.as_view())?);
        let f = multiaxial_scale_factor(&ps, k);
        tensor.for_each_mut(|x| *x *= f);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stria_core::ErrorKind;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    fn principal_of(tensor: &[f64; 9]) -> [f64; 3] {
        let view = StridedView::contiguous(tensor, &[3, 3]).unwrap();
        let mut out = [0.0; 3];
        let mut out_view = StridedViewMut::from_slice(&mut out).unwrap();
        principal_stresses(&view, &mut out_view).unwrap();
        out
    }

    #[test]
    fn diagonal_tensor() {
        let ps = principal_of(&[3.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0]);
        assert!(close(&ps, &[1.0, 2.0, 3.0]), "{ps:?}");
    }

    #[test]
    fn pure_shear() {
        let ps = principal_of(&[0.0, 5.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(close(&ps, &[-5.0, 0.0, 5.0]), "{ps:?}");
        assert!((multiaxial_scale_factor(&ps, 0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn hydrostatic_and_zero() {
        let ps = principal_of(&[2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0]);
        assert_eq!(ps, [2.0; 3]);
        assert_eq!(multiaxial_scale_factor(&ps, 0.25), 1.75);
        let ps = principal_of(&[1e-9; 9]);
        assert_eq!(ps, [0.0; 3]);
        assert_eq!(multiaxial_scale_factor(&ps, 0.25), 1.0);
    }

    #[test]
    fn invariants_preserved() {
        let t = [4.0, 1.0, -2.0, 1.0, -3.0, 0.5, -2.0, 0.5, 1.0];
        let ps = principal_of(&t);
        assert!((ps.iter().sum::<f64>() - 2.0).abs() < 1e-9);
        assert!(ps[0] <= ps[1] && ps[1] <= ps[2]);
    }

    #[test]
    fn zero_tensor_check() {
        let z = [0.0, 1e-9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1e-9];
        let view = StridedView::contiguous(&z, &[3, 3]).unwrap();
        assert!(is_zero_tensor(&view, ZERO_STRESS_EPS));
        assert!(!is_zero_tensor(&view, 1e-10));
        let mut dense = [[0.0; 3]; 3];
        dense[0][1] = 1e-9;
        assert_eq!(principal_values(&dense), [0.0; 3]);
    }

    #[test]
    fn shape_and_nan_errors() {
        let t = [0.0; 9];
        let mut out = [0.0; 3];
        let wrong = StridedView::contiguous(&t, &[9]).unwrap();
        let mut ov = StridedViewMut::from_slice(&mut out).unwrap();
        assert_eq!(
            principal_stresses(&wrong, &mut ov).unwrap_err().kind(),
            ErrorKind::Configuration
        );
        let mut n = [0.0; 9];
        n[4] = f64::NAN;
        let nan = StridedView::contiguous(&n, &[3, 3]).unwrap();
        assert_eq!(
            principal_stresses(&nan, &mut ov).unwrap_err(),
            StriaError::NanInput {
                what: "stress tensor",
                position: Some(4)
            }
        );
        n[4] = f64::NEG_INFINITY;
        let inf = StridedView::contiguous(&n, &[3, 3]).unwrap();
        assert_eq!(
            principal_stresses(&inf, &mut ov).unwrap_err().kind(),
            ErrorKind::NumericInput
        );
    }

    #[test]
    fn series_through_subviews() {
        // Two steps stored time-last: element strides [1, 6, 2].
        let mut buf = [0.0; 18];
        for (r, c, v0, v1) in [(0, 0, 1.0, 3.0), (1, 1, 2.0, 1.0), (2, 2, 3.0, 2.0)] {
            buf[6 * r + 2 * c] = v0;
            buf[6 * r + 2 * c + 1] = v1;
        }
        let series = StridedView::new(&buf, &[2, 3, 3], &[1, 6, 2]).unwrap();
        let mut out = [0.0; 6];
        let mut ov = StridedViewMut::contiguous(&mut out, &[2, 3]).unwrap();
        principal_stress_series(&series, &mut ov).unwrap();
        assert!(close(&out, &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]), "{out:?}");
    }

    #[test]
    fn scale_multiaxial_in_place() {
        // Step 0: pure shear. Step 1: uniaxial tension.
        let mut buf = [0.0; 18];
        buf[1] = 5.0;
        buf[3] = 5.0;
        buf[9] = 10.0;
        let mut series = StridedViewMut::contiguous(&mut buf, &[2, 3, 3]).unwrap();
        scale_multiaxial(&mut series, 0.5).unwrap();
        assert!((buf[1] - 2.5).abs() < 1e-9);
        assert!((buf[3] - 2.5).abs() < 1e-9);
        assert!((buf[9] - 10.0).abs() < 1e-9);
    }
}
