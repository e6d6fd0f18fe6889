//! Critical-plane damage sweep over a `[steps, 3, 3]` tensor series.
//!
//! Each candidate plane is given by two angles `(θ, φ)`. The normal stress
//! on the plane is projected out of every time step and counted as a
//! scalar history with a fresh [`RainflowCounter`]. The damage of every
//! plane is collected into a `[theta_steps, phi_steps]` map whose largest
//! entry marks the critical plane.
//!
//! Multiaxial scaling is not applied here; run
//! [`scale_multiaxial`](crate::principal::scale_multiaxial) over the series
//! first when it is wanted.

use std::f64::consts::PI;

use stria_core::numeric::{first_infinite, first_nan, min_max};
use stria_core::StriaError;
use stria_view::{OwnedArray, StridedView};

use crate::config::RainflowConfig;
use crate::counter::RainflowCounter;
use crate::principal::series_steps;

/// Rotation taking the reference axes onto the frame of plane `(θ, φ)`.
///
/// Row 0 is the radial direction at polar angle `φ` and azimuth `θ`, row 1
/// the azimuthal tangent and row 2 the plane normal used by the sweep.
pub fn rotation_two_angle(theta: f64, phi: f64) -> [[f64; 3]; 3] {
    let (st, ct) = theta.sin_cos();
    let (sp, cp) = phi.sin_cos();
    [
        [ct * sp, st * sp, cp],
        [-st, ct, 0.0],
        [-ct * cp, -st * cp, sp],
    ]
}

/// Unit normal of plane `(θ, φ)`.
pub fn plane_normal(theta: f64, phi: f64) -> [f64; 3] {
    rotation_two_angle(theta, phi)[2]
}

/// Normal stress `n · S(t) · n` for every step of a `[steps, 3, 3]` series.
///
/// Each tensor component is read as its own strided `[steps]` view, so the
/// projection works for any storage order of the series.
pub fn normal_stress_history(
    series: &StridedView<'_, f64>,
    normal: &[f64; 3],
) -> Result<Vec<f64>, StriaError> {
    let steps = series_steps(series.shape())?;
    let mut history = vec![0.0; steps];
    for (i, &ni) in normal.iter().enumerate() {
        let row = series.subview(1, i)?;
        for (j, &nj) in normal.iter().enumerate() {
            let component = row.subview(1, j)?;
            let w = ni * nj;
            for (acc, &s) in history.iter_mut().zip(component.iter()) {
                *acc += w * s;
            }
        }
    }
    Ok(history)
}

/// Damage of one projected history. A constant history has no cycles.
fn plane_damage(history: &[f64], config: &RainflowConfig) -> Result<f64, StriaError> {
    if let Some((lo, hi)) = min_max(history.iter().copied()) {
        if lo == hi && lo.is_finite() {
            return Ok(0.0);
        }
    }
    let view = StridedView::from_slice(history)?;
    let mut counter = RainflowCounter::from_config(config.clone())?;
    counter.set_stresses(&view)?;
    counter.compute()
}

/// Rainflow damage on `theta_steps × phi_steps` planes.
///
/// Plane `[i, j]` has `θ = π·i/theta_steps` and `φ = π·j/phi_steps`.
/// Planes whose normal stress never changes contribute zero damage.
///
/// # Errors
///
/// - `InvalidConfig` if either step count is zero, the series is not
///   `[steps, 3, 3]`, `config` is invalid or has no S-N curve, or a
///   projected history cannot be counted.
/// - `NanInput` / `NonFinite` if the series holds NaN or an infinity.
pub fn critical_plane_damage(
    series: &StridedView<'_, f64>,
    config: &RainflowConfig,
    theta_steps: usize,
    phi_steps: usize,
) -> Result<OwnedArray<f64>, StriaError> {
    if theta_steps == 0 || phi_steps == 0 {
        return Err(StriaError::config(format!(
            "plane sweep needs at least one angle per axis, got {theta_steps} x {phi_steps}"
        )));
    }
    series_steps(series.shape())?;
    config.validate()?;
    if config.sn_curve.is_none() {
        return Err(StriaError::config("S-N curve parameters are not set"));
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

    let mut map = OwnedArray::filled(&[theta_steps, phi_steps], 0.0)?;
    let mut out = map.view_mut();
    for i in 0..theta_steps {
        let theta = PI * i as f64 / theta_steps as f64;
        for j in 0..phi_steps {
            let phi = PI * j as f64 / phi_steps as f64;
            let history = normal_stress_history(series, &plane_normal(theta, phi))?;
            out.set(&[i, j], plane_damage(&history, config)?)?;
        }
    }
    Ok(map)
}
