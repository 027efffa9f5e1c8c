//! Utility functions shared across the codebase.
//!
//! Interpolation helpers used by the light curves and the dim-to-warm
//! adjuster, color temperature unit conversion, and timestamp helpers.

use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;

use crate::constants::MIRED_KELVIN_NUMERATOR;

/// Unix timestamp in seconds, carrying sub-second precision.
pub type Timestamp = f64;

/// Convert an instant into a [`Timestamp`] without losing sub-second precision.
pub fn timestamp_of<Tz: TimeZone>(instant: &DateTime<Tz>) -> Timestamp {
    instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) / 1e9
}

/// Convert a [`Timestamp`] back into an instant, to millisecond precision.
///
/// Returns `None` for non-finite or out-of-range timestamps.
pub fn datetime_from_timestamp(ts: Timestamp) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((ts * 1000.0).round() as i64)
}

/// Interpolate between two u32 values based on progress (0.0 to 1.0).
///
/// # Arguments
/// * `start` - Starting value (returned when progress = 0.0)
/// * `end` - Ending value (returned when progress = 1.0)
/// * `progress` - Interpolation progress, automatically clamped to [0.0, 1.0]
///
/// # Returns
/// Interpolated value rounded to the nearest integer
///
/// # Examples
/// ```
/// use adaptive_lighting::utils::interpolate_u32;
/// assert_eq!(interpolate_u32(500, 200, 0.5), 350);
/// assert_eq!(interpolate_u32(6000, 3000, 0.25), 5250);
/// ```
pub fn interpolate_u32(start: u32, end: u32, progress: f64) -> u32 {
    let start_f = f64::from(start);
    let end_f = f64::from(end);
    let result = start_f + (end_f - start_f) * progress.clamp(0.0, 1.0);
    result.round() as u32
}

/// Interpolate between two f64 values based on progress (0.0 to 1.0).
///
/// # Examples
/// ```
/// use adaptive_lighting::utils::interpolate_f64;
/// assert_eq!(interpolate_f64(0.0, 1.0, 0.5), 0.5);
/// assert_eq!(interpolate_f64(-1.0, 0.0, 2.0), 0.0);
/// ```
pub fn interpolate_f64(start: f64, end: f64, progress: f64) -> f64 {
    start + (end - start) * progress.clamp(0.0, 1.0)
}

/// Fraction of the way `value` lies between `start` and `end`, clamped to [0, 1].
///
/// A zero-length range yields 0.0 for values below `end` and 1.0 otherwise.
/// NaN is treated as lying before `start`.
pub fn progress_between(value: f64, start: f64, end: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    let span = end - start;
    if span.abs() <= f64::EPSILON {
        return if value >= end { 1.0 } else { 0.0 };
    }
    ((value - start) / span).clamp(0.0, 1.0)
}

/// Unclamped linear map of `x` from the line through (x1, y1) and (x2, y2).
pub fn lerp(x: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> f64 {
    if (x2 - x1).abs() <= f64::EPSILON {
        return y2;
    }
    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}

/// Hyperbolic-tangent ramp scaled into [y_min, y_max].
///
/// The curve passes through fraction `y1` of the range at `x1` and fraction
/// `y2` at `x2`. Both fractions must lie strictly inside (0, 1).
pub fn scaled_tanh(x: f64, x1: f64, x2: f64, y1: f64, y2: f64, y_min: f64, y_max: f64) -> f64 {
    let (a, b) = tanh_coefficients(x1, x2, y1, y2);
    y_min + (y_max - y_min) * 0.5 * (1.0 + (a * (x - b)).tanh())
}

/// Solve `0.5 * (1 + tanh(a * (x - b)))` for the two anchor points.
fn tanh_coefficients(x1: f64, x2: f64, y1: f64, y2: f64) -> (f64, f64) {
    let t1 = (2.0 * y1 - 1.0).atanh();
    let t2 = (2.0 * y2 - 1.0).atanh();
    let dx = if (x2 - x1).abs() <= f64::EPSILON {
        f64::EPSILON
    } else {
        x2 - x1
    };
    let a = (t2 - t1) / dx;
    let b = x1 - t1 / a;
    (a, b)
}

/// Convert a color temperature in kelvin to mired, flooring the result.
///
/// Zero kelvin is treated as 1 K so the conversion never divides by zero.
///
/// # Examples
/// ```
/// use adaptive_lighting::utils::kelvin_to_mired;
/// assert_eq!(kelvin_to_mired(2000), 500);
/// assert_eq!(kelvin_to_mired(5500), 181);
/// ```
pub fn kelvin_to_mired(kelvin: u32) -> u32 {
    MIRED_KELVIN_NUMERATOR / kelvin.max(1)
}

/// Convert a color temperature in mired to kelvin, flooring the result.
pub fn mired_to_kelvin(mired: u32) -> u32 {
    MIRED_KELVIN_NUMERATOR / mired.max(1)
}

/// Render a path for log output, abbreviating the home directory to `~`.
pub fn path_for_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
