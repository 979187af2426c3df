//! # Rounding Primitives
//!
//! Small numeric helpers shared by the calculators. Press settings and
//! production figures snap to fixed grids: clicks to whole impressions or
//! the next 10, diecut stops to 5 m, UV power to 100 W, gradients to 50.
//!
//! All helpers take and return `f64`; rounding direction matters and is part
//! of each calculator's contract, so callers pick the exact helper rather
//! than a generic "round".

/// Round up to the next multiple of `step`.
pub fn ceil_to_step(value: f64, step: f64) -> f64 {
    (value / step).ceil() * step
}

/// Round down to the previous multiple of `step`.
pub fn floor_to_step(value: f64, step: f64) -> f64 {
    (value / step).floor() * step
}

/// Round to the nearest multiple of `step`.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

/// Round to the nearest multiple of 5. Non-finite input yields 0.
pub fn round_to_nearest_5(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value / 5.0).round() * 5.0
}

/// Round up to the next multiple of 10.
pub fn round_up_to_next_10(value: f64) -> f64 {
    (value / 10.0).ceil() * 10.0
}

/// Round to `decimals` decimal places.
///
/// The epsilon nudge keeps values sitting exactly on a half-step (after
/// binary representation error) from rounding down.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    ((value + f64::EPSILON) * factor).round() / factor
}
