//! Angle utilities shared by every chart module.
//!
//! The unchecked helpers fail soft: a non-finite input becomes 0° instead
//! of propagating NaN into sign and house classification. Use
//! [`try_normalize_360`] to tell a real 0° from a defaulted one.

/// Normalize an angle to [0, 360) degrees. Non-finite input yields 0.
pub fn normalize_360(deg: f64) -> f64 {
    try_normalize_360(deg).unwrap_or(0.0)
}

/// Normalize an angle to [0, 360), or `None` for NaN/infinite input.
pub fn try_normalize_360(deg: f64) -> Option<f64> {
    if !deg.is_finite() {
        return None;
    }
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-20 + 360 rounds to 360
    Some(if r >= 360.0 { 0.0 } else { r })
}

/// Smallest separation between two longitudes, in [0, 180].
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (normalize_360(a) - normalize_360(b)).abs();
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Forward arc from `a` to `b` in degrees, [0, 360).
pub fn arc_forward(a: f64, b: f64) -> f64 {
    normalize_360(b - a)
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Round to two decimal places, half away from zero.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
