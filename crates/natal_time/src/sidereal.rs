//! Greenwich Mean Sidereal Time, Local Sidereal Time and mean obliquity.
//!
//! These are the short degree polynomials used for chart angles:
//!
//! - GMST = 280.46061837 + 360.98564736629·(JD − 2451545) + 0.000387933·T²
//! - ε₀   = 23.439291 − 0.0130042·T
//!
//! Sources: Meeus, "Astronomical Algorithms" (2nd ed), Eq. 12.4 and
//! the linear term of Eq. 22.2.

use crate::julian::{J2000_JD, jd_to_centuries};

fn wrap_360(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Greenwich Mean Sidereal Time in degrees, [0, 360).
pub fn gmst_deg(jd: f64) -> f64 {
    let t = jd_to_centuries(jd);
    wrap_360(280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD) + 0.000_387_933 * t * t)
}

/// Local Sidereal Time from GMST and observer east longitude, in degrees [0, 360).
///
/// This is also the Right Ascension of the Midheaven (RAMC).
pub fn local_sidereal_time_deg(gmst_deg: f64, longitude_east_deg: f64) -> f64 {
    wrap_360(gmst_deg + longitude_east_deg)
}

/// Mean obliquity of the ecliptic in degrees for `t` Julian centuries since J2000.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    23.439_291 - 0.013_004_2 * t
}
