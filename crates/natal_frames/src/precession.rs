//! General precession in ecliptic longitude (IAU 2006).
//!
//! Heliocentric elements are referred to the J2000 ecliptic and equinox.
//! Charts use the equinox of date, so every longitude is advanced by the
//! accumulated precession p_A. The small rotation of the ecliptic pole
//! (planetary precession, under 0.5″/yr) is ignored.
//!
//! Source: Capitaine, Wallace & Chapront 2003, A&A 412, 567-586.

use crate::spherical::SphericalCoords;

/// General precession in longitude, arcseconds, for `t` Julian centuries since J2000.
pub fn general_precession_longitude_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

/// General precession in longitude, degrees.
pub fn general_precession_longitude_deg(t: f64) -> f64 {
    general_precession_longitude_arcsec(t) / 3600.0
}

/// Refer J2000 ecliptic coordinates to the mean equinox of date.
pub fn precess_from_j2000(coords: SphericalCoords, t: f64) -> SphericalCoords {
    SphericalCoords {
        lon_deg: (coords.lon_deg + general_precession_longitude_deg(t)).rem_euclid(360.0),
        ..coords
    }
}
