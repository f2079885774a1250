//! Ascendant and Midheaven from time and place.
//!
//! Chain: UTC → Julian Date → GMST → LST (= RAMC) → MC, ASC.
//!
//! - MC  = atan2(sin RAMC, cos RAMC · cos ε)
//! - ASC = atan2(cos RAMC, −(sin RAMC · cos ε + tan φ · sin ε))
//!
//! Both are folded into the half of the circle that RAMC dictates, then
//! normalized. Sources: Meeus, "Astronomical Algorithms" (2nd ed), Ch. 13.

use natal_time::{gmst_deg, jd_to_centuries, local_sidereal_time_deg, mean_obliquity_deg};

use crate::util::{deg_to_rad, normalize_360, rad_to_deg};

/// Sidereal quantities for one instant and place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiderealFrame {
    pub jd_utc: f64,
    /// Julian centuries since J2000.
    pub t: f64,
    pub gmst_deg: f64,
    /// Local sidereal time, equal to the Right Ascension of the Midheaven.
    pub ramc_deg: f64,
    /// Mean obliquity of the ecliptic.
    pub obliquity_deg: f64,
}

/// GMST, LST and obliquity for a Julian Date and east longitude.
pub fn sidereal_frame(jd_utc: f64, longitude_deg: f64) -> SiderealFrame {
    let t = jd_to_centuries(jd_utc);
    let gmst = gmst_deg(jd_utc);
    SiderealFrame {
        jd_utc,
        t,
        gmst_deg: gmst,
        ramc_deg: local_sidereal_time_deg(gmst, longitude_deg),
        obliquity_deg: mean_obliquity_deg(t),
    }
}

/// Ecliptic longitude of the Midheaven in degrees, [0, 360).
pub fn midheaven_deg(ramc_deg: f64, obliquity_deg: f64) -> f64 {
    let ramc = deg_to_rad(ramc_deg);
    let eps = deg_to_rad(obliquity_deg);

    let mut mc = rad_to_deg(f64::atan2(ramc.sin(), ramc.cos() * eps.cos()));
    if mc < 0.0 {
        mc += 360.0;
    }
    if ramc_deg > 180.0 {
        if mc < 180.0 {
            mc += 180.0;
        }
    } else if mc > 180.0 {
        mc -= 180.0;
    }
    normalize_360(mc)
}

/// Ecliptic longitude of the Ascendant in degrees, [0, 360).
///
/// Returns NaN when the latitude is not finite or at a pole (|φ| ≥ 90°),
/// where the horizon no longer meets the ecliptic at a single point.
pub fn ascendant_deg(ramc_deg: f64, obliquity_deg: f64, latitude_deg: f64) -> f64 {
    if !latitude_deg.is_finite() || latitude_deg.abs() >= 90.0 || !ramc_deg.is_finite() {
        return f64::NAN;
    }
    let ramc = deg_to_rad(ramc_deg);
    let eps = deg_to_rad(obliquity_deg);
    let phi = deg_to_rad(latitude_deg);

    let mut asc = rad_to_deg(f64::atan2(
        ramc.cos(),
        -(ramc.sin() * eps.cos() + phi.tan() * eps.sin()),
    ));
    if asc < 0.0 {
        asc += 360.0;
    }
    if ramc.cos() > 0.0 && asc > 180.0 {
        asc -= 180.0;
    }
    if ramc.cos() < 0.0 && asc < 180.0 {
        asc += 180.0;
    }
    normalize_360(asc)
}

/// The chart angles for a time and place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartAngles {
    pub frame: SiderealFrame,
    pub latitude_deg: f64,
    /// NaN when undefined (polar latitude).
    pub ascendant_deg: f64,
    pub midheaven_deg: f64,
}

impl ChartAngles {
    /// Whether both angles are usable numbers.
    pub fn is_valid(&self) -> bool {
        self.ascendant_deg.is_finite() && self.midheaven_deg.is_finite()
    }
}

/// Ascendant and Midheaven for a UTC Julian Date and geographic position.
pub fn compute_angles(jd_utc: f64, latitude_deg: f64, longitude_deg: f64) -> ChartAngles {
    let frame = sidereal_frame(jd_utc, longitude_deg);
    let midheaven = if frame.ramc_deg.is_finite() {
        midheaven_deg(frame.ramc_deg, frame.obliquity_deg)
    } else {
        f64::NAN
    };
    ChartAngles {
        frame,
        latitude_deg,
        ascendant_deg: ascendant_deg(frame.ramc_deg, frame.obliquity_deg, latitude_deg),
        midheaven_deg: midheaven,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_time::J2000_JD;

    const OBL: f64 = 23.439_291;

    #[test]
    fn mc_at_cardinal_ramc() {
        assert!((midheaven_deg(0.0, OBL) - 0.0).abs() < 1e-9);
        assert!((midheaven_deg(90.0, OBL) - 90.0).abs() < 1e-9);
        assert!((midheaven_deg(180.0, OBL) - 180.0).abs() < 1e-9);
        assert!((midheaven_deg(270.0, OBL) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn mc_same_half_as_ramc() {
        for i in 0..360 {
            let ramc = i as f64 + 0.5;
            let mc = midheaven_deg(ramc, OBL);
            assert_eq!(ramc > 180.0, mc > 180.0, "RAMC {ramc} → MC {mc}");
        }
    }

    #[test]
    fn asc_at_equator_ramc_zero() {
        // RAMC 0 on the equator: the ecliptic rises at 0° Cancer.
        let asc = ascendant_deg(0.0, OBL, 0.0);
        assert!((asc - 90.0).abs() < 1e-9, "ASC = {asc}");
    }

    #[test]
    fn asc_leads_mc_by_a_quadrant_or_so() {
        for i in 0..36 {
            let ramc = i as f64 * 10.0 + 1.0;
            let asc = ascendant_deg(ramc, OBL, 40.0);
            let mc = midheaven_deg(ramc, OBL);
            let arc = (asc - mc).rem_euclid(360.0);
            assert!(arc > 30.0 && arc < 150.0, "RAMC {ramc}: MC {mc} → ASC {asc}");
        }
    }

    #[test]
    fn asc_undefined_at_pole() {
        assert!(ascendant_deg(10.0, OBL, 90.0).is_nan());
        assert!(ascendant_deg(10.0, OBL, -90.0).is_nan());
        assert!(ascendant_deg(10.0, OBL, f64::NAN).is_nan());
    }

    #[test]
    fn london_j2000() {
        let a = compute_angles(J2000_JD, 51.5, 0.0);
        assert!((a.frame.ramc_deg - 280.460_618_37).abs() < 1e-9);
        assert!((a.ascendant_deg - 24.297_38).abs() < 1e-3, "ASC = {}", a.ascendant_deg);
        assert!((a.midheaven_deg - 279.614_24).abs() < 1e-3, "MC = {}", a.midheaven_deg);
        assert!(a.is_valid());
    }

    #[test]
    fn equator_j2000() {
        let a = compute_angles(J2000_JD, 0.0, 0.0);
        assert!((a.ascendant_deg - 11.377_88).abs() < 1e-3, "ASC = {}", a.ascendant_deg);
    }

    #[test]
    fn polar_angles_invalid() {
        let a = compute_angles(J2000_JD, 90.0, 0.0);
        assert!(!a.is_valid());
        assert!(a.midheaven_deg.is_finite());
    }
}
