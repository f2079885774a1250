//! House-cusp generation and house membership.
//!
//! Systems:
//! - Whole Sign: cusp i = start of the (ascendant sign + i)-th sign.
//! - Equal: cusp i = ASC + 30·i.
//! - Interpolated (Placidus, Koch, Campanus, Regiomontanus selectors):
//!   cusps 1/4/7/10 are ASC/IC/DSC/MC. With d1 = norm(MC − ASC) and
//!   d2 = norm(DSC − MC), cusps 11 and 12 are MC + d2/3 and MC + 2·d2/3,
//!   cusps 2 and 3 are ASC + d1/3 and ASC + 2·d1/3. Cusps 5, 6, 8 and 9
//!   are the exact opposites of 11, 12, 2 and 3. This is a rough quadrant
//!   approximation, not the named systems' own projections, and the cusps
//!   need not run in zodiacal order.
//!
//! An undefined ASC/MC (polar latitude) degrades to equal houses from 0°
//! Aries with ASC 0°, MC 270°.

use log::warn;

use crate::angles::{ChartAngles, compute_angles};
use crate::house_types::{HouseSet, HouseSystem};
use crate::util::normalize_360;

/// Fixed Midheaven of the degraded fallback chart.
const FALLBACK_MC_DEG: f64 = 270.0;

/// Equal division: cusp[i] = start + 30·i.
///
/// Houses 4–9 are taken as opposites of 10–12 and 1–3 so the axis pairs
/// match bit for bit.
fn compute_equal(start_deg: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for i in [0, 1, 2, 9, 10, 11] {
        cusps[i] = normalize_360(start_deg + (i as f64) * 30.0);
    }
    for i in 3..9 {
        cusps[i] = normalize_360(cusps[(i + 6) % 12] + 180.0);
    }
    cusps
}

/// Whole-sign division: each cusp at 0° of consecutive signs from the ascendant's.
fn compute_whole_sign(asc_deg: f64) -> [f64; 12] {
    let asc_sign = (normalize_360(asc_deg) / 30.0).floor() as usize;
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = (((asc_sign + i) % 12) * 30) as f64;
    }
    cusps
}

/// Quadrant interpolation between the four angles.
fn compute_interpolated(asc_deg: f64, mc_deg: f64) -> [f64; 12] {
    let desc_deg = normalize_360(asc_deg + 180.0);
    let ic_deg = normalize_360(mc_deg + 180.0);

    let mut cusps = [0.0; 12];
    cusps[0] = asc_deg;
    cusps[3] = ic_deg;
    cusps[6] = desc_deg;
    cusps[9] = mc_deg;

    // MC → DSC (houses 10–12)
    let upper = normalize_360(desc_deg - mc_deg);
    cusps[10] = normalize_360(mc_deg + upper / 3.0);
    cusps[11] = normalize_360(mc_deg + 2.0 * upper / 3.0);

    // ASC → MC (houses 1–3)
    let lower = normalize_360(mc_deg - asc_deg);
    cusps[1] = normalize_360(asc_deg + lower / 3.0);
    cusps[2] = normalize_360(asc_deg + 2.0 * lower / 3.0);

    // Opposite houses
    cusps[4] = normalize_360(cusps[10] + 180.0);
    cusps[5] = normalize_360(cusps[11] + 180.0);
    cusps[7] = normalize_360(cusps[1] + 180.0);
    cusps[8] = normalize_360(cusps[2] + 180.0);

    cusps
}

/// The fixed fallback used when ASC or MC is undefined.
pub fn degraded_house_set(system: HouseSystem) -> HouseSet {
    HouseSet {
        cusps: compute_equal(0.0),
        ascendant_deg: 0.0,
        midheaven_deg: FALLBACK_MC_DEG,
        descendant_deg: 180.0,
        imum_coeli_deg: normalize_360(FALLBACK_MC_DEG + 180.0),
        system,
        degraded: true,
    }
}

/// Cusps for given Ascendant and Midheaven longitudes.
///
/// A NaN/infinite angle yields [`degraded_house_set`] and a warning.
pub fn houses_from_angles(asc_deg: f64, mc_deg: f64, system: HouseSystem) -> HouseSet {
    if !asc_deg.is_finite() || !mc_deg.is_finite() {
        warn!("undefined ascendant/midheaven (ASC={asc_deg}, MC={mc_deg}); using equal houses from 0° Aries");
        return degraded_house_set(system);
    }
    let asc = normalize_360(asc_deg);
    let mc = normalize_360(mc_deg);

    let cusps = match system {
        HouseSystem::WholeSign => compute_whole_sign(asc),
        HouseSystem::Equal => compute_equal(asc),
        HouseSystem::Placidus
        | HouseSystem::Koch
        | HouseSystem::Campanus
        | HouseSystem::Regiomontanus => compute_interpolated(asc, mc),
    };

    HouseSet {
        cusps,
        ascendant_deg: asc,
        midheaven_deg: mc,
        descendant_deg: normalize_360(asc + 180.0),
        imum_coeli_deg: normalize_360(mc + 180.0),
        system,
        degraded: false,
    }
}

/// Cusps from already computed chart angles.
pub fn houses_for_angles(angles: &ChartAngles, system: HouseSystem) -> HouseSet {
    houses_from_angles(angles.ascendant_deg, angles.midheaven_deg, system)
}

/// Cusps for a UTC Julian Date and geographic position.
pub fn compute_houses(
    jd_utc: f64,
    latitude_deg: f64,
    longitude_deg: f64,
    system: HouseSystem,
) -> HouseSet {
    houses_for_angles(&compute_angles(jd_utc, latitude_deg, longitude_deg), system)
}

/// 1-based house containing `longitude_deg`.
///
/// Walks the cusps in order and returns the first half-open interval
/// [cusp i, cusp i+1) that contains the longitude, unwrapping intervals
/// that cross 0°. Falls back to house 1.
pub fn house_of(longitude_deg: f64, cusps: &[f64; 12]) -> u8 {
    let lon = normalize_360(longitude_deg);
    for i in 0..12 {
        let start = cusps[i];
        let mut end = cusps[(i + 1) % 12];
        if end < start {
            end += 360.0;
        }
        let p = if lon < start { lon + 360.0 } else { lon };
        if p >= start && p < end {
            return (i as u8) + 1;
        }
    }
    1
}
