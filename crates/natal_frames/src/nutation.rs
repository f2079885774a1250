//! Low-order nutation in longitude and obliquity.
//!
//! Four-term series with ~0.5″ accuracy in Δψ and ~0.1″ in Δε, ample for
//! longitudes quoted to the arc-second.
//!
//! Source: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 22.

/// Nutation angles in arcseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Nutation in longitude Δψ.
    pub dpsi_arcsec: f64,
    /// Nutation in obliquity Δε.
    pub deps_arcsec: f64,
}

impl Nutation {
    pub fn dpsi_deg(&self) -> f64 {
        self.dpsi_arcsec / 3600.0
    }

    pub fn deps_deg(&self) -> f64 {
        self.deps_arcsec / 3600.0
    }
}

/// Nutation for `t` Julian centuries since J2000.
pub fn nutation_low_order(t: f64) -> Nutation {
    // Ω: lunar ascending node, L: Sun mean longitude, L': Moon mean longitude
    let om = (125.04452 - 1934.136261 * t).to_radians();
    let l = (280.4665 + 36000.7698 * t).to_radians();
    let lp = (218.3165 + 481267.8813 * t).to_radians();

    let dpsi = -17.20 * om.sin() - 1.32 * (2.0 * l).sin() - 0.23 * (2.0 * lp).sin()
        + 0.21 * (2.0 * om).sin();
    let deps = 9.20 * om.cos() + 0.57 * (2.0 * l).cos() + 0.10 * (2.0 * lp).cos()
        - 0.09 * (2.0 * om).cos();

    Nutation {
        dpsi_arcsec: dpsi,
        deps_arcsec: deps,
    }
}
