//! Keplerian mean elements with secular rates, and the two-body solver.
//!
//! Elements are referred to the mean ecliptic and equinox of J2000.
//! Source: E. M. Standish, "Keplerian Elements for Approximate Positions of
//! the Major Planets" (JPL), Table 1, fitted to DE405 over 1800–2050 AD.
//! Outside that window errors grow slowly; the engine accepts years 1–3000.

use std::f64::consts::PI;

use crate::Body;

/// Osculating-style elements at a single epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis, AU.
    pub a_au: f64,
    /// Eccentricity.
    pub e: f64,
    /// Inclination to the ecliptic, degrees.
    pub i_deg: f64,
    /// Mean longitude, degrees.
    pub l_deg: f64,
    /// Longitude of perihelion ϖ, degrees.
    pub varpi_deg: f64,
    /// Longitude of the ascending node Ω, degrees.
    pub node_deg: f64,
}

/// Elements at J2000 plus their rates per Julian century.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecularElements {
    pub at_j2000: OrbitalElements,
    pub per_century: OrbitalElements,
}

impl SecularElements {
    /// Elements at `t` Julian centuries since J2000.
    pub fn at(&self, t: f64) -> OrbitalElements {
        let (e0, r) = (&self.at_j2000, &self.per_century);
        OrbitalElements {
            a_au: e0.a_au + r.a_au * t,
            e: e0.e + r.e * t,
            i_deg: e0.i_deg + r.i_deg * t,
            l_deg: e0.l_deg + r.l_deg * t,
            varpi_deg: e0.varpi_deg + r.varpi_deg * t,
            node_deg: e0.node_deg + r.node_deg * t,
        }
    }
}

const fn secular(j2000: [f64; 6], rates: [f64; 6]) -> SecularElements {
    SecularElements {
        at_j2000: OrbitalElements {
            a_au: j2000[0],
            e: j2000[1],
            i_deg: j2000[2],
            l_deg: j2000[3],
            varpi_deg: j2000[4],
            node_deg: j2000[5],
        },
        per_century: OrbitalElements {
            a_au: rates[0],
            e: rates[1],
            i_deg: rates[2],
            l_deg: rates[3],
            varpi_deg: rates[4],
            node_deg: rates[5],
        },
    }
}

//                                a             e            I             L               ϖ              Ω
#[rustfmt::skip]
pub const MERCURY: SecularElements = secular(
    [ 0.38709927,  0.20563593,  7.00497902,  252.25032350,  77.45779628,  48.33076593],
    [ 0.00000037,  0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
);
#[rustfmt::skip]
pub const VENUS: SecularElements = secular(
    [ 0.72333566,  0.00677672,  3.39467605,  181.97909950, 131.60246718,  76.67984255],
    [ 0.00000390, -0.00004107, -0.00078890, 58517.81538729,  0.00268329, -0.27769418],
);
/// Earth–Moon barycentre.
#[rustfmt::skip]
pub const EARTH_MOON_BARYCENTER: SecularElements = secular(
    [ 1.00000261,  0.01671123, -0.00001531,  100.46457166, 102.93768193,   0.0],
    [ 0.00000562, -0.00004392, -0.01294668, 35999.37244981,  0.32327364,   0.0],
);
#[rustfmt::skip]
pub const MARS: SecularElements = secular(
    [ 1.52371034,  0.09339410,  1.84969142,   -4.55343205, -23.94362959,  49.55953891],
    [ 0.00001847,  0.00007882, -0.00813131, 19140.30268499,  0.44441088, -0.29257343],
);
#[rustfmt::skip]
pub const JUPITER: SecularElements = secular(
    [ 5.20288700,  0.04838624,  1.30439695,   34.39644051,  14.72847983, 100.47390909],
    [-0.00011607, -0.00013253, -0.00183714,  3034.74612775,  0.21252668,   0.20469106],
);
#[rustfmt::skip]
pub const SATURN: SecularElements = secular(
    [ 9.53667594,  0.05386179,  2.48599187,   49.95424423,  92.59887831, 113.66242448],
    [-0.00125060, -0.00050991,  0.00193609,  1222.49362201, -0.41897216,  -0.28867794],
);
#[rustfmt::skip]
pub const URANUS: SecularElements = secular(
    [19.18916464,  0.04725744,  0.77263783,  313.23810451, 170.95427630,  74.01692503],
    [-0.00196176, -0.00004397, -0.00242939,   428.48202785,  0.40805281,   0.04240589],
);
#[rustfmt::skip]
pub const NEPTUNE: SecularElements = secular(
    [30.06992276,  0.00859048,  1.77004347,  -55.12002969,  44.96476227, 131.78422574],
    [ 0.00026291,  0.00005105,  0.00035372,   218.45945325, -0.32241464,  -0.00508664],
);
#[rustfmt::skip]
pub const PLUTO: SecularElements = secular(
    [39.48211675,  0.24882730, 17.14001206,  238.92903833, 224.06891629, 110.30393684],
    [-0.00031596,  0.00005170,  0.00004818,   145.20780515, -0.04062942,  -0.01183482],
);

/// Mean elements for a planet, or `None` for the Sun and Moon.
pub const fn secular_elements(body: Body) -> Option<&'static SecularElements> {
    match body {
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Uranus => Some(&URANUS),
        Body::Neptune => Some(&NEPTUNE),
        Body::Pluto => Some(&PLUTO),
        Body::Sun | Body::Moon => None,
    }
}

const KEPLER_MAX_ITER: usize = 30;
const KEPLER_TOL: f64 = 1e-12;

/// Solve Kepler's equation `E − e·sin E = M` by Newton iteration.
///
/// `mean_anomaly` in radians; returns the eccentric anomaly in radians.
/// Converges in a handful of steps for planetary eccentricities (e < 0.3).
pub fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ea = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..KEPLER_MAX_ITER {
        let delta = (ea - e * ea.sin() - mean_anomaly) / (1.0 - e * ea.cos());
        ea -= delta;
        if delta.abs() < KEPLER_TOL {
            break;
        }
    }
    ea
}

/// Heliocentric J2000 ecliptic position `[x, y, z]` in AU.
pub fn heliocentric_position(elements: &SecularElements, t: f64) -> [f64; 3] {
    let el = elements.at(t);

    // M reduced to [-180, 180) keeps the Newton start close to the root
    let m_deg = (el.l_deg - el.varpi_deg + 180.0).rem_euclid(360.0) - 180.0;
    let ea = solve_kepler(m_deg * PI / 180.0, el.e);

    // Position in the orbital plane, x toward perihelion
    let xp = el.a_au * (ea.cos() - el.e);
    let yp = el.a_au * (1.0 - el.e * el.e).sqrt() * ea.sin();

    let (sw, cw) = (el.varpi_deg - el.node_deg).to_radians().sin_cos();
    let (so, co) = el.node_deg.to_radians().sin_cos();
    let (si, ci) = el.i_deg.to_radians().sin_cos();

    [
        (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
        (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
        (sw * si) * xp + (cw * si) * yp,
    ]
}
