//! Truncated ELP-2000/82 lunar theory.
//!
//! Geocentric ecliptic longitude and latitude referred to the mean equinox
//! of date, and distance in km. The largest periodic terms are kept, which
//! gives roughly 0.05° in longitude.
//!
//! Source: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 47,
//! Tables 47.A and 47.B (leading rows).

/// Mean Earth–Moon distance, km.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Geocentric lunar position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarPosition {
    /// Ecliptic longitude of date, degrees [0, 360).
    pub lon_deg: f64,
    /// Ecliptic latitude, degrees.
    pub lat_deg: f64,
    /// Distance from Earth's centre, km.
    pub distance_km: f64,
}

/// Longitude and distance terms: `[D, M, M', F, Σl (1e-6 deg), Σr (1e-3 km)]`.
#[rustfmt::skip]
static LON_DIST_TERMS: [[i32; 6]; 24] = [
    [0,  0,  1,  0,  6_288_774, -20_905_355],
    [2,  0, -1,  0,  1_274_027,  -3_699_111],
    [2,  0,  0,  0,    658_314,  -2_955_968],
    [0,  0,  2,  0,    213_618,    -569_925],
    [0,  1,  0,  0,   -185_116,      48_888],
    [0,  0,  0,  2,   -114_332,      -3_149],
    [2,  0, -2,  0,     58_793,     246_158],
    [2, -1, -1,  0,     57_066,    -152_138],
    [2,  0,  1,  0,     53_322,    -170_733],
    [2, -1,  0,  0,     45_758,    -204_586],
    [0,  1, -1,  0,    -40_923,    -129_620],
    [1,  0,  0,  0,    -34_720,     108_743],
    [0,  1,  1,  0,    -30_383,           0],
    [2,  0,  0, -2,     15_327,           0],
    [0,  0,  1,  2,    -12_528,           0],
    [0,  0,  1, -2,     10_980,           0],
    [4,  0, -1,  0,     10_675,           0],
    [0,  0,  3,  0,     10_034,           0],
    [4,  0, -2,  0,      8_548,           0],
    [2,  1, -1,  0,     -7_888,           0],
    [2,  1,  0,  0,     -6_766,           0],
    [1,  0, -1,  0,     -5_163,           0],
    [1,  1,  0,  0,      4_987,           0],
    [2, -1,  1,  0,      4_036,           0],
];

/// Latitude terms: `[D, M, M', F, Σb (1e-6 deg)]`.
#[rustfmt::skip]
static LAT_TERMS: [[i32; 5]; 10] = [
    [0, 0,  0, 1, 5_128_122],
    [0, 0,  1, 1,   280_602],
    [0, 0,  1, -1,  277_693],
    [2, 0,  0, -1,  173_237],
    [2, 0, -1, 1,    55_413],
    [2, 0, -1, -1,   46_271],
    [2, 0,  0, 1,    32_573],
    [0, 0,  2, 1,    17_198],
    [2, 0,  1, -1,    9_266],
    [0, 0,  2, -1,    8_822],
];

/// Mean arguments `(L', D, M, M', F)` in degrees for `t` centuries since J2000.
fn mean_arguments(t: f64) -> (f64, f64, f64, f64, f64) {
    let t2 = t * t;
    let lp = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2;
    let mp = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2;
    (
        lp.rem_euclid(360.0),
        d.rem_euclid(360.0),
        m.rem_euclid(360.0),
        mp.rem_euclid(360.0),
        f.rem_euclid(360.0),
    )
}

/// Lunar position at `t` Julian centuries since J2000.
pub fn lunar_position(t: f64) -> LunarPosition {
    let (lp, d, m, mp, f) = mean_arguments(t);
    let args = [d.to_radians(), m.to_radians(), mp.to_radians(), f.to_radians()];
    let arg = |row: &[i32]| -> f64 {
        row[..4]
            .iter()
            .zip(args.iter())
            .map(|(&n, &a)| n as f64 * a)
            .sum()
    };

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for row in &LON_DIST_TERMS {
        let a = arg(row);
        sum_l += row[4] as f64 * a.sin();
        sum_r += row[5] as f64 * a.cos();
    }
    let sum_b: f64 = LAT_TERMS.iter().map(|row| row[4] as f64 * arg(row).sin()).sum();

    LunarPosition {
        lon_deg: (lp + sum_l * 1e-6).rem_euclid(360.0),
        lat_deg: sum_b * 1e-6,
        distance_km: MEAN_DISTANCE_KM + sum_r * 1e-3,
    }
}
