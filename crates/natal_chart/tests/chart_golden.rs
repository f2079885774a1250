//! Chart-level behaviour against a scripted provider and the built-in engine.
//!
//! The scripted provider returns one longitude at the request time and
//! another one day later, so retrograde inference and failure skipping
//! can be checked without relying on real planetary motion.

use natal_chart::{
    ALL_HOUSE_SYSTEMS, AspectCatalog, AspectKind, BODY_CATALOG, ChartPoint, ChartRequest,
    HouseSystem, ZodiacSign, angular_difference, compute_houses, compute_natal, compute_positions,
    compute_transit, natal_aspects, normalize_360, sign_from_longitude,
};
use natal_ephem::{Body, EclipticCoords, Engine, Ephemeris, EphemerisError, Observer, Query};
use natal_time::{J2000_JD, UtcTime};

struct Scripted {
    base_jd: f64,
    /// (body, longitude now, longitude one day later)
    script: Vec<(Body, f64, f64)>,
    failing: Vec<Body>,
}

impl Scripted {
    fn new(script: &[(Body, f64, f64)]) -> Self {
        Self {
            base_jd: J2000_JD,
            script: script.to_vec(),
            failing: Vec::new(),
        }
    }

    fn failing(mut self, body: Body) -> Self {
        self.failing.push(body);
        self
    }
}

impl Ephemeris for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn ecliptic(&self, q: &Query) -> Result<EclipticCoords, EphemerisError> {
        if self.failing.contains(&q.body) {
            return Err(EphemerisError::Unavailable(format!("{} unavailable", q.body.name())));
        }
        let &(_, now, next) = self
            .script
            .iter()
            .find(|(b, _, _)| *b == q.body)
            .ok_or_else(|| EphemerisError::Unavailable("not scripted".into()))?;
        let lon = if q.jd_utc > self.base_jd + 0.5 { next } else { now };
        Ok(EclipticCoords {
            lon_deg: lon,
            lat_deg: 0.0,
            distance_au: 1.0,
        })
    }
}

fn london() -> Observer {
    Observer::new(51.5, 0.0, 0.0)
}

fn j2000() -> UtcTime {
    UtcTime::new(2000, 1, 1, 12, 0, 0.0)
}

fn all_bodies_at(lon: f64) -> Vec<(Body, f64, f64)> {
    Body::ALL.iter().map(|&b| (b, lon, lon + 1.0)).collect()
}

// ---------- angle and sign properties ----------

#[test]
fn normalize_idempotent_and_in_range() {
    for i in -2000..2000 {
        let l = i as f64 * 0.731 - 17.0;
        let n = normalize_360(l);
        assert!((0.0..360.0).contains(&n), "L = {l}: {n}");
        assert_eq!(normalize_360(n), n, "L = {l}");
    }
}

#[test]
fn sign_index_from_longitude() {
    assert_eq!(sign_from_longitude(45.0), ZodiacSign::Taurus);
    assert_eq!(sign_from_longitude(45.0).index(), 1);
    assert_eq!(sign_from_longitude(359.0), ZodiacSign::Pisces);
    assert_eq!(sign_from_longitude(359.0).index(), 11);
    for i in -720..720 {
        let l = i as f64 + 0.25;
        let expected = ((normalize_360(l) / 30.0).floor() as u8) % 12;
        assert_eq!(sign_from_longitude(l).index(), expected, "L = {l}");
    }
}

#[test]
fn angular_difference_wraps() {
    assert!((angular_difference(10.0, 350.0) - 20.0).abs() < 1e-12);
    assert!((angular_difference(10.0, 100.0) - 90.0).abs() < 1e-12);
}

// ---------- positions ----------

#[test]
fn retrograde_from_one_day_delta() {
    let eph = Scripted::new(&[
        (Body::Mars, 10.5, 10.0),
        // raw delta across 0° is negative
        (Body::Venus, 359.9, 0.2),
        (Body::Jupiter, 0.2, 359.9),
        (Body::Saturn, 40.0, 40.1),
    ]);
    let bodies: Vec<_> = BODY_CATALOG
        .iter()
        .copied()
        .filter(|b| matches!(b.body, Body::Mars | Body::Venus | Body::Jupiter | Body::Saturn))
        .collect();
    let ps = compute_positions(&eph, &bodies, J2000_JD, london());
    let retro: Vec<_> = ps.iter().map(|p| (p.point, p.retrograde)).collect();
    assert_eq!(
        retro,
        vec![
            (ChartPoint::Body(Body::Venus), true),
            (ChartPoint::Body(Body::Mars), true),
            (ChartPoint::Body(Body::Jupiter), true),
            (ChartPoint::Body(Body::Saturn), false),
        ]
    );
}

#[test]
fn luminaries_never_flagged() {
    let mut script = all_bodies_at(100.0);
    script[0] = (Body::Sun, 100.0, 99.0);
    script[1] = (Body::Moon, 100.0, 80.0);
    let ps = compute_positions(&Scripted::new(&script), &BODY_CATALOG, J2000_JD, london());
    assert!(!ps[0].retrograde);
    assert!(!ps[1].retrograde);
}

#[test]
fn failed_body_is_skipped() {
    let eph = Scripted::new(&all_bodies_at(50.0)).failing(Body::Mercury);
    let ps = compute_positions(&eph, &BODY_CATALOG, J2000_JD, london());
    assert_eq!(ps.len(), 9);
    assert!(ps.iter().all(|p| p.point != ChartPoint::Body(Body::Mercury)));
    assert_eq!(ps[1].point, ChartPoint::Body(Body::Moon));
    assert_eq!(ps[2].point, ChartPoint::Body(Body::Venus));
}

#[test]
fn natal_chart_survives_failures() {
    let eph = Scripted::new(&all_bodies_at(50.0))
        .failing(Body::Pluto)
        .failing(Body::Neptune);
    let chart = compute_natal(&eph, &ChartRequest::new(j2000(), london())).unwrap();
    assert_eq!(chart.bodies().len(), 8);
    assert_eq!(chart.positions.len(), 10);
    // all eight bodies conjunct: C(8, 2) pairs
    assert_eq!(chart.aspects.len(), 28);
}

// ---------- aspects ----------

#[test]
fn trine_at_10_and_130() {
    let eph = Scripted::new(&[(Body::Sun, 10.0, 11.0), (Body::Mars, 130.0, 130.5)]);
    let bodies = [BODY_CATALOG[0], BODY_CATALOG[4]];
    let ps = compute_positions(&eph, &bodies, J2000_JD, london());
    let found = natal_aspects(&ps, &AspectCatalog::default());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].aspect.kind, AspectKind::Trine);
    assert_eq!(format!("{:.2}", found[0].orb_deg), "0.00");
    assert!(found[0].exact);
}

#[test]
fn five_degrees_is_conjunction_only() {
    let eph = Scripted::new(&[(Body::Sun, 100.0, 101.0), (Body::Venus, 105.0, 106.0)]);
    let bodies = [BODY_CATALOG[0], BODY_CATALOG[3]];
    let ps = compute_positions(&eph, &bodies, J2000_JD, london());
    let found = natal_aspects(&ps, &AspectCatalog::default());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].aspect.kind, AspectKind::Conjunction);
    assert_eq!(found[0].orb_deg, 5.0);
    assert!(!found[0].exact);
}

// ---------- houses ----------

#[test]
fn pole_falls_back_to_equal_houses() {
    let set = compute_houses(J2000_JD, 90.0, 0.0, HouseSystem::Placidus);
    assert!(set.degraded);
    assert_eq!(set.ascendant_deg, 0.0);
    assert_eq!(set.midheaven_deg, 270.0);
    for (i, c) in set.cusps.iter().enumerate() {
        assert_eq!(*c, i as f64 * 30.0);
    }
}

#[test]
fn opposite_cusps_every_system_and_place() {
    let places = [(51.5, 0.0), (-33.9, 151.2), (0.0, -75.0), (64.1, -21.9), (-60.0, 30.0)];
    for system in ALL_HOUSE_SYSTEMS {
        for &(lat, lon) in &places {
            for d in 0..8 {
                let jd = J2000_JD + d as f64 * 45.37;
                let set = compute_houses(jd, lat, lon, system);
                let c = set.cusps;
                assert!(!set.degraded);
                assert_eq!(c[6], normalize_360(c[0] + 180.0), "{system} at {lat},{lon}");
                assert_eq!(c[3], normalize_360(c[9] + 180.0), "{system} at {lat},{lon}");
            }
        }
    }
}

// ---------- end to end with the analytic engine ----------

#[test]
fn london_j2000_natal() {
    let engine = Engine::default();
    let chart = compute_natal(&engine, &ChartRequest::new(j2000(), london())).unwrap();
    assert_eq!(chart.jd_utc, J2000_JD);

    let sun = chart.position(ChartPoint::Body(Body::Sun)).unwrap();
    assert!((sun.longitude_deg - 280.37).abs() < 0.01, "Sun λ = {}", sun.longitude_deg);
    assert_eq!(sun.sign.sign, ZodiacSign::Capricorn);
    assert!(!sun.retrograde);

    let h = &chart.houses;
    assert!(!h.degraded);
    assert!((h.ascendant_deg - 24.297).abs() < 1e-2, "ASC = {}", h.ascendant_deg);
    assert!((h.midheaven_deg - 279.614).abs() < 1e-2, "MC = {}", h.midheaven_deg);
    assert_eq!(h.cusps[6], normalize_360(h.cusps[0] + 180.0));
    assert_eq!(h.cusps[3], normalize_360(h.cusps[9] + 180.0));

    let north = chart.position(ChartPoint::NorthNode).unwrap();
    assert!((north.longitude_deg - 125.0445).abs() < 1e-3);
    assert!(north.retrograde);

    // Interpolated cusps: 2nd 109.40, 3rd 194.51, 4th (IC) 99.61. The
    // first interval holding the Sun is [3rd, 4th) unwrapped past 360°.
    assert!((h.cusps[1] - 109.403).abs() < 2e-2, "cusp 2 = {}", h.cusps[1]);
    assert!((h.cusps[10] - 14.508).abs() < 2e-2, "cusp 11 = {}", h.cusps[10]);
    assert_eq!(chart.house_of(ChartPoint::Body(Body::Sun)), Some(3));

    let whole = compute_natal(
        &engine,
        &ChartRequest::new(j2000(), london()).with_house_system(HouseSystem::WholeSign),
    )
    .unwrap();
    // Sun near MC at local noon
    assert_eq!(whole.house_of(ChartPoint::Body(Body::Sun)), Some(10));
}

#[test]
fn transit_month_later() {
    let engine = Engine::default();
    let t = compute_transit(
        &engine,
        &ChartRequest::new(j2000(), london()),
        UtcTime::new(2000, 2, 1, 12, 0, 0.0),
    )
    .unwrap();
    let sun = t.positions[0];
    // ~31 days at ~1.015°/day
    let moved = normalize_360(sun.longitude_deg - t.natal.positions[0].longitude_deg);
    assert!((moved - 31.5).abs() < 1.0, "Sun moved {moved}");
    assert!(t.aspects.windows(2).all(|w| w[0].orb_deg <= w[1].orb_deg));
    assert!(t.placements.iter().all(|p| (1..=12).contains(&p.house)));
}
