//! Ephemeris provider capability and the built-in analytic engine.
//!
//! Chart code depends only on the [`Ephemeris`] trait: given a body, a UTC
//! Julian Date and an observer, return geocentric ecliptic longitude and
//! latitude referred to the equinox of date. [`Engine`] implements it from
//! closed-form theories (Keplerian mean elements for the planets, truncated
//! ELP-2000 for the Moon) so no data files are needed.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use log::debug;
use natal_frames::{
    SphericalCoords, cartesian_to_spherical, nutation_low_order, precess_from_j2000,
};
use natal_time::jd_to_centuries;

pub mod elements;
pub mod moon;

use elements::{EARTH_MOON_BARYCENTER, heliocentric_position, secular_elements};
use moon::lunar_position;

/// First accepted epoch: 0001-01-01.
pub const MIN_JD: f64 = 1_721_424.0;
/// Last accepted epoch: 3000-01-01.
pub const MAX_JD: f64 = 2_816_788.0;

/// Astronomical unit in km (IAU 2012).
pub const AU_KM: f64 = 149_597_870.7;

/// Speed of light in AU per day.
pub const LIGHT_AU_PER_DAY: f64 = 173.144_632_684_669_3;

/// Constant of annual aberration scaled for the Sun, arcseconds at 1 AU.
const SUN_ABERRATION_ARCSEC: f64 = 20.4898;

/// Bodies the chart tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// All bodies in chart order.
    pub const ALL: [Body; 10] = [
        Self::Sun,
        Self::Moon,
        Self::Mercury,
        Self::Venus,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
        Self::Pluto,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
        }
    }

    /// 0-based position in [`Body::ALL`].
    pub const fn index(self) -> u8 {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mercury => 2,
            Self::Venus => 3,
            Self::Mars => 4,
            Self::Jupiter => 5,
            Self::Saturn => 6,
            Self::Uranus => 7,
            Self::Neptune => 8,
            Self::Pluto => 9,
        }
    }

    /// Case-insensitive lookup by English name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Luminaries never appear retrograde.
    pub const fn is_luminary(self) -> bool {
        matches!(self, Self::Sun | Self::Moon)
    }
}

/// Geographic observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    /// Geodetic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Height above the ellipsoid in metres.
    pub elevation_m: f64,
}

impl Observer {
    pub fn new(latitude_deg: f64, longitude_deg: f64, elevation_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            elevation_m,
        }
    }

    fn validate(&self) -> Result<(), EphemerisError> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err(EphemerisError::InvalidQuery(
                "latitude must be finite and within [-90, 90]",
            ));
        }
        if !self.longitude_deg.is_finite() {
            return Err(EphemerisError::InvalidQuery("longitude must be finite"));
        }
        if !self.elevation_m.is_finite() {
            return Err(EphemerisError::InvalidQuery("elevation must be finite"));
        }
        Ok(())
    }
}

/// Single ephemeris request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub body: Body,
    /// Julian Date in UTC.
    pub jd_utc: f64,
    pub observer: Observer,
}

/// Geocentric ecliptic coordinates, equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticCoords {
    /// Longitude in degrees, [0, 360).
    pub lon_deg: f64,
    /// Latitude in degrees.
    pub lat_deg: f64,
    /// Distance from the geocentre in AU.
    pub distance_au: f64,
}

/// Ephemeris errors.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemerisError {
    InvalidQuery(&'static str),
    EpochOutOfRange { jd_utc: f64 },
    /// The provider could not answer this particular request.
    Unavailable(String),
}

impl Display for EphemerisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery(msg) => write!(f, "invalid query: {msg}"),
            Self::EpochOutOfRange { jd_utc } => write!(
                f,
                "epoch out of range: JD {jd_utc} (supported {MIN_JD}..{MAX_JD})"
            ),
            Self::Unavailable(msg) => write!(f, "ephemeris unavailable: {msg}"),
        }
    }
}

impl Error for EphemerisError {}

/// Ephemeris provider capability.
///
/// Implementations must be callable from several threads at once and must
/// not carry mutable state between calls.
pub trait Ephemeris: Send + Sync {
    fn name(&self) -> &'static str;
    fn ecliptic(&self, query: &Query) -> Result<EclipticCoords, EphemerisError>;
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Apply nutation in longitude (and solar aberration).
    pub apparent: bool,
    /// Correct planet positions for light travel time.
    pub light_time: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            apparent: true,
            light_time: true,
        }
    }
}

/// Telemetry from a query or batch of queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryStats {
    pub evaluations: u32,
    pub cache_hits: u32,
}

/// Per-request memoization of the Earth vector.
///
/// Every geocentric planet needs the Earth–Moon barycentre at the same
/// instant, so a batch at one epoch solves Kepler for it only once.
struct ComputationContext {
    earth: HashMap<u64, [f64; 3]>,
    evaluations: u32,
    cache_hits: u32,
}

impl ComputationContext {
    fn new() -> Self {
        Self {
            earth: HashMap::with_capacity(2),
            evaluations: 0,
            cache_hits: 0,
        }
    }

    fn earth_at(&mut self, t: f64) -> [f64; 3] {
        if let Some(cached) = self.earth.get(&t.to_bits()) {
            self.cache_hits += 1;
            return *cached;
        }
        let pos = heliocentric_position(&EARTH_MOON_BARYCENTER, t);
        self.evaluations += 1;
        self.earth.insert(t.to_bits(), pos);
        pos
    }

    fn stats(&self) -> QueryStats {
        QueryStats {
            evaluations: self.evaluations,
            cache_hits: self.cache_hits,
        }
    }
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn length(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Built-in analytic ephemeris.
///
/// `Engine` is [`Send`] + [`Sync`] and immutable after construction, so it
/// can be shared across threads via `Arc<Engine>`.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one query.
    pub fn query(&self, query: &Query) -> Result<EclipticCoords, EphemerisError> {
        let mut ctx = ComputationContext::new();
        self.query_with_ctx(query, &mut ctx)
    }

    /// Evaluate a query and return telemetry alongside the result.
    pub fn query_with_stats(
        &self,
        query: &Query,
    ) -> Result<(EclipticCoords, QueryStats), EphemerisError> {
        let mut ctx = ComputationContext::new();
        let coords = self.query_with_ctx(query, &mut ctx)?;
        Ok((coords, ctx.stats()))
    }

    fn query_with_ctx(
        &self,
        query: &Query,
        ctx: &mut ComputationContext,
    ) -> Result<EclipticCoords, EphemerisError> {
        if !query.jd_utc.is_finite() {
            return Err(EphemerisError::InvalidQuery("jd_utc must be finite"));
        }
        if !(MIN_JD..=MAX_JD).contains(&query.jd_utc) {
            return Err(EphemerisError::EpochOutOfRange {
                jd_utc: query.jd_utc,
            });
        }
        query.observer.validate()?;

        let t = jd_to_centuries(query.jd_utc);

        let of_date = match query.body {
            Body::Moon => {
                let p = lunar_position(t);
                SphericalCoords {
                    lon_deg: p.lon_deg,
                    lat_deg: p.lat_deg,
                    distance_au: p.distance_km / AU_KM,
                }
            }
            Body::Sun => {
                let earth = ctx.earth_at(t);
                let mut sun = cartesian_to_spherical(&[-earth[0], -earth[1], -earth[2]]);
                if self.config.apparent {
                    sun.lon_deg -= SUN_ABERRATION_ARCSEC / 3600.0 / sun.distance_au;
                }
                precess_from_j2000(sun, t)
            }
            planet => {
                let elements = secular_elements(planet).ok_or_else(|| {
                    EphemerisError::Unavailable(format!("no elements for {}", planet.name()))
                })?;
                let earth = ctx.earth_at(t);
                let mut geo = sub(heliocentric_position(elements, t), earth);
                if self.config.light_time {
                    let tau_days = length(geo) / LIGHT_AU_PER_DAY;
                    let t_emit = jd_to_centuries(query.jd_utc - tau_days);
                    geo = sub(heliocentric_position(elements, t_emit), earth);
                }
                precess_from_j2000(cartesian_to_spherical(&geo), t)
            }
        };

        let mut lon = of_date.lon_deg;
        if self.config.apparent {
            lon += nutation_low_order(t).dpsi_deg();
        }

        Ok(EclipticCoords {
            lon_deg: lon.rem_euclid(360.0),
            lat_deg: of_date.lat_deg,
            distance_au: of_date.distance_au,
        })
    }

    /// Evaluate several queries, sharing the Earth vector across queries at
    /// the same epoch. Returns results in input order.
    pub fn query_batch(&self, queries: &[Query]) -> Vec<Result<EclipticCoords, EphemerisError>> {
        self.query_batch_with_stats(queries).0
    }

    /// Batch evaluation with telemetry.
    pub fn query_batch_with_stats(
        &self,
        queries: &[Query],
    ) -> (Vec<Result<EclipticCoords, EphemerisError>>, QueryStats) {
        let mut results: Vec<Option<Result<EclipticCoords, EphemerisError>>> =
            vec![None; queries.len()];

        // Sort indices by epoch so same-epoch queries share one context.
        let mut indexed: Vec<(u64, usize)> = queries
            .iter()
            .enumerate()
            .map(|(i, q)| (q.jd_utc.to_bits(), i))
            .collect();
        indexed.sort_unstable_by_key(|(bits, _)| *bits);

        let mut total = QueryStats::default();
        for group in indexed.chunk_by(|a, b| a.0 == b.0) {
            let mut ctx = ComputationContext::new();
            for &(_, idx) in group {
                results[idx] = Some(self.query_with_ctx(&queries[idx], &mut ctx));
            }
            let stats = ctx.stats();
            total.evaluations += stats.evaluations;
            total.cache_hits += stats.cache_hits;
        }

        debug!(
            "ephemeris batch: {} queries, {} earth evaluations, {} cache hits",
            queries.len(),
            total.evaluations,
            total.cache_hits
        );

        let results = results
            .into_iter()
            .map(|r| r.unwrap_or_else(|| Err(EphemerisError::Unavailable("unprocessed".into()))))
            .collect();
        (results, total)
    }
}

impl Ephemeris for Engine {
    fn name(&self) -> &'static str {
        "analytic (Keplerian + ELP-2000)"
    }

    fn ecliptic(&self, query: &Query) -> Result<EclipticCoords, EphemerisError> {
        self.query(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_time::J2000_JD;

    fn greenwich() -> Observer {
        Observer::new(51.5, 0.0, 0.0)
    }

    fn q(body: Body, jd_utc: f64) -> Query {
        Query {
            body,
            jd_utc,
            observer: greenwich(),
        }
    }

    #[test]
    fn body_indices_match_all() {
        for (i, b) in Body::ALL.iter().enumerate() {
            assert_eq!(b.index() as usize, i);
        }
    }

    #[test]
    fn body_from_name() {
        assert_eq!(Body::from_name("mars"), Some(Body::Mars));
        assert_eq!(Body::from_name(" Pluto "), Some(Body::Pluto));
        assert_eq!(Body::from_name("Vulcan"), None);
    }

    #[test]
    fn luminaries() {
        assert!(Body::Sun.is_luminary());
        assert!(Body::Moon.is_luminary());
        assert!(!Body::Mercury.is_luminary());
    }

    #[test]
    fn rejects_non_finite_epoch() {
        let engine = Engine::default();
        assert!(matches!(
            engine.query(&q(Body::Sun, f64::NAN)),
            Err(EphemerisError::InvalidQuery(_))
        ));
    }

    #[test]
    fn rejects_epoch_out_of_range() {
        let engine = Engine::default();
        assert!(matches!(
            engine.query(&q(Body::Mars, MAX_JD + 1.0)),
            Err(EphemerisError::EpochOutOfRange { .. })
        ));
        assert!(matches!(
            engine.query(&q(Body::Mars, MIN_JD - 1.0)),
            Err(EphemerisError::EpochOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_bad_observer() {
        let engine = Engine::default();
        let mut query = q(Body::Venus, J2000_JD);
        query.observer.latitude_deg = 91.0;
        assert!(matches!(
            engine.query(&query),
            Err(EphemerisError::InvalidQuery(_))
        ));
        query.observer.latitude_deg = 90.0;
        assert!(engine.query(&query).is_ok());
    }

    #[test]
    fn sun_at_j2000() {
        let c = Engine::default().query(&q(Body::Sun, J2000_JD)).unwrap();
        assert!((c.lon_deg - 280.37).abs() < 0.01, "Sun λ = {}", c.lon_deg);
        assert!(c.lat_deg.abs() < 0.001, "Sun β = {}", c.lat_deg);
        assert!((c.distance_au - 0.9833).abs() < 1e-3);
    }

    #[test]
    fn apparent_differs_from_mean_by_nutation_and_aberration() {
        let apparent = Engine::default().query(&q(Body::Sun, J2000_JD)).unwrap();
        let mean = Engine::new(EngineConfig {
            apparent: false,
            light_time: true,
        })
        .query(&q(Body::Sun, J2000_JD))
        .unwrap();
        let diff = mean.lon_deg - apparent.lon_deg;
        assert!((diff - 0.0097).abs() < 0.001, "diff = {diff}");
    }

    #[test]
    fn batch_preserves_order_and_shares_earth() {
        let engine = Engine::default();
        let queries: Vec<Query> = [Body::Mars, Body::Sun, Body::Venus]
            .into_iter()
            .map(|b| q(b, J2000_JD))
            .collect();
        let (results, stats) = engine.query_batch_with_stats(&queries);
        assert_eq!(results.len(), 3);
        for (r, query) in results.iter().zip(&queries) {
            let single = engine.query(query).unwrap();
            assert_eq!(r.as_ref().unwrap(), &single);
        }
        assert_eq!(stats.evaluations, 1);
        assert_eq!(stats.cache_hits, 2);
    }

    #[test]
    fn batch_reports_per_query_errors() {
        let engine = Engine::default();
        let results = engine.query_batch(&[q(Body::Sun, J2000_JD), q(Body::Sun, f64::NAN)]);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn error_display() {
        let e = EphemerisError::Unavailable("offline".into());
        assert_eq!(e.to_string(), "ephemeris unavailable: offline");
    }

    // Compile-time assertion: Engine must be Send + Sync.
    #[allow(dead_code)]
    const _: () = {
        fn assert_send_sync<T: Send + Sync>() {}
        fn check() {
            assert_send_sync::<Engine>();
        }
    };
}
