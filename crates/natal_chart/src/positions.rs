//! Body positions from an ephemeris provider.
//!
//! Each body is sampled at the request time and again one day later; a
//! backward step (forward arc over 180°) marks it retrograde. A body whose
//! query fails is logged and left out, so callers get a partial list
//! rather than an error.

use log::{debug, warn};
use natal_ephem::{EclipticCoords, Ephemeris, EphemerisError, Observer, Query};

use crate::bodies::{CelestialBody, ChartPoint};
use crate::util::normalize_360;
use crate::zodiac::{SignPosition, sign_position};

/// Interval between the two longitude samples used for retrograde detection.
pub const RETROGRADE_SAMPLE_DAYS: f64 = 1.0;

/// A chart point at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub point: ChartPoint,
    /// Ecliptic longitude, [0, 360).
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub sign: SignPosition,
    pub retrograde: bool,
}

impl Position {
    /// Build a position, deriving sign and degree-in-sign.
    pub fn new(point: ChartPoint, longitude_deg: f64, latitude_deg: f64, retrograde: bool) -> Self {
        let lon = normalize_360(longitude_deg);
        Self {
            point,
            longitude_deg: lon,
            latitude_deg,
            sign: sign_position(lon),
            retrograde,
        }
    }

    pub fn name(&self) -> &'static str {
        self.point.name()
    }

    pub fn symbol(&self) -> &'static str {
        self.point.symbol()
    }

    /// `D°M'S" <sign glyph>`.
    pub fn formatted_degree(&self) -> String {
        self.sign.formatted()
    }
}

/// Apparent backward motion between two longitude samples.
///
/// Retrograde when the raw delta `next - now` of the normalized samples is
/// negative or exceeds 180°. A forward step across 0° (359.8° to 0.3°) has a
/// negative delta and so counts as retrograde. Luminaries never qualify.
pub fn is_retrograde(point: ChartPoint, now_deg: f64, next_deg: f64) -> bool {
    if !point.can_be_retrograde() {
        return false;
    }
    let delta = normalize_360(next_deg) - normalize_360(now_deg);
    delta < 0.0 || delta > 180.0
}

fn sample(
    ephemeris: &dyn Ephemeris,
    body: &CelestialBody,
    jd_utc: f64,
    observer: Observer,
) -> Result<EclipticCoords, EphemerisError> {
    ephemeris.ecliptic(&Query {
        body: body.body,
        jd_utc,
        observer,
    })
}

/// Position of one body, or the provider's error.
pub fn compute_position(
    ephemeris: &dyn Ephemeris,
    body: &CelestialBody,
    jd_utc: f64,
    observer: Observer,
) -> Result<Position, EphemerisError> {
    let now = sample(ephemeris, body, jd_utc, observer)?;
    let next = sample(ephemeris, body, jd_utc + RETROGRADE_SAMPLE_DAYS, observer)?;
    let point = body.point();
    Ok(Position::new(
        point,
        now.lon_deg,
        now.lat_deg,
        is_retrograde(point, now.lon_deg, next.lon_deg),
    ))
}

/// Positions for every body in `bodies`, in order, skipping failures.
pub fn compute_positions(
    ephemeris: &dyn Ephemeris,
    bodies: &[CelestialBody],
    jd_utc: f64,
    observer: Observer,
) -> Vec<Position> {
    let mut positions = Vec::with_capacity(bodies.len());
    for body in bodies {
        match compute_position(ephemeris, body, jd_utc, observer) {
            Ok(p) => positions.push(p),
            Err(e) => warn!(
                "skipping {} at JD {jd_utc}: {} query failed: {e}",
                body.name,
                ephemeris.name()
            ),
        }
    }
    debug!(
        "computed {}/{} positions at JD {jd_utc}",
        positions.len(),
        bodies.len()
    );
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_ephem::Body;

    #[test]
    fn forward_motion_is_direct() {
        let mars = ChartPoint::Body(Body::Mars);
        assert!(!is_retrograde(mars, 10.0, 10.5));
        assert!(!is_retrograde(mars, 179.0, 359.0));
    }

    #[test]
    fn forward_step_across_zero_counts_as_retrograde() {
        let mars = ChartPoint::Body(Body::Mars);
        assert!(is_retrograde(mars, 359.8, 0.3));
        assert!(is_retrograde(mars, 359.8, 360.3));
    }

    #[test]
    fn backward_motion_is_retrograde() {
        let mars = ChartPoint::Body(Body::Mars);
        assert!(is_retrograde(mars, 10.5, 10.0));
        assert!(is_retrograde(mars, 0.2, 359.9));
    }

    #[test]
    fn luminaries_never_retrograde() {
        assert!(!is_retrograde(ChartPoint::Body(Body::Sun), 10.0, 9.0));
        assert!(!is_retrograde(ChartPoint::Body(Body::Moon), 10.0, 9.0));
    }

    #[test]
    fn position_normalizes_and_classifies() {
        let p = Position::new(ChartPoint::Body(Body::Venus), 405.5, 1.0, false);
        assert!((p.longitude_deg - 45.5).abs() < 1e-12);
        assert_eq!(p.sign.sign.name(), "Taurus");
        assert_eq!(p.formatted_degree(), "15°30'0\" ♉");
        assert_eq!(p.name(), "Venus");
    }
}
