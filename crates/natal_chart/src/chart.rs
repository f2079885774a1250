//! Natal, synastry and transit chart assembly.
//!
//! Charts are plain values built fresh per request. The only external call
//! is the [`Ephemeris`] provider; bodies it cannot supply are left out.

use log::debug;
use natal_ephem::{Ephemeris, Observer};
use natal_time::UtcTime;

use crate::angles::{ChartAngles, compute_angles};
use crate::aspects::{Aspect, AspectCatalog, cross_aspects, natal_aspects, sort_by_orb};
use crate::bodies::{BODY_CATALOG, ChartPoint};
use crate::error::ChartError;
use crate::house_types::{HouseSet, HouseSystem};
use crate::houses::{house_of, houses_for_angles};
use crate::lunar_nodes::{LunarNodePair, lunar_nodes};
use crate::positions::{Position, compute_positions};

/// Inputs for one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRequest {
    pub time: UtcTime,
    pub observer: Observer,
    pub house_system: HouseSystem,
    /// Append the mean lunar nodes to the position list.
    pub include_nodes: bool,
    pub aspects: AspectCatalog,
}

impl ChartRequest {
    /// Request with the default house system, nodes on and standard orbs.
    pub fn new(time: UtcTime, observer: Observer) -> Self {
        Self {
            time,
            observer,
            house_system: HouseSystem::default(),
            include_nodes: true,
            aspects: AspectCatalog::default(),
        }
    }

    pub fn with_house_system(mut self, system: HouseSystem) -> Self {
        self.house_system = system;
        self
    }

    pub fn with_nodes(mut self, include: bool) -> Self {
        self.include_nodes = include;
        self
    }

    pub fn with_aspects(mut self, catalog: AspectCatalog) -> Self {
        self.aspects = catalog;
        self
    }

    /// Check user-supplied fields before any computation.
    pub fn validate(&self) -> Result<(), ChartError> {
        self.time.validate()?;
        let o = &self.observer;
        if !o.latitude_deg.is_finite() || o.latitude_deg.abs() > 90.0 {
            return Err(ChartError::InvalidInput(format!(
                "latitude {} outside [-90, 90]",
                o.latitude_deg
            )));
        }
        if !o.longitude_deg.is_finite() || o.longitude_deg.abs() > 180.0 {
            return Err(ChartError::InvalidInput(format!(
                "longitude {} outside [-180, 180]",
                o.longitude_deg
            )));
        }
        if !o.elevation_m.is_finite() {
            return Err(ChartError::InvalidInput("elevation must be finite".into()));
        }
        for a in self.aspects.types() {
            if !a.orb_deg.is_finite() || a.orb_deg < 0.0 {
                return Err(ChartError::InvalidInput(format!(
                    "orb for {} must be a non-negative number",
                    a.name()
                )));
            }
        }
        Ok(())
    }
}

/// A chart point and the 1-based house it falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub point: ChartPoint,
    pub house: u8,
}

fn place_all(positions: &[Position], houses: &HouseSet) -> Vec<Placement> {
    positions
        .iter()
        .map(|p| Placement {
            point: p.point,
            house: house_of(p.longitude_deg, &houses.cusps),
        })
        .collect()
}

/// A single natal chart.
#[derive(Debug, Clone, PartialEq)]
pub struct NatalChart {
    pub time: UtcTime,
    pub jd_utc: f64,
    pub observer: Observer,
    pub angles: ChartAngles,
    pub houses: HouseSet,
    /// Bodies in catalog order, then the nodes when requested.
    pub positions: Vec<Position>,
    /// Aspects among the bodies only, in detection order.
    pub aspects: Vec<Aspect>,
    pub nodes: Option<LunarNodePair>,
    /// One entry per position, same order.
    pub placements: Vec<Placement>,
    body_count: usize,
}

impl NatalChart {
    /// Positions of the ephemeris bodies, without the nodes.
    pub fn bodies(&self) -> &[Position] {
        &self.positions[..self.body_count]
    }

    pub fn position(&self, point: ChartPoint) -> Option<&Position> {
        self.positions.iter().find(|p| p.point == point)
    }

    pub fn house_of(&self, point: ChartPoint) -> Option<u8> {
        self.placements
            .iter()
            .find(|p| p.point == point)
            .map(|p| p.house)
    }
}

/// Build a natal chart.
pub fn compute_natal(
    ephemeris: &dyn Ephemeris,
    request: &ChartRequest,
) -> Result<NatalChart, ChartError> {
    request.validate()?;
    let jd_utc = request.time.to_jd();
    let obs = request.observer;
    debug!(
        "natal chart at {} (JD {jd_utc}) for {:.4}, {:.4} using {}",
        request.time,
        obs.latitude_deg,
        obs.longitude_deg,
        ephemeris.name()
    );

    let angles = compute_angles(jd_utc, obs.latitude_deg, obs.longitude_deg);
    let houses = houses_for_angles(&angles, request.house_system);
    debug!(
        "{} houses: ASC {:.4}, MC {:.4}, degraded={}",
        houses.system, houses.ascendant_deg, houses.midheaven_deg, houses.degraded
    );

    let mut positions = compute_positions(ephemeris, &BODY_CATALOG, jd_utc, obs);
    let body_count = positions.len();
    let aspects = natal_aspects(&positions, &request.aspects);
    debug!("{} natal aspects", aspects.len());

    let nodes = request.include_nodes.then(|| lunar_nodes(jd_utc));
    if let Some(pair) = &nodes {
        positions.extend(pair.positions());
    }
    let placements = place_all(&positions, &houses);

    Ok(NatalChart {
        time: request.time,
        jd_utc,
        observer: obs,
        angles,
        houses,
        positions,
        aspects,
        nodes,
        placements,
        body_count,
    })
}

/// Two natal charts and the aspects between them.
#[derive(Debug, Clone, PartialEq)]
pub struct SynastryChart {
    pub first: NatalChart,
    pub second: NatalChart,
    /// First-chart bodies against second-chart bodies, tightest first.
    pub aspects: Vec<Aspect>,
}

/// Build a synastry comparison.
///
/// Both charts use the default house system regardless of the requests;
/// aspects use the first request's catalog.
pub fn compute_synastry(
    ephemeris: &dyn Ephemeris,
    first: &ChartRequest,
    second: &ChartRequest,
) -> Result<SynastryChart, ChartError> {
    let a = compute_natal(
        ephemeris,
        &first.with_house_system(HouseSystem::default()),
    )?;
    let b = compute_natal(
        ephemeris,
        &second.with_house_system(HouseSystem::default()),
    )?;
    let mut aspects = cross_aspects(a.bodies(), b.bodies(), &first.aspects);
    sort_by_orb(&mut aspects);
    debug!("{} synastry aspects", aspects.len());
    Ok(SynastryChart {
        first: a,
        second: b,
        aspects,
    })
}

/// Transiting bodies against a natal chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitChart {
    pub natal: NatalChart,
    pub time: UtcTime,
    pub jd_utc: f64,
    /// Transit positions for the natal observer.
    pub positions: Vec<Position>,
    /// Transit bodies against natal bodies, tightest first.
    pub aspects: Vec<Aspect>,
    /// Transit bodies in the natal houses.
    pub placements: Vec<Placement>,
}

/// Build a transit chart for `transit_time` over the natal request.
pub fn compute_transit(
    ephemeris: &dyn Ephemeris,
    natal_request: &ChartRequest,
    transit_time: UtcTime,
) -> Result<TransitChart, ChartError> {
    transit_time.validate()?;
    let natal = compute_natal(ephemeris, natal_request)?;
    let jd_utc = transit_time.to_jd();
    debug!("transits at {transit_time} (JD {jd_utc})");

    let positions = compute_positions(ephemeris, &BODY_CATALOG, jd_utc, natal.observer);
    let mut aspects = cross_aspects(&positions, natal.bodies(), &natal_request.aspects);
    sort_by_orb(&mut aspects);
    let placements = place_all(&positions, &natal.houses);

    Ok(TransitChart {
        natal,
        time: transit_time,
        jd_utc,
        positions,
        aspects,
        placements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_ephem::{Body, EclipticCoords, EphemerisError, Query};

    /// Every body at a fixed longitude moving +1°/day.
    struct Fixed;

    impl Ephemeris for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn ecliptic(&self, q: &Query) -> Result<EclipticCoords, EphemerisError> {
            let base = q.body.index() as f64 * 30.0;
            Ok(EclipticCoords {
                lon_deg: (base + (q.jd_utc - 2_451_545.0)).rem_euclid(360.0),
                lat_deg: 0.0,
                distance_au: 1.0,
            })
        }
    }

    fn request() -> ChartRequest {
        ChartRequest::new(
            UtcTime::new(2000, 1, 1, 12, 0, 0.0),
            Observer::new(51.5, 0.0, 0.0),
        )
    }

    #[test]
    fn natal_appends_nodes_after_bodies() {
        let chart = compute_natal(&Fixed, &request()).unwrap();
        assert_eq!(chart.positions.len(), 12);
        assert_eq!(chart.bodies().len(), 10);
        assert_eq!(chart.positions[10].point, ChartPoint::NorthNode);
        assert_eq!(chart.positions[11].point, ChartPoint::SouthNode);
        assert_eq!(chart.placements.len(), 12);
        assert!(chart.aspects.iter().all(|a| a.first.point.body().is_some()
            && a.second.point.body().is_some()));
    }

    #[test]
    fn natal_without_nodes() {
        let chart = compute_natal(&Fixed, &request().with_nodes(false)).unwrap();
        assert_eq!(chart.positions.len(), 10);
        assert!(chart.nodes.is_none());
    }

    #[test]
    fn natal_rejects_bad_input() {
        let mut req = request();
        req.observer.latitude_deg = 91.0;
        assert!(matches!(compute_natal(&Fixed, &req), Err(ChartError::InvalidInput(_))));

        let mut req = request();
        req.time.month = 13;
        assert!(matches!(compute_natal(&Fixed, &req), Err(ChartError::Time(_))));

        let req = request().with_aspects(AspectCatalog::default().with_orb(
            crate::aspects::AspectKind::Square,
            -1.0,
        ));
        assert!(matches!(compute_natal(&Fixed, &req), Err(ChartError::InvalidInput(_))));
    }

    #[test]
    fn synastry_forces_default_houses() {
        let a = request().with_house_system(HouseSystem::WholeSign);
        let b = request().with_house_system(HouseSystem::Equal);
        let syn = compute_synastry(&Fixed, &a, &b).unwrap();
        assert_eq!(syn.first.houses.system, HouseSystem::Placidus);
        assert_eq!(syn.second.houses.system, HouseSystem::Placidus);
        // identical charts: every body conjunct itself at orb 0
        let self_conj = syn
            .aspects
            .iter()
            .filter(|a| a.first.point == a.second.point)
            .count();
        assert_eq!(self_conj, 10);
        assert!(syn.aspects.windows(2).all(|w| w[0].orb_deg <= w[1].orb_deg));
    }

    #[test]
    fn transit_places_in_natal_houses() {
        let t = compute_transit(&Fixed, &request(), UtcTime::new(2000, 1, 3, 12, 0, 0.0)).unwrap();
        assert_eq!(t.positions.len(), 10);
        assert_eq!(t.placements.len(), 10);
        let sun = t.positions[0];
        assert_eq!(sun.point, ChartPoint::Body(Body::Sun));
        assert!((sun.longitude_deg - 2.0).abs() < 1e-9);
        assert_eq!(
            t.placements[0].house,
            house_of(2.0, &t.natal.houses.cusps)
        );
        assert!(t.aspects.windows(2).all(|w| w[0].orb_deg <= w[1].orb_deg));
    }
}
