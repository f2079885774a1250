//! Mean lunar nodes.
//!
//! Ω = 125.0445479° − 1934.1362891°·T + 0.0020754°·T², T in Julian
//! centuries since J2000 (Meeus, Ch. 47). The true node oscillates about
//! this mean by up to ~1.5°; that term is not applied.

use natal_time::jd_to_centuries;

use crate::bodies::ChartPoint;
use crate::positions::Position;
use crate::util::normalize_360;

const OMEGA_0: f64 = 125.044_547_9;
const OMEGA_1: f64 = -1_934.136_289_1;
const OMEGA_2: f64 = 0.002_075_4;

/// Mean longitude of the ascending node in degrees, [0, 360).
pub fn mean_north_node_deg(t: f64) -> f64 {
    normalize_360(OMEGA_0 + OMEGA_1 * t + OMEGA_2 * t * t)
}

/// North and south node longitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarNodePair {
    pub north_deg: f64,
    /// Always north + 180°.
    pub south_deg: f64,
}

impl LunarNodePair {
    /// Both nodes as chart positions, flagged retrograde.
    pub fn positions(&self) -> [Position; 2] {
        [
            Position::new(ChartPoint::NorthNode, self.north_deg, 0.0, true),
            Position::new(ChartPoint::SouthNode, self.south_deg, 0.0, true),
        ]
    }
}

/// Mean nodes at a UTC Julian Date.
pub fn lunar_nodes(jd_utc: f64) -> LunarNodePair {
    let north = mean_north_node_deg(jd_to_centuries(jd_utc));
    LunarNodePair {
        north_deg: north,
        south_deg: normalize_360(north + 180.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_time::J2000_JD;

    #[test]
    fn node_at_j2000() {
        let n = lunar_nodes(J2000_JD);
        assert!((n.north_deg - 125.044_547_9).abs() < 1e-9);
        assert!((n.south_deg - 305.044_547_9).abs() < 1e-9);
    }

    #[test]
    fn node_regresses() {
        // ~19.34°/yr westward
        let a = lunar_nodes(J2000_JD).north_deg;
        let b = lunar_nodes(J2000_JD + 365.25).north_deg;
        let step = normalize_360(a - b);
        assert!((step - 19.341).abs() < 0.01, "step = {step}");
    }

    #[test]
    fn nodes_always_opposite() {
        for i in 0..100 {
            let n = lunar_nodes(J2000_JD + i as f64 * 123.4);
            assert!((normalize_360(n.north_deg + 180.0) - n.south_deg).abs() < 1e-9);
        }
    }

    #[test]
    fn node_positions_retrograde() {
        let [north, south] = lunar_nodes(J2000_JD).positions();
        assert_eq!(north.point, ChartPoint::NorthNode);
        assert_eq!(south.point, ChartPoint::SouthNode);
        assert!(north.retrograde && south.retrograde);
        assert_eq!(north.sign.sign.name(), "Leo");
        assert_eq!(south.sign.sign.name(), "Aquarius");
    }
}
