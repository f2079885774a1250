//! Aspect detection between chart positions.
//!
//! Each pair's angular separation (0–180°) is tested against the catalog
//! in fixed order; the first aspect whose orb covers the deviation is the
//! only one recorded for that pair.

use crate::positions::Position;
use crate::util::{angular_difference, round2};

/// Deviation below which an aspect counts as exact.
pub const EXACT_THRESHOLD_DEG: f64 = 1.0;

/// The six major aspects, in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Quincunx,
    Opposition,
}

pub const ALL_ASPECT_KINDS: [AspectKind; 6] = [
    AspectKind::Conjunction,
    AspectKind::Sextile,
    AspectKind::Square,
    AspectKind::Trine,
    AspectKind::Quincunx,
    AspectKind::Opposition,
];

impl AspectKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::Sextile => "Sextile",
            Self::Square => "Square",
            Self::Trine => "Trine",
            Self::Quincunx => "Quincunx",
            Self::Opposition => "Opposition",
        }
    }

    /// Lower-case key, as used for orb overrides.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Sextile => "sextile",
            Self::Square => "square",
            Self::Trine => "trine",
            Self::Quincunx => "quincunx",
            Self::Opposition => "opposition",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Conjunction => 0,
            Self::Sextile => 1,
            Self::Square => 2,
            Self::Trine => 3,
            Self::Quincunx => 4,
            Self::Opposition => 5,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        ALL_ASPECT_KINDS
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(id))
    }
}

/// One aspect definition: exact angle, tolerance and display identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectType {
    pub kind: AspectKind,
    pub angle_deg: f64,
    pub orb_deg: f64,
    pub symbol: &'static str,
    pub color: &'static str,
}

impl AspectType {
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }
}

#[rustfmt::skip]
pub const ASPECT_CATALOG: [AspectType; 6] = [
    AspectType { kind: AspectKind::Conjunction, angle_deg:   0.0, orb_deg: 8.0, symbol: "☌", color: "#FFD700" },
    AspectType { kind: AspectKind::Sextile,     angle_deg:  60.0, orb_deg: 6.0, symbol: "⚹", color: "#4CAF50" },
    AspectType { kind: AspectKind::Square,      angle_deg:  90.0, orb_deg: 8.0, symbol: "□", color: "#F44336" },
    AspectType { kind: AspectKind::Trine,       angle_deg: 120.0, orb_deg: 8.0, symbol: "△", color: "#2196F3" },
    AspectType { kind: AspectKind::Quincunx,    angle_deg: 150.0, orb_deg: 3.0, symbol: "⚻", color: "#FF9800" },
    AspectType { kind: AspectKind::Opposition,  angle_deg: 180.0, orb_deg: 8.0, symbol: "☍", color: "#9C27B0" },
];

/// Ordered aspect table used for matching. Orbs may be overridden.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectCatalog {
    types: [AspectType; 6],
}

impl Default for AspectCatalog {
    fn default() -> Self {
        Self {
            types: ASPECT_CATALOG,
        }
    }
}

impl AspectCatalog {
    /// Replace the orb of one aspect. Order is unchanged.
    pub fn with_orb(mut self, kind: AspectKind, orb_deg: f64) -> Self {
        self.types[kind.index()].orb_deg = orb_deg;
        self
    }

    pub fn get(&self, kind: AspectKind) -> &AspectType {
        &self.types[kind.index()]
    }

    pub fn types(&self) -> &[AspectType; 6] {
        &self.types
    }

    /// First aspect whose orb covers `separation_deg`.
    pub fn match_separation(&self, separation_deg: f64) -> Option<&AspectType> {
        self.types
            .iter()
            .find(|a| (separation_deg - a.angle_deg).abs() <= a.orb_deg)
    }
}

/// A detected aspect between two positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aspect {
    pub first: Position,
    pub second: Position,
    pub aspect: AspectType,
    /// Shortest angular separation, [0, 180].
    pub separation_deg: f64,
    /// |separation − aspect angle|, rounded to 0.01°.
    pub orb_deg: f64,
    /// separation − aspect angle, rounded to 0.01°. Negative means the
    /// pair is inside the exact angle.
    pub deviation_deg: f64,
    pub exact: bool,
}

/// Aspect between two positions, if any.
pub fn match_aspect(first: &Position, second: &Position, catalog: &AspectCatalog) -> Option<Aspect> {
    let separation = angular_difference(first.longitude_deg, second.longitude_deg);
    let aspect = *catalog.match_separation(separation)?;
    let deviation = separation - aspect.angle_deg;
    Some(Aspect {
        first: *first,
        second: *second,
        aspect,
        separation_deg: separation,
        orb_deg: round2(deviation.abs()),
        deviation_deg: round2(deviation),
        exact: deviation.abs() < EXACT_THRESHOLD_DEG,
    })
}

/// Aspects within one chart; each unordered pair is tested once, in
/// position order.
pub fn natal_aspects(positions: &[Position], catalog: &AspectCatalog) -> Vec<Aspect> {
    let mut out = Vec::new();
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            if let Some(asp) = match_aspect(a, b, catalog) {
                out.push(asp);
            }
        }
    }
    out
}

/// Aspects from every position in `a` to every position in `b`.
pub fn cross_aspects(a: &[Position], b: &[Position], catalog: &AspectCatalog) -> Vec<Aspect> {
    a.iter()
        .flat_map(|p| b.iter().filter_map(move |q| match_aspect(p, q, catalog)))
        .collect()
}

/// Stable sort, tightest orb first.
pub fn sort_by_orb(aspects: &mut [Aspect]) {
    aspects.sort_by(|x, y| x.orb_deg.total_cmp(&y.orb_deg));
}
