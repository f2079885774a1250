//! Types for house-cusp computation.
//!
//! Provides the house-system selector, the 12-cusp result and the
//! traditional house names used by presentation layers.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ChartError;

/// House division selector.
///
/// Only `WholeSign` and `Equal` have distinct algorithms. The four named
/// quadrant systems all resolve to one interpolated quadrant division; see
/// [`HouseSystem::is_interpolated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Campanus,
    Regiomontanus,
    Equal,
    WholeSign,
}

/// All selectors in display order.
pub const ALL_HOUSE_SYSTEMS: [HouseSystem; 6] = [
    HouseSystem::Placidus,
    HouseSystem::Koch,
    HouseSystem::Campanus,
    HouseSystem::Regiomontanus,
    HouseSystem::Equal,
    HouseSystem::WholeSign,
];

impl HouseSystem {
    /// Lower-case identifier used in configuration and on the command line.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Placidus => "placidus",
            Self::Koch => "koch",
            Self::Campanus => "campanus",
            Self::Regiomontanus => "regiomontanus",
            Self::Equal => "equal",
            Self::WholeSign => "wholesign",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Placidus => "Placidus",
            Self::Koch => "Koch",
            Self::Campanus => "Campanus",
            Self::Regiomontanus => "Regiomontanus",
            Self::Equal => "Equal",
            Self::WholeSign => "Whole Sign",
        }
    }

    /// Whether cusps come from the interpolated quadrant division rather
    /// than the named system's own projection.
    pub const fn is_interpolated(self) -> bool {
        !matches!(self, Self::Equal | Self::WholeSign)
    }

    pub const fn all() -> &'static [HouseSystem] {
        &ALL_HOUSE_SYSTEMS
    }
}

impl Display for HouseSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        ALL_HOUSE_SYSTEMS
            .into_iter()
            .find(|h| h.id() == key)
            .ok_or_else(|| ChartError::InvalidInput(format!("unknown house system '{s}'")))
    }
}

/// Twelve cusps plus the four angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseSet {
    /// Cusp longitudes, index 0 = house 1, each in [0, 360).
    pub cusps: [f64; 12],
    pub ascendant_deg: f64,
    pub midheaven_deg: f64,
    /// Always Ascendant + 180°.
    pub descendant_deg: f64,
    /// Always Midheaven + 180°.
    pub imum_coeli_deg: f64,
    pub system: HouseSystem,
    /// Ascendant/Midheaven were undefined and the fixed equal-house
    /// fallback (0° Aries, MC 270°) was substituted.
    pub degraded: bool,
}

impl HouseSet {
    /// Cusp of a 1-based house number, or `None` outside 1..=12.
    pub fn cusp(&self, house: u8) -> Option<f64> {
        match house {
            1..=12 => Some(self.cusps[house as usize - 1]),
            _ => None,
        }
    }
}

/// Traditional house titles, index 0 = first house.
pub const HOUSE_NAMES: [&str; 12] = [
    "First House (Self)",
    "Second House (Values)",
    "Third House (Communication)",
    "Fourth House (Home)",
    "Fifth House (Creativity)",
    "Sixth House (Health)",
    "Seventh House (Partnerships)",
    "Eighth House (Transformation)",
    "Ninth House (Philosophy)",
    "Tenth House (Career)",
    "Eleventh House (Community)",
    "Twelfth House (Subconscious)",
];

/// Title of a 1-based house number.
pub fn house_name(house: u8) -> Option<&'static str> {
    match house {
        1..=12 => Some(HOUSE_NAMES[house as usize - 1]),
        _ => None,
    }
}

/// English ordinal suffix: 1 → "st", 2 → "nd", 3 → "rd", 11 → "th", 22 → "nd".
pub fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Number with its ordinal suffix, e.g. `"21st"`.
pub fn ordinal(n: u32) -> String {
    format!("{n}{}", ordinal_suffix(n))
}
