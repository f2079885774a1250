//! Chart geometry built on ephemeris outputs.
//!
//! This crate provides:
//! - Angle utilities and zodiac-sign classification
//! - Ascendant/Midheaven from sidereal time
//! - House cusps (whole sign, equal, interpolated quadrant)
//! - Positions with retrograde detection over any [`natal_ephem::Ephemeris`]
//! - Aspect detection, mean lunar nodes
//! - Natal, synastry and transit chart assembly
//!
//! Classification helpers fail soft on non-finite input (0°, Aries, equal
//! houses) and expose a `defaulted`/`degraded` flag so callers can tell.

pub mod angles;
pub mod aspects;
pub mod bodies;
pub mod chart;
pub mod error;
pub mod house_types;
pub mod houses;
pub mod lunar_nodes;
pub mod positions;
pub mod util;
pub mod zodiac;

pub use angles::{
    ChartAngles, SiderealFrame, ascendant_deg, compute_angles, midheaven_deg, sidereal_frame,
};
pub use aspects::{
    ALL_ASPECT_KINDS, ASPECT_CATALOG, Aspect, AspectCatalog, AspectKind, AspectType,
    EXACT_THRESHOLD_DEG, cross_aspects, match_aspect, natal_aspects, sort_by_orb,
};
pub use bodies::{BODY_CATALOG, CelestialBody, ChartPoint};
pub use chart::{
    ChartRequest, NatalChart, Placement, SynastryChart, TransitChart, compute_natal,
    compute_synastry, compute_transit,
};
pub use error::ChartError;
pub use house_types::{
    ALL_HOUSE_SYSTEMS, HOUSE_NAMES, HouseSet, HouseSystem, house_name, ordinal, ordinal_suffix,
};
pub use houses::{
    compute_houses, degraded_house_set, house_of, houses_for_angles, houses_from_angles,
};
pub use lunar_nodes::{LunarNodePair, lunar_nodes, mean_north_node_deg};
pub use positions::{
    Position, RETROGRADE_SAMPLE_DAYS, compute_position, compute_positions, is_retrograde,
};
pub use util::{
    angular_difference, arc_forward, deg_to_rad, normalize_360, rad_to_deg, try_normalize_360,
};
pub use zodiac::{
    ALL_SIGNS, Dms, Element, SignPosition, ZodiacSign, deg_to_dms, format_degree_in_sign,
    sign_from_longitude, sign_position,
};

// Chart values cross thread boundaries in service use.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NatalChart>();
    assert_send_sync::<ChartRequest>();
};
