//! Frame helpers for the chart ephemeris.
//!
//! Provides Cartesian ↔ spherical conversion in the ecliptic frame and
//! the two corrections that carry a J2000 ecliptic longitude to the
//! apparent equinox of date: general precession and low-order nutation.

pub mod nutation;
pub mod precession;
pub mod spherical;

pub use nutation::{Nutation, nutation_low_order};
pub use precession::{
    general_precession_longitude_arcsec, general_precession_longitude_deg, precess_from_j2000,
};
pub use spherical::{SphericalCoords, cartesian_to_spherical, spherical_to_cartesian};
