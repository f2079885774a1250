//! Time handling for chart computation.
//!
//! This crate provides:
//! - Julian Date ↔ Gregorian calendar conversions
//! - `UtcTime`, a UTC civil timestamp with ISO-8601 parsing and
//!   local-time (UTC offset) construction
//! - Greenwich Mean / Local Sidereal Time and the mean obliquity of the
//!   ecliptic in the low-order polynomial forms used for house cusps
//!
//! UTC is used directly as the dynamical time scale. The difference
//! (ΔT, about a minute in the modern era) is below the precision of the
//! house and aspect geometry built on top of it.

pub mod error;
pub mod julian;
pub mod sidereal;
pub mod utc_time;

pub use error::TimeError;
pub use julian::{
    J2000_JD, MILLIS_PER_DAY, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, jd_to_calendar,
    jd_to_centuries, unix_millis_to_jd,
};
pub use sidereal::{gmst_deg, local_sidereal_time_deg, mean_obliquity_deg};
pub use utc_time::UtcTime;
