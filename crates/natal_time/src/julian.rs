//! Julian Date ↔ Gregorian calendar conversions.
//!
//! Source: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 7.
//! Dates before 1582-10-15 are interpreted in the proleptic Gregorian
//! calendar, matching what a browser `Date` does.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds in a day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Milliseconds in a day.
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Gregorian calendar date to Julian Date.
///
/// `day` may carry a fractional part for the time of day
/// (e.g. `1.5` = noon on the 1st).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let y = y as f64;
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day + b - 1524.5
}

/// Julian Date to Gregorian calendar `(year, month, day_with_fraction)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd5 = jd + 0.5;
    let z = jd5.floor();
    let f = jd5 - z;

    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();

    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 } as u32;
    let year = if month > 2 { c - 4716.0 } else { c - 4715.0 } as i32;

    (year, month, day)
}

/// Milliseconds since the Unix epoch to Julian Date.
pub fn unix_millis_to_jd(millis: i64) -> f64 {
    millis as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// Julian centuries elapsed since J2000.0: `T = (JD - 2451545.0) / 36525`.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_noon() {
        assert!((calendar_to_jd(2000, 1, 1.5) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn meeus_example_7a() {
        // 1957 Oct 4.81 = JD 2436116.31
        assert!((calendar_to_jd(1957, 10, 4.81) - 2_436_116.31).abs() < 1e-6);
    }

    #[test]
    fn unix_epoch() {
        assert!((calendar_to_jd(1970, 1, 1.0) - UNIX_EPOCH_JD).abs() < 1e-9);
        assert_eq!(unix_millis_to_jd(0), UNIX_EPOCH_JD);
    }

    #[test]
    fn unix_millis_j2000() {
        // 2000-01-01T12:00:00Z = 946728000000 ms
        assert!((unix_millis_to_jd(946_728_000_000) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn calendar_roundtrip() {
        for &(y, m, d) in &[(2000, 1, 1.5), (1987, 6, 19.5), (2024, 2, 29.25), (1899, 12, 31.0)] {
            let jd = calendar_to_jd(y, m, d);
            let (y2, m2, d2) = jd_to_calendar(jd);
            assert_eq!((y2, m2), (y, m));
            assert!((d2 - d).abs() < 1e-6, "{y}-{m}-{d}: got day {d2}");
        }
    }

    #[test]
    fn centuries_at_j2000_is_zero() {
        assert_eq!(jd_to_centuries(J2000_JD), 0.0);
        assert!((jd_to_centuries(J2000_JD + DAYS_PER_CENTURY) - 1.0).abs() < 1e-15);
    }
}
