//! UTC calendar date/time with sub-second precision.
//!
//! Provides `UtcTime`, the canonical timestamp type for chart requests.
//! Conversion to Julian Date treats UTC as the dynamical time scale.

use std::str::FromStr;

use crate::error::TimeError;
use crate::julian::{MILLIS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, jd_to_calendar};

/// Largest accepted magnitude of a UTC offset, in hours.
pub const MAX_OFFSET_HOURS: f64 = 14.0;

/// UTC calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`, or 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

impl UtcTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Construct and validate in one step.
    pub fn try_new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        let t = Self::new(year, month, day, hour, minute, second);
        t.validate()?;
        Ok(t)
    }

    /// Check every calendar field against its range.
    pub fn validate(&self) -> Result<(), TimeError> {
        if !(1..=12).contains(&self.month) {
            return Err(TimeError::InvalidDate(format!("month {}", self.month)));
        }
        let dim = days_in_month(self.year, self.month);
        if self.day < 1 || self.day > dim {
            return Err(TimeError::InvalidDate(format!(
                "day {} of {:04}-{:02}",
                self.day, self.year, self.month
            )));
        }
        if self.hour > 23 {
            return Err(TimeError::InvalidDate(format!("hour {}", self.hour)));
        }
        if self.minute > 59 {
            return Err(TimeError::InvalidDate(format!("minute {}", self.minute)));
        }
        if !self.second.is_finite() || !(0.0..60.0).contains(&self.second) {
            return Err(TimeError::InvalidDate(format!("second {}", self.second)));
        }
        Ok(())
    }

    /// Build a UTC time from a local wall-clock time and its offset from UTC.
    ///
    /// `utc_offset_hours` is positive east of Greenwich (UTC+5:30 → `5.5`).
    /// Hour rollover across midnight, month and year boundaries is carried
    /// through the Julian Date, so `from_local(2000, 1, 1, 2, 0, 5.0)`
    /// lands on 1999-12-31T21:00Z.
    pub fn from_local(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        utc_offset_hours: f64,
    ) -> Result<Self, TimeError> {
        if !utc_offset_hours.is_finite() || utc_offset_hours.abs() > MAX_OFFSET_HOURS {
            return Err(TimeError::InvalidOffset(utc_offset_hours));
        }
        Self::try_new(year, month, day, hour, minute, 0.0)?;
        let day_frac = day as f64
            + (hour as f64 - utc_offset_hours) / 24.0
            + minute as f64 / 1440.0;
        Ok(Self::from_jd(calendar_to_jd(year, month, day_frac)))
    }

    /// Convert to Julian Date (UTC).
    pub fn to_jd(&self) -> f64 {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / 86_400.0;
        calendar_to_jd(self.year, self.month, day_frac)
    }

    /// Convert from Julian Date (UTC), rounded to the nearest millisecond.
    pub fn from_jd(jd: f64) -> Self {
        let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round() as i64;
        Self::from_unix_millis(millis)
    }

    /// Milliseconds since 1970-01-01T00:00:00Z.
    pub fn from_unix_millis(millis: i64) -> Self {
        let ms_per_day = MILLIS_PER_DAY as i64;
        let days = millis.div_euclid(ms_per_day);
        let ms_of_day = millis.rem_euclid(ms_per_day);

        // jd + 0.5 is integral at midnight, so the day fraction is exactly zero.
        let (year, month, day_frac) = jd_to_calendar(UNIX_EPOCH_JD + days as f64);
        let hour = (ms_of_day / 3_600_000) as u32;
        let minute = ((ms_of_day % 3_600_000) / 60_000) as u32;
        let second = (ms_of_day % 60_000) as f64 / 1000.0;
        Self {
            year,
            month,
            day: day_frac.floor() as u32,
            hour,
            minute,
            second,
        }
    }

    /// Milliseconds since 1970-01-01T00:00:00Z, rounded.
    pub fn to_unix_millis(&self) -> i64 {
        ((self.to_jd() - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round() as i64
    }

    /// Shift by a (possibly fractional, possibly negative) number of days.
    pub fn plus_days(&self, days: f64) -> Self {
        Self::from_jd(self.to_jd() + days)
    }
}

fn parse_field<T: FromStr>(s: &str, what: &str) -> Result<T, TimeError> {
    s.parse::<T>()
        .map_err(|_| TimeError::Parse(format!("bad {what}: '{s}'")))
}

/// Parse `±HH:MM`, `±HHMM` or `±HH` into signed hours.
fn parse_offset(s: &str) -> Result<f64, TimeError> {
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1.0, &s[1..]),
        Some(b'-') => (-1.0, &s[1..]),
        _ => return Err(TimeError::Parse(format!("bad UTC offset: '{s}'"))),
    };
    let (hh, mm) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: u32 = parse_field(hh, "offset hours")?;
    let minutes: u32 = parse_field(mm, "offset minutes")?;
    if minutes > 59 {
        return Err(TimeError::Parse(format!("bad UTC offset: '{s}'")));
    }
    let offset = sign * (hours as f64 + minutes as f64 / 60.0);
    if offset.abs() > MAX_OFFSET_HOURS {
        return Err(TimeError::InvalidOffset(offset));
    }
    Ok(offset)
}

impl FromStr for UtcTime {
    type Err = TimeError;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS[.fff]`
    /// (a space may replace `T`), optionally followed by `Z` or a UTC offset.
    /// Without a suffix the time is taken as UTC.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (date, time) = match s.find(['T', ' ']) {
            Some(idx) => (&s[..idx], Some(s[idx + 1..].trim())),
            None => (s, None),
        };

        let mut parts = date.splitn(3, '-');
        let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(TimeError::Parse(format!("expected YYYY-MM-DD, got '{date}'")));
        };
        let year: i32 = parse_field(y, "year")?;
        let month: u32 = parse_field(m, "month")?;
        let day: u32 = parse_field(d, "day")?;

        let Some(time) = time else {
            return Self::try_new(year, month, day, 0, 0, 0.0);
        };

        let (clock, offset) = if let Some(clock) = time.strip_suffix(['Z', 'z']) {
            (clock, 0.0)
        } else if let Some(idx) = time.rfind(['+', '-']) {
            (&time[..idx], parse_offset(&time[idx..])?)
        } else {
            (time, 0.0)
        };

        let mut fields = clock.splitn(3, ':');
        let (Some(hh), Some(mm)) = (fields.next(), fields.next()) else {
            return Err(TimeError::Parse(format!("expected HH:MM, got '{clock}'")));
        };
        let hour: u32 = parse_field(hh, "hour")?;
        let minute: u32 = parse_field(mm, "minute")?;
        let second: f64 = match fields.next() {
            Some(ss) => parse_field(ss, "second")?,
            None => 0.0,
        };

        let local = Self::try_new(year, month, day, hour, minute, second)?;
        if offset == 0.0 {
            return Ok(local);
        }
        Ok(Self::from_jd(local.to_jd() - offset / 24.0))
    }
}

impl std::fmt::Display for UtcTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                self.year, self.month, self.day, self.hour, self.minute, whole
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:06.3}Z",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}
