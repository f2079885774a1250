//! Tropical zodiac signs and degree-in-sign formatting.
//!
//! The ecliptic is divided into 12 contiguous 30° signs starting at the
//! vernal equinox (0° Aries). Sign index = floor(normalized longitude / 30).

use std::fmt::{Display, Formatter};

use crate::util::try_normalize_360;

/// Classical element of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Earth => "earth",
            Self::Air => "air",
            Self::Water => "water",
        }
    }
}

/// The 12 tropical signs starting from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in order (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Aries => "♈",
            Self::Taurus => "♉",
            Self::Gemini => "♊",
            Self::Cancer => "♋",
            Self::Leo => "♌",
            Self::Virgo => "♍",
            Self::Libra => "♎",
            Self::Scorpio => "♏",
            Self::Sagittarius => "♐",
            Self::Capricorn => "♑",
            Self::Aquarius => "♒",
            Self::Pisces => "♓",
        }
    }

    /// 0-based index (Aries=0 .. Pisces=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Aries => 0,
            Self::Taurus => 1,
            Self::Gemini => 2,
            Self::Cancer => 3,
            Self::Leo => 4,
            Self::Virgo => 5,
            Self::Libra => 6,
            Self::Scorpio => 7,
            Self::Sagittarius => 8,
            Self::Capricorn => 9,
            Self::Aquarius => 10,
            Self::Pisces => 11,
        }
    }

    /// Elements cycle fire, earth, air, water from Aries.
    pub const fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Sign for a 0-based index, wrapping modulo 12.
    pub const fn from_index(index: u8) -> Self {
        ALL_SIGNS[(index % 12) as usize]
    }

    /// Longitude at which this sign begins.
    pub const fn start_deg(self) -> f64 {
        self.index() as f64 * 30.0
    }

    pub const fn all() -> &'static [ZodiacSign; 12] {
        &ALL_SIGNS
    }
}

impl Display for ZodiacSign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Degrees-minutes-seconds, each component floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: u8,
}

/// Decompose a non-negative angle into floored D/M/S.
///
/// Negative input is taken by absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let degrees = d.floor();
    let minutes_f = (d - degrees) * 60.0;
    let minutes = minutes_f.floor();
    let seconds = ((minutes_f - minutes) * 60.0).floor();
    Dms {
        degrees: degrees as u16,
        minutes: minutes as u8,
        seconds: seconds as u8,
    }
}

/// Where a longitude falls in the zodiac.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignPosition {
    pub sign: ZodiacSign,
    /// Decimal degrees within the sign, [0, 30).
    pub degrees_in_sign: f64,
    pub dms: Dms,
    /// Input was not a finite number and was classified as 0° Aries.
    pub defaulted: bool,
}

impl SignPosition {
    /// `D°M'S" <glyph>`, e.g. `15°30'0" ♉`.
    pub fn formatted(&self) -> String {
        format!(
            "{}°{}'{}\" {}",
            self.dms.degrees,
            self.dms.minutes,
            self.dms.seconds,
            self.sign.symbol()
        )
    }
}

/// Classify a longitude. Invalid input maps to Aries with `defaulted` set.
pub fn sign_position(longitude_deg: f64) -> SignPosition {
    let (lon, defaulted) = match try_normalize_360(longitude_deg) {
        Some(lon) => (lon, false),
        None => (0.0, true),
    };
    let index = ((lon / 30.0).floor() as u8) % 12;
    let degrees_in_sign = lon % 30.0;
    SignPosition {
        sign: ZodiacSign::from_index(index),
        degrees_in_sign,
        dms: deg_to_dms(degrees_in_sign),
        defaulted,
    }
}

/// Sign containing a longitude; invalid input yields Aries.
pub fn sign_from_longitude(longitude_deg: f64) -> ZodiacSign {
    sign_position(longitude_deg).sign
}

/// Degree-in-sign text with the sign glyph, e.g. `15°30'0" ♉` for 45.5°.
pub fn format_degree_in_sign(longitude_deg: f64) -> String {
    sign_position(longitude_deg).formatted()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_contiguous_signs() {
        for (i, sign) in ALL_SIGNS.iter().enumerate() {
            assert_eq!(sign.index() as usize, i);
            assert_eq!(sign.start_deg(), i as f64 * 30.0);
            assert_eq!(sign_from_longitude(sign.start_deg()), *sign);
            assert_eq!(sign_from_longitude(sign.start_deg() + 29.999), *sign);
        }
    }

    #[test]
    fn classic_examples() {
        assert_eq!(sign_from_longitude(45.0), ZodiacSign::Taurus);
        assert_eq!(sign_from_longitude(359.0), ZodiacSign::Pisces);
        assert_eq!(sign_from_longitude(360.0), ZodiacSign::Aries);
        assert_eq!(sign_from_longitude(-1.0), ZodiacSign::Pisces);
    }

    #[test]
    fn invalid_longitude_defaults_to_aries() {
        let p = sign_position(f64::NAN);
        assert_eq!(p.sign, ZodiacSign::Aries);
        assert!(p.defaulted);
        assert!(!sign_position(0.0).defaulted);
    }

    #[test]
    fn elements_cycle() {
        assert_eq!(ZodiacSign::Aries.element(), Element::Fire);
        assert_eq!(ZodiacSign::Taurus.element(), Element::Earth);
        assert_eq!(ZodiacSign::Gemini.element(), Element::Air);
        assert_eq!(ZodiacSign::Cancer.element(), Element::Water);
        assert_eq!(ZodiacSign::Sagittarius.element(), Element::Fire);
        assert_eq!(ZodiacSign::Pisces.element(), Element::Water);
    }

    #[test]
    fn dms_floors_each_component() {
        assert_eq!(
            deg_to_dms(15.5),
            Dms {
                degrees: 15,
                minutes: 30,
                seconds: 0
            }
        );
        let d = deg_to_dms(12.999_99);
        assert_eq!((d.degrees, d.minutes, d.seconds), (12, 59, 59));
    }

    #[test]
    fn formatted_degree() {
        assert_eq!(format_degree_in_sign(45.5), "15°30'0\" ♉");
        assert_eq!(format_degree_in_sign(0.0), "0°0'0\" ♈");
        assert_eq!(format_degree_in_sign(359.75), "29°45'0\" ♓");
    }

    #[test]
    fn from_index_wraps() {
        assert_eq!(ZodiacSign::from_index(12), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::from_index(23), ZodiacSign::Pisces);
    }
}
