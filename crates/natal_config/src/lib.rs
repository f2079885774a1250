//! Chart defaults from an optional TOML file.
//!
//! ```toml
//! house_system = "wholesign"
//! include_nodes = true
//! elevation_m = 35.0
//! apparent = true
//!
//! [orbs]
//! trine = 6.0
//! quincunx = 2.0
//! ```
//!
//! Every key is optional. The raw file is deserialized into a private
//! mirror struct and then resolved into [`Settings`], where names become
//! typed values and ranges are checked.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use natal_chart::{AspectCatalog, AspectKind, ChartRequest, HouseSystem};
use serde::Deserialize;

pub mod error;

pub use error::ConfigError;

/// Files tried, in order, when no path is given.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["natal.toml", "config/natal.toml"];

/// Resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub house_system: HouseSystem,
    pub include_nodes: bool,
    pub elevation_m: f64,
    /// Add nutation in longitude to body positions.
    pub apparent: bool,
    pub aspects: AspectCatalog,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::default(),
            include_nodes: true,
            elevation_m: 0.0,
            apparent: true,
            aspects: AspectCatalog::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrbsToml {
    conjunction: Option<f64>,
    sextile: Option<f64>,
    square: Option<f64>,
    trine: Option<f64>,
    quincunx: Option<f64>,
    opposition: Option<f64>,
}

impl OrbsToml {
    fn overrides(&self) -> [(AspectKind, Option<f64>); 6] {
        [
            (AspectKind::Conjunction, self.conjunction),
            (AspectKind::Sextile, self.sextile),
            (AspectKind::Square, self.square),
            (AspectKind::Trine, self.trine),
            (AspectKind::Quincunx, self.quincunx),
            (AspectKind::Opposition, self.opposition),
        ]
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default = "default_true")]
    include_nodes: bool,
    #[serde(default)]
    elevation_m: f64,
    #[serde(default = "default_true")]
    apparent: bool,
    #[serde(default)]
    orbs: OrbsToml,
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Parse and resolve TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, Path::new("<string>"))
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: ConfigToml = toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        Self::resolve(raw)
    }

    fn resolve(raw: ConfigToml) -> Result<Self, ConfigError> {
        let house_system = match raw.house_system.as_deref() {
            Some(name) => name
                .parse::<HouseSystem>()
                .map_err(|_| ConfigError::Invalid(format!("unknown house_system '{name}'")))?,
            None => HouseSystem::default(),
        };
        if !raw.elevation_m.is_finite() {
            return Err(ConfigError::Invalid("elevation_m must be finite".into()));
        }

        let mut aspects = AspectCatalog::default();
        for (kind, orb) in raw.orbs.overrides() {
            let Some(orb) = orb else { continue };
            if !orb.is_finite() || orb < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "orbs.{} must be a non-negative number, got {orb}",
                    kind.id()
                )));
            }
            aspects = aspects.with_orb(kind, orb);
        }

        Ok(Self {
            house_system,
            include_nodes: raw.include_nodes,
            elevation_m: raw.elevation_m,
            apparent: raw.apparent,
            aspects,
        })
    }

    /// Read and resolve one file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&text, path)
    }

    /// Load from `explicit` if given, else the first of
    /// [`DEFAULT_CONFIG_PATHS`] that exists, else defaults.
    ///
    /// Returns the file that was used, if any. A missing explicit file is
    /// an error; missing default files are not.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }
        for candidate in DEFAULT_CONFIG_PATHS {
            let path = Path::new(candidate);
            if path.is_file() {
                debug!("using configuration {}", path.display());
                return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
            }
        }
        debug!("no configuration file found; using defaults");
        Ok((Self::default(), None))
    }

    /// Copy these defaults into a chart request. The observer's elevation
    /// is only filled in when the request leaves it at zero.
    pub fn apply(&self, mut request: ChartRequest) -> ChartRequest {
        request.house_system = self.house_system;
        request.include_nodes = self.include_nodes;
        request.aspects = self.aspects;
        if request.observer.elevation_m == 0.0 {
            request.observer.elevation_m = self.elevation_m;
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn full_file() {
        let s = Settings::from_toml_str(
            r#"
            house_system = "Whole Sign"
            include_nodes = false
            elevation_m = 120.5
            apparent = false

            [orbs]
            trine = 6.0
            quincunx = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(s.house_system, HouseSystem::WholeSign);
        assert!(!s.include_nodes);
        assert!(!s.apparent);
        assert_eq!(s.elevation_m, 120.5);
        assert_eq!(s.aspects.get(AspectKind::Trine).orb_deg, 6.0);
        assert_eq!(s.aspects.get(AspectKind::Quincunx).orb_deg, 2.0);
        assert_eq!(s.aspects.get(AspectKind::Square).orb_deg, 8.0);
    }

    #[test]
    fn unknown_house_system_is_invalid() {
        let err = Settings::from_toml_str("house_system = \"topocentric\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }

    #[test]
    fn negative_orb_is_invalid() {
        let err = Settings::from_toml_str("[orbs]\nsquare = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
        assert!(err.to_string().contains("orbs.square"));
    }

    #[test]
    fn unknown_key_is_parse_error() {
        let err = Settings::from_toml_str("hous_system = \"equal\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn missing_explicit_file_is_io_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/natal.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
