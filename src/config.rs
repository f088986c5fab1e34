//! TOML-based run configuration and preset definitions.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::refdata::{YEAR_NEUTRAL, YEAR_TODAY};

/// Top-level run configuration parsed from TOML.
///
/// All fields have defaults matching the national 2035 run. Load from TOML
/// with [`RunConfig::from_toml_file`] or start from a preset with
/// [`RunConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Municipality and target year.
    #[serde(default)]
    pub request: RequestConfig,
    /// Reference dataset location.
    #[serde(default)]
    pub data: DataConfig,
    /// Output format and destination.
    #[serde(default)]
    pub output: OutputConfig,
    /// Reference data replaced for this run.
    #[serde(default)]
    pub overrides: OverridesConfig,
}

/// Municipality and target year.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestConfig {
    /// Official municipality key; `DG000000` is Germany as a whole.
    pub ags: String,
    /// Target year of the projected scenario.
    pub year: i32,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            ags: "DG000000".to_string(),
            year: 2035,
        }
    }
}

/// Reference dataset location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Directory with the dataset CSV files; the built-in dataset if unset.
    pub dir: Option<PathBuf>,
}

/// Output format and destination.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// `"json"` or `"csv"`.
    pub format: String,
    /// Output file; stdout if unset.
    pub path: Option<PathBuf>,
    /// Append the build-rate indicators.
    pub indicators: bool,
    /// Append the BISKO household balance.
    pub bisko: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            path: None,
            indicators: false,
            bisko: false,
        }
    }
}

/// Reference data replaced for this run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverridesConfig {
    /// Assumption label to value.
    pub assumptions: BTreeMap<String, f64>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"request.year"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl RunConfig {
    /// Germany as a whole, target year 2035.
    pub fn national_2035() -> Self {
        Self::default()
    }

    /// Germany as a whole, target year 2040.
    pub fn national_2040() -> Self {
        Self {
            request: RequestConfig {
                year: 2040,
                ..RequestConfig::default()
            },
            ..Self::default()
        }
    }

    /// The city of the built-in dataset, with indicators.
    pub fn city_2035() -> Self {
        Self {
            request: RequestConfig {
                ags: "11000000".to_string(),
                year: 2035,
            },
            output: OutputConfig {
                indicators: true,
                ..OutputConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["national_2035", "national_2040", "city_2035"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "national_2035" => Ok(Self::national_2035()),
            "national_2040" => Ok(Self::national_2040()),
            "city_2035" => Ok(Self::city_2035()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Whether the
    /// municipality exists and the override keys are known is only decided
    /// against the loaded reference data.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let req = &self.request;
        if req.ags.trim().is_empty() {
            errors.push(ConfigError {
                field: "request.ags".into(),
                message: "must not be empty".into(),
            });
        }
        if req.year <= YEAR_TODAY || req.year > YEAR_NEUTRAL {
            errors.push(ConfigError {
                field: "request.year".into(),
                message: format!(
                    "must be in [{}, {YEAR_NEUTRAL}], got {}",
                    YEAR_TODAY + 1,
                    req.year
                ),
            });
        }

        let out = &self.output;
        if out.format != "json" && out.format != "csv" {
            errors.push(ConfigError {
                field: "output.format".into(),
                message: format!("must be \"json\" or \"csv\", got \"{}\"", out.format),
            });
        }

        for (key, value) in &self.overrides.assumptions {
            if !value.is_finite() {
                errors.push(ConfigError {
                    field: format!("overrides.assumptions.{key}"),
                    message: "must be a finite number".into(),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = RunConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
        assert_eq!(cfg.request.ags, "DG000000");
        assert_eq!(cfg.request.year, 2035);
    }

    #[test]
    fn from_preset_unknown() {
        let err = RunConfig::from_preset("nonexistent");
        assert!(err.is_err());
        assert!(err.err().is_some_and(|e| e.message.contains("unknown preset")));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in RunConfig::PRESETS {
            let cfg = RunConfig::from_preset(name);
            assert!(cfg.is_ok(), "{name}");
            let errors = cfg.map(|c| c.validate()).unwrap_or_default();
            assert!(errors.is_empty(), "{name}: {errors:?}");
        }
    }

    #[test]
    fn presets_differ_in_their_request() {
        assert_eq!(RunConfig::national_2040().request.year, 2040);
        assert_eq!(RunConfig::city_2035().request.ags, "11000000");
        assert!(RunConfig::city_2035().output.indicators);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[request]
ags = "09780139"
year = 2040

[data]
dir = "data"

[output]
format = "csv"
path = "out.csv"
indicators = true
bisko = true

[overrides.assumptions]
Ass_I_P_metal_steel_primary_prodvol_change = -0.2
"#;
        let cfg = RunConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.as_ref().err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.request.year), Some(2040));
        assert_eq!(cfg.as_ref().map(|c| &*c.output.format), Some("csv"));
        assert_eq!(
            cfg.as_ref().and_then(|c| c.data.dir.clone()),
            Some(PathBuf::from("data"))
        );
        assert_eq!(
            cfg.as_ref()
                .and_then(|c| c.overrides.assumptions.get("Ass_I_P_metal_steel_primary_prodvol_change"))
                .copied(),
            Some(-0.2)
        );
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = RunConfig::from_toml_str("[request]\nyear = 2045\n").ok();
        assert_eq!(cfg.as_ref().map(|c| &*c.request.ags), Some("DG000000"));
        assert_eq!(cfg.as_ref().map(|c| &*c.output.format), Some("json"));
        assert_eq!(cfg.as_ref().map(|c| c.overrides.assumptions.len()), Some(0));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[request]
ags = "DG000000"
bogus_field = true
"#;
        assert!(RunConfig::from_toml_str(toml).is_err());
        assert!(RunConfig::from_toml_str("[solar]\nkw_peak = 5.0\n").is_err());
    }

    #[test]
    fn validation_catches_year_outside_horizon() {
        let mut cfg = RunConfig::default();
        cfg.request.year = 2022;
        assert!(cfg.validate().iter().any(|e| e.field == "request.year"));
        cfg.request.year = 2051;
        assert!(cfg.validate().iter().any(|e| e.field == "request.year"));
        cfg.request.year = 2050;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validation_catches_bad_format_and_empty_ags() {
        let mut cfg = RunConfig::default();
        cfg.output.format = "xlsx".to_string();
        cfg.request.ags = " ".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "output.format"));
        assert!(errors.iter().any(|e| e.field == "request.ags"));
    }

    #[test]
    fn validation_catches_non_finite_override() {
        let mut cfg = RunConfig::default();
        cfg.overrides
            .assumptions
            .insert("Ass_X".to_string(), f64::NAN);
        assert!(
            cfg.validate()
                .iter()
                .any(|e| e.field == "overrides.assumptions.Ass_X")
        );
    }
}
