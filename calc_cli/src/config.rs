//! CLI settings.
//!
//! Layered with figment, later layers winning:
//!
//! 1. built-in defaults
//! 2. `loadline.toml` in the working directory, or the file given by `--config`
//! 3. `LOADLINE_*` environment variables (`LOADLINE_KR=1.2`)
//!
//! Command-line flags are applied on top by the command handlers.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use calc_core::calculations::load::{DEFAULT_KR, DEFAULT_REFERENCE_VOLTAGE};
use calc_core::reference::DEFAULT_FILTER_EFFICIENCY;
use calc_core::GlobalSettings;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Settings file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "loadline.toml";

/// Prefix of the environment overrides
pub const ENV_PREFIX: &str = "LOADLINE_";

/// Format of the diagnostic log written to stderr
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub kr: f64,
    pub filter_efficiency: f64,
    pub default_reference_voltage: f64,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            kr: DEFAULT_KR,
            filter_efficiency: DEFAULT_FILTER_EFFICIENCY,
            default_reference_voltage: DEFAULT_REFERENCE_VOLTAGE,
            log_format: LogFormat::Text,
        }
    }
}

impl Settings {
    /// Load the layered settings. An explicit `path` must exist; the default
    /// file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file not found: {}", path.display());
                }
                path.to_path_buf()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };
        Self::figment(&file)
            .extract()
            .with_context(|| format!("invalid settings (file {}, env {}*)", file.display(), ENV_PREFIX))
    }

    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).only(&["kr", "filter_efficiency", "default_reference_voltage", "log_format"]))
    }

    /// Worksheet settings seeded from these values
    pub fn global_settings(&self) -> GlobalSettings {
        GlobalSettings {
            kr: self.kr,
            filter_efficiency: self.filter_efficiency,
            default_reference_voltage: self.default_reference_voltage,
            ..GlobalSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let settings = Settings::load(None).map_err(|e| e.to_string())?;
            assert_eq!(settings, Settings::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, "kr = 1.3\nfilter_efficiency = 0.99\nlog_format = \"json\"")?;
            jail.set_env("LOADLINE_KR", "1.05");

            let settings = Settings::load(None).map_err(|e| e.to_string())?;
            assert_eq!(settings.kr, 1.05);
            assert_eq!(settings.filter_efficiency, 0.99);
            assert_eq!(settings.log_format, LogFormat::Json);
            assert_eq!(settings.default_reference_voltage, DEFAULT_REFERENCE_VOLTAGE);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_must_exist() {
        Jail::expect_with(|_jail| {
            assert!(Settings::load(Some(Path::new("missing.toml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_global_settings() {
        let settings = Settings {
            kr: 1.0,
            ..Settings::default()
        };
        let global = settings.global_settings();
        assert_eq!(global.kr, 1.0);
        assert_eq!(global.filter_efficiency, DEFAULT_FILTER_EFFICIENCY);
    }
}
