//! TOML-based application configuration.
//!
//! Stores:
//! - HTTP server bind address
//! - Study planner defaults (days, hours per day, start hours, break length)
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::planner::{MAX_MINUTES_PER_DAY, MAX_PLAN_DAYS};

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Study planner defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Days planned when a request leaves `days` out.
    #[serde(default = "default_days")]
    pub default_days: u32,
    #[serde(default = "default_hours_per_day")]
    pub default_hours_per_day: u32,
    #[serde(default = "default_start_hour")]
    pub default_start_hour: u32,
    /// First block of the single-day legacy plan starts at this hour.
    #[serde(default = "default_start_hour")]
    pub legacy_start_hour: u32,
    /// Gap between consecutive blocks.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: i64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
}

// Default functions
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8000
}
fn default_days() -> u32 {
    7
}
fn default_hours_per_day() -> u32 {
    3
}
fn default_start_hour() -> u32 {
    9
}
fn default_break_minutes() -> i64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_days: default_days(),
            default_hours_per_day: default_hours_per_day(),
            default_start_hour: default_start_hour(),
            legacy_start_hour: default_start_hour(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl PlannerConfig {
    /// Check every field against the range the planners accept.
    ///
    /// # Errors
    ///
    /// Returns the first field found out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges: [(&str, i64, i64, i64); 5] = [
            ("planner.default_days", self.default_days.into(), 1, MAX_PLAN_DAYS.into()),
            ("planner.default_hours_per_day", self.default_hours_per_day.into(), 0, 24),
            ("planner.default_start_hour", self.default_start_hour.into(), 0, 23),
            ("planner.legacy_start_hour", self.legacy_start_hour.into(), 0, 23),
            ("planner.break_minutes", self.break_minutes, 0, MAX_MINUTES_PER_DAY),
        ];
        for (key, value, min, max) in ranges {
            if !(min..=max).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("{value} is outside [{min}, {max}]"),
                });
            }
        }
        Ok(())
    }
}

impl Config {
    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<i64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot set a whole section".to_string()));
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
        }

        Ok(())
    }

    pub fn path(dir: &Path) -> PathBuf {
        dir.join("config.toml")
    }

    /// Load from `dir`, writing defaults there if no config exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(dir);
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save(dir)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        let path = Self::path(dir);
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    ///
    /// Sections are not values: `get("planner")` is `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        let pointer: String = key
            .split('.')
            .map(|part| format!("/{}", part.replace('~', "~0").replace('/', "~1")))
            .collect();

        match serde_json::to_value(self).ok()?.pointer(&pointer)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The caller persists.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value does not fit
    /// the field's type, or a planner field leaves its accepted range.
    /// `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.planner.validate()?;
        *self = updated;
        Ok(())
    }
}
