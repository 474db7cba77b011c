//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Whether assignment tiers are stored or recomputed on read
//! - Due-date wording
//! - Weekly study goal
//! - Search and outline generator tuning
//! - Log level
//!
//! Configuration is stored at `~/.config/studysync/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::error::ConfigError;
use crate::outline::Provider;
use crate::priority::{DuenessStyle, PriorityMode};
use crate::search::DEFAULT_MIN_QUERY_LEN;

/// Priority policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityConfig {
    #[serde(default)]
    pub mode: PriorityMode,
    /// Refresh stored tiers whenever the workspace is opened.
    #[serde(default)]
    pub refresh_on_open: bool,
    #[serde(default)]
    pub dueness_style: DuenessStyle,
    /// Days ahead the dashboard lists as upcoming.
    #[serde(default = "default_upcoming_days")]
    pub upcoming_days: i64,
}

/// Study tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(default = "default_weekly_goal_hours")]
    pub weekly_goal_hours: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

/// Outline generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub provider: Provider,
    /// Artificial backend delay, for demos.
    #[serde(default)]
    pub simulated_latency_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studysync/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub priority: PriorityConfig,
    #[serde(default)]
    pub study: StudyConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Currency symbol for budget output.
    #[serde(default = "default_currency")]
    pub currency: String,
}

// Default functions
fn default_upcoming_days() -> i64 {
    7
}
fn default_weekly_goal_hours() -> u32 {
    30
}
fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_log_level() -> String {
    "warn".into()
}
fn default_currency() -> String {
    "$".into()
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            mode: PriorityMode::Stored,
            refresh_on_open: false,
            dueness_style: DuenessStyle::Remaining,
            upcoming_days: default_upcoming_days(),
        }
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            weekly_goal_hours: default_weekly_goal_hours(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: default_min_query_len(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Copilot,
            simulated_latency_ms: 0,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            priority: PriorityConfig::default(),
            study: StudyConfig::default(),
            search: SearchConfig::default(),
            generator: GeneratorConfig::default(),
            logging: LoggingConfig::default(),
            currency: default_currency(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

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
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    invalid(format!("cannot parse '{value}' as number"))
                                })?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key in memory. Returns error if key is unknown
    /// or the value does not fit the field.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    pub fn weekly_goal_minutes(&self) -> u32 {
        self.study.weekly_goal_hours.saturating_mul(60)
    }

    pub fn generator_timeout(&self) -> Duration {
        Duration::from_secs(self.generator.timeout_secs)
    }

    pub fn generator_latency(&self) -> Duration {
        Duration::from_millis(self.generator.simulated_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.priority.mode, PriorityMode::Stored);
        assert_eq!(parsed.study.weekly_goal_hours, 30);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.search.min_query_len, 2);
        assert_eq!(parsed.generator.timeout_secs, 30);
        assert_eq!(parsed.currency, "$");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("priority.mode").as_deref(), Some("stored"));
        assert_eq!(cfg.get("study.weekly_goal_hours").as_deref(), Some("30"));
        assert!(cfg.get("priority.missing_key").is_none());
    }

    #[test]
    fn set_switches_priority_mode() {
        let mut cfg = Config::default();
        cfg.set("priority.mode", "recompute").unwrap();
        assert_eq!(cfg.priority.mode, PriorityMode::Recompute);
    }

    #[test]
    fn set_rejects_unknown_enum_variant() {
        let mut cfg = Config::default();
        let err = cfg.set("priority.mode", "sometimes").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(cfg.priority.mode, PriorityMode::Stored);
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "study.weekly_goal_hours", "20").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "study.weekly_goal_hours").unwrap(),
            &serde_json::Value::Number(20.into())
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "ui.dark_mode", "true");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = Config::set_json_value_by_path(&mut json, "priority.refresh_on_open", "maybe");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.priority.upcoming_days, 7);

        let mut changed = cfg.clone();
        changed.set("generator.provider", "gemini").unwrap();
        changed.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.generator.provider, Provider::Gemini);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "priority = 3").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn derived_durations() {
        let cfg = Config::default();
        assert_eq!(cfg.weekly_goal_minutes(), 1800);
        assert_eq!(cfg.generator_timeout(), Duration::from_secs(30));
        assert!(cfg.generator_latency().is_zero());
    }
}
