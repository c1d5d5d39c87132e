// RUNTIME PREFERENCES (deployment environment)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while loading runtime preferences
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Minimum level for the logging service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Convert to the logging module's level type
    pub fn to_events_log_level(self) -> crate::logging::LogLevel {
        match self {
            LogLevel::Critical => crate::logging::LogLevel::Critical,
            LogLevel::Error => crate::logging::LogLevel::Error,
            LogLevel::Warning => crate::logging::LogLevel::Warning,
            LogLevel::Info => crate::logging::LogLevel::Info,
            LogLevel::Debug => crate::logging::LogLevel::Debug,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "critical" => Some(LogLevel::Critical),
            "error" => Some(LogLevel::Error),
            "warning" | "warn" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingPreferences {
    /// Directory the diagnostic archive is written into
    pub cache_dir: PathBuf,

    /// Directory whose files are collected into the archive
    pub logs_dir: PathBuf,

    /// Emit log events as JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Write log events to stdout/stderr
    pub enable_console_logging: bool,

    /// Forward log events to the `log` facade
    pub forward_to_log_facade: bool,

    /// Least severe level that is still emitted
    pub min_log_level: LogLevel,
}

impl Default for ReportingPreferences {
    fn default() -> Self {
        Self {
            cache_dir: env::var_os("GLAZIER_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(super::default_cache_dir())),
            logs_dir: env::var_os("GLAZIER_LOGS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(super::default_logs_dir())),
            use_structured_logging: env::var("GLAZIER_STRUCTURED_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("GLAZIER_CONSOLE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            forward_to_log_facade: env::var("GLAZIER_LOG_FACADE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var("GLAZIER_LOG_LEVEL")
                .ok()
                .and_then(|v| LogLevel::parse(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

impl ReportingPreferences {
    /// Load preferences from a TOML file; missing keys fall back to defaults
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse preferences from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let preferences: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        preferences.validate()?;
        Ok(preferences)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "cache_dir",
                reason: "must not be empty".to_string(),
            });
        }

        if self.logs_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logs_dir",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_from_toml_str_overrides() {
        let prefs = ReportingPreferences::from_toml_str(
            r#"
            cache_dir = "/srv/glazier/cache"
            min_log_level = "debug"
            use_structured_logging = true
            "#,
        )
        .unwrap();

        assert_eq!(prefs.cache_dir, PathBuf::from("/srv/glazier/cache"));
        assert_eq!(prefs.min_log_level, LogLevel::Debug);
        assert!(prefs.use_structured_logging);
    }

    #[test]
    fn test_empty_cache_dir_rejected() {
        let result = ReportingPreferences::from_toml_str(r#"cache_dir = """#);
        assert_matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "cache_dir",
                ..
            })
        );
    }

    #[test]
    fn test_invalid_toml() {
        let result = ReportingPreferences::from_toml_str("cache_dir = [");
        assert_matches!(result, Err(ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("glazier.toml");
        fs::write(&path, "logs_dir = \"/srv/glazier/logs\"\n").unwrap();

        let prefs = ReportingPreferences::from_toml_file(&path).unwrap();
        assert_eq!(prefs.logs_dir, PathBuf::from("/srv/glazier/logs"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = ReportingPreferences::from_toml_file(&dir.path().join("absent.toml"));
        assert_matches!(result, Err(ConfigError::Read { .. }));
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("WARN"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("critical"), Some(LogLevel::Critical));
        assert_eq!(LogLevel::parse("verbose"), None);
    }
}
