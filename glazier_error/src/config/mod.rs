//! Configuration module for Glazier error reporting
//! Automatically uses generated constants from TOML configuration

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{ConfigError, ReportingPreferences};

/// Build information and configuration metadata
pub mod build_profile {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("GLAZIER_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("GLAZIER_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

/// Help link shown in the footer of every fatal message
pub fn help_uri() -> &'static str {
    compile_time::reporting::HELP_URI
}

/// File name of the diagnostic archive written to the cache directory
pub fn logs_archive_name() -> &'static str {
    compile_time::reporting::LOGS_ARCHIVE_NAME
}

/// Platform default for the cache directory
pub fn default_cache_dir() -> &'static str {
    if cfg!(windows) {
        compile_time::paths::WINDOWS_CACHE_DIR
    } else {
        compile_time::paths::UNIX_CACHE_DIR
    }
}

/// Platform default for the directory log files are collected from
pub fn default_logs_dir() -> &'static str {
    if cfg!(windows) {
        compile_time::paths::WINDOWS_LOGS_DIR
    } else {
        compile_time::paths::UNIX_LOGS_DIR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_time_constants() {
        assert!(help_uri().starts_with("https://"));
        assert!(!help_uri().contains('#'));
        assert_eq!(logs_archive_name(), "glazier_logs.zip");
        assert!(!default_cache_dir().is_empty());
        assert!(!default_logs_dir().is_empty());
    }

    #[test]
    fn test_source_info() {
        let info = build_profile::source_info();
        assert!(info.starts_with("Generated from "));
        assert!(info.ends_with(".toml"));
    }
}
