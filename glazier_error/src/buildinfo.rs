//! Build information consumed by the reporter

use crate::config::ReportingPreferences;
use std::path::PathBuf;

/// Source of the directory diagnostic archives are written to
pub trait BuildInfo: Send + Sync {
    fn cache_path(&self) -> PathBuf;
}

/// Build information backed by runtime preferences
#[derive(Debug, Clone)]
pub struct ConfiguredBuildInfo {
    cache_dir: PathBuf,
}

impl ConfiguredBuildInfo {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn from_preferences(preferences: &ReportingPreferences) -> Self {
        Self::new(preferences.cache_dir.clone())
    }
}

impl BuildInfo for ConfiguredBuildInfo {
    fn cache_path(&self) -> PathBuf {
        self.cache_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_path_from_preferences() {
        let preferences = ReportingPreferences {
            cache_dir: PathBuf::from("/srv/glazier/cache"),
            ..Default::default()
        };
        let info = ConfiguredBuildInfo::from_preferences(&preferences);
        assert_eq!(info.cache_path(), PathBuf::from("/srv/glazier/cache"));
    }
}
