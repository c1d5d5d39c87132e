//! Diagnostic log collection
//!
//! Packs every file under the logs directory into a zip archive so a
//! failed build leaves something behind to debug.

use crate::log_info;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Log collection errors
#[derive(Debug, thiserror::Error)]
pub enum LogCollectionError {
    #[error("Logs directory not found: {path}")]
    LogsDirMissing { path: PathBuf },

    #[error("Unable to create logs archive {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to write logs archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Unable to walk logs directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Outcome of a successful collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub archive: PathBuf,
    pub files: usize,
    pub bytes: u64,
}

/// Gathers log files into an archive at `destination`
pub trait LogCollector: Send + Sync {
    fn collect(&self, destination: &Path) -> Result<CollectionSummary, LogCollectionError>;
}

/// Archive location inside a cache directory
pub fn archive_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(crate::config::logs_archive_name())
}

/// Zips the contents of a logs directory
#[derive(Debug, Clone)]
pub struct ZipLogCollector {
    logs_dir: PathBuf,
}

impl ZipLogCollector {
    pub fn new(logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
        }
    }
}

impl LogCollector for ZipLogCollector {
    fn collect(&self, destination: &Path) -> Result<CollectionSummary, LogCollectionError> {
        if !self.logs_dir.is_dir() {
            return Err(LogCollectionError::LogsDirMissing {
                path: self.logs_dir.clone(),
            });
        }

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_error(parent))?;
            }
        }

        let archive_file = File::create(destination).map_err(io_error(destination))?;
        // The archive may live inside the logs directory; never pack it into itself.
        let archive_canonical = fs::canonicalize(destination).ok();

        let mut writer = ZipWriter::new(archive_file);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut files = 0usize;
        let mut bytes = 0u64;

        for entry in WalkDir::new(&self.logs_dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if archive_canonical.is_some() && fs::canonicalize(path).ok() == archive_canonical {
                continue;
            }

            let relative = path.strip_prefix(&self.logs_dir).unwrap_or(path);
            writer.start_file(entry_name(relative), options)?;

            let mut source = File::open(path).map_err(io_error(path))?;
            bytes += io::copy(&mut source, &mut writer).map_err(io_error(path))?;
            files += 1;
        }

        writer.finish()?;

        log_info!("Collected logs",
            "archive" => destination.display(),
            "files" => files,
            "bytes" => bytes
        );

        Ok(CollectionSummary {
            archive: destination.to_path_buf(),
            files,
            bytes,
        })
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> LogCollectionError {
    let path = path.to_path_buf();
    move |source| LogCollectionError::Io { path, source }
}

/// Archive entry name with forward slashes on every platform
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn archive_names(path: &Path) -> Vec<String> {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_collects_nested_files() {
        let logs = tempdir().unwrap();
        let cache = tempdir().unwrap();
        fs::write(logs.path().join("glazier.log"), "step 1 ok\nstep 2 failed\n").unwrap();
        fs::create_dir(logs.path().join("winpe")).unwrap();
        fs::write(logs.path().join("winpe").join("setup.log"), "setup").unwrap();

        let destination = archive_path(cache.path());
        let summary = ZipLogCollector::new(logs.path())
            .collect(&destination)
            .unwrap();

        assert_eq!(summary.files, 2);
        assert_eq!(summary.archive, destination);
        assert!(destination.ends_with("glazier_logs.zip"));
        assert_eq!(
            archive_names(&destination),
            vec!["glazier.log".to_string(), "winpe/setup.log".to_string()]
        );

        let mut archive = ZipArchive::new(File::open(&destination).unwrap()).unwrap();
        let mut content = String::new();
        archive
            .by_name("glazier.log")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "step 1 ok\nstep 2 failed\n");
    }

    #[test]
    fn test_creates_missing_cache_dir() {
        let logs = tempdir().unwrap();
        let cache = tempdir().unwrap();
        fs::write(logs.path().join("glazier.log"), "x").unwrap();

        let destination = archive_path(&cache.path().join("nested").join("cache"));
        ZipLogCollector::new(logs.path())
            .collect(&destination)
            .unwrap();

        assert!(destination.is_file());
    }

    #[test]
    fn test_archive_inside_logs_dir_is_skipped() {
        let logs = tempdir().unwrap();
        fs::write(logs.path().join("glazier.log"), "x").unwrap();

        let destination = archive_path(logs.path());
        let summary = ZipLogCollector::new(logs.path())
            .collect(&destination)
            .unwrap();

        assert_eq!(summary.files, 1);
        assert_eq!(archive_names(&destination), vec!["glazier.log".to_string()]);
    }

    #[test]
    fn test_missing_logs_dir() {
        let cache = tempdir().unwrap();
        let collector = ZipLogCollector::new(cache.path().join("absent"));

        let result = collector.collect(&archive_path(cache.path()));
        assert_matches!(result, Err(LogCollectionError::LogsDirMissing { .. }));
    }

    #[test]
    fn test_unwritable_destination() {
        let logs = tempdir().unwrap();
        fs::write(logs.path().join("glazier.log"), "x").unwrap();
        // A regular file where the cache directory should be
        let blocker = logs.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = ZipLogCollector::new(logs.path()).collect(&archive_path(&blocker));
        assert_matches!(result, Err(LogCollectionError::Io { .. }));
    }

    #[test]
    fn test_entry_name_uses_forward_slashes() {
        let relative = Path::new("winpe").join("panther").join("setupact.log");
        assert_eq!(entry_name(&relative), "winpe/panther/setupact.log");
    }
}
