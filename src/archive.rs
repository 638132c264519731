//! Archive file naming
//!
//! Maps a calendar date to its per-day archive path (`<dir>/<YYYY-MM-DD>.log`)
//! and back, and enumerates the dates present in an archive directory.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::error::{LogError, LogResult};
use crate::timestamp::{date_key, parse_date_key};

/// Extension carried by every archive file.
const ARCHIVE_EXTENSION: &str = ".log";

/// Date <-> path mapping for a single archive directory
#[derive(Debug, Clone)]
pub struct ArchiveNamer {
    dir: PathBuf,
}

impl ArchiveNamer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Archive file path for a calendar date
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}{}", date_key(date), ARCHIVE_EXTENSION))
    }

    /// Inverse parse of an archive filename
    ///
    /// Fails with [`LogError::MalformedArchiveName`] on non-matching names;
    /// callers scanning a directory skip such files rather than abort.
    pub fn date_for(&self, path: &Path) -> LogResult<NaiveDate> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| LogError::MalformedArchiveName(path.display().to_string()))?;
        let stem = name
            .strip_suffix(ARCHIVE_EXTENSION)
            .ok_or_else(|| LogError::MalformedArchiveName(name.to_string()))?;

        parse_date_key(stem).map_err(|_| LogError::MalformedArchiveName(name.to_string()))
    }

    /// Dates with an archive file present, sorted ascending
    ///
    /// Returns an empty list when the archive directory does not exist yet.
    /// Non-archive files in the directory are skipped.
    pub fn archived_dates(&self) -> LogResult<Vec<NaiveDate>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut dates = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                continue;
            }
            match self.date_for(&path) {
                Ok(date) => dates.push(date),
                Err(_) => {
                    tracing::warn!(
                        "skipping foreign file in archive directory: {}",
                        path.display()
                    );
                }
            }
        }

        dates.sort();
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_path_for() {
        let namer = ArchiveNamer::new("/data/logs");
        assert_eq!(
            namer.path_for(date(2018, 10, 22)),
            PathBuf::from("/data/logs/2018-10-22.log")
        );
    }

    #[test]
    fn test_date_for_round_trip() {
        let namer = ArchiveNamer::new("/data/logs");
        let d = date(2018, 10, 22);
        assert_eq!(namer.date_for(&namer.path_for(d)).unwrap(), d);
    }

    #[test]
    fn test_date_for_rejects_non_matching_names() {
        let namer = ArchiveNamer::new("/data/logs");

        for name in ["notes.txt", "2018-10-22.bak", "latest.log", "2018-13-99.log"] {
            let path = PathBuf::from("/data/logs").join(name);
            assert!(matches!(
                namer.date_for(&path),
                Err(LogError::MalformedArchiveName(_))
            ));
        }
    }

    #[test]
    fn test_archived_dates_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let namer = ArchiveNamer::new(dir.path());

        std::fs::write(dir.path().join("2018-10-23.log"), "").unwrap();
        std::fs::write(dir.path().join("2018-10-21.log"), "").unwrap();
        std::fs::write(dir.path().join("README.md"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let dates = namer.archived_dates().unwrap();
        assert_eq!(dates, vec![date(2018, 10, 21), date(2018, 10, 23)]);
    }

    #[test]
    fn test_archived_dates_missing_directory() {
        let dir = tempdir().unwrap();
        let namer = ArchiveNamer::new(dir.path().join("does-not-exist"));
        assert!(namer.archived_dates().unwrap().is_empty());
    }
}
