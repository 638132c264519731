//! The log store
//!
//! Owns the live log file and the per-day archive directory. The write path
//! appends encoded entries to the live file under an exclusive advisory lock;
//! the read path materializes a [`LogLineSet`] from file bytes and slices or
//! time-filters it. Rotation moves every entry not from "today" into its
//! per-day archive, merging with whatever was already archived for that day.
//!
//! ```text
//! Write Path:
//!   text -> LogEntry (clock timestamp) -> encode -> append to plugin.log
//!
//! Read Path:
//!   plugin.log (+ logs/<date>.log) -> parse -> slice / time-filter -> LogLineSet
//! ```
//!
//! Queries take no lock: a read that races an in-flight append may miss the
//! final line. That best-effort consistency is accepted; `write`, `clear` and
//! `rotate` hold the exclusive lock for their full duration.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use fs2::FileExt;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::sync::Arc;

use crate::archive::ArchiveNamer;
use crate::clock::{Clock, SystemClock};
use crate::config::LogStoreConfig;
use crate::entry::{LogEntry, Severity};
use crate::error::{LogError, LogResult};
use crate::line_set::LogLineSet;

/// Text of the single entry left behind by `clear(true)`.
const CLEAR_PLACEHOLDER: &str = "log cleared";

/// Append-only, timestamp-indexed log store
pub struct LogStore {
    config: LogStoreConfig,
    clock: Arc<dyn Clock>,
}

impl LogStore {
    /// Create a store over the given data directory, using the system clock
    pub fn new(config: LogStoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a store with an injected clock (tests pin "now" and "today")
    pub fn with_clock(config: LogStoreConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &LogStoreConfig {
        &self.config
    }

    fn namer(&self) -> ArchiveNamer {
        ArchiveNamer::new(self.config.archive_dir())
    }

    // -- writing ----------------------------------------------------------

    /// Append a plain entry with the current timestamp
    pub fn write(&self, text: impl Into<String>) -> LogResult<LogEntry> {
        self.append_entry(LogEntry::new(self.clock.now(), text))
    }

    /// Append an entry carrying a severity tag
    pub fn write_with_severity(
        &self,
        severity: Severity,
        text: impl Into<String>,
    ) -> LogResult<LogEntry> {
        self.append_entry(LogEntry::with_severity(self.clock.now(), severity, text))
    }

    /// Serialize a structured payload to JSON and append it
    ///
    /// The store itself stays agnostic of the payload shape; this is a
    /// convenience over `write` for callers with serializable values.
    pub fn write_json<T: Serialize>(&self, value: &T) -> LogResult<LogEntry> {
        let text = serde_json::to_string(value)?;
        self.write(text)
    }

    fn append_entry(&self, entry: LogEntry) -> LogResult<LogEntry> {
        // One entry per physical line; a raw line break would corrupt every
        // read after this write.
        if entry.text.contains(['\n', '\r']) {
            return Err(LogError::EmbeddedNewline);
        }

        std::fs::create_dir_all(&self.config.data_dir)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.config.live_path())?;

        let line = format!("{}\n", entry.encode());
        file.lock_exclusive()?;
        let outcome = (&file).write_all(line.as_bytes());
        file.unlock()?;
        outcome?;

        Ok(entry)
    }

    /// Truncate the live log file, creating it if absent
    ///
    /// With `keep_placeholder`, a single timestamped placeholder entry is
    /// written instead of leaving the file empty, for callers that expect at
    /// least one line after a clear.
    pub fn clear(&self, keep_placeholder: bool) -> LogResult<()> {
        std::fs::create_dir_all(&self.config.data_dir)?;

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(self.config.live_path())?;

        file.lock_exclusive()?;
        let outcome = (|| -> LogResult<()> {
            file.set_len(0)?;
            if keep_placeholder {
                let entry = LogEntry::new(self.clock.now(), CLEAR_PLACEHOLDER);
                (&file).write_all(format!("{}\n", entry.encode()).as_bytes())?;
            }
            Ok(())
        })();
        file.unlock()?;
        outcome
    }

    // -- reading ----------------------------------------------------------

    fn read_live(&self) -> LogResult<LogLineSet> {
        let path = self.config.live_path();
        if !path.exists() {
            return Err(LogError::LogFileNotFound(path));
        }

        let raw = std::fs::read_to_string(&path)?;
        Ok(LogLineSet::parse(&raw))
    }

    /// Return `count` entries of the live log starting at line offset `start`
    ///
    /// `count == 0` reads through the end; a negative `count` reads the
    /// `|count|` entries ending at `start` (see [`LogLineSet::slice`]). Fails
    /// with [`LogError::LogFileNotFound`] when nothing has been logged yet —
    /// callers that want a boolean should use [`LogStore::is_empty`] instead.
    pub fn lines(&self, start: i64, count: i64) -> LogResult<LogLineSet> {
        self.read_live()?.slice(start, count)
    }

    /// Return the last `n` entries of the live log
    pub fn tail(&self, n: i64) -> LogResult<LogLineSet> {
        self.lines(0, -n)
    }

    /// Return the single entry at line offset `n`
    pub fn line(&self, n: i64) -> LogResult<LogEntry> {
        let set = self.lines(n, 1)?;
        set.into_iter()
            .next()
            .ok_or(LogError::RangeOutOfBounds {
                start: n,
                count: 1,
                len: 0,
            })
    }

    /// True when the live file is absent or decodes to zero entries
    pub fn is_empty(&self) -> LogResult<bool> {
        let path = self.config.live_path();
        if !path.exists() {
            return Ok(true);
        }

        let raw = std::fs::read_to_string(&path)?;
        Ok(LogLineSet::parse(&raw).is_empty())
    }

    /// Entries with `start <= timestamp < end`, across live and archived logs
    ///
    /// With `include_archives`, every archive file whose date falls inside the
    /// day-bucketed window is parsed and time-filtered. The live file is
    /// always scanned as well when non-empty, since un-rotated entries are not
    /// yet archived. The merged result is sorted chronologically (stable, so
    /// file order survives equal timestamps).
    pub fn between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        include_archives: bool,
    ) -> LogResult<LogLineSet> {
        let mut matching = LogLineSet::new();

        if include_archives {
            let namer = self.namer();
            // Day buckets: the end date advances one day so an `end` falling
            // mid-day still admits that day's archive before time-filtering.
            let start_date = start.date();
            let end_date = end.date() + Duration::days(1);

            for date in namer.archived_dates()? {
                if date < start_date || date >= end_date {
                    continue;
                }
                let raw = std::fs::read_to_string(namer.path_for(date))?;
                matching = matching.merge(LogLineSet::parse(&raw).filter_by_time(start, end));
            }
        }

        if !self.is_empty()? {
            let live = self.read_live()?;
            // Skip the scan only when the live file provably lies entirely
            // outside the range.
            let overlaps = match (live.first(), live.last()) {
                (Some(first), Some(last)) => first.timestamp < end && last.timestamp >= start,
                _ => false,
            };
            if overlaps {
                matching = matching.merge(live.filter_by_time(start, end));
            }
        }

        Ok(matching.sorted())
    }

    // -- rotation ---------------------------------------------------------

    /// Move all entries not from "today" into per-day archive files
    ///
    /// For each calendar day from the earliest live entry through yesterday,
    /// that day's entries are merged (timestamp-keyed, so re-runs cannot
    /// duplicate) with any pre-existing archive for the day and written to
    /// `logs/<date>.log`; the live file is then rewritten with only today's
    /// entries. Returns the number of archive files written — 0 when the live
    /// file is empty or already contains nothing older than today.
    ///
    /// There is no rollback: a crash mid-rotation may leave some days archived
    /// and others not, which is safe to re-run.
    pub fn rotate(&self) -> LogResult<usize> {
        let path = self.config.live_path();
        if !path.exists() {
            return Ok(0);
        }

        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        file.lock_exclusive()?;
        let outcome = self.rotate_locked(&file);
        file.unlock()?;
        outcome
    }

    fn rotate_locked(&self, file: &File) -> LogResult<usize> {
        let mut raw = String::new();
        let mut reader = file;
        reader.read_to_string(&mut raw)?;
        let live = LogLineSet::parse(&raw);

        let today = self.clock.today();
        let earliest = match live.first() {
            Some(entry) => entry.timestamp.date(),
            None => return Ok(0),
        };
        if earliest >= today {
            return Ok(0);
        }

        let namer = self.namer();
        std::fs::create_dir_all(namer.dir())?;

        let mut files_affected = 0;
        let mut date = earliest;
        while date < today {
            let day_lines = live.filter_by_time(day_start(date), day_start(date) + Duration::days(1));
            if day_lines.is_empty() {
                date += Duration::days(1);
                continue;
            }

            let archive_path = namer.path_for(date);
            let existing = if archive_path.exists() {
                LogLineSet::parse(&std::fs::read_to_string(&archive_path)?)
            } else {
                LogLineSet::new()
            };

            let merged = existing.merge_keyed(day_lines);
            std::fs::write(&archive_path, merged.serialize())?;
            tracing::debug!(
                "archived {} entries to {}",
                merged.count(),
                archive_path.display()
            );

            files_affected += 1;
            date += Duration::days(1);
        }

        // Keep only today's entries in the live file.
        let keep = live.filter_by_time(day_start(today), day_start(today) + Duration::days(1));
        (&*file).seek(SeekFrom::Start(0))?;
        file.set_len(0)?;
        (&*file).write_all(keep.serialize().as_bytes())?;

        tracing::info!(
            "rotation complete: {} archive file(s) written, {} entries kept in live log",
            files_affected,
            keep.count()
        );
        Ok(files_affected)
    }
}

fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
