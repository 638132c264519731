//! Ordered, timestamp-keyed collection of log entries
//!
//! Insertion order is file order, which is also chronological under normal
//! single-writer use. Two writes in the same microsecond both survive a round
//! trip, so the representation is an ordered sequence of entries rather than
//! a timestamp-keyed map.

use chrono::NaiveDateTime;
use std::collections::HashSet;

use crate::entry::LogEntry;
use crate::error::{LogError, LogResult};

/// An ordered set of log entries, materialized from file bytes on every read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogLineSet {
    entries: Vec<LogEntry>,
}

impl LogLineSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<LogEntry>) -> Self {
        Self { entries }
    }

    /// Parse raw file contents into a line set
    ///
    /// Splits on any run of carriage-return/line-feed characters and discards
    /// blank lines (including the artifact of the file's trailing newline).
    /// Lines that fail to decode as timestamped entries are skipped rather
    /// than failing the whole read — the documented lossy-read contract that
    /// keeps hand-edited and foreign log files readable.
    pub fn parse(raw: &str) -> Self {
        let mut entries = Vec::new();

        for line in raw.split(['\r', '\n']) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match LogEntry::decode(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!("skipping undecodable log line {:?}: {}", line, e);
                }
            }
        }

        Self { entries }
    }

    /// Return `count` entries starting at the zero-based offset `start`
    ///
    /// `count == 0` means "through the end of the set". A negative `count`
    /// means "`|count|` entries ending at `start`" — tail reads expressed
    /// uniformly with forward ranges. A negative resolved start offset counts
    /// back from the end of the set, so `slice(0, -n)` yields the last `n`
    /// entries and `slice(-1, 1)` the final one.
    pub fn slice(&self, start: i64, count: i64) -> LogResult<LogLineSet> {
        let len = self.entries.len() as i64;
        let mut start = start;
        let mut count = count;

        if count == 0 {
            count = len - start;
        }
        if count < 0 {
            start += count;
            count = -count;
        }
        if start < 0 {
            start += len;
        }
        if start < 0 || start + count > len {
            return Err(LogError::RangeOutOfBounds {
                start,
                count,
                len: self.entries.len(),
            });
        }

        let from = start as usize;
        let to = (start + count) as usize;
        Ok(Self {
            entries: self.entries[from..to].to_vec(),
        })
    }

    /// Concatenate two sets, preserving each one's internal order
    ///
    /// Does not deduplicate; used when combining archive-file results with
    /// live-file results.
    pub fn merge(mut self, other: LogLineSet) -> LogLineSet {
        self.entries.extend(other.entries);
        self
    }

    /// Timestamp-keyed union used by rotation
    ///
    /// Entries of `other` whose exact timestamp already appears in `self` are
    /// dropped, the rest appended, and the result sorted chronologically.
    /// Re-merging content that was already archived is therefore a no-op,
    /// which is what makes re-running an interrupted rotation safe.
    pub fn merge_keyed(mut self, other: LogLineSet) -> LogLineSet {
        let known: HashSet<NaiveDateTime> =
            self.entries.iter().map(|e| e.timestamp).collect();

        for entry in other.entries {
            if !known.contains(&entry.timestamp) {
                self.entries.push(entry);
            }
        }
        self.sorted()
    }

    /// Retain only entries with `start <= timestamp < end`
    pub fn filter_by_time(&self, start: NaiveDateTime, end: NaiveDateTime) -> LogLineSet {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| e.timestamp >= start && e.timestamp < end)
                .cloned()
                .collect(),
        }
    }

    /// Sort entries chronologically (stable, so file order survives ties)
    pub fn sorted(mut self) -> LogLineSet {
        self.entries.sort_by_key(|e| e.timestamp);
        self
    }

    /// Inverse of [`LogLineSet::parse`]: one `"[<timestamp>] <text>"` line per
    /// entry, each with a trailing newline
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.encode());
            out.push('\n');
        }
        out
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&LogEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Bare entry texts in set order (timestamps stripped)
    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }
}

impl IntoIterator for LogLineSet {
    type Item = LogEntry;
    type IntoIter = std::vec::IntoIter<LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
