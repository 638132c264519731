//! A single immutable log record and its textual encoding
//!
//! The stored line format is `"[<timestamp>] <text>"` regardless of severity.
//! Severity is a write-time convenience: it is folded into the text as a
//! `"WARNING: "` style prefix before encoding and is not recovered by
//! [`LogEntry::decode`] — callers that need it back must track it separately.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};
use crate::timestamp::{format_timestamp, parse_timestamp};

/// Severity tag recorded at write time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Debug => write!(f, "DEBUG"),
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    /// Sub-second precision timestamp; the sort and identity key
    pub timestamp: NaiveDateTime,
    /// Severity recorded at write time; `None` for plain writes and for
    /// entries reconstructed from disk
    pub severity: Option<Severity>,
    /// The entry text, without the severity prefix. Never contains a raw
    /// line break.
    pub text: String,
}

impl LogEntry {
    /// Create a plain entry
    pub fn new(timestamp: NaiveDateTime, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            severity: None,
            text: text.into(),
        }
    }

    /// Create an entry carrying a severity tag
    pub fn with_severity(
        timestamp: NaiveDateTime,
        severity: Severity,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            severity: Some(severity),
            text: text.into(),
        }
    }

    /// Text as it appears on disk, severity prefix included
    pub fn stored_text(&self) -> String {
        match self.severity {
            Some(severity) => format!("{}: {}", severity, self.text),
            None => self.text.clone(),
        }
    }

    /// Render the on-disk line (no trailing newline)
    pub fn encode(&self) -> String {
        format!("[{}] {}", format_timestamp(self.timestamp), self.stored_text())
    }

    /// Parse an on-disk line
    ///
    /// Splits at the first `"] "` after a leading `"["`. Fails with
    /// [`LogError::MalformedLine`] when the line has the wrong shape and
    /// [`LogError::MalformedTimestamp`] when the bracketed portion does not
    /// parse. Decoded entries always have `severity: None`.
    pub fn decode(line: &str) -> LogResult<LogEntry> {
        let rest = line
            .strip_prefix('[')
            .ok_or_else(|| LogError::MalformedLine(line.to_string()))?;
        let (stamp, text) = rest
            .split_once("] ")
            .ok_or_else(|| LogError::MalformedLine(line.to_string()))?;
        let timestamp = parse_timestamp(stamp)?;

        Ok(LogEntry {
            timestamp,
            severity: None,
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 10, 22)
            .unwrap()
            .and_hms_micro_opt(17, 49, 10, 123)
            .unwrap()
    }

    #[test]
    fn test_encode_plain() {
        let entry = LogEntry::new(stamp(), "This is a test line 1");
        assert_eq!(
            entry.encode(),
            "[2018-10-22 17:49:10.000123] This is a test line 1"
        );
    }

    #[test]
    fn test_encode_with_severity() {
        let entry = LogEntry::with_severity(stamp(), Severity::Warning, "disk almost full");
        assert_eq!(
            entry.encode(),
            "[2018-10-22 17:49:10.000123] WARNING: disk almost full"
        );
    }

    #[test]
    fn test_decode_round_trip() {
        let entry = LogEntry::new(stamp(), "round trip me");
        let decoded = LogEntry::decode(&entry.encode()).unwrap();

        assert_eq!(decoded.timestamp, entry.timestamp);
        assert_eq!(decoded.text, entry.text);
        assert!(decoded.severity.is_none());
    }

    #[test]
    fn test_decode_does_not_recover_severity() {
        let entry = LogEntry::with_severity(stamp(), Severity::Error, "boom");
        let decoded = LogEntry::decode(&entry.encode()).unwrap();

        // The prefix stays in the text; the tag itself is gone.
        assert_eq!(decoded.text, "ERROR: boom");
        assert!(decoded.severity.is_none());
    }

    #[test]
    fn test_decode_splits_on_first_separator_only() {
        let line = "[2018-10-22 17:49:10.000123] left] right] end";
        let decoded = LogEntry::decode(line).unwrap();
        assert_eq!(decoded.text, "left] right] end");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(
            LogEntry::decode("no bracket at all"),
            Err(LogError::MalformedLine(_))
        ));
        assert!(matches!(
            LogEntry::decode("[2018-10-22 17:49:10.000123]no-separator"),
            Err(LogError::MalformedLine(_))
        ));
        assert!(matches!(
            LogEntry::decode("[yesterday-ish] some text"),
            Err(LogError::MalformedTimestamp(_))
        ));
    }
}
