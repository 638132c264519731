//! Timestamp codec
//!
//! The fixed-width, microsecond-precision rendering doubles as the sort key
//! for log entries and (date portion only) as the archive file naming key.
//! Rendered timestamps are lexicographically sortable.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{LogError, LogResult};

/// Format of a full timestamp, e.g. `2018-10-22 17:49:10.000123`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Format of the date-only key used for archive file names, e.g. `2018-10-22`.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Render a date-time with microsecond precision, fixed width.
pub fn format_timestamp(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp previously rendered by [`format_timestamp`].
pub fn parse_timestamp(s: &str) -> LogResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|_| LogError::MalformedTimestamp(s.to_string()))
}

/// Render only the calendar-date portion, used for archive file naming.
pub fn date_key(d: NaiveDate) -> String {
    d.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a date key previously rendered by [`date_key`].
pub fn parse_date_key(s: &str) -> LogResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
        .map_err(|_| LogError::MalformedTimestamp(s.to_string()))
}
