//! # Daybook
//!
//! An append-only, timestamp-indexed log store. Structured entries are
//! appended to a live log file, historical entries rotate into per-day
//! archive files, and queries answer line-range and time-range reads across
//! both.
//!
//! ## Features
//!
//! - **One entry per line**: `"[<timestamp>] <text>"`, microsecond precision
//! - **Per-day archives**: explicit rotation into `logs/<YYYY-MM-DD>.log`,
//!   idempotent and safe to re-run after a crash
//! - **Range queries**: line offsets (with tail semantics) and half-open
//!   time ranges spanning live and archived entries
//! - **Lossy reads**: malformed lines are skipped, never fatal, so
//!   hand-edited and foreign log files stay readable
//! - **Injectable clock**: tests pin "now" and "today" deterministically
//!
//! ## Modules
//!
//! - [`store`]: the log store itself (write, read, clear, between, rotate)
//! - [`line_set`]: ordered timestamp-keyed collections of entries
//! - [`entry`]: a single log record and its textual encoding
//! - [`archive`]: date <-> archive-path mapping
//! - [`timestamp`]: the fixed-precision timestamp codec
//! - [`clock`], [`config`], [`error`]: time source, paths, error types
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use daybook::{LogStore, LogStoreConfig, Severity};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = LogStore::new(LogStoreConfig::new("./data"));
//!
//!     // Append entries
//!     store.write("plugin started")?;
//!     store.write_with_severity(Severity::Warning, "quota at 90%")?;
//!
//!     // Read the last 10 entries
//!     for entry in store.tail(10)?.entries() {
//!         println!("{} {}", entry.timestamp, entry.text);
//!     }
//!
//!     // Move everything older than today into per-day archives
//!     let archived = store.rotate()?;
//!     println!("wrote {} archive file(s)", archived);
//!
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod clock;
pub mod config;
pub mod entry;
pub mod error;
pub mod line_set;
pub mod store;
pub mod timestamp;

// Re-export top-level types for convenience
pub use archive::ArchiveNamer;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::LogStoreConfig;
pub use entry::{LogEntry, Severity};
pub use error::{LogError, LogResult};
pub use line_set::LogLineSet;
pub use store::LogStore;
