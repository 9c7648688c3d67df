//! Record sources for the bugrank pipeline.
//!
//! Responsibilities:
//! - Read the device, link, tester and bug datasets from flat files.
//! - Optionally read the same datasets from a SQLite store, and copy any
//!   record source into one.
//!
//! Boundaries:
//! - Do not encode join or scoring rules (live in `bugrank-scorer`).
//! - Dataset locations are configuration; nothing here hard-codes a path
//!   beyond the default file names.
//!
//! Invariants:
//! - Every read is scoped: the handle is owned by the row iterator and is
//!   released when it drops, including after an error.
//! - No global mutable state.

#![forbid(unsafe_code)]

mod csv;
mod paths;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use csv::{CsvRecordSource, split_row};
pub use paths::DatasetPaths;
#[cfg(feature = "store-sqlite")]
pub use sqlite::{ImportError, ImportSummary, SqliteRecordSource, SqliteStoreError, persist_records};
