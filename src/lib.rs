//! Facade crate for the bugrank experience ranking engine.
//!
//! This crate re-exports the core record types and the scoring pipeline, and
//! exposes the flat-file and SQLite record sources behind feature flags.

#![forbid(unsafe_code)]

pub use bugrank_core::{
    BugReport, Dataset, Device, DeviceTesterLink, RecordSource, Records, Selector, SourceError,
    TesterRecord, TesterResult,
};
pub use bugrank_scorer::{
    ExperienceTally, Pipeline, PipelineError, PipelineRequest, TesterDirectory,
    compare_experience, link_testers, rank, rank_by, resolve_device_ids, tally_experience,
};

#[cfg(feature = "csv-files")]
pub use bugrank_data::{CsvRecordSource, DatasetPaths, split_row};

#[cfg(feature = "store-sqlite")]
pub use bugrank_data::{
    ImportError, ImportSummary, SqliteRecordSource, SqliteStoreError, persist_records,
};

#[cfg(feature = "test-support")]
pub use bugrank_core::test_support;
