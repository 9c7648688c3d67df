//! Core domain types for the bugrank experience pipeline.
//!
//! The pipeline joins four datasets (devices, tester/device links, testers
//! and bug reports) to rank testers by the number of bugs they have filed.
//! This crate holds the records those datasets yield, the [`Selector`] used
//! to filter them, and the [`RecordSource`] trait that hides the backing
//! store from the pipeline stages.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod dataset;
mod error;
mod records;
mod selector;
pub mod source;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use dataset::Dataset;
pub use error::SourceError;
pub use records::{BugReport, Device, DeviceTesterLink, TesterRecord, TesterResult};
pub use selector::Selector;
pub use source::{RecordSource, Records};
