//! Experience scoring for testers.
//!
//! The pipeline runs five stages over a [`RecordSource`](bugrank_core::RecordSource),
//! each feeding the next:
//! 1. [`resolve_device_ids`] maps device descriptions to device ids.
//! 2. [`link_testers`] maps device ids to unique tester ids.
//! 3. [`TesterDirectory::resolve`] keeps the testers in the selected countries.
//! 4. [`tally_experience`] counts bug reports per directory entry.
//! 5. [`rank`] orders the results by ascending score.
//!
//! [`Pipeline`] wires the stages together.
//!
//! # Examples
//!
//! ```
//! use bugrank_core::{Selector, test_support::sample_source};
//! use bugrank_scorer::{Pipeline, PipelineRequest};
//!
//! let source = sample_source();
//! let request = PipelineRequest {
//!     devices: Selector::case_folded(["iPhone 5"]),
//!     countries: Selector::All,
//! };
//! let ranked = Pipeline::new(&source).run(&request).expect("pipeline runs");
//! assert_eq!(ranked.len(), 1);
//! assert_eq!(ranked[0].to_string(), "Ann Lee=> 2");
//! ```

#![forbid(unsafe_code)]

mod devices;
mod directory;
mod error;
mod experience;
mod linker;
mod pipeline;
mod rank;

pub use devices::resolve_device_ids;
pub use directory::TesterDirectory;
pub use error::PipelineError;
pub use experience::{ExperienceTally, tally_experience};
pub use linker::link_testers;
pub use pipeline::{Pipeline, PipelineRequest};
pub use rank::{compare_experience, rank, rank_by};
