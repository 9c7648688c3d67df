//! Errors raised while running the experience pipeline.

use bugrank_core::SourceError;
use thiserror::Error;

/// Errors raised by the pipeline stages.
///
/// Every variant aborts the run; no partial ranking is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A dataset was missing, unreadable, headerless or malformed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// The experience tally was requested without a tester directory.
    #[error("experience tally requires a tester directory")]
    MissingDirectory,
}
