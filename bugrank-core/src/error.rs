//! Errors raised while reading a dataset from a record source.

use std::{error::Error as StdError, io};

use thiserror::Error;

use crate::Dataset;

/// Errors produced by a [`RecordSource`](crate::RecordSource).
///
/// `Open` and `MissingHeader` are raised before any row is yielded and mean
/// the dataset is unusable as a whole. The remaining variants are yielded by
/// the row iterator and abort the read at the offending row.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The dataset could not be opened.
    #[error("failed to open {dataset} dataset at {location}: {source}")]
    Open {
        /// Dataset being opened.
        dataset: Dataset,
        /// Path or address of the backing store.
        location: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The dataset is empty or has no header row.
    #[error("{dataset} dataset at {location} has no header row")]
    MissingHeader {
        /// Dataset being opened.
        dataset: Dataset,
        /// Path or address of the backing store.
        location: String,
    },
    /// Reading a line failed part-way through the dataset.
    #[error("failed to read line {line} of the {dataset} dataset: {source}")]
    Read {
        /// Dataset being read.
        dataset: Dataset,
        /// One-based line number, counting the header.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A data row has fewer fields than the columns the pipeline reads.
    #[error("line {line} of the {dataset} dataset has {found} fields, expected at least {expected}")]
    MalformedRow {
        /// Dataset being read.
        dataset: Dataset,
        /// One-based line number, counting the header.
        line: usize,
        /// Minimum number of fields for this dataset.
        expected: usize,
        /// Number of fields found.
        found: usize,
    },
    /// A non-file backend (such as SQLite) failed.
    #[error("{dataset} dataset backend failed: {source}")]
    Backend {
        /// Dataset being read.
        dataset: Dataset,
        /// Error reported by the backend.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl SourceError {
    /// Dataset the error relates to.
    #[must_use]
    pub const fn dataset(&self) -> Dataset {
        match self {
            Self::Open { dataset, .. }
            | Self::MissingHeader { dataset, .. }
            | Self::Read { dataset, .. }
            | Self::MalformedRow { dataset, .. }
            | Self::Backend { dataset, .. } => *dataset,
        }
    }

    /// Wrap a backend error for `dataset`.
    pub fn backend<E>(dataset: Dataset, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Backend {
            dataset,
            source: Box::new(source),
        }
    }
}
