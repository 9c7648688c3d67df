//! Error types emitted by the bugrank CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use bugrank_scorer::PipelineError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the bugrank CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A SQLite store was combined with flat-file dataset options.
    #[error("--{store} cannot be combined with --{other}")]
    ConflictingSources {
        store: &'static str,
        other: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        feature: &'static str,
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The import destination exists but is not a file.
    #[error("output path {path:?} exists but is not a file")]
    OutputNotFile { path: Utf8PathBuf },
    /// Opening the SQLite store failed.
    #[cfg(feature = "store-sqlite")]
    #[error(transparent)]
    OpenStore(#[from] bugrank_data::SqliteStoreError),
    /// Copying the datasets into SQLite failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to import datasets into {path:?}: {source}")]
    Import {
        path: Utf8PathBuf,
        #[source]
        source: bugrank_data::ImportError,
    },
    /// The ranking pipeline failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    /// Serialising the ranking failed.
    #[error("failed to serialise results: {0}")]
    SerialiseResults(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
