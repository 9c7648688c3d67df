//! SQLite store for the four datasets.
//!
//! Each dataset is a table named after [`Dataset::name`] whose columns are
//! the fields the pipeline reads. Rows are read back in insertion order.
#![forbid(unsafe_code)]

use std::fmt;

use bugrank_core::{
    BugReport, Dataset, Device, DeviceTesterLink, RecordSource, Records, SourceError, TesterRecord,
};
use bugrank_fs::ensure_parent_dir;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use rusqlite::{
    Connection, Error as SqliteError, OpenFlags, OptionalExtension, Row, Statement, Transaction,
};
use thiserror::Error;

/// Error raised when opening a SQLite store for reading.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Errors raised when copying records into a SQLite store.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// Failed to create the parent directory for the database.
    #[error("failed to create parent directory of {path}")]
    CreateDirectory {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin import transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating a dataset table failed.
    #[error("failed to create {dataset} table")]
    CreateSchema {
        /// Dataset whose table could not be created.
        dataset: Dataset,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Preparing an insert statement failed.
    #[error("failed to prepare {dataset} insert statement")]
    PrepareInsert {
        /// Dataset being imported.
        dataset: Dataset,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Writing a row failed.
    #[error("failed to persist row {row} of the {dataset} dataset")]
    PersistRow {
        /// Dataset being imported.
        dataset: Dataset,
        /// One-based index of the record within the dataset.
        row: usize,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Reading from the source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Committing the transaction failed.
    #[error("failed to commit import transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Row counts written by [`persist_records`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Devices written.
    pub devices: usize,
    /// Tester/device links written.
    pub links: usize,
    /// Testers written.
    pub testers: usize,
    /// Bug reports written.
    pub bugs: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} devices, {} links, {} testers, {} bugs",
            self.devices, self.links, self.testers, self.bugs
        )
    }
}

const fn create_sql(dataset: Dataset) -> &'static str {
    match dataset {
        Dataset::Devices => {
            "CREATE TABLE devices (device_id TEXT NOT NULL, description TEXT NOT NULL)"
        }
        Dataset::TesterDevice => {
            "CREATE TABLE tester_device (tester_id TEXT NOT NULL, device_id TEXT NOT NULL)"
        }
        Dataset::Testers => {
            "CREATE TABLE testers (
                tester_id TEXT NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                country TEXT NOT NULL
            )"
        }
        Dataset::Bugs => {
            "CREATE TABLE bugs (bug_id TEXT NOT NULL, device_id TEXT NOT NULL, tester_id TEXT NOT NULL)"
        }
    }
}

const fn insert_sql(dataset: Dataset) -> &'static str {
    match dataset {
        Dataset::Devices => "INSERT INTO devices (device_id, description) VALUES (?1, ?2)",
        Dataset::TesterDevice => "INSERT INTO tester_device (tester_id, device_id) VALUES (?1, ?2)",
        Dataset::Testers => {
            "INSERT INTO testers (tester_id, first_name, last_name, country)
             VALUES (?1, ?2, ?3, ?4)"
        }
        Dataset::Bugs => "INSERT INTO bugs (bug_id, device_id, tester_id) VALUES (?1, ?2, ?3)",
    }
}

const fn select_sql(dataset: Dataset) -> &'static str {
    match dataset {
        Dataset::Devices => "SELECT device_id, description FROM devices ORDER BY rowid",
        Dataset::TesterDevice => "SELECT tester_id, device_id FROM tester_device ORDER BY rowid",
        Dataset::Testers => {
            "SELECT tester_id, first_name, last_name, country FROM testers ORDER BY rowid"
        }
        Dataset::Bugs => "SELECT bug_id, device_id, tester_id FROM bugs ORDER BY rowid",
    }
}

/// Copy every dataset of `source` into the SQLite database at `path`.
///
/// Existing dataset tables are replaced. The copy runs in one transaction,
/// so a source error leaves the database as it was. Parent directories are
/// created automatically.
///
/// # Errors
/// Returns [`ImportError`] when the database cannot be written or the source
/// fails part-way through a dataset.
pub fn persist_records<S>(source: &S, path: &Utf8Path) -> Result<ImportSummary, ImportError>
where
    S: RecordSource + ?Sized,
{
    ensure_parent_dir(path).map_err(|err| ImportError::CreateDirectory {
        path: path.to_path_buf(),
        source: err,
    })?;
    let mut connection =
        Connection::open(path.as_std_path()).map_err(|err| ImportError::Open {
            path: path.to_path_buf(),
            source: err,
        })?;
    let transaction = connection
        .transaction()
        .map_err(|err| ImportError::BeginTransaction { source: err })?;

    for dataset in Dataset::ALL {
        create_schema(&transaction, dataset)?;
    }

    let summary = ImportSummary {
        devices: copy_dataset(&transaction, Dataset::Devices, source.devices()?, |insert, row| {
            insert.execute((&row.id, &row.description))
        })?,
        links: copy_dataset(
            &transaction,
            Dataset::TesterDevice,
            source.tester_device_links()?,
            |insert, row| insert.execute((&row.tester_id, &row.device_id)),
        )?,
        testers: copy_dataset(&transaction, Dataset::Testers, source.testers()?, |insert, row| {
            insert.execute((&row.tester_id, &row.first_name, &row.last_name, &row.country))
        })?,
        bugs: copy_dataset(&transaction, Dataset::Bugs, source.bug_reports()?, |insert, row| {
            insert.execute((&row.bug_id, &row.device_id, &row.tester_id))
        })?,
    };

    transaction
        .commit()
        .map_err(|err| ImportError::Commit { source: err })?;
    debug!("imported {summary} into {path}");
    Ok(summary)
}

fn create_schema(transaction: &Transaction<'_>, dataset: Dataset) -> Result<(), ImportError> {
    let drop_sql = format!("DROP TABLE IF EXISTS {}", dataset.name());
    transaction
        .execute(&drop_sql, [])
        .and_then(|_| transaction.execute(create_sql(dataset), []))
        .map(|_| ())
        .map_err(|err| ImportError::CreateSchema {
            dataset,
            source: err,
        })
}

fn copy_dataset<T, F>(
    transaction: &Transaction<'_>,
    dataset: Dataset,
    rows: Records<'_, T>,
    bind: F,
) -> Result<usize, ImportError>
where
    F: Fn(&mut Statement<'_>, &T) -> rusqlite::Result<usize>,
{
    let mut insert = transaction
        .prepare(insert_sql(dataset))
        .map_err(|err| ImportError::PrepareInsert {
            dataset,
            source: err,
        })?;
    let mut copied = 0;
    for row in rows {
        let record = row?;
        copied += 1;
        bind(&mut insert, &record).map_err(|err| ImportError::PersistRow {
            dataset,
            row: copied,
            source: err,
        })?;
    }
    Ok(copied)
}

/// Read-only [`RecordSource`] over a database written by [`persist_records`].
///
/// A missing dataset table is reported as
/// [`SourceError::MissingHeader`], matching a headerless flat file.
pub struct SqliteRecordSource {
    connection: Connection,
    path: Utf8PathBuf,
}

impl fmt::Debug for SqliteRecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteRecordSource")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteRecordSource {
    /// Open the database at `path` read-only.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError::OpenDatabase`] when the file is missing or
    /// is not a SQLite database.
    pub fn open(path: &Utf8Path) -> Result<Self, SqliteStoreError> {
        let connection = Connection::open_with_flags(
            path.as_std_path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY,
        )
        .map_err(|source| SqliteStoreError::OpenDatabase {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            connection,
            path: path.to_path_buf(),
        })
    }

    fn has_table(&self, dataset: Dataset) -> Result<bool, SqliteError> {
        self.connection
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [dataset.name()],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map(|found| found.is_some())
    }

    // Rows are materialised before returning, so the statement borrow ends
    // here and the iterator holds no database handle.
    fn rows<T, F>(&self, dataset: Dataset, map: F) -> Result<Records<'_, T>, SourceError>
    where
        T: 'static,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let backend = |err: SqliteError| SourceError::backend(dataset, err);
        if !self.has_table(dataset).map_err(backend)? {
            return Err(SourceError::MissingHeader {
                dataset,
                location: format!("{}#{}", self.path, dataset.name()),
            });
        }
        let mut statement = self
            .connection
            .prepare(select_sql(dataset))
            .map_err(backend)?;
        let records = statement
            .query_map([], map)
            .map_err(backend)?
            .collect::<rusqlite::Result<Vec<T>>>()
            .map_err(backend)?;
        debug!("read {} rows from {dataset} table", records.len());
        Ok(Box::new(records.into_iter().map(Ok)))
    }
}

impl RecordSource for SqliteRecordSource {
    fn devices(&self) -> Result<Records<'_, Device>, SourceError> {
        self.rows(Dataset::Devices, |row| {
            Ok(Device::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
    }

    fn tester_device_links(&self) -> Result<Records<'_, DeviceTesterLink>, SourceError> {
        self.rows(Dataset::TesterDevice, |row| {
            Ok(DeviceTesterLink::new(
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })
    }

    fn testers(&self) -> Result<Records<'_, TesterRecord>, SourceError> {
        self.rows(Dataset::Testers, |row| {
            Ok(TesterRecord::new(
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
    }

    fn bug_reports(&self) -> Result<Records<'_, BugReport>, SourceError> {
        self.rows(Dataset::Bugs, |row| {
            Ok(BugReport::new(
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
    }
}
