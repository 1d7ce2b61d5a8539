//! Per-call SQLite connection scoping.
//!
//! # Responsibility
//! - Remember where the catalog database lives.
//! - Open and configure a fresh connection for each repository call.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - The caller owns the connection; dropping it releases the file handle.

use super::schema::create_schema;
use super::{DbError, DbResult};
use crate::config::CatalogConfig;
use log::{debug, error};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Hands out scoped connections to one file-backed catalog store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionManager {
    path: PathBuf,
}

impl ConnectionManager {
    /// Creates a manager for the database file at `path`.
    ///
    /// # Errors
    /// - Returns [`DbError::EmptyPath`] for an empty path.
    pub fn new(path: impl Into<PathBuf>) -> DbResult<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(DbError::EmptyPath);
        }
        Ok(Self { path })
    }

    /// Creates a manager for the database configured in `config`.
    pub fn from_config(config: &CatalogConfig) -> DbResult<Self> {
        Self::new(config.db_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a configured connection for a single operation.
    ///
    /// The schema is not checked; a missing table surfaces later as a
    /// statement error.
    ///
    /// # Side effects
    /// - Creates the database file when it does not exist yet.
    /// - Emits `db_open` logging events with duration and status.
    pub fn open(&self) -> DbResult<Connection> {
        let started_at = Instant::now();

        let conn = match Connection::open(&self.path) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        if let Err(err) = configure_connection(&conn) {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_configure_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }

        debug!(
            "event=db_open module=db status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(conn)
    }

    /// Opens one connection and creates any missing catalog tables.
    ///
    /// Meant for process start-up and tests; repository calls never do this.
    pub fn bootstrap_schema(&self) -> DbResult<()> {
        let mut conn = self.open()?;
        create_schema(&mut conn)
    }
}

fn configure_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}
