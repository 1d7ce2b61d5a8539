//! SQLite store location, connection scoping and schema bootstrap.
//!
//! # Responsibility
//! - Own the configured database file location.
//! - Open one configured connection per repository call.
//! - Create catalog tables on explicit request.
//!
//! # Invariants
//! - Connections are never pooled or shared between calls.
//! - Opening a connection does not check that the schema exists.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::ConnectionManager;
pub use schema::{create_schema, CATALOG_TABLES};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    EmptyPath,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::EmptyPath => write!(f, "database path cannot be empty"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::EmptyPath => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
