//! Where the tracker's `parcel` table lives.
//!
//! Callers get a `rusqlite::Connection` from `open_db` (a `tracker.db` file)
//! or `open_db_in_memory` (tests), already carrying the current table layout.
//! Parcel stores borrow that connection; nothing here knows about parcels
//! beyond the embedded SQL in `migrations`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Why a tracker database could not be opened or brought up to date.
#[derive(Debug)]
pub enum DbError {
    /// Driver failure, passed through untouched.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer tracker build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "tracker database is at schema {db_version}, this build only knows up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
