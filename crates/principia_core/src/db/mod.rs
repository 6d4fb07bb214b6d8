//! SQLite storage bootstrap, pooling and schema migration entry points.
//!
//! # Responsibility
//! - Resolve the configured connection string into a concrete store target.
//! - Open and configure SQLite connections for Principia core.
//! - Apply schema migrations in deterministic order.
//! - Share a bounded set of connections between request handlers.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.
//! - Every handed-out connection has `foreign_keys=ON`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod config;
pub mod migrations;
mod open;
mod pool;

pub use config::{infer_require_tls, DatabaseConfig, StoreTarget};
pub use open::{open_db, open_db_in_memory};
pub use pool::{ConnectionPool, PooledConnection};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection string names an engine this build cannot open.
    UnsupportedUrl(String),
    /// Pool could not hand out a connection in time.
    Pool(r2d2::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UnsupportedUrl(scheme) => write!(
                f,
                "unsupported database url scheme `{scheme}`; expected sqlite://<path> or sqlite::memory:"
            ),
            Self::Pool(err) => write!(f, "connection pool: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::UnsupportedUrl(_) => None,
            Self::Pool(err) => Some(err),
        }
    }
}

impl From<r2d2::Error> for DbError {
    fn from(value: r2d2::Error) -> Self {
        Self::Pool(value)
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
