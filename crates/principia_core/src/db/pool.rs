//! SQLite connection pool over `r2d2`.
//!
//! # Invariants
//! - Every pooled connection passed through the migrating bootstrap.
//! - In-memory stores hold exactly one connection that is never recycled;
//!   every in-memory connection would otherwise be a separate database.
//! - Checkout waits at most the checkout timeout, never indefinitely.

use super::open::{init_pooled, open_db};
use super::{DatabaseConfig, DbResult, StoreTarget};
use log::{info, warn};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::time::Duration;

const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection borrowed from a [`ConnectionPool`]; returned on drop.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Shared pool of migrated connections.
pub struct ConnectionPool {
    inner: Pool<SqliteConnectionManager>,
    checkout_timeout: Duration,
}

impl ConnectionPool {
    /// Opens a pool for the configured store.
    ///
    /// `size` applies to file stores only and is clamped to at least one.
    pub fn open(config: &DatabaseConfig, size: usize) -> DbResult<Self> {
        let target = config.target()?;
        if config.require_tls {
            warn!(
                "event=pool_open module=db status=warn reason=tls_not_applicable_to_embedded_store"
            );
        }

        let (manager, size) = match &target {
            StoreTarget::Memory => (SqliteConnectionManager::memory(), 1),
            StoreTarget::File(path) => {
                // Migrate once up front so schema errors keep their `DbError` shape.
                drop(open_db(path)?);
                (SqliteConnectionManager::file(path), size.max(1))
            }
        };

        let mut builder = Pool::builder()
            .max_size(u32::try_from(size).unwrap_or(u32::MAX))
            .connection_timeout(DEFAULT_CHECKOUT_TIMEOUT);
        if target == StoreTarget::Memory {
            builder = builder.idle_timeout(None).max_lifetime(None);
        }
        let inner = builder.build(manager.with_init(init_pooled))?;
        info!("event=pool_open module=db status=ok size={size}");

        Ok(Self {
            inner,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        })
    }

    /// Single-connection in-memory pool.
    pub fn in_memory() -> DbResult<Self> {
        Self::open(&DatabaseConfig::in_memory(), 1)
    }

    /// Overrides how long `get` waits for a free connection.
    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }

    /// Total number of connections the pool may hold.
    pub fn size(&self) -> usize {
        self.inner.max_size() as usize
    }

    /// Number of connections currently checked in.
    pub fn idle_count(&self) -> usize {
        self.inner.state().idle_connections as usize
    }

    /// Checks out a connection, waiting up to the checkout timeout.
    pub fn get(&self) -> DbResult<PooledConnection> {
        self.inner.get_timeout(self.checkout_timeout).map_err(|err| {
            warn!(
                "event=pool_checkout module=db status=error error_code=pool_timeout waited_ms={} error={err}",
                self.checkout_timeout.as_millis()
            );
            err.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ConnectionPool;
    use crate::db::{DatabaseConfig, DbError};
    use std::time::Duration;

    #[test]
    fn in_memory_pool_has_single_connection() {
        let pool = ConnectionPool::open(&DatabaseConfig::in_memory(), 8).unwrap();
        assert_eq!(pool.size(), 1);
        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn in_memory_connection_is_migrated_and_keeps_data() {
        let pool = ConnectionPool::in_memory().unwrap();
        pool.get()
            .unwrap()
            .execute(
                "INSERT INTO principles (id, title, description) VALUES ('p1', 't', 'd');",
                [],
            )
            .unwrap();
        let count: i64 = pool
            .get()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM principles;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn connection_returns_to_pool_on_drop() {
        let pool = ConnectionPool::in_memory().unwrap();
        {
            let _conn = pool.get().unwrap();
            assert_eq!(pool.idle_count(), 0);
        }
        assert_eq!(pool.idle_count(), 1);
    }

    #[test]
    fn checkout_times_out_when_exhausted() {
        let pool = ConnectionPool::in_memory()
            .unwrap()
            .with_checkout_timeout(Duration::from_millis(20));
        let _held = pool.get().unwrap();
        let err = pool.get().err().expect("second checkout should time out");
        assert!(matches!(err, DbError::Pool(_)));
    }

    #[test]
    fn file_pool_connections_share_one_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("pool.db").display());
        let pool = ConnectionPool::open(&DatabaseConfig::new(url, None), 2).unwrap();
        assert_eq!(pool.size(), 2);

        let first = pool.get().unwrap();
        let second = pool.get().unwrap();
        first
            .execute(
                "INSERT INTO principles (id, title, description) VALUES ('p1', 't', 'd');",
                [],
            )
            .unwrap();
        let count: i64 = second
            .query_row("SELECT COUNT(*) FROM principles;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);

        let foreign_keys: i64 = second
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }
}
