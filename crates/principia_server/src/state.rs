//! Shared application state for request handlers.
//!
//! # Invariants
//! - The seed guard records success only; a failed attempt is retried by
//!   the next request.
//! - Store work runs on the blocking pool, one pooled connection per call.

use crate::error::ServerResult;
use log::{error, info};
use principia_core::{
    seed_if_empty, ConnectionPool, PrincipleService, SeedOutcome, ServiceResult,
    SqlitePrincipleRepository,
};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// State shared by every request.
pub struct AppState {
    pool: Arc<ConnectionPool>,
    seeded: OnceCell<SeedOutcome>,
}

impl AppState {
    pub fn new(pool: ConnectionPool) -> Self {
        Self {
            pool: Arc::new(pool),
            seeded: OnceCell::new(),
        }
    }

    /// Outcome of the first successful seeding attempt, if any.
    pub fn seed_outcome(&self) -> Option<SeedOutcome> {
        self.seeded.get().copied()
    }

    /// Seeds an empty store once per process.
    ///
    /// Failures are logged and swallowed so the request is still served.
    pub async fn ensure_seeded(&self) {
        if self.seeded.initialized() {
            return;
        }

        let result = self
            .seeded
            .get_or_try_init(|| async {
                let pool = Arc::clone(&self.pool);
                tokio::task::spawn_blocking(move || -> ServerResult<SeedOutcome> {
                    let conn = pool.get()?;
                    Ok(seed_if_empty(&conn)?)
                })
                .await?
            })
            .await;

        match result {
            Ok(SeedOutcome::Seeded { .. }) => {}
            Ok(SeedOutcome::AlreadyPopulated) => {
                info!("event=db_seed module=server status=ok skipped=already_populated");
            }
            Err(err) => {
                error!("event=db_seed module=server status=error error={err}");
            }
        }
    }

    /// Runs one service call on a pooled connection off the async runtime.
    pub async fn with_service<T, F>(&self, op: F) -> ServerResult<T>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(&PrincipleService<SqlitePrincipleRepository<'c>>) -> ServiceResult<T>
            + Send
            + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || -> ServerResult<T> {
            let conn = pool.get()?;
            let service = PrincipleService::new(SqlitePrincipleRepository::new(&conn));
            Ok(op(&service)?)
        })
        .await?
    }
}
