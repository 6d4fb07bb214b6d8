//! Core domain logic for Principia.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use db::{ConnectionPool, DatabaseConfig, DbError, DbResult};
pub use logging::{default_log_level, init_logging, LogDestination};
pub use model::principle::{
    NewPrinciple, Principle, PrincipleColor, PrincipleDraft, PrincipleId, PrincipleWithTactics,
};
pub use model::tactic::{NewTactic, Tactic, TacticDraft, TacticId};
pub use model::validation::{FieldError, ValidationErrors};
pub use repo::principle_repo::{
    PrincipleRepository, RepoError, RepoResult, SqlitePrincipleRepository,
};
pub use seed::{seed_if_empty, SeedOutcome};
pub use service::principle_service::{PrincipleService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
