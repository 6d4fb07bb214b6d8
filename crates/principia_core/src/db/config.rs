//! Connection-string parsing and transport policy.
//!
//! # Responsibility
//! - Turn a `DATABASE_URL`-style string into a concrete SQLite target.
//! - Infer whether the deployment expects encrypted transport.
//!
//! # Invariants
//! - Only SQLite targets are accepted; other schemes fail fast at startup.

use super::{DbError, DbResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

static HOSTED_DB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(neon\.tech|supabase)").expect("valid hosted db regex"));

const DEFAULT_DATABASE_URL: &str = "sqlite://principia.db";

/// Resolved database settings shared by the server and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Raw connection string as configured.
    pub url: String,
    /// Whether the deployment asks for encrypted transport.
    pub require_tls: bool,
}

/// Physical location a connection string resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    File(PathBuf),
    Memory,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL, None)
    }
}

impl DatabaseConfig {
    /// Builds a config, inferring `require_tls` from the url and the
    /// deployment-environment marker (`VERCEL`).
    pub fn new(url: impl Into<String>, deploy_marker: Option<&str>) -> Self {
        let url = url.into();
        let require_tls = infer_require_tls(&url, deploy_marker);
        Self { url, require_tls }
    }

    /// In-memory store, used by tests and throwaway runs.
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:", None)
    }

    /// Resolves the connection string into a store target.
    ///
    /// Accepted forms: `sqlite://<path>`, `sqlite:<path>`, `sqlite::memory:`,
    /// `:memory:` and bare file paths.
    pub fn target(&self) -> DbResult<StoreTarget> {
        let trimmed = self.url.trim();
        if trimmed.is_empty() {
            return Err(DbError::UnsupportedUrl(String::new()));
        }

        let rest = if let Some(rest) = trimmed.strip_prefix("sqlite://") {
            rest
        } else if let Some(rest) = trimmed.strip_prefix("sqlite:") {
            rest
        } else if let Some((scheme, _)) = trimmed.split_once("://") {
            return Err(DbError::UnsupportedUrl(scheme.to_string()));
        } else {
            trimmed
        };

        match rest {
            ":memory:" | "" => Ok(StoreTarget::Memory),
            path => Ok(StoreTarget::File(PathBuf::from(path))),
        }
    }
}

/// Returns whether a connection string implies encrypted transport.
///
/// True for hosted providers recognized by hostname (`neon.tech`,
/// `supabase`) or when the deployment marker equals `1`.
pub fn infer_require_tls(url: &str, deploy_marker: Option<&str>) -> bool {
    HOSTED_DB_RE.is_match(url) || deploy_marker.map(str::trim) == Some("1")
}

#[cfg(test)]
mod tests {
    use super::{infer_require_tls, DatabaseConfig, StoreTarget};
    use crate::db::DbError;
    use std::path::PathBuf;

    #[test]
    fn infers_tls_from_hosted_hostnames_and_marker() {
        assert!(infer_require_tls(
            "postgres://u:p@ep-cool.us-east-2.aws.neon.tech/db",
            None
        ));
        assert!(infer_require_tls("postgres://db.abc.supabase.co/db", None));
        assert!(infer_require_tls("sqlite://local.db", Some("1")));
        assert!(!infer_require_tls("sqlite://local.db", Some("0")));
        assert!(!infer_require_tls("sqlite://local.db", None));
    }

    #[test]
    fn resolves_sqlite_targets() {
        let file = DatabaseConfig::new("sqlite://data/principia.db", None);
        assert_eq!(
            file.target().unwrap(),
            StoreTarget::File(PathBuf::from("data/principia.db"))
        );
        assert_eq!(
            DatabaseConfig::in_memory().target().unwrap(),
            StoreTarget::Memory
        );
        assert_eq!(
            DatabaseConfig::new(":memory:", None).target().unwrap(),
            StoreTarget::Memory
        );
        assert_eq!(
            DatabaseConfig::new("/tmp/p.db", None).target().unwrap(),
            StoreTarget::File(PathBuf::from("/tmp/p.db"))
        );
    }

    #[test]
    fn rejects_foreign_schemes() {
        let err = DatabaseConfig::new("postgres://localhost/db", None)
            .target()
            .unwrap_err();
        assert!(matches!(err, DbError::UnsupportedUrl(scheme) if scheme == "postgres"));
    }
}
