//! Error types for the Principia server.

use principia_core::{DbError, RepoError, ServiceError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::task::JoinError;

/// Server-level failure: startup problems and request-path faults.
#[derive(Debug)]
pub enum ServerError {
    /// Invalid or unusable configuration.
    Config(String),
    Db(DbError),
    Repo(RepoError),
    Service(ServiceError),
    /// Blocking store task panicked or was cancelled.
    Task(JoinError),
    Io(std::io::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "configuration error: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Task(err) => write!(f, "store task failed: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(_) => None,
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Service(err) => Some(err),
            Self::Task(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for ServerError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for ServerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ServiceError> for ServerError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<JoinError> for ServerError {
    fn from(value: JoinError) -> Self {
        Self::Task(value)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
