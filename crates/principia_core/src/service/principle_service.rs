//! Principle/tactic use-case service.
//!
//! # Responsibility
//! - Turn wire drafts into validated inputs before any persistence.
//! - Map repository outcomes into use-case errors (validation vs. fault).
//!
//! # Invariants
//! - Service APIs never bypass repository transactions.
//! - A missing parent principle on tactic creation is a validation error.
//! - Deletes of absent ids succeed silently.

use crate::model::principle::{Principle, PrincipleDraft, PrincipleId, PrincipleWithTactics};
use crate::model::tactic::{Tactic, TacticDraft, TacticId};
use crate::model::validation::ValidationErrors;
use crate::repo::principle_repo::{PrincipleRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for principle/tactic use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input violates the creation contract.
    Validation(ValidationErrors),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Repo(_) => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(errors) => Self::Validation(errors),
            RepoError::PrincipleNotFound(id) => Self::Validation(ValidationErrors::single(
                "principleId",
                format!("Principle {id} does not exist"),
            )),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Principle service facade over repository implementations.
pub struct PrincipleService<R: PrincipleRepository> {
    repo: R,
}

impl<R: PrincipleRepository> PrincipleService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all principles with nested tactics, ordered by `order`.
    pub fn list_principles(&self) -> ServiceResult<Vec<PrincipleWithTactics>> {
        Ok(self.repo.list_principles_with_tactics()?)
    }

    /// Gets one principle with nested tactics; `None` when absent.
    pub fn get_principle(&self, id: PrincipleId) -> ServiceResult<Option<PrincipleWithTactics>> {
        Ok(self.repo.get_principle_with_tactics(id)?)
    }

    /// Validates and persists a new principle.
    pub fn create_principle(&self, draft: PrincipleDraft) -> ServiceResult<Principle> {
        let input = draft.validate()?;
        let principle = self.repo.create_principle(&input)?;
        info!(
            "event=principle_create module=service status=ok principle_id={}",
            principle.id
        );
        Ok(principle)
    }

    /// Deletes a principle and, atomically, all of its tactics.
    pub fn delete_principle(&self, id: PrincipleId) -> ServiceResult<()> {
        self.repo.delete_principle(id)?;
        info!("event=principle_delete module=service status=ok principle_id={id}");
        Ok(())
    }

    /// Validates and persists a new tactic under an existing principle.
    pub fn create_tactic(&self, draft: TacticDraft) -> ServiceResult<Tactic> {
        let input = draft.validate()?;
        let tactic = self.repo.create_tactic(&input)?;
        info!(
            "event=tactic_create module=service status=ok tactic_id={} principle_id={}",
            tactic.id, tactic.principle_id
        );
        Ok(tactic)
    }

    pub fn delete_tactic(&self, id: TacticId) -> ServiceResult<()> {
        self.repo.delete_tactic(id)?;
        info!("event=tactic_delete module=service status=ok tactic_id={id}");
        Ok(())
    }
}
