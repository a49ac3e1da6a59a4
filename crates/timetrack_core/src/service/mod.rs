//! Tracking use-case services.
//!
//! # Responsibility
//! - Validate drafts and check referenced rows before delegating writes.
//! - Translate repository outcomes into use-case errors callers can map.
//!
//! # Invariants
//! - No write reaches a repository before its draft is normalized.
//! - Referenced rows (project, user, task) are checked by hand before writes.

use crate::model::validation::ValidationError;
use crate::model::EntityId;
use crate::repo::entity_repo::{Entity, RepoError, Repository};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod project_service;
pub mod report_service;
pub mod seed_service;
pub mod task_service;
pub mod time_entry_service;
pub mod user_service;
pub mod views;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case error shared by all tracking services.
#[derive(Debug)]
pub enum ServiceError {
    /// Draft failed field validation.
    Validation(ValidationError),
    /// Addressed row (or the parent of a filtered listing) does not exist.
    NotFound { entity: &'static str, id: EntityId },
    /// A row referenced by a draft does not exist.
    MissingReference { entity: &'static str, id: EntityId },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } | Self::MissingReference { entity, id } => {
                write!(f, "{entity} with ID {id} not found")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Repo(other),
        }
    }
}

/// Loads one row or fails with `NotFound`.
pub(crate) fn require<E, R>(repo: &R, id: EntityId) -> ServiceResult<E>
where
    E: Entity,
    R: Repository<E>,
{
    repo.get_by_id(id)?.ok_or(ServiceError::NotFound {
        entity: E::LABEL,
        id,
    })
}

/// Loads a row referenced by a draft or fails with `MissingReference`.
pub(crate) fn require_reference<E, R>(repo: &R, id: EntityId) -> ServiceResult<E>
where
    E: Entity,
    R: Repository<E>,
{
    repo.get_by_id(id)?.ok_or(ServiceError::MissingReference {
        entity: E::LABEL,
        id,
    })
}

/// Fails with `NotFound` when the parent of a filtered listing is missing.
pub(crate) fn ensure_exists<E, R>(repo: &R, id: EntityId) -> ServiceResult<()>
where
    E: Entity,
    R: Repository<E>,
{
    if repo.exists(id)? {
        Ok(())
    } else {
        Err(ServiceError::NotFound {
            entity: E::LABEL,
            id,
        })
    }
}
