//! Use-case services: the ensure-resolvers and the project workflow.
//!
//! # Responsibility
//! - Orchestrate repository calls into idempotent ensure-or-create
//!   operations and the transactional project assembly workflow.
//! - Keep transaction ownership explicit: a service commits or rolls back
//!   only the transaction it started itself.
//!
//! # Invariants
//! - Errors are never swallowed; a catch site rolls back what it owns and
//!   rethrows the original error.
//! - Either all resolved dependencies plus the project row persist, or none.

use crate::db::UowError;
use crate::model::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) mod ensure;

pub mod customer_service;
pub mod project_service;
pub mod role_service;
pub mod service_service;
pub mod staff_service;

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Error taxonomy of the resolver and workflow layer.
#[derive(Debug)]
pub enum WorkflowError {
    /// Malformed or missing input, detected before storage interaction.
    Validation(ValidationError),
    /// A required upstream entity could not be resolved.
    Dependency(String),
    /// Uniqueness violation or illegal nested transaction start.
    Conflict(String),
    /// A referenced entity does not exist.
    NotFound(String),
    /// Storage error, propagated unchanged after rollback-if-owned.
    Storage(RepoError),
}

impl Display for WorkflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Dependency(message) => write!(f, "{message}"),
            Self::Conflict(message) => write!(f, "{message}"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for WorkflowError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for WorkflowError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Conflict(message) => Self::Conflict(message),
            RepoError::NotFound(message) => Self::NotFound(message),
            other => Self::Storage(other),
        }
    }
}

impl From<UowError> for WorkflowError {
    fn from(value: UowError) -> Self {
        match value {
            UowError::TransactionActive => {
                Self::Conflict("a transaction is already in progress".to_string())
            }
            UowError::Sqlite(err) => Self::Storage(err.into()),
        }
    }
}

impl From<crate::db::DbError> for WorkflowError {
    fn from(value: crate::db::DbError) -> Self {
        Self::Storage(RepoError::Db(value))
    }
}
