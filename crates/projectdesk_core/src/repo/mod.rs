//! Repository layer: per-entity data access contracts and SQLite impls.
//!
//! # Responsibility
//! - Define natural-key lookup and write contracts per entity.
//! - Keep SQL and row decoding inside this boundary.
//!
//! # Invariants
//! - Lookups never require an open transaction; writes assume the caller
//!   manages the transaction boundary (repositories never commit).
//! - Invalid persisted data is rejected as [`RepoError::InvalidData`], not
//!   masked.
//! - Schema-level uniqueness violations surface as [`RepoError::Conflict`].

use crate::db::DbError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod customer_repo;
pub mod project_repo;
pub mod role_repo;
pub mod service_repo;
pub mod staff_repo;
pub mod status_repo;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(String),
    /// Constraint violation, e.g. inserting a duplicate project number.
    Conflict(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Conflict(message) => write!(f, "{message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(cause, message)
                if cause.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Conflict(message.unwrap_or_else(|| cause.to_string()))
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}

/// Decodes a decimal stored as canonical text.
pub(crate) fn parse_decimal(table: &str, column: &str, raw: &str) -> RepoResult<Decimal> {
    raw.parse::<Decimal>().map_err(|_| {
        RepoError::InvalidData(format!("bad decimal `{raw}` in {table}.{column}"))
    })
}

/// Decodes an ISO-8601 calendar date stored as text.
pub(crate) fn parse_date(table: &str, column: &str, raw: &str) -> RepoResult<NaiveDate> {
    raw.parse::<NaiveDate>().map_err(|_| {
        RepoError::InvalidData(format!("bad date `{raw}` in {table}.{column}"))
    })
}
