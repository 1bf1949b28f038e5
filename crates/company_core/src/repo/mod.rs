//! Repository layer over the transactional state store.
//!
//! # Responsibility
//! - Wrap one logical table per entity behind use-case oriented contracts.
//! - Keep table names and transaction scoping out of the service layer.
//!
//! # Invariants
//! - Table handles are resolved once, when the repository is built.
//! - Every operation runs in exactly one store transaction.
//! - Lookups never report "not found" as an error; misses are empty results.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod company_repo;
pub mod employer_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entity persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}
