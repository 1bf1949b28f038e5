//! Employer use-case service.
//!
//! # Responsibility
//! - Provide employee add/update/remove/search entry points.
//! - Delegate persistence to an `EmployerRepository`.
//!
//! # Invariants
//! - Update of a missing id and removal of a missing id both succeed
//!   silently; callers cannot distinguish them from real changes.

use crate::db::StateStore;
use crate::model::company::CompanyId;
use crate::model::employer::{EmployerEntity, EmployerId};
use crate::repo::employer_repo::{EmployerRepository, SqliteEmployerRepository};
use crate::repo::RepoResult;
use log::{error, info};

/// Use-case service wrapper for employer operations.
#[derive(Debug)]
pub struct EmployerService<R: EmployerRepository> {
    repo: R,
}

impl EmployerService<SqliteEmployerRepository> {
    /// Builds the service against a replica's state handle.
    pub fn open(store: StateStore) -> RepoResult<Self> {
        Ok(Self::new(SqliteEmployerRepository::try_new(store)?))
    }
}

impl<R: EmployerRepository> EmployerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts or replaces an employer keyed by its id.
    pub fn add_employer(&self, employer: &EmployerEntity) -> RepoResult<()> {
        log_write("employer_add", employer.employer_id, self.repo.add_employer(employer))
    }

    /// Replaces the employer stored under `employer_id`, if any.
    pub fn update_employer(
        &self,
        employer_id: EmployerId,
        employer: &EmployerEntity,
    ) -> RepoResult<()> {
        log_write(
            "employer_update",
            employer_id,
            self.repo.update_employer(employer_id, employer),
        )
    }

    /// Removes the employer stored under `employer_id`, if any.
    pub fn remove_employer(&self, employer_id: EmployerId) -> RepoResult<()> {
        log_write(
            "employer_remove",
            employer_id,
            self.repo.remove_employer(employer_id),
        )
    }

    /// Finds employers whose first or last name is matched by `search_term`.
    pub fn get_all_employer_by_name(&self, search_term: &str) -> RepoResult<Vec<EmployerEntity>> {
        self.repo.get_all_employer_by_name(search_term)
    }

    /// Lists employers referencing `company_id`.
    pub fn get_employers_by_company(
        &self,
        company_id: CompanyId,
    ) -> RepoResult<Vec<EmployerEntity>> {
        self.repo.get_employers_by_company(company_id)
    }

    /// Reads one employer by id.
    pub fn get_employer(&self, employer_id: EmployerId) -> RepoResult<Option<EmployerEntity>> {
        self.repo.get_employer(employer_id)
    }
}

fn log_write(event: &str, id: EmployerId, result: RepoResult<()>) -> RepoResult<()> {
    match &result {
        Ok(()) => info!("event={event} module=service status=ok id={id}"),
        Err(err) => error!("event={event} module=service status=error id={id} error={err}"),
    }
    result
}
