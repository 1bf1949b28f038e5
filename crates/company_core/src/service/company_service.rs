//! Company use-case service.
//!
//! # Responsibility
//! - Provide company lookup and registration entry points.
//! - Delegate persistence to a `CompanyRepository`.

use crate::db::StateStore;
use crate::model::company::CompanyEntity;
use crate::repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
use crate::repo::RepoResult;
use log::{error, info};
use std::time::Instant;

/// Use-case service wrapper for company operations.
#[derive(Debug)]
pub struct CompanyService<R: CompanyRepository> {
    repo: R,
}

impl CompanyService<SqliteCompanyRepository> {
    /// Builds the service against a replica's state handle.
    pub fn open(store: StateStore) -> RepoResult<Self> {
        Ok(Self::new(SqliteCompanyRepository::try_new(store)?))
    }
}

impl<R: CompanyRepository> CompanyService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Finds companies whose trading name is matched by `search_term`.
    ///
    /// Returns an empty list when nothing matches.
    pub fn get_company(&self, search_term: &str) -> RepoResult<Vec<CompanyEntity>> {
        self.repo.get_company(search_term)
    }

    /// Registers (or replaces) a company keyed by its id.
    pub fn add_company(&self, company: &CompanyEntity) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.repo.add_company(company) {
            Ok(()) => {
                info!(
                    "event=company_add module=service status=ok id={} duration_ms={}",
                    company.company_id,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=company_add module=service status=error id={} error={}",
                    company.company_id, err
                );
                Err(err)
            }
        }
    }
}
