//! Employer repository contract and state-store implementation.
//!
//! # Invariants
//! - All operations target the `employers` table.
//! - `update_employer` never creates a record; a missing id is skipped.
//! - `remove_employer` always issues the delete; a missing id is a no-op.
//! - `company_id` references are not checked against the company table.

use crate::db::{StateStore, Table};
use crate::model::company::CompanyId;
use crate::model::employer::{EmployerEntity, EmployerId};
use crate::repo::RepoResult;
use crate::search::term::term_contains_any;
use log::debug;

/// Name of the logical table holding employers.
pub const EMPLOYER_TABLE: &str = "employers";

/// Repository interface for employer operations.
pub trait EmployerRepository {
    /// Inserts or replaces the employer under its id.
    fn add_employer(&self, employer: &EmployerEntity) -> RepoResult<()>;
    /// Replaces an existing employer; does nothing when `employer_id` is absent.
    fn update_employer(&self, employer_id: EmployerId, employer: &EmployerEntity)
        -> RepoResult<()>;
    /// Deletes the employer; deleting an absent id succeeds.
    fn remove_employer(&self, employer_id: EmployerId) -> RepoResult<()>;
    /// Scans all employers matched by `search_term` on first or last name.
    fn get_all_employer_by_name(&self, search_term: &str) -> RepoResult<Vec<EmployerEntity>>;
    /// Scans all employers referencing `company_id`.
    fn get_employers_by_company(&self, company_id: CompanyId) -> RepoResult<Vec<EmployerEntity>>;
    /// Reads one employer by id.
    fn get_employer(&self, employer_id: EmployerId) -> RepoResult<Option<EmployerEntity>>;
}

/// Employer repository backed by the replica state store.
#[derive(Debug, Clone)]
pub struct SqliteEmployerRepository {
    store: StateStore,
    employers: Table<EmployerEntity>,
}

impl SqliteEmployerRepository {
    /// Resolves the employer table on `store` once for this repository.
    pub fn try_new(store: StateStore) -> RepoResult<Self> {
        let employers = store.get_or_add_table(EMPLOYER_TABLE)?;
        Ok(Self { store, employers })
    }

    fn scan(&self, keep: impl Fn(&EmployerEntity) -> bool) -> RepoResult<Vec<EmployerEntity>> {
        let all = self
            .store
            .transaction(|tx| self.employers.enumerate(tx))?;

        Ok(all
            .into_iter()
            .map(|(_, employer)| employer)
            .filter(|employer| keep(employer))
            .collect())
    }
}

impl EmployerRepository for SqliteEmployerRepository {
    fn add_employer(&self, employer: &EmployerEntity) -> RepoResult<()> {
        self.store.transaction(|tx| {
            self.employers
                .add_or_update(tx, employer.employer_id, employer)
        })?;
        Ok(())
    }

    fn update_employer(
        &self,
        employer_id: EmployerId,
        employer: &EmployerEntity,
    ) -> RepoResult<()> {
        self.store.transaction(|tx| {
            let Some(previous) = self.employers.try_get(tx, employer_id)? else {
                debug!("event=employer_update module=repo status=skipped reason=absent id={employer_id}");
                return Ok(());
            };

            // Read and swap share one transaction, so the comparison always holds.
            self.employers
                .try_update(tx, employer_id, employer, &previous)?;
            Ok(())
        })
    }

    fn remove_employer(&self, employer_id: EmployerId) -> RepoResult<()> {
        self.store.transaction(|tx| {
            if self.employers.try_remove(tx, employer_id)?.is_none() {
                debug!("event=employer_remove module=repo status=noop reason=absent id={employer_id}");
            }
            Ok(())
        })
    }

    fn get_all_employer_by_name(&self, search_term: &str) -> RepoResult<Vec<EmployerEntity>> {
        self.scan(|employer| {
            term_contains_any(
                search_term,
                [employer.name.as_str(), employer.last_name.as_str()],
            )
        })
    }

    fn get_employers_by_company(&self, company_id: CompanyId) -> RepoResult<Vec<EmployerEntity>> {
        self.scan(|employer| employer.company_id == company_id)
    }

    fn get_employer(&self, employer_id: EmployerId) -> RepoResult<Option<EmployerEntity>> {
        let employer = self
            .store
            .transaction(|tx| self.employers.try_get(tx, employer_id))?;
        Ok(employer)
    }
}
