//! Company repository contract and state-store implementation.
//!
//! # Invariants
//! - Writes are upserts keyed by `company_id`; no tax-id duplicate check.
//! - Stored records never embed the employer collection.
//! - There is no delete operation for companies.

use crate::db::{StateStore, Table};
use crate::model::company::CompanyEntity;
use crate::repo::RepoResult;
use crate::search::term::term_contains;

/// Name of the logical table holding companies.
pub const COMPANY_TABLE: &str = "companies";

/// Repository interface for company operations.
pub trait CompanyRepository {
    /// Scans all companies and keeps those matched by `search_term` against
    /// the trading name (see `search::term` for the matching direction).
    fn get_company(&self, search_term: &str) -> RepoResult<Vec<CompanyEntity>>;
    /// Inserts or replaces the company under its id.
    fn add_company(&self, company: &CompanyEntity) -> RepoResult<()>;
}

/// Company repository backed by the replica state store.
#[derive(Debug, Clone)]
pub struct SqliteCompanyRepository {
    store: StateStore,
    companies: Table<CompanyEntity>,
}

impl SqliteCompanyRepository {
    /// Resolves the company table on `store` once for this repository.
    pub fn try_new(store: StateStore) -> RepoResult<Self> {
        let companies = store.get_or_add_table(COMPANY_TABLE)?;
        Ok(Self { store, companies })
    }
}

impl CompanyRepository for SqliteCompanyRepository {
    fn get_company(&self, search_term: &str) -> RepoResult<Vec<CompanyEntity>> {
        let all = self
            .store
            .transaction(|tx| self.companies.enumerate(tx))?;

        Ok(all
            .into_iter()
            .map(|(_, company)| company)
            .filter(|company| term_contains(search_term, &company.trading_name))
            .collect())
    }

    fn add_company(&self, company: &CompanyEntity) -> RepoResult<()> {
        let stored = company.detached();
        self.store
            .transaction(|tx| self.companies.add_or_update(tx, stored.company_id, &stored))?;
        Ok(())
    }
}
