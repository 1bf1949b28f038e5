//! In-process service access: the core services driven on tokio's blocking
//! pool.
//!
//! # Invariants
//! - Store work never runs on a runtime worker; a held connection lock or a
//!   busy SQLite file parks a blocking thread instead.

use super::{CompanyServiceApi, EmployerServiceApi, ServiceResult};
use async_trait::async_trait;
use company_core::{
    CompanyEntity, CompanyId, CompanyRepository, CompanyService, EmployerEntity, EmployerId,
    EmployerRepository, EmployerService, RepoResult, SqliteCompanyRepository,
    SqliteEmployerRepository, StateStore,
};
use std::sync::Arc;

async fn run_blocking<S, T, F>(service: &Arc<S>, work: F) -> ServiceResult<T>
where
    S: Send + Sync + 'static,
    T: Send + 'static,
    F: FnOnce(&S) -> RepoResult<T> + Send + 'static,
{
    let service = Arc::clone(service);
    Ok(tokio::task::spawn_blocking(move || work(&service)).await??)
}

/// Company service hosted in this process.
#[derive(Debug)]
pub struct LocalCompanyService<R: CompanyRepository> {
    service: Arc<CompanyService<R>>,
}

impl LocalCompanyService<SqliteCompanyRepository> {
    pub fn open(store: StateStore) -> RepoResult<Self> {
        Ok(Self::new(CompanyService::open(store)?))
    }
}

impl<R: CompanyRepository> LocalCompanyService<R> {
    pub fn new(service: CompanyService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl<R: CompanyRepository> Clone for LocalCompanyService<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

#[async_trait]
impl<R> CompanyServiceApi for LocalCompanyService<R>
where
    R: CompanyRepository + Send + Sync + 'static,
{
    async fn get_company(&self, search_term: &str) -> ServiceResult<Vec<CompanyEntity>> {
        let search_term = search_term.to_string();
        run_blocking(&self.service, move |service| {
            service.get_company(&search_term)
        })
        .await
    }

    async fn add_company(&self, company: &CompanyEntity) -> ServiceResult<()> {
        let company = company.clone();
        run_blocking(&self.service, move |service| service.add_company(&company)).await
    }
}

/// Employer service hosted in this process.
#[derive(Debug)]
pub struct LocalEmployerService<R: EmployerRepository> {
    service: Arc<EmployerService<R>>,
}

impl LocalEmployerService<SqliteEmployerRepository> {
    pub fn open(store: StateStore) -> RepoResult<Self> {
        Ok(Self::new(EmployerService::open(store)?))
    }
}

impl<R: EmployerRepository> LocalEmployerService<R> {
    pub fn new(service: EmployerService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

impl<R: EmployerRepository> Clone for LocalEmployerService<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

#[async_trait]
impl<R> EmployerServiceApi for LocalEmployerService<R>
where
    R: EmployerRepository + Send + Sync + 'static,
{
    async fn add_employer(&self, employer: &EmployerEntity) -> ServiceResult<()> {
        let employer = employer.clone();
        run_blocking(&self.service, move |service| service.add_employer(&employer)).await
    }

    async fn update_employer(
        &self,
        employer_id: EmployerId,
        employer: &EmployerEntity,
    ) -> ServiceResult<()> {
        let employer = employer.clone();
        run_blocking(&self.service, move |service| {
            service.update_employer(employer_id, &employer)
        })
        .await
    }

    async fn remove_employer(&self, employer_id: EmployerId) -> ServiceResult<()> {
        run_blocking(&self.service, move |service| {
            service.remove_employer(employer_id)
        })
        .await
    }

    async fn get_all_employer_by_name(
        &self,
        search_term: &str,
    ) -> ServiceResult<Vec<EmployerEntity>> {
        let search_term = search_term.to_string();
        run_blocking(&self.service, move |service| {
            service.get_all_employer_by_name(&search_term)
        })
        .await
    }

    async fn get_employers_by_company(
        &self,
        company_id: CompanyId,
    ) -> ServiceResult<Vec<EmployerEntity>> {
        run_blocking(&self.service, move |service| {
            service.get_employers_by_company(company_id)
        })
        .await
    }
}
