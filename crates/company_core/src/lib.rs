//! Core domain logic for the company registry.
//! Entities, the transactional state store, repositories and services.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use db::{DbError, DbResult, StateStore, StoreTransaction, Table};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::company::{CompanyEntity, CompanyId};
pub use model::employer::{EmployerEntity, EmployerId};
pub use repo::company_repo::{CompanyRepository, SqliteCompanyRepository, COMPANY_TABLE};
pub use repo::employer_repo::{EmployerRepository, SqliteEmployerRepository, EMPLOYER_TABLE};
pub use repo::{RepoError, RepoResult};
pub use service::company_service::CompanyService;
pub use service::employer_service::EmployerService;
pub use service::seed::{seed_demo_data, SeedReport, DEMO_COMPANY_ID};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
