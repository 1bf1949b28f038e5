//! Service access seams used by the public controller.
//!
//! # Responsibility
//! - Define the async service contracts the controller is written against.
//! - Provide in-process (`local`) and JSON-over-HTTP (`http`) implementations.
//!
//! # Invariants
//! - No retry, timeout policy or idempotency token is added on top of a call.
//! - Errors carry no taxonomy beyond where they came from.

use async_trait::async_trait;
use company_core::{
    CompanyEntity, CompanyId, EmployerEntity, EmployerId, RepoError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod http;
pub mod local;

pub use http::{HttpCompanyService, HttpEmployerService};
pub use local::{LocalCompanyService, LocalEmployerService};

pub type ServiceResult<T> = Result<T, ServiceCallError>;

/// Failure of a service call, local or remote.
#[derive(Debug)]
pub enum ServiceCallError {
    /// The in-process repository failed.
    Repo(RepoError),
    /// The blocking task running the in-process call panicked or was cancelled.
    Join(tokio::task::JoinError),
    /// The request never produced a usable response.
    Transport(reqwest::Error),
    /// The replica answered with a non-success status.
    Remote { status: u16, message: String },
}

impl Display for ServiceCallError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Join(err) => write!(f, "service task failed: {err}"),
            Self::Transport(err) => write!(f, "service transport failed: {err}"),
            Self::Remote { status, message } => {
                write!(f, "service replied with status {status}: {message}")
            }
        }
    }
}

impl Error for ServiceCallError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Join(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Remote { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceCallError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<tokio::task::JoinError> for ServiceCallError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Join(value)
    }
}

impl From<reqwest::Error> for ServiceCallError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Company service operations reachable from the controller.
#[async_trait]
pub trait CompanyServiceApi: Send + Sync {
    async fn get_company(&self, search_term: &str) -> ServiceResult<Vec<CompanyEntity>>;
    async fn add_company(&self, company: &CompanyEntity) -> ServiceResult<()>;
}

/// Employer service operations reachable from the controller.
#[async_trait]
pub trait EmployerServiceApi: Send + Sync {
    async fn add_employer(&self, employer: &EmployerEntity) -> ServiceResult<()>;
    async fn update_employer(
        &self,
        employer_id: EmployerId,
        employer: &EmployerEntity,
    ) -> ServiceResult<()>;
    async fn remove_employer(&self, employer_id: EmployerId) -> ServiceResult<()>;
    async fn get_all_employer_by_name(
        &self,
        search_term: &str,
    ) -> ServiceResult<Vec<EmployerEntity>>;
    async fn get_employers_by_company(
        &self,
        company_id: CompanyId,
    ) -> ServiceResult<Vec<EmployerEntity>>;
}
