//! JSON-over-HTTP service clients targeting a replica listener.
//!
//! # Invariants
//! - One request per call; no retry on transport failure.
//! - A non-2xx reply becomes `ServiceCallError::Remote` with the replica's
//!   error message when it sent one.

use super::{CompanyServiceApi, EmployerServiceApi, ServiceCallError, ServiceResult};
use crate::rpc::{
    self, Ack, CompanyIdRequest, EmployerIdRequest, RpcError, SearchRequest,
    UpdateEmployerRequest,
};
use async_trait::async_trait;
use company_core::{CompanyEntity, CompanyId, EmployerEntity, EmployerId};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone)]
struct RpcClient {
    client: reqwest::Client,
    base_url: String,
}

impl RpcClient {
    fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    async fn call<B, T>(&self, path: &str, body: &B) -> ServiceResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("event=rpc_call module=remote status=start url={url}");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<RpcError>().await {
                Ok(body) => body.error,
                Err(_) => status.to_string(),
            };
            debug!(
                "event=rpc_call module=remote status=error url={url} http_status={}",
                status.as_u16()
            );
            return Err(ServiceCallError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

/// Company service proxy talking to a company replica.
#[derive(Debug, Clone)]
pub struct HttpCompanyService {
    rpc: RpcClient,
}

impl HttpCompanyService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuses an existing connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            rpc: RpcClient::new(client, base_url),
        }
    }
}

#[async_trait]
impl CompanyServiceApi for HttpCompanyService {
    async fn get_company(&self, search_term: &str) -> ServiceResult<Vec<CompanyEntity>> {
        let request = SearchRequest {
            search_term: search_term.to_string(),
        };
        self.rpc.call(rpc::COMPANY_GET, &request).await
    }

    async fn add_company(&self, company: &CompanyEntity) -> ServiceResult<()> {
        let _: Ack = self.rpc.call(rpc::COMPANY_ADD, company).await?;
        Ok(())
    }
}

/// Employer service proxy talking to an employer replica.
#[derive(Debug, Clone)]
pub struct HttpEmployerService {
    rpc: RpcClient,
}

impl HttpEmployerService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuses an existing connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            rpc: RpcClient::new(client, base_url),
        }
    }
}

#[async_trait]
impl EmployerServiceApi for HttpEmployerService {
    async fn add_employer(&self, employer: &EmployerEntity) -> ServiceResult<()> {
        let _: Ack = self.rpc.call(rpc::EMPLOYER_ADD, employer).await?;
        Ok(())
    }

    async fn update_employer(
        &self,
        employer_id: EmployerId,
        employer: &EmployerEntity,
    ) -> ServiceResult<()> {
        let request = UpdateEmployerRequest {
            employer_id,
            employer: employer.clone(),
        };
        let _: Ack = self.rpc.call(rpc::EMPLOYER_UPDATE, &request).await?;
        Ok(())
    }

    async fn remove_employer(&self, employer_id: EmployerId) -> ServiceResult<()> {
        let request = EmployerIdRequest { employer_id };
        let _: Ack = self.rpc.call(rpc::EMPLOYER_REMOVE, &request).await?;
        Ok(())
    }

    async fn get_all_employer_by_name(
        &self,
        search_term: &str,
    ) -> ServiceResult<Vec<EmployerEntity>> {
        let request = SearchRequest {
            search_term: search_term.to_string(),
        };
        self.rpc.call(rpc::EMPLOYER_BY_NAME, &request).await
    }

    async fn get_employers_by_company(
        &self,
        company_id: CompanyId,
    ) -> ServiceResult<Vec<EmployerEntity>> {
        let request = CompanyIdRequest { company_id };
        self.rpc.call(rpc::EMPLOYER_BY_COMPANY, &request).await
    }
}
