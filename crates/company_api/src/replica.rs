//! Replica listener: exposes one stateful service over JSON-over-HTTP RPC.
//!
//! # Responsibility
//! - Route `/rpc/company/*` or `/rpc/employer/*` calls to the hosted service.
//! - Encode service failures as `500 {"error": ...}` for the calling proxy.
//!
//! # Invariants
//! - A replica hosts exactly one service instance for its whole lifetime.

use crate::remote::{CompanyServiceApi, EmployerServiceApi, ServiceCallError};
use crate::rpc::{
    self, Ack, CompanyIdRequest, EmployerIdRequest, RpcError, SearchRequest,
    UpdateEmployerRequest,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use company_core::{CompanyEntity, EmployerEntity};
use log::error;
use std::sync::Arc;

pub type SharedCompanyService = Arc<dyn CompanyServiceApi>;
pub type SharedEmployerService = Arc<dyn EmployerServiceApi>;

/// Service failure rendered for the calling proxy.
#[derive(Debug)]
pub struct RpcFailure(ServiceCallError);

impl From<ServiceCallError> for RpcFailure {
    fn from(value: ServiceCallError) -> Self {
        Self(value)
    }
}

impl IntoResponse for RpcFailure {
    fn into_response(self) -> Response {
        error!("event=rpc_serve module=replica status=error error={}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RpcError {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

type RpcResult<T> = Result<Json<T>, RpcFailure>;

/// Router hosting the company service.
pub fn company_replica_router(service: SharedCompanyService) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(rpc::COMPANY_GET, post(handle_get_company))
        .route(rpc::COMPANY_ADD, post(handle_add_company))
        .with_state(service)
}

/// Router hosting the employer service.
pub fn employer_replica_router(service: SharedEmployerService) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(rpc::EMPLOYER_ADD, post(handle_add_employer))
        .route(rpc::EMPLOYER_UPDATE, post(handle_update_employer))
        .route(rpc::EMPLOYER_REMOVE, post(handle_remove_employer))
        .route(rpc::EMPLOYER_BY_NAME, post(handle_employers_by_name))
        .route(rpc::EMPLOYER_BY_COMPANY, post(handle_employers_by_company))
        .with_state(service)
}

async fn handle_health() -> Json<Ack> {
    Json(Ack {})
}

async fn handle_get_company(
    State(service): State<SharedCompanyService>,
    Json(request): Json<SearchRequest>,
) -> RpcResult<Vec<CompanyEntity>> {
    Ok(Json(service.get_company(&request.search_term).await?))
}

async fn handle_add_company(
    State(service): State<SharedCompanyService>,
    Json(company): Json<CompanyEntity>,
) -> RpcResult<Ack> {
    service.add_company(&company).await?;
    Ok(Json(Ack {}))
}

async fn handle_add_employer(
    State(service): State<SharedEmployerService>,
    Json(employer): Json<EmployerEntity>,
) -> RpcResult<Ack> {
    service.add_employer(&employer).await?;
    Ok(Json(Ack {}))
}

async fn handle_update_employer(
    State(service): State<SharedEmployerService>,
    Json(request): Json<UpdateEmployerRequest>,
) -> RpcResult<Ack> {
    service
        .update_employer(request.employer_id, &request.employer)
        .await?;
    Ok(Json(Ack {}))
}

async fn handle_remove_employer(
    State(service): State<SharedEmployerService>,
    Json(request): Json<EmployerIdRequest>,
) -> RpcResult<Ack> {
    service.remove_employer(request.employer_id).await?;
    Ok(Json(Ack {}))
}

async fn handle_employers_by_name(
    State(service): State<SharedEmployerService>,
    Json(request): Json<SearchRequest>,
) -> RpcResult<Vec<EmployerEntity>> {
    Ok(Json(
        service
            .get_all_employer_by_name(&request.search_term)
            .await?,
    ))
}

async fn handle_employers_by_company(
    State(service): State<SharedEmployerService>,
    Json(request): Json<CompanyIdRequest>,
) -> RpcResult<Vec<EmployerEntity>> {
    Ok(Json(
        service
            .get_employers_by_company(request.company_id)
            .await?,
    ))
}
