//! Public REST controller for companies and employees.
//!
//! # Responsibility
//! - Translate `/api/company` requests into service calls.
//! - Reshape entities into the published JSON contracts.
//!
//! # Invariants
//! - Every service failure becomes `400`; there is no error taxonomy.
//! - "Not found" exists only for search endpoints, as an empty result.
//! - Routes at the same depth share the `:id` parameter name; its meaning
//!   depends on the route (search term or company id).

use crate::contracts::{
    CompanyGetResponse, CompanyPostRequest, EmployerGetResponse, EmployerPostRequest,
    ErrorResponse,
};
use crate::remote::{
    CompanyServiceApi, EmployerServiceApi, HttpCompanyService, HttpEmployerService,
    LocalCompanyService, LocalEmployerService, ServiceCallError,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use company_core::{RepoResult, StateStore};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Services the controller delegates to.
#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<dyn CompanyServiceApi>,
    pub employers: Arc<dyn EmployerServiceApi>,
}

impl AppState {
    pub fn new(
        companies: Arc<dyn CompanyServiceApi>,
        employers: Arc<dyn EmployerServiceApi>,
    ) -> Self {
        Self {
            companies,
            employers,
        }
    }

    /// Hosts both services in this process on one state store.
    pub fn in_process(store: StateStore) -> RepoResult<Self> {
        let companies = LocalCompanyService::open(store.clone())?;
        let employers = LocalEmployerService::open(store)?;
        Ok(Self::new(Arc::new(companies), Arc::new(employers)))
    }

    /// Proxies both services to remote replicas.
    pub fn gateway(company_url: &str, employer_url: &str) -> Self {
        let client = reqwest::Client::new();
        Self::new(
            Arc::new(HttpCompanyService::with_client(client.clone(), company_url)),
            Arc::new(HttpEmployerService::with_client(client, employer_url)),
        )
    }
}

/// Query string of `GET /api/company/allemployers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllEmployersQuery {
    #[serde(rename = "socialReason", default)]
    pub social_reason: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Builds the public router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/company", post(handle_post_company))
        .route("/api/company/allemployers", get(handle_get_employers))
        .route("/api/company/:id", get(handle_get_company))
        .route(
            "/api/company/:id/employee",
            post(handle_post_employer).put(handle_put_employer),
        )
        .route("/api/company/:id/employer", delete(handle_delete_employer))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    info!(
        "event=http_request module=api method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: company_core::core_version().to_string(),
    })
}

/// `GET /api/company/{socialReason}`
///
/// # HTTP contract
/// - `200` with the matching companies (without employees).
/// - `404` when nothing matches.
/// - `400 {"error"}` when the service call fails.
async fn handle_get_company(
    State(state): State<AppState>,
    Path(social_reason): Path<String>,
) -> Response {
    match state.companies.get_company(&social_reason).await {
        Ok(companies) if companies.is_empty() => StatusCode::NOT_FOUND.into_response(),
        Ok(companies) => Json(
            companies
                .iter()
                .map(CompanyGetResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(err) => bad_request(err),
    }
}

/// `GET /api/company/allemployers?socialReason=`
///
/// # HTTP contract
/// - `200` with matching companies, each with its employees loaded.
/// - `404` when no company matches.
/// - `400 {"error"}` when either service call fails.
async fn handle_get_employers(
    State(state): State<AppState>,
    Query(query): Query<AllEmployersQuery>,
) -> Response {
    let companies = match state.companies.get_company(&query.social_reason).await {
        Ok(companies) if companies.is_empty() => return StatusCode::NOT_FOUND.into_response(),
        Ok(companies) => companies,
        Err(err) => return bad_request(err),
    };

    let mut expanded = Vec::with_capacity(companies.len());
    for company in &companies {
        match state
            .employers
            .get_employers_by_company(company.company_id)
            .await
        {
            Ok(mut employers) => {
                // A remote service may answer with records of other companies.
                employers.retain(|employer| employer.belongs_to(company));
                expanded.push(CompanyGetResponse::with_employers(company, &employers));
            }
            Err(err) => return bad_request(err),
        }
    }

    Json(expanded).into_response()
}

/// `POST /api/company`
///
/// # HTTP contract
/// - `200` with the stored company; an existing id is replaced.
/// - `400` echoing the request when the service call fails.
/// - `400 {"error"}` when the body is not a company request.
async fn handle_post_company(
    State(state): State<AppState>,
    payload: Result<Json<CompanyPostRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return unreadable_body(rejection),
    };

    let company = request.to_entity();
    match state.companies.add_company(&company).await {
        Ok(()) => Json(CompanyGetResponse::from(&company)).into_response(),
        Err(err) => echo_request(err, &request),
    }
}

/// `POST /api/company/{id}/employee`
///
/// # HTTP contract
/// - `200` with the stored employee; an existing employee id is replaced.
/// - The path id is the company reference when the body has none.
/// - `400` echoing the request when the service call fails.
async fn handle_post_employer(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    payload: Result<Json<EmployerPostRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return unreadable_body(rejection),
    };

    let employer = request.to_new_entity(company_id);
    match state.employers.add_employer(&employer).await {
        Ok(()) => Json(EmployerGetResponse::from(&employer)).into_response(),
        Err(err) => echo_request(err, &request),
    }
}

/// `PUT /api/company/{id}/employee`
///
/// # HTTP contract
/// - `200` whether or not the employee existed; a missing one is not created.
/// - `400` echoing the request when the service call fails.
async fn handle_put_employer(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    payload: Result<Json<EmployerPostRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return unreadable_body(rejection),
    };

    let employer = request.to_existing_entity(company_id);
    match state
        .employers
        .update_employer(employer.employer_id, &employer)
        .await
    {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => echo_request(err, &request),
    }
}

/// `DELETE /api/company/{id}/employer`
///
/// # HTTP contract
/// - Always `200` unless the service call itself fails.
/// - The guard is inverted: a non-nil id returns before any delete is
///   issued, and only the nil id reaches the service. This matches the
///   published behavior and is most likely a defect; it stays until the
///   intended check ("require a non-empty id") is confirmed.
async fn handle_delete_employer(
    State(state): State<AppState>,
    Path(employer_id): Path<Uuid>,
) -> Response {
    if !employer_id.is_nil() {
        warn!("event=employer_remove module=api status=skipped reason=inverted_guard id={employer_id}");
        return StatusCode::OK.into_response();
    }

    match state.employers.remove_employer(employer_id).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => bad_request(err),
    }
}

fn bad_request(err: ServiceCallError) -> Response {
    warn!("event=api_call module=api status=error error={err}");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(err.to_string())),
    )
        .into_response()
}

fn echo_request<T: Serialize>(err: ServiceCallError, request: &T) -> Response {
    warn!("event=api_call module=api status=error error={err}");
    (StatusCode::BAD_REQUEST, Json(request)).into_response()
}

fn unreadable_body(rejection: JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(rejection.body_text())),
    )
        .into_response()
}
