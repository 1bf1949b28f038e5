//! Gateway tests: the public controller proxies to company and employer
//! replicas over JSON-over-HTTP RPC.

use std::sync::Arc;

use axum::Router;
use chrono::{TimeZone, Utc};
use company_api::contracts::CompanyGetResponse;
use company_api::{
    company_replica_router, create_router, employer_replica_router, AppState, CompanyServiceApi,
    EmployerServiceApi, HttpCompanyService, HttpEmployerService, LocalCompanyService,
    LocalEmployerService, ServiceCallError,
};
use company_core::{CompanyEntity, EmployerEntity, StateStore};
use reqwest::StatusCode;
use serde_json::json;
use tempfile::TempDir;
use tokio::net::TcpListener;
use uuid::Uuid;

async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_replicas(store: StateStore) -> (String, String) {
    let companies = Arc::new(LocalCompanyService::open(store.clone()).unwrap());
    let employers = Arc::new(LocalEmployerService::open(store).unwrap());
    let company_url = spawn(company_replica_router(companies)).await;
    let employer_url = spawn(employer_replica_router(employers)).await;
    (company_url, employer_url)
}

fn birthday() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(1988, 3, 30, 0, 0, 0).unwrap()
}

#[tokio::test]
async fn replica_health_answers_empty_ack() {
    let (company_url, employer_url) = spawn_replicas(StateStore::open_in_memory().unwrap()).await;
    for url in [company_url, employer_url] {
        let response = reqwest::get(format!("{url}/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.json::<serde_json::Value>().await.unwrap(), json!({}));
    }
}

#[tokio::test]
async fn http_proxies_round_trip_through_replicas() {
    let (company_url, employer_url) = spawn_replicas(StateStore::open_in_memory().unwrap()).await;
    let companies = HttpCompanyService::new(company_url);
    let employers = HttpEmployerService::new(employer_url);

    let company = CompanyEntity::new("18720131000109", "Acme limpeza", "acme");
    companies.add_company(&company).await.unwrap();
    assert_eq!(
        companies.get_company("Acme S.A").await.unwrap(),
        vec![company.clone()]
    );

    let employer = EmployerEntity::new(company.company_id, "bruce", "wayne", birthday(), "Masculino");
    employers.add_employer(&employer).await.unwrap();

    let mut renamed = employer.clone();
    renamed.last_name = "galhardo".to_string();
    employers
        .update_employer(employer.employer_id, &renamed)
        .await
        .unwrap();
    assert_eq!(
        employers.get_all_employer_by_name("Bruce").await.unwrap(),
        vec![renamed.clone()]
    );
    assert_eq!(
        employers
            .get_employers_by_company(company.company_id)
            .await
            .unwrap(),
        vec![renamed]
    );

    employers.remove_employer(employer.employer_id).await.unwrap();
    employers.remove_employer(employer.employer_id).await.unwrap();
    assert!(employers
        .get_employers_by_company(company.company_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn unreachable_replica_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let companies = HttpCompanyService::new(format!("http://{addr}"));
    let err = companies.get_company("acme").await.unwrap_err();
    assert!(matches!(err, ServiceCallError::Transport(_)));
}

#[tokio::test]
async fn unknown_rpc_path_is_a_remote_error() {
    let (company_url, _) = spawn_replicas(StateStore::open_in_memory().unwrap()).await;
    // The company replica does not host employer routes.
    let employers = HttpEmployerService::new(company_url);

    let err = employers
        .remove_employer(Uuid::new_v4())
        .await
        .unwrap_err();
    match err {
        ServiceCallError::Remote { status, .. } => assert_eq!(status, 404),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn gateway_serves_public_api_from_replicas() {
    let (company_url, employer_url) = spawn_replicas(StateStore::open_in_memory().unwrap()).await;
    let base = spawn(create_router(AppState::gateway(&company_url, &employer_url))).await;
    let client = reqwest::Client::new();

    let created: CompanyGetResponse = client
        .post(format!("{base}/api/company"))
        .json(&json!({"cnpj": "18720131000109", "socialreason": "Acme", "tradingname": "acme"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = client
        .post(format!("{base}/api/company/{}/employee", created.company_id))
        .json(&json!({
            "name": "rodrigo",
            "lastname": "galhardo",
            "birthday": "1988-03-30T00:00:00Z",
            "genre": "Masculino"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let expanded: Vec<CompanyGetResponse> = client
        .get(format!("{base}/api/company/allemployers?socialReason=Acme%20S.A"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(expanded.len(), 1);
    assert_eq!(expanded[0].company_id, created.company_id);
    let employers = expanded[0].employers.as_ref().unwrap();
    assert_eq!(employers.len(), 1);
    assert_eq!(employers[0].name, "rodrigo");
}

#[tokio::test]
async fn gateway_with_dead_replica_answers_bad_request() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let base = spawn(create_router(AppState::gateway(&dead, &dead))).await;
    let response = reqwest::get(format!("{base}/api/company/acme")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn replicas_share_a_file_backed_store_across_restarts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("registry.sqlite3");

    let company = CompanyEntity::new("1", "Globex", "globex");
    {
        let (company_url, _) = spawn_replicas(StateStore::open(&path).unwrap()).await;
        HttpCompanyService::new(company_url)
            .add_company(&company)
            .await
            .unwrap();
    }

    let (company_url, _) = spawn_replicas(StateStore::open(&path).unwrap()).await;
    let found = HttpCompanyService::new(company_url)
        .get_company("globex corp")
        .await
        .unwrap();
    assert_eq!(found, vec![company]);
}
