//! `company` binary entry point.
//!
//! # Responsibility
//! - Parse flags, initialize logging, and open the state store.
//! - Run one of the deployments: in-process server, replica, or gateway.

mod cli;

use clap::Parser;
use cli::{Cli, Command, ReplicaKind};
use company_api::{
    company_replica_router, create_router, employer_replica_router, AppState, LocalCompanyService,
    LocalEmployerService,
};
use company_core::{
    default_log_level, init_logging, seed_demo_data, CompanyService, DbResult, EmployerService,
    StateStore,
};
use log::info;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

type CliResult = Result<(), Box<dyn Error>>;

#[tokio::main]
async fn main() -> CliResult {
    let cli = Cli::parse();
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, cli.log_dir.as_deref())?;

    match cli.command {
        Command::Serve {
            bind,
            db_path,
            seed,
        } => {
            let store = open_store(db_path.as_deref())?;
            if seed {
                seed_store(store.clone())?;
            }
            serve(&bind, create_router(AppState::in_process(store)?)).await
        }
        Command::Replica {
            service,
            bind,
            db_path,
        } => {
            let store = open_store(db_path.as_deref())?;
            let router = match service {
                ReplicaKind::Company => {
                    company_replica_router(Arc::new(LocalCompanyService::open(store)?))
                }
                ReplicaKind::Employer => {
                    employer_replica_router(Arc::new(LocalEmployerService::open(store)?))
                }
            };
            serve(&bind, router).await
        }
        Command::Gateway {
            bind,
            company_url,
            employer_url,
        } => serve(&bind, create_router(AppState::gateway(&company_url, &employer_url))).await,
        Command::Seed { db_path } => {
            seed_store(StateStore::open(&db_path)?)?;
            println!("seeded {}", db_path.display());
            Ok(())
        }
    }
}

fn open_store(db_path: Option<&Path>) -> DbResult<StateStore> {
    match db_path {
        Some(path) => StateStore::open(path),
        None => StateStore::open_in_memory(),
    }
}

fn seed_store(store: StateStore) -> CliResult {
    let companies = CompanyService::open(store.clone())?;
    let employers = EmployerService::open(store)?;
    let report = seed_demo_data(&companies, &employers)?;
    info!(
        "event=seed module=cli status=ok companies={} employers={}",
        report.companies, report.employers
    );
    Ok(())
}

async fn serve(bind: &str, router: axum::Router) -> CliResult {
    let listener = TcpListener::bind(bind).await?;
    info!(
        "event=listen module=cli status=ok addr={}",
        listener.local_addr()?
    );
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=app_stop module=cli status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("event=shutdown_signal module=cli status=error error={err}");
    }
}
