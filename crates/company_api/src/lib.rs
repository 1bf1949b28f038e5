//! HTTP surfaces of the company registry.
//!
//! # Responsibility
//! - Serve the public REST controller (`controller`).
//! - Serve stateful services to the network as replicas (`replica`).
//! - Reach services in-process or through HTTP proxies (`remote`).

pub mod contracts;
pub mod controller;
pub mod remote;
pub mod replica;
pub mod rpc;

pub use controller::{create_router, AppState};
pub use remote::{
    CompanyServiceApi, EmployerServiceApi, HttpCompanyService, HttpEmployerService,
    LocalCompanyService, LocalEmployerService, ServiceCallError, ServiceResult,
};
pub use replica::{company_replica_router, employer_replica_router};
