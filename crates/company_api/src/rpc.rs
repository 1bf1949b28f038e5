//! Wire messages shared by the replica listener and the HTTP clients.
//!
//! Every RPC is a `POST` with a JSON body; unit results are encoded as `{}`.

use company_core::{CompanyId, EmployerEntity, EmployerId};
use serde::{Deserialize, Serialize};

pub const COMPANY_GET: &str = "/rpc/company/get_company";
pub const COMPANY_ADD: &str = "/rpc/company/add_company";
pub const EMPLOYER_ADD: &str = "/rpc/employer/add_employer";
pub const EMPLOYER_UPDATE: &str = "/rpc/employer/update_employer";
pub const EMPLOYER_REMOVE: &str = "/rpc/employer/remove_employer";
pub const EMPLOYER_BY_NAME: &str = "/rpc/employer/get_all_employer_by_name";
pub const EMPLOYER_BY_COMPANY: &str = "/rpc/employer/get_employers_by_company";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub search_term: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployerRequest {
    pub employer_id: EmployerId,
    pub employer: EmployerEntity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerIdRequest {
    pub employer_id: EmployerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyIdRequest {
    pub company_id: CompanyId,
}

/// Empty success body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {}

/// Failure body returned by a replica.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    pub error: String,
}
