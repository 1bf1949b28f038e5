//! Public JSON request/response contracts.
//!
//! # Responsibility
//! - Keep the published lower-case field names (`companyid`, `socialreason`,
//!   `employerId`, ...) out of the core entity types.
//! - Convert between contracts and entities at the HTTP boundary.
//!
//! # Invariants
//! - `birthday` travels as ISO-8601 UTC.
//! - Request types carry no validation; empty strings are accepted.

use chrono::{DateTime, Utc};
use company_core::{CompanyEntity, CompanyId, EmployerEntity, EmployerId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Company as returned by the search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyGetResponse {
    #[serde(rename = "companyid")]
    pub company_id: CompanyId,
    pub cnpj: String,
    #[serde(rename = "socialreason")]
    pub social_reason: String,
    #[serde(rename = "tradingname")]
    pub trading_name: String,
    /// Present only when employees were eagerly loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employers: Option<Vec<EmployerGetResponse>>,
}

impl CompanyGetResponse {
    /// Builds the expanded shape with the given employees attached.
    pub fn with_employers(company: &CompanyEntity, employers: &[EmployerEntity]) -> Self {
        Self {
            employers: Some(employers.iter().map(EmployerGetResponse::from).collect()),
            ..Self::from(company)
        }
    }
}

impl From<&CompanyEntity> for CompanyGetResponse {
    fn from(company: &CompanyEntity) -> Self {
        Self {
            company_id: company.company_id,
            cnpj: company.cnpj.clone(),
            social_reason: company.social_reason.clone(),
            trading_name: company.trading_name.clone(),
            employers: None,
        }
    }
}

/// Body of `POST /api/company`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyPostRequest {
    /// Optional; a fresh id is assigned when absent or nil.
    #[serde(rename = "companyid", default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub cnpj: String,
    #[serde(rename = "socialreason", default)]
    pub social_reason: String,
    #[serde(rename = "tradingname", default)]
    pub trading_name: String,
}

impl CompanyPostRequest {
    pub fn to_entity(&self) -> CompanyEntity {
        let company_id = self
            .company_id
            .filter(|id| !id.is_nil())
            .unwrap_or_else(Uuid::new_v4);
        CompanyEntity::with_id(
            company_id,
            self.cnpj.clone(),
            self.social_reason.clone(),
            self.trading_name.clone(),
        )
    }
}

/// Employee as returned inside an expanded company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerGetResponse {
    #[serde(rename = "employerId")]
    pub employer_id: EmployerId,
    #[serde(rename = "companyid")]
    pub company_id: CompanyId,
    pub name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub birthday: DateTime<Utc>,
    pub genre: String,
}

impl From<&EmployerEntity> for EmployerGetResponse {
    fn from(employer: &EmployerEntity) -> Self {
        Self {
            employer_id: employer.employer_id,
            company_id: employer.company_id,
            name: employer.name.clone(),
            last_name: employer.last_name.clone(),
            birthday: employer.birthday,
            genre: employer.genre.clone(),
        }
    }
}

/// Body of `POST` and `PUT /api/company/{id}/employee`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerPostRequest {
    #[serde(rename = "employerId", default, skip_serializing_if = "Option::is_none")]
    pub employer_id: Option<EmployerId>,
    #[serde(rename = "companyid", default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "lastname", default)]
    pub last_name: String,
    pub birthday: DateTime<Utc>,
    #[serde(default)]
    pub genre: String,
}

impl EmployerPostRequest {
    /// Builds the entity for a create: a missing employer id is generated.
    pub fn to_new_entity(&self, path_company_id: CompanyId) -> EmployerEntity {
        let employer_id = self
            .employer_id
            .filter(|id| !id.is_nil())
            .unwrap_or_else(Uuid::new_v4);
        self.to_entity(employer_id, path_company_id)
    }

    /// Builds the entity for a replace: a missing employer id stays nil.
    pub fn to_existing_entity(&self, path_company_id: CompanyId) -> EmployerEntity {
        self.to_entity(self.employer_id.unwrap_or_default(), path_company_id)
    }

    fn to_entity(&self, employer_id: EmployerId, path_company_id: CompanyId) -> EmployerEntity {
        EmployerEntity {
            employer_id,
            company_id: self
                .company_id
                .filter(|id| !id.is_nil())
                .unwrap_or(path_company_id),
            name: self.name.clone(),
            last_name: self.last_name.clone(),
            birthday: self.birthday,
            genre: self.genre.clone(),
        }
    }
}

/// Error body for failures that have no request payload to echo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CompanyGetResponse, CompanyPostRequest, EmployerPostRequest};
    use company_core::CompanyEntity;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn company_response_uses_published_field_names() {
        let company = CompanyEntity::new("18720131000109", "Acme limpeza", "acme");
        let value = serde_json::to_value(CompanyGetResponse::from(&company)).unwrap();

        assert_eq!(value["companyid"], json!(company.company_id));
        assert_eq!(value["cnpj"], "18720131000109");
        assert_eq!(value["socialreason"], "Acme limpeza");
        assert_eq!(value["tradingname"], "acme");
        assert!(value.get("employers").is_none());
    }

    #[test]
    fn company_request_without_id_gets_fresh_id() {
        let request: CompanyPostRequest = serde_json::from_value(json!({
            "cnpj": "1",
            "socialreason": "Legal",
            "tradingname": "trade"
        }))
        .unwrap();

        let first = request.to_entity();
        let second = request.to_entity();
        assert!(!first.company_id.is_nil());
        assert_ne!(first.company_id, second.company_id);
    }

    #[test]
    fn company_request_keeps_explicit_id() {
        let id = Uuid::new_v4();
        let request = CompanyPostRequest {
            company_id: Some(id),
            ..CompanyPostRequest::default()
        };
        assert_eq!(request.to_entity().company_id, id);
    }

    #[test]
    fn employer_request_falls_back_to_path_company() {
        let path_company = Uuid::new_v4();
        let request: EmployerPostRequest = serde_json::from_value(json!({
            "name": "Rodrigo",
            "lastname": "Galhardo",
            "birthday": "1988-03-30T00:00:00Z",
            "genre": "Masculino"
        }))
        .unwrap();

        let created = request.to_new_entity(path_company);
        assert_eq!(created.company_id, path_company);
        assert!(!created.employer_id.is_nil());

        let replaced = request.to_existing_entity(path_company);
        assert!(replaced.employer_id.is_nil());
    }

    #[test]
    fn employer_request_prefers_body_company() {
        let body_company = Uuid::new_v4();
        let request: EmployerPostRequest = serde_json::from_value(json!({
            "companyid": body_company,
            "employerId": Uuid::new_v4(),
            "name": "Bruce",
            "lastname": "Wayne",
            "birthday": "1988-02-15T00:00:00Z",
            "genre": "Masculino"
        }))
        .unwrap();

        assert_eq!(request.to_new_entity(Uuid::new_v4()).company_id, body_company);
    }
}
