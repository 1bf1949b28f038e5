//! Company domain model.
//!
//! # Invariants
//! - `company_id` is unique across the company table.
//! - `cnpj` is expected to be unique but is never checked.
//! - The persisted record does not embed `employers`; the collection is
//!   filled on demand from the employer table.

use crate::model::employer::EmployerEntity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CompanyId = Uuid;

/// A registered company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyEntity {
    pub company_id: CompanyId,
    /// Tax identifier (CNPJ).
    pub cnpj: String,
    /// Legal name.
    pub social_reason: String,
    pub trading_name: String,
    /// Employees owned by this company. Empty unless eagerly loaded.
    #[serde(default)]
    pub employers: Vec<EmployerEntity>,
}

impl CompanyEntity {
    /// Creates a company with a generated id and no loaded employees.
    pub fn new(
        cnpj: impl Into<String>,
        social_reason: impl Into<String>,
        trading_name: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), cnpj, social_reason, trading_name)
    }

    /// Creates a company with a caller-provided id.
    pub fn with_id(
        company_id: CompanyId,
        cnpj: impl Into<String>,
        social_reason: impl Into<String>,
        trading_name: impl Into<String>,
    ) -> Self {
        Self {
            company_id,
            cnpj: cnpj.into(),
            social_reason: social_reason.into(),
            trading_name: trading_name.into(),
            employers: Vec::new(),
        }
    }

    /// Returns a copy without the employee collection, as stored.
    pub fn detached(&self) -> Self {
        Self {
            employers: Vec::new(),
            ..self.clone()
        }
    }
}
