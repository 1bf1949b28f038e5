//! Employer (employee) domain model.

use crate::model::company::{CompanyEntity, CompanyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type EmployerId = Uuid;

/// A person employed by a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerEntity {
    pub employer_id: EmployerId,
    /// Owning company. Dangling references are accepted.
    pub company_id: CompanyId,
    pub name: String,
    pub last_name: String,
    pub birthday: DateTime<Utc>,
    /// Free-text gender category.
    pub genre: String,
}

impl EmployerEntity {
    /// Creates an employer with a generated id.
    pub fn new(
        company_id: CompanyId,
        name: impl Into<String>,
        last_name: impl Into<String>,
        birthday: DateTime<Utc>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            employer_id: Uuid::new_v4(),
            company_id,
            name: name.into(),
            last_name: last_name.into(),
            birthday,
            genre: genre.into(),
        }
    }

    /// Whether this employer points back at `company`.
    pub fn belongs_to(&self, company: &CompanyEntity) -> bool {
        self.company_id == company.company_id
    }
}
