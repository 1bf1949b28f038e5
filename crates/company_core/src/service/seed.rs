//! Opt-in demo bootstrap.
//!
//! # Responsibility
//! - Write a small, fixed sample data set through the regular services.
//!
//! # Invariants
//! - Every seeded entity has a fixed id, so running the seed again is an
//!   upsert of the same records rather than a duplication.
//! - Nothing in the crate calls this implicitly; orchestration decides.

use crate::model::company::CompanyEntity;
use crate::model::employer::EmployerEntity;
use crate::repo::company_repo::CompanyRepository;
use crate::repo::employer_repo::EmployerRepository;
use crate::repo::RepoResult;
use crate::service::company_service::CompanyService;
use crate::service::employer_service::EmployerService;
use chrono::{TimeZone, Utc};
use log::info;
use uuid::Uuid;

/// Fixed id of the seeded demo company.
pub const DEMO_COMPANY_ID: Uuid = Uuid::from_u128(0x5eed_0000_0000_4000_8000_0000_0000_0001);

/// Counts of records written by one seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub companies: usize,
    pub employers: usize,
}

/// Returns the demo company record.
pub fn demo_company() -> CompanyEntity {
    CompanyEntity::with_id(
        DEMO_COMPANY_ID,
        "18720131000109",
        "Acme produtos de limpeza do curinga.",
        "acme",
    )
}

/// Returns the demo employees, all referencing `DEMO_COMPANY_ID`.
pub fn demo_employers() -> Vec<EmployerEntity> {
    [
        (0x11_u128, "Rodrigo", "Galhardo", (1988, 3, 30)),
        (0x12, "Rodolpho", "Galhardo", (1988, 2, 15)),
        (0x13, "Bruce Ro", "Wayne", (1988, 2, 15)),
    ]
    .into_iter()
    .filter_map(|(suffix, name, last_name, (year, month, day))| {
        let birthday = Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()?;
        Some(EmployerEntity {
            employer_id: Uuid::from_u128(0x5eed_0000_0000_4000_8000_0000_0000_0000 | suffix),
            company_id: DEMO_COMPANY_ID,
            name: name.to_string(),
            last_name: last_name.to_string(),
            birthday,
            genre: "Masculino".to_string(),
        })
    })
    .collect()
}

/// Writes the demo data set through both services.
pub fn seed_demo_data<C, E>(
    companies: &CompanyService<C>,
    employers: &EmployerService<E>,
) -> RepoResult<SeedReport>
where
    C: CompanyRepository,
    E: EmployerRepository,
{
    companies.add_company(&demo_company())?;

    let demo = demo_employers();
    for employer in &demo {
        employers.add_employer(employer)?;
    }

    let report = SeedReport {
        companies: 1,
        employers: demo.len(),
    };
    info!(
        "event=seed module=service status=ok companies={} employers={}",
        report.companies, report.employers
    );
    Ok(report)
}
