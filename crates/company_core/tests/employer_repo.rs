use chrono::{TimeZone, Utc};
use company_core::{
    EmployerEntity, EmployerRepository, EmployerService, SqliteEmployerRepository, StateStore,
    COMPANY_TABLE, EMPLOYER_TABLE,
};
use uuid::Uuid;

fn employer(company_id: Uuid, name: &str, last_name: &str) -> EmployerEntity {
    let birthday = Utc.with_ymd_and_hms(1988, 3, 30, 0, 0, 0).unwrap();
    EmployerEntity::new(company_id, name, last_name, birthday, "Masculino")
}

fn open() -> (StateStore, SqliteEmployerRepository) {
    let store = StateStore::open_in_memory().unwrap();
    let repo = SqliteEmployerRepository::try_new(store.clone()).unwrap();
    (store, repo)
}

#[test]
fn add_employer_lands_in_employer_table() {
    let (store, repo) = open();
    let rodrigo = employer(Uuid::new_v4(), "rodrigo", "galhardo");
    repo.add_employer(&rodrigo).unwrap();

    let employers = store.get_or_add_table::<EmployerEntity>(EMPLOYER_TABLE).unwrap();
    let companies = store.get_or_add_table::<EmployerEntity>(COMPANY_TABLE).unwrap();
    assert_eq!(store.transaction(|tx| employers.count(tx)).unwrap(), 1);
    assert_eq!(store.transaction(|tx| companies.count(tx)).unwrap(), 0);
    assert_eq!(repo.get_employer(rodrigo.employer_id).unwrap(), Some(rodrigo));
}

#[test]
fn add_employer_accepts_dangling_company_reference() {
    let (_store, repo) = open();
    let orphan = employer(Uuid::new_v4(), "nobody", "knows");
    repo.add_employer(&orphan).unwrap();

    assert_eq!(
        repo.get_employers_by_company(orphan.company_id).unwrap(),
        vec![orphan]
    );
}

#[test]
fn update_existing_employer_replaces_record() {
    let (_store, repo) = open();
    let original = employer(Uuid::new_v4(), "rodrigo", "galhardo");
    repo.add_employer(&original).unwrap();

    let mut replacement = original.clone();
    replacement.last_name = "wayne".to_string();
    replacement.genre = "Outro".to_string();
    repo.update_employer(original.employer_id, &replacement)
        .unwrap();

    assert_eq!(
        repo.get_employer(original.employer_id).unwrap(),
        Some(replacement)
    );
}

#[test]
fn update_missing_employer_is_silently_skipped() {
    let (store, repo) = open();
    let ghost = employer(Uuid::new_v4(), "ghost", "employee");

    repo.update_employer(ghost.employer_id, &ghost).unwrap();

    assert!(repo.get_employer(ghost.employer_id).unwrap().is_none());
    let employers = store.get_or_add_table::<EmployerEntity>(EMPLOYER_TABLE).unwrap();
    assert_eq!(store.transaction(|tx| employers.count(tx)).unwrap(), 0);
}

#[test]
fn remove_existing_employer_deletes_it() {
    let (_store, repo) = open();
    let rodrigo = employer(Uuid::new_v4(), "rodrigo", "galhardo");
    repo.add_employer(&rodrigo).unwrap();

    repo.remove_employer(rodrigo.employer_id).unwrap();

    assert!(repo.get_employer(rodrigo.employer_id).unwrap().is_none());
}

#[test]
fn remove_missing_employer_does_not_fail() {
    let (_store, repo) = open();
    let kept = employer(Uuid::new_v4(), "kept", "around");
    repo.add_employer(&kept).unwrap();

    repo.remove_employer(Uuid::new_v4()).unwrap();
    repo.remove_employer(Uuid::nil()).unwrap();

    assert_eq!(repo.get_employer(kept.employer_id).unwrap(), Some(kept));
}

#[test]
fn name_search_checks_first_and_last_name_inside_term() {
    let (_store, repo) = open();
    let company_id = Uuid::new_v4();
    repo.add_employer(&employer(company_id, "bruce", "wayne"))
        .unwrap();
    repo.add_employer(&employer(company_id, "rodrigo", "galhardo"))
        .unwrap();
    repo.add_employer(&employer(company_id, "clark", "kent"))
        .unwrap();

    let mut found: Vec<String> = repo
        .get_all_employer_by_name("Bruce Galhardo")
        .unwrap()
        .into_iter()
        .map(|employer| employer.name)
        .collect();
    found.sort();

    assert_eq!(found, vec!["bruce".to_string(), "rodrigo".to_string()]);
}

#[test]
fn name_search_is_case_sensitive_on_stored_names() {
    let (_store, repo) = open();
    repo.add_employer(&employer(Uuid::new_v4(), "Bruce", "Wayne"))
        .unwrap();

    assert!(repo.get_all_employer_by_name("Bruce").unwrap().is_empty());
}

#[test]
fn employers_by_company_filters_on_reference() {
    let (_store, repo) = open();
    let acme = Uuid::new_v4();
    let globex = Uuid::new_v4();
    repo.add_employer(&employer(acme, "a", "one")).unwrap();
    repo.add_employer(&employer(acme, "b", "two")).unwrap();
    repo.add_employer(&employer(globex, "c", "three")).unwrap();

    let acme_staff = repo.get_employers_by_company(acme).unwrap();
    assert_eq!(acme_staff.len(), 2);
    assert!(acme_staff.iter().all(|employer| employer.company_id == acme));
}

#[test]
fn service_round_trip_through_repository() {
    let service = EmployerService::open(StateStore::open_in_memory().unwrap()).unwrap();
    let company_id = Uuid::new_v4();
    let mut rodrigo = employer(company_id, "rodrigo", "galhardo");

    service.add_employer(&rodrigo).unwrap();
    rodrigo.name = "rodolpho".to_string();
    service.update_employer(rodrigo.employer_id, &rodrigo).unwrap();
    assert_eq!(
        service.get_all_employer_by_name("rodolpho").unwrap(),
        vec![rodrigo.clone()]
    );

    service.remove_employer(rodrigo.employer_id).unwrap();
    assert!(service.get_employers_by_company(company_id).unwrap().is_empty());
}
