use company_core::{
    CompanyEntity, CompanyRepository, CompanyService, SqliteCompanyRepository, StateStore,
    COMPANY_TABLE,
};

fn repo() -> SqliteCompanyRepository {
    let store = StateStore::open_in_memory().unwrap();
    SqliteCompanyRepository::try_new(store).unwrap()
}

#[test]
fn search_matches_trading_names_contained_in_the_term() {
    let repo = repo();
    let acme = CompanyEntity::new("1", "Acme limpeza", "acme");
    let full = CompanyEntity::new("2", "Acme full", "acme s.a");
    let other = CompanyEntity::new("3", "Other", "acme s.a holdings");
    repo.add_company(&acme).unwrap();
    repo.add_company(&full).unwrap();
    repo.add_company(&other).unwrap();

    let mut found: Vec<String> = repo
        .get_company("Acme S.A")
        .unwrap()
        .into_iter()
        .map(|company| company.trading_name)
        .collect();
    found.sort();

    assert_eq!(found, vec!["acme".to_string(), "acme s.a".to_string()]);
}

#[test]
fn search_does_not_normalize_stored_trading_name() {
    let repo = repo();
    repo.add_company(&CompanyEntity::new("1", "Acme", "Acme S.A"))
        .unwrap();

    assert!(repo.get_company("Acme S.A").unwrap().is_empty());
}

#[test]
fn search_with_term_equal_to_lowercase_trading_name_finds_it() {
    let repo = repo();
    let company = CompanyEntity::new("1", "Trends Ltda", "trends");
    repo.add_company(&company).unwrap();

    let found = repo.get_company("trends").unwrap();
    assert_eq!(found, vec![company]);
}

#[test]
fn search_without_matches_returns_empty_list() {
    let repo = repo();
    repo.add_company(&CompanyEntity::new("1", "Acme", "acme"))
        .unwrap();

    assert!(repo.get_company("globex").unwrap().is_empty());
}

#[test]
fn add_company_twice_keeps_one_record_with_latest_values() {
    let store = StateStore::open_in_memory().unwrap();
    let repo = SqliteCompanyRepository::try_new(store.clone()).unwrap();

    let mut company = CompanyEntity::new("18720131000109", "First name", "acme");
    repo.add_company(&company).unwrap();
    company.social_reason = "Second name".to_string();
    company.cnpj = "00000000000000".to_string();
    repo.add_company(&company).unwrap();

    let table = store.get_or_add_table::<CompanyEntity>(COMPANY_TABLE).unwrap();
    assert_eq!(store.transaction(|tx| table.count(tx)).unwrap(), 1);

    let found = repo.get_company("acme").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].social_reason, "Second name");
    assert_eq!(found[0].cnpj, "00000000000000");
}

#[test]
fn duplicate_tax_ids_are_accepted() {
    let repo = repo();
    repo.add_company(&CompanyEntity::new("same", "One", "one"))
        .unwrap();
    repo.add_company(&CompanyEntity::new("same", "Two", "two"))
        .unwrap();

    assert_eq!(repo.get_company("one two").unwrap().len(), 2);
}

#[test]
fn stored_company_drops_loaded_employers() {
    let store = StateStore::open_in_memory().unwrap();
    let repo = SqliteCompanyRepository::try_new(store.clone()).unwrap();
    let mut company = CompanyEntity::new("1", "Acme", "acme");
    company.employers.push(company_core::EmployerEntity::new(
        company.company_id,
        "Rodrigo",
        "Galhardo",
        chrono::Utc::now(),
        "Masculino",
    ));
    repo.add_company(&company).unwrap();

    let table = store.get_or_add_table::<CompanyEntity>(COMPANY_TABLE).unwrap();
    let stored = store
        .transaction(|tx| table.try_get(tx, company.company_id))
        .unwrap()
        .unwrap();
    assert!(stored.employers.is_empty());
}

#[test]
fn service_delegates_to_repository() {
    let service = CompanyService::open(StateStore::open_in_memory().unwrap()).unwrap();
    let company = CompanyEntity::new("1", "Acme", "acme");
    service.add_company(&company).unwrap();

    assert_eq!(service.get_company("acme").unwrap(), vec![company]);
}
