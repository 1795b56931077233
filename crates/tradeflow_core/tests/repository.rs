use std::collections::HashSet;
use tradeflow_core::{
    generate_entity_id, open_db_in_memory, Customer, DocumentBackend, EntityField,
    EntityRepository, LocalBackend, MemoryKeyValueStore, RepoError, StorageBackend, Vendor,
};
use uuid::Uuid;

fn memory_repo<E: tradeflow_core::Entity>() -> EntityRepository<E, LocalBackend<E, MemoryKeyValueStore>> {
    EntityRepository::new(LocalBackend::new(MemoryKeyValueStore::new()))
}

#[test]
fn generated_ids_are_hyphenated_uuid_v4() {
    let mut seen = HashSet::new();
    for _ in 0..64 {
        let id = generate_entity_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id.len(), 36);
        assert!(seen.insert(id));
    }
}

#[test]
fn create_assigns_id_and_listed_record_equals_input() {
    let repo = memory_repo::<Customer>();
    let mut input = Customer::new("Acme", "a@acme.com");
    input.profile.related_vendors = vec!["SupplyCo Global".to_string()];

    let stored = repo.create_entity(&input).unwrap();
    assert!(Uuid::parse_str(&stored.id).is_ok());
    assert_eq!(stored.profile, input.profile);

    let listed = repo.list_entities().unwrap();
    assert_eq!(listed[0], stored);
}

#[test]
fn create_keeps_a_caller_supplied_id() {
    let repo = memory_repo::<Vendor>();
    let stored = repo
        .create_entity(&Vendor::with_id("v-fixed", "SupplyCo", "s@supplyco.global"))
        .unwrap();
    assert_eq!(stored.id, "v-fixed");
}

#[test]
fn invalid_records_never_reach_storage() {
    let store = MemoryKeyValueStore::new();
    let repo = EntityRepository::<Customer, _>::new(LocalBackend::new(&store));

    let err = repo.create_entity(&Customer::new("A", "nope")).unwrap_err();
    match err {
        RepoError::Validation(errors) => {
            assert!(errors.has_field(EntityField::Name));
            assert!(errors.has_field(EntityField::Email));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.is_empty());

    let err = repo
        .update_entity(&Customer::with_id("c-1", "Acme", "bad"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(store.is_empty());
}

#[test]
fn update_requires_an_id() {
    let repo = memory_repo::<Customer>();
    let err = repo
        .update_entity(&Customer::new("Acme", "a@acme.com"))
        .unwrap_err();
    assert!(matches!(err, RepoError::MissingId));
}

#[test]
fn update_replaces_fields_without_leaving_stale_values() {
    let conn = open_db_in_memory().unwrap();
    let repo = EntityRepository::new(DocumentBackend::<Vendor>::try_new(&conn).unwrap());
    let mut vendor = Vendor::new("SupplyCo", "s@supplyco.global");
    vendor.industry = Some("Logistics".to_string());
    vendor.contact_person_name = Some("Sarah".to_string());
    let mut stored = repo.create_entity(&vendor).unwrap();

    stored.industry = Some("Freight".to_string());
    stored.contact_person_name = None;
    repo.update_entity(&stored).unwrap();

    assert_eq!(repo.list_entities().unwrap(), vec![stored]);
}

#[test]
fn remote_update_of_missing_record_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = EntityRepository::new(DocumentBackend::<Customer>::try_new(&conn).unwrap());

    let err = repo
        .update_entity(&Customer::with_id("c-gone", "Ghost", "g@ghost.io"))
        .unwrap_err();
    match err {
        RepoError::NotFound(id) => assert_eq!(id, "c-gone"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn delete_then_list_has_no_such_id_and_repeat_delete_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let repo = EntityRepository::new(DocumentBackend::<Customer>::try_new(&conn).unwrap());
    let stored = repo
        .create_entity(&Customer::new("Acme", "a@acme.com"))
        .unwrap();

    repo.delete_entity(&stored.id).unwrap();
    repo.delete_entity(&stored.id).unwrap();
    assert!(repo
        .list_entities()
        .unwrap()
        .iter()
        .all(|customer| customer.id != stored.id));
}

#[test]
fn duplicate_names_and_emails_are_allowed() {
    let repo = memory_repo::<Customer>();
    let first = repo.create_entity(&Customer::new("Acme", "a@acme.com")).unwrap();
    let second = repo.create_entity(&Customer::new("Acme", "a@acme.com")).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(repo.backend().list().unwrap().len(), 4);
}
