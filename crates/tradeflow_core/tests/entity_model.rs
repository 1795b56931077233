use serde_json::{json, Value};
use tradeflow_core::{Customer, Entity, EntityField, EntityKind, Vendor};

#[test]
fn customer_serializes_flat_camel_case_fields() {
    let mut customer = Customer::with_id("c-1", "Acme", "a@acme.com");
    customer.profile.phone = Some("555-0100".to_string());
    customer.profile.related_organizations = vec!["Org A".to_string()];

    let value = serde_json::to_value(&customer).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "c-1",
            "name": "Acme",
            "email": "a@acme.com",
            "phone": "555-0100",
            "relatedOrganizations": ["Org A"],
            "relatedPeople": [],
            "relatedVendors": []
        })
    );
}

#[test]
fn vendor_wire_format_includes_supplier_fields() {
    let mut vendor = Vendor::with_id("v-1", "SupplyCo", "sales@supplyco.global");
    vendor.industry = Some("Logistics".to_string());
    vendor.contact_person_name = Some("Sarah Connor".to_string());

    let value = serde_json::to_value(&vendor).unwrap();
    assert_eq!(value["industry"], "Logistics");
    assert_eq!(value["contactPersonName"], "Sarah Connor");
    assert!(value.get("contact_person_name").is_none());

    let decoded: Vendor = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, vendor);
}

#[test]
fn records_without_optional_fields_decode_with_defaults() {
    let decoded: Customer =
        serde_json::from_value(json!({ "name": "Acme", "email": "a@acme.com" })).unwrap();

    assert!(!decoded.has_id());
    assert_eq!(decoded.profile.notes, None);
    assert!(decoded.profile.related_people.is_empty());
}

#[test]
fn validation_reports_name_and_email_per_field() {
    let errors = Customer::new("A", "acme.com").validate().unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.for_field(EntityField::Name).unwrap().message,
        "Name must be at least 2 characters."
    );
    assert_eq!(
        errors.for_field(EntityField::Email).unwrap().message,
        "Invalid email address."
    );

    assert!(Customer::new("  Ab  ", "a@acme.com").validate().is_ok());
    assert!(Vendor::new("Xy", "x@y.io").validate().is_ok());
}

#[test]
fn vendor_exposes_extra_text_fields_and_customer_does_not() {
    let mut vendor = Vendor::new("SupplyCo", "sales@supplyco.global");
    assert!(vendor.set_text_field(EntityField::Industry, " Logistics "));
    assert_eq!(vendor.text_field(EntityField::Industry), Some("Logistics"));

    let mut customer = Customer::new("Acme", "a@acme.com");
    assert!(!customer.set_text_field(EntityField::Industry, "Retail"));
    assert_eq!(customer.text_field(EntityField::Industry), None);
}

#[test]
fn seed_records_are_valid_and_uniquely_identified() {
    fn check<E: Entity>() {
        let seeds = E::seed_records();
        assert_eq!(seeds.len(), 2);
        for seed in &seeds {
            assert!(seed.has_id());
            seed.validate().unwrap();
        }
        assert_ne!(seeds[0].id(), seeds[1].id());
    }

    check::<Customer>();
    check::<Vendor>();
}

#[test]
fn suggestion_input_describes_the_record() {
    let mut customer = Customer::new("Acme", "a@acme.com");
    customer.profile.notes = Some("Buys widgets".to_string());
    let input = customer.suggestion_input();
    assert!(input.starts_with("Name: Acme, Email: a@acme.com"));
    assert!(input.contains("Notes: Buys widgets"));

    let mut vendor = Vendor::new("SupplyCo", "sales@supplyco.global");
    vendor.industry = Some("Logistics".to_string());
    assert!(vendor.suggestion_input().contains("Industry: Logistics"));
}

#[test]
fn kinds_map_to_storage_names() {
    assert_eq!(EntityKind::Customer.storage_key(), "tradeflow_customers");
    assert_eq!(EntityKind::Vendor.storage_key(), "tradeflow_vendors");
    assert_eq!(EntityKind::Customer.collection(), "customers");
    assert_eq!(EntityKind::Vendor.collection(), "vendors");
    assert_eq!(Customer::KIND, EntityKind::Customer);

    let kind: Value = serde_json::to_value(EntityKind::Vendor).unwrap();
    assert_eq!(kind, json!("vendor"));
}
