//! Fuel entry contract scenarios
//!
//! The `/fuel/entry` payload from the smoke tests, checked against the
//! built-in contract.

use payload_contract::contracts::{self, FUEL_ENTRY};
use payload_contract::{
    validate, validate_value, FieldKind, SchemaLoader, ValidationResult, ValueKind, Violation,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

fn fuel_entry_payload() -> Map<String, Value> {
    match json!({
        "gallons": 15.5,
        "totalCost": 45.75,
        "location": { "lat": 40.0, "lng": -75.0 },
        "date": "2025-08-17T12:00:00Z"
    }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

#[test]
fn test_fuel_entry_payload_is_valid() {
    let result = validate(&contracts::fuel_entry(), &fuel_entry_payload());
    assert_eq!(result, ValidationResult::Valid);
}

#[test]
fn test_missing_total_cost() {
    let mut payload = fuel_entry_payload();
    payload.remove("totalCost");

    let result = validate(&contracts::fuel_entry(), &payload);
    assert_eq!(
        result,
        ValidationResult::from_violations(vec![Violation::missing_field("totalCost")])
    );
}

#[test]
fn test_gallons_as_string() {
    let mut payload = fuel_entry_payload();
    payload.insert("gallons".into(), json!("15.5"));

    let result = validate(&contracts::fuel_entry(), &payload);
    assert_eq!(
        result,
        ValidationResult::from_violations(vec![Violation::wrong_type(
            "gallons",
            FieldKind::Number,
            ValueKind::String
        )])
    );
}

#[test]
fn test_integer_gallons_accepted() {
    let mut payload = fuel_entry_payload();
    payload.insert("gallons".into(), json!(15));
    assert!(validate(&contracts::fuel_entry(), &payload).is_valid());
}

#[test]
fn test_location_violations_follow_declaration_order() {
    let payload = json!({
        "totalCost": "45.75",
        "location": { "lng": true },
        "date": 20250817
    });

    let result = validate_value(&contracts::fuel_entry(), &payload);
    assert_eq!(
        result.violations(),
        &[
            Violation::missing_field("gallons"),
            Violation::wrong_type("totalCost", FieldKind::Number, ValueKind::String),
            Violation::missing_field("location.lat"),
            Violation::wrong_type("location.lng", FieldKind::Number, ValueKind::Boolean),
            Violation::wrong_type("date", FieldKind::String, ValueKind::Number),
        ]
    );
}

#[test]
fn test_validate_through_registry() {
    let mut loader = SchemaLoader::new("contracts");
    contracts::register_builtin(&mut loader).unwrap();

    let result = loader.validate(FUEL_ENTRY, &fuel_entry_payload()).unwrap();
    assert!(result.is_valid());
}
