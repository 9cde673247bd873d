//! Registration-lookup adapter scenarios.

use std::sync::Arc;

use serde_json::json;

use fleetspec::adapters::{DvlaAdapter, SpecAdapter};
use fleetspec::vehicle::Vehicle;

use crate::common::MockHttp;

const BASE_URL: &str = "https://dvla.internal.test/vehicles";

fn vehicle_with_registration(registration: &str) -> Vehicle {
    Vehicle {
        make: "Mazda".to_string(),
        model: "6".to_string(),
        year: Some(2016),
        registration: Some(registration.to_string()),
        vehicle_type: Some("Car".to_string()),
    }
}

#[test]
fn test_successful_lookup_maps_record_and_keeps_raw_payload() {
    let mock = Arc::new(MockHttp::new().on(
        &["AB12%20CDE"],
        json!({
            "registrationNumber": "AB12CDE",
            "engineCapacity": 2488,
            "enginePower": 141,
            "fuelType": "PETROL",
            "colour": "Red",
            "motStatus": "Valid"
        }),
    ));
    let adapter = DvlaAdapter::new(mock.clone(), BASE_URL);

    let spec = adapter
        .fetch_specifications(&vehicle_with_registration("AB12 CDE"))
        .expect("specification");

    assert_eq!(spec.displacement.as_deref(), Some("2488 cc"));
    assert_eq!(spec.power.as_deref(), Some("141"));
    assert_eq!(spec.fuel_system.as_deref(), Some("PETROL"));
    assert_eq!(spec.additional_info["colour"], json!("Red"));
    assert_eq!(spec.additional_info["motStatus"], json!("Valid"));
    assert_eq!(spec.source_url.as_deref(), Some("dvla"));
    assert!(spec.scraped_at.is_some());

    // A registration lookup never escalates.
    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0],
        format!("{}/AB12%20CDE", BASE_URL)
    );
}

#[test]
fn test_no_record_is_a_no_match_not_an_error() {
    let mock = Arc::new(MockHttp::new().on_status(
        &["ZZ99"],
        404,
        json!({"message": "Vehicle not found"}),
    ));
    let adapter = DvlaAdapter::new(mock.clone(), BASE_URL);

    assert!(adapter
        .fetch_specifications(&vehicle_with_registration("ZZ99 ZZZ"))
        .is_none());
    assert_eq!(mock.requests().len(), 1);
}

#[test]
fn test_transport_failure_is_swallowed() {
    let mock = Arc::new(MockHttp::new().on_error(&["AB12"]));
    let adapter = DvlaAdapter::new(mock.clone(), BASE_URL);

    assert!(adapter
        .fetch_specifications(&vehicle_with_registration("AB12 CDE"))
        .is_none());
}

#[test]
fn test_supports_requires_a_registration() {
    let mock = Arc::new(MockHttp::new());
    let adapter = DvlaAdapter::new(mock.clone(), BASE_URL);

    let with_reg = vehicle_with_registration("AB12 CDE");
    assert!(adapter.supports("Car", &with_reg));
    assert!(adapter.supports("Motorcycle", &with_reg));

    let without_reg = Vehicle {
        registration: None,
        ..with_reg.clone()
    };
    assert!(!adapter.supports("Car", &without_reg));

    let blank_reg = Vehicle {
        registration: Some("  ".to_string()),
        ..with_reg
    };
    assert!(!adapter.supports("Car", &blank_reg));
}

#[test]
fn test_registration_lookup_outranks_every_other_adapter() {
    let mock = Arc::new(MockHttp::new());
    let adapter = DvlaAdapter::new(mock.clone(), BASE_URL);
    assert_eq!(adapter.priority(), 100);
}
