//! Dispatcher scenarios over the real adapters and a scripted client.

use std::sync::Arc;

use serde_json::json;

use fleetspec::adapters::{
    DvlaAdapter, NinjaCarsAdapter, NinjaMotorcyclesAdapter, OpenVehicleAdapter,
};
use fleetspec::http::HttpClient;
use fleetspec::scraper::SpecificationScraper;
use fleetspec::vehicle::Vehicle;

use crate::common::MockHttp;

const DVLA_URL: &str = "https://dvla.internal.test/vehicles";
const OPEN_VEHICLE_URL: &str = "https://openvehicles.test/v1";

/// All four production adapters wired to one scripted client, in the
/// production registration order.
fn scraper_over(mock: &Arc<MockHttp>) -> SpecificationScraper {
    let http: Arc<dyn HttpClient> = mock.clone();
    let mut scraper = SpecificationScraper::new();
    scraper.register(Box::new(DvlaAdapter::new(Arc::clone(&http), DVLA_URL)));
    scraper.register(Box::new(NinjaMotorcyclesAdapter::new(
        Arc::clone(&http),
        "ninjas-key",
    )));
    scraper.register(Box::new(NinjaCarsAdapter::new(
        Arc::clone(&http),
        "ninjas-key",
    )));
    scraper.register(Box::new(OpenVehicleAdapter::new(
        http,
        "open-token",
        OPEN_VEHICLE_URL,
    )));
    scraper
}

#[test]
fn test_registration_lookup_wins_when_a_plate_is_known() {
    let mock = Arc::new(MockHttp::new().on(
        &["dvla.internal.test"],
        json!({"engineCapacity": 649, "fuelType": "PETROL"}),
    ));
    let scraper = scraper_over(&mock);

    let vehicle = Vehicle {
        make: "Honda".to_string(),
        model: "CB650R".to_string(),
        year: Some(2023),
        registration: Some("AB12 CDE".to_string()),
        vehicle_type: Some("Motorcycle".to_string()),
    };

    let spec = scraper.fetch_specifications(&vehicle).expect("specification");
    assert_eq!(spec.source_url.as_deref(), Some("dvla"));
    assert_eq!(spec.displacement.as_deref(), Some("649 cc"));

    // The winning adapter's single request is the only upstream traffic.
    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with(DVLA_URL));
}

#[test]
fn test_motorcycles_fall_through_to_the_motorcycle_source() {
    let mock = Arc::new(MockHttp::new().on(
        &["/v1/motorcycles?", "model=CB650R"],
        json!([{"make": "Honda", "model": "CB650R", "gearbox": "6-speed"}]),
    ));
    let scraper = scraper_over(&mock);

    let vehicle = Vehicle {
        make: "Honda".to_string(),
        model: "CB650R".to_string(),
        year: Some(2023),
        registration: None,
        vehicle_type: Some("Motorcycle".to_string()),
    };

    let spec = scraper.fetch_specifications(&vehicle).expect("specification");
    assert_eq!(spec.gearbox.as_deref(), Some("6-speed"));

    // No registration, so the plate lookup never ran.
    assert!(mock
        .requests()
        .iter()
        .all(|url| !url.starts_with(DVLA_URL)));
}

#[test]
fn test_cars_prefer_the_generic_source_then_fall_back() {
    // The generic source has nothing (empty arrays everywhere); the car
    // source answers.
    let mock = Arc::new(MockHttp::new().on(
        &["/v1/cars?", "api-ninjas"],
        json!([{"cylinders": 4, "fuel_type": "gas"}]),
    ));
    let scraper = scraper_over(&mock);

    let vehicle = Vehicle {
        make: "Mazda".to_string(),
        model: "6".to_string(),
        year: Some(2016),
        registration: None,
        vehicle_type: Some("Car".to_string()),
    };

    let spec = scraper.fetch_specifications(&vehicle).expect("specification");
    assert_eq!(spec.engine_type.as_deref(), Some("4 cylinders"));

    let requests = mock.requests();
    // The higher-priority generic source was consulted first.
    assert!(requests[0].starts_with(OPEN_VEHICLE_URL));
    assert!(requests.last().unwrap().contains("api-ninjas"));
}

#[test]
fn test_exhaustion_across_all_adapters_yields_none() {
    let mock = Arc::new(MockHttp::new());
    let scraper = scraper_over(&mock);

    let vehicle = Vehicle {
        make: "Mazda".to_string(),
        model: "6".to_string(),
        year: Some(2016),
        registration: None,
        vehicle_type: Some("Car".to_string()),
    };

    assert!(scraper.fetch_specifications(&vehicle).is_none());
    assert!(!mock.requests().is_empty());
}

#[test]
fn test_search_models_uses_the_motorcycle_source() {
    let mock = Arc::new(MockHttp::new().on(
        &["motorcyclemodels", "make=Honda"],
        json!(["CB650R", "Africa Twin"]),
    ));
    let scraper = scraper_over(&mock);

    let vehicle = Vehicle {
        make: "Honda".to_string(),
        model: String::new(),
        year: None,
        registration: None,
        vehicle_type: Some("Motorcycle".to_string()),
    };

    let models = scraper.search_models(&vehicle, "Honda", None);
    assert_eq!(
        models,
        vec!["CB650R".to_string(), "Africa Twin".to_string()]
    );
}
