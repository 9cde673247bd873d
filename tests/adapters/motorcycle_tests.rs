//! Motorcycle adapter scenarios: direct hits, fuzzy batch ranking,
//! nearby-year escalation and the model-search endpoint.

use std::sync::Arc;

use serde_json::{json, Value};

use fleetspec::adapters::{NinjaMotorcyclesAdapter, SpecAdapter};
use fleetspec::vehicle::Vehicle;

use crate::common::MockHttp;

const API_KEY: &str = "test-key";

fn cb650r() -> Vehicle {
    Vehicle {
        make: "Honda".to_string(),
        model: "CB650R".to_string(),
        year: Some(2023),
        registration: None,
        vehicle_type: Some("Motorcycle".to_string()),
    }
}

fn cb650r_payload(model: &str) -> Value {
    json!({
        "make": "Honda",
        "model": model,
        "year": "2023",
        "type": "Naked bike",
        "engine": "Four stroke transverse four cylinder",
        "displacement": "649.0 ccm (39.6 cubic inches)",
        "power": "93.9 HP (68.6 kW) @ 12000 RPM",
        "gearbox": "6-speed",
        "seat_height": "810 mm (31.9 inches)"
    })
}

fn adapter(mock: &Arc<MockHttp>) -> NinjaMotorcyclesAdapter {
    NinjaMotorcyclesAdapter::new(mock.clone(), API_KEY)
}

#[test]
fn test_exact_hit_issues_exactly_one_request() {
    let mock = Arc::new(MockHttp::new().on(
        &["make=Honda", "model=CB650R", "year=2023"],
        json!([cb650r_payload("CB650R")]),
    ));

    let spec = adapter(&mock)
        .fetch_specifications(&cb650r())
        .expect("specification");

    let requests = mock.requests();
    assert_eq!(requests.len(), 1, "no further requests after a direct hit");
    assert!(requests[0].contains("make=Honda"));
    assert!(requests[0].contains("model=CB650R"));
    assert!(requests[0].contains("year=2023"));

    assert_eq!(spec.gearbox.as_deref(), Some("6-speed"));
    assert_eq!(spec.additional_info["category"], json!("Naked bike"));
    // Provenance reflects the exact query that produced the data.
    assert_eq!(spec.source_url.as_deref(), Some(requests[0].as_str()));
    assert!(spec.scraped_at.is_some());
}

#[test]
fn test_escalates_direct_then_batch_then_nearby_year() {
    // Nothing matches directly or in the 2023 batch; 2024 has the bike.
    let mock = Arc::new(
        MockHttp::new()
            .on(&["model="], json!([]))
            .on(&["make=Honda", "year=2023"], json!([]))
            .on(
                &["make=Honda", "year=2024"],
                json!([cb650r_payload("CB650R ABS")]),
            ),
    );

    let spec = adapter(&mock)
        .fetch_specifications(&cb650r())
        .expect("specification");

    let requests = mock.requests();
    assert_eq!(requests.len(), 3);
    // 1. the direct (make, model, year) search at the original year
    assert!(requests[0].contains("model=CB650R"));
    assert!(requests[0].contains("year=2023"));
    // 2. the all-models batch at the original year
    assert!(!requests[1].contains("model="));
    assert!(requests[1].contains("make=Honda&year=2023"));
    // 3. the first nearby year
    assert!(requests[2].contains("make=Honda&year=2024"));

    assert_eq!(
        spec.additional_info["api_model_name"],
        json!("CB650R ABS")
    );
    assert_eq!(spec.source_url.as_deref(), Some(requests[2].as_str()));
}

#[test]
fn test_nearby_years_are_walked_in_fixed_order() {
    let mock = Arc::new(MockHttp::new().on(&["model="], json!([])));

    assert!(adapter(&mock).fetch_specifications(&cb650r()).is_none());

    // For each make variant ("Honda", "honda"): one direct attempt, then
    // batches at 2023 and the four nearby years.
    let batch_years: Vec<String> = mock
        .requests()
        .iter()
        .filter(|url| !url.contains("model=") && url.contains("make=Honda"))
        .map(|url| url.split("year=").nth(1).unwrap().to_string())
        .collect();
    assert_eq!(batch_years, vec!["2023", "2024", "2022", "2025", "2021"]);
}

#[test]
fn test_batch_search_prefers_genuine_entry_over_decoy() {
    // The decoy appears first in the batch and its reported make does not
    // match; the genuine entry must win.
    let decoy = json!({
        "make": "Kawasaki",
        "model": "620 Duke",
        "displacement": "609.0 ccm"
    });
    let mock = Arc::new(
        MockHttp::new()
            .on(&["model="], json!([]))
            .on(
                &["make=Honda", "year=2023"],
                json!([decoy, cb650r_payload("CB650R ABS")]),
            ),
    );

    let spec = adapter(&mock)
        .fetch_specifications(&cb650r())
        .expect("specification");

    assert_eq!(
        spec.additional_info["api_model_name"],
        json!("CB650R ABS")
    );
    assert_eq!(
        spec.displacement.as_deref(),
        Some("649.0 ccm (39.6 cubic inches)")
    );
}

#[test]
fn test_sub_threshold_batch_candidates_are_rejected() {
    // A same-make candidate with a hopeless name must not be accepted at
    // any year.
    let mock = Arc::new(
        MockHttp::new()
            .on(&["model="], json!([]))
            .on(
                &["make=Honda", "year=2023"],
                json!([{"make": "Honda", "model": "Goldwing"}]),
            ),
    );

    assert!(adapter(&mock).fetch_specifications(&cb650r()).is_none());
}

#[test]
fn test_missing_api_key_short_circuits_without_requests() {
    let mock = Arc::new(MockHttp::new());
    let adapter = NinjaMotorcyclesAdapter::new(mock.clone(), "");

    assert!(adapter.fetch_specifications(&cb650r()).is_none());
    assert!(mock.requests().is_empty());
}

#[test]
fn test_supports_only_motorcycle_type_names() {
    let mock = Arc::new(MockHttp::new());
    let adapter = adapter(&mock);
    let vehicle = cb650r();

    assert!(adapter.supports("Motorcycle", &vehicle));
    assert!(adapter.supports("motorbike", &vehicle));
    assert!(adapter.supports("BIKE", &vehicle));
    assert!(!adapter.supports("Car", &vehicle));
    assert!(!adapter.supports("Van", &vehicle));
}

#[test]
fn test_search_models_filters_case_insensitively() {
    let mock = Arc::new(MockHttp::new().on(
        &["motorcyclemodels", "make=Honda"],
        json!(["CB650R", "CB500F", "Africa Twin", "Goldwing"]),
    ));

    let all = adapter(&mock).search_models("Honda", None);
    assert_eq!(all.len(), 4);

    let filtered = adapter(&mock).search_models("Honda", Some("cb"));
    assert_eq!(
        filtered,
        vec!["CB650R".to_string(), "CB500F".to_string()]
    );
}

#[test]
fn test_search_models_swallows_failures() {
    let mock = Arc::new(MockHttp::new().on_error(&["motorcyclemodels"]));
    assert!(adapter(&mock).search_models("Honda", None).is_empty());

    let keyless = NinjaMotorcyclesAdapter::new(Arc::new(MockHttp::new()), "");
    assert!(keyless.search_models("Honda", None).is_empty());
}
