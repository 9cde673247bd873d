//! API Ninjas car specification adapter.
//!
//! Covers every vehicle type the motorcycle source does not. The car
//! catalogue keys on make/model/year only, so the search strategy is a
//! single pass over model-name variations; there is no fuzzy batch
//! ranking here.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::{
    build_query, present, scalar_string, set_field, SpecAdapter, MOTORCYCLE_TYPES,
    REQUEST_TIMEOUT,
};
use crate::http::HttpClient;
use crate::matching::model_variations;
use crate::specification::Specification;
use crate::vehicle::Vehicle;

const CARS_URL: &str = "https://api.api-ninjas.com/v1/cars";

pub struct NinjaCarsAdapter {
    http: Arc<dyn HttpClient>,
    api_key: String,
}

impl NinjaCarsAdapter {
    pub fn new(http: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
        }
    }

    fn map_payload(data: &Map<String, Value>) -> Specification {
        let mut spec = Specification::new();

        // Engine
        if let Some(cylinders) = present(data.get("cylinders")) {
            spec.engine_type = Some(format!("{} cylinders", scalar_string(cylinders)));
        }
        if let Some(displacement) = present(data.get("displacement")) {
            spec.displacement = Some(format!("{} L", scalar_string(displacement)));
        }
        set_field(&mut spec.fuel_system, data.get("fuel_type"));

        // Transmission
        set_field(&mut spec.transmission, data.get("transmission"));
        if let Some(drive) = present(data.get("drive")) {
            spec.insert_additional("drive", drive.clone());
        }

        // Fuel economy
        if let Some(combined) = present(data.get("combination_mpg")) {
            spec.insert_additional(
                "fuel_economy_combined",
                Value::String(format!("{} MPG", scalar_string(combined))),
            );
            if let Some(city) = present(data.get("city_mpg")) {
                spec.insert_additional(
                    "fuel_economy_city",
                    Value::String(format!("{} MPG", scalar_string(city))),
                );
            }
            if let Some(highway) = present(data.get("highway_mpg")) {
                spec.insert_additional(
                    "fuel_economy_highway",
                    Value::String(format!("{} MPG", scalar_string(highway))),
                );
            }
        }

        // Identification of the matched record, kept for reference.
        for key in ["make", "model", "year", "class"] {
            if let Some(value) = present(data.get(key)) {
                spec.insert_additional(key, value.clone());
            }
        }

        spec
    }
}

impl SpecAdapter for NinjaCarsAdapter {
    fn supports(&self, vehicle_type: &str, _vehicle: &Vehicle) -> bool {
        !MOTORCYCLE_TYPES.contains(&vehicle_type.to_lowercase().as_str())
    }

    fn priority(&self) -> u8 {
        85
    }

    fn fetch_specifications(&self, vehicle: &Vehicle) -> Option<Specification> {
        let make = vehicle.make.trim();
        let model = vehicle.model.trim();
        if make.is_empty() || model.is_empty() {
            return None;
        }

        if self.api_key.is_empty() {
            tracing::error!("API Ninjas API key not configured");
            return None;
        }

        let year_param = vehicle.year.map(|year| year.to_string());
        let variations = model_variations(model);

        for variant in &variations {
            let mut params: Vec<(&str, &str)> = vec![("make", make), ("model", variant)];
            if let Some(year) = year_param.as_deref() {
                params.push(("year", year));
            }
            let url = format!("{}?{}", CARS_URL, build_query(&params));

            tracing::info!(
                "Fetching car specs from API Ninjas: make={} model={} year={:?}",
                make,
                variant,
                vehicle.year
            );

            let headers = [("X-Api-Key", self.api_key.clone())];
            let response = match self.http.get_json(&url, &headers, REQUEST_TIMEOUT) {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!("Car lookup failed for {} {}: {}", make, variant, e);
                    continue;
                }
            };

            if !response.is_success() {
                tracing::warn!(
                    "API Ninjas cars returned status {} for {} {}",
                    response.status,
                    make,
                    variant
                );
                continue;
            }

            let Some(items) = response.body.as_array() else {
                tracing::warn!("API Ninjas cars returned a non-array payload");
                continue;
            };
            let Some(first) = items.first().and_then(Value::as_object) else {
                continue;
            };

            let mut spec = Self::map_payload(first);
            spec.stamp(&url);
            tracing::info!(
                "API Ninjas found car data for {} {} using variant {}",
                make,
                model,
                variant
            );
            return Some(spec);
        }

        tracing::warn!(
            "No car data found for {} {} year {:?}; variants tried: {:?}",
            make,
            model,
            vehicle.year,
            variations
        );
        None
    }

    fn name(&self) -> &'static str {
        "api-ninjas-cars"
    }
}
