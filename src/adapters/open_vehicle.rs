//! Open Vehicles API adapter.
//!
//! One source covering cars, motorcycles, trucks and vans behind
//! per-category endpoints, with deeply nested response payloads. EVs ride
//! on the cars endpoint. Data here is generally more complete than the
//! car-specific source, hence the higher priority.

use std::str::FromStr;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::{build_query, present, scalar_string, set_field, SpecAdapter, REQUEST_TIMEOUT};
use crate::http::HttpClient;
use crate::matching::model_variations;
use crate::specification::Specification;
use crate::vehicle::{Vehicle, VehicleClass};

pub struct OpenVehicleAdapter {
    http: Arc<dyn HttpClient>,
    api_key: String,
    base_url: String,
}

/// Endpoint path for a vehicle class name; `None` means the class is not
/// covered by this source.
fn endpoint_for(vehicle_type: &str) -> Option<&'static str> {
    match VehicleClass::from_str(vehicle_type).ok()? {
        VehicleClass::Car | VehicleClass::Ev => Some("cars"),
        VehicleClass::Motorcycle => Some("motorcycles"),
        VehicleClass::Truck => Some("trucks"),
        VehicleClass::Van => Some("vans"),
    }
}

impl OpenVehicleAdapter {
    pub fn new(
        http: Arc<dyn HttpClient>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn map_payload(data: &Map<String, Value>, vehicle_type: &str) -> Specification {
        let mut spec = Specification::new();
        spec.insert_additional("vehicle_type", Value::String(vehicle_type.to_string()));

        // Engine
        if let Some(engine) = data.get("engine").and_then(Value::as_object) {
            if let Some(cylinders) = present(engine.get("cylinders")) {
                spec.engine_type = Some(format!("{} cylinders", scalar_string(cylinders)));
            }
            if let Some(displacement) = present(engine.get("displacement")) {
                spec.displacement = Some(render_displacement(displacement));
            }
            set_field(&mut spec.fuel_system, engine.get("fuel_type"));
            set_field(&mut spec.power, engine.get("power"));
            set_field(&mut spec.torque, engine.get("torque"));
        }

        // Transmission
        if let Some(transmission) = data.get("transmission").and_then(Value::as_object) {
            set_field(&mut spec.transmission, transmission.get("type"));
            if let Some(gears) = present(transmission.get("gears")) {
                spec.gearbox = Some(format!("{} speed", scalar_string(gears)));
            }
        }

        if let Some(drivetrain) = present(data.get("drivetrain")) {
            spec.insert_additional("drive", drivetrain.clone());
        }

        // Performance
        if let Some(performance) = data.get("performance").and_then(Value::as_object) {
            set_field(&mut spec.top_speed, performance.get("top_speed"));
            if let Some(acceleration) = present(performance.get("acceleration")) {
                spec.insert_additional("acceleration_0_60", acceleration.clone());
            }
        }

        if let Some(fuel_economy) = present(data.get("fuel_economy")) {
            spec.insert_additional("fuel_economy", fuel_economy.clone());
        }

        // Dimensions
        if let Some(dimensions) = data.get("dimensions").and_then(Value::as_object) {
            set_field(&mut spec.wheelbase, dimensions.get("wheelbase"));
            for key in ["length", "width", "height"] {
                if let Some(value) = present(dimensions.get(key)) {
                    spec.insert_additional(key, value.clone());
                }
            }
        }

        // Weight and fuel
        if let Some(weight) = data.get("weight").and_then(Value::as_object) {
            set_field(&mut spec.wet_weight, weight.get("curb_weight"));
        }
        if let Some(fuel) = data.get("fuel").and_then(Value::as_object) {
            set_field(&mut spec.fuel_capacity, fuel.get("capacity"));
        }

        // Identification of the matched record, kept for reference.
        for key in ["make", "model", "year", "class", "generation"] {
            if let Some(value) = present(data.get(key)) {
                spec.insert_additional(key, value.clone());
            }
        }

        spec
    }
}

/// Displacement arrives either pre-formatted ("2.0 L") or as a bare
/// number; only bare numbers get the unit appended.
fn render_displacement(value: &Value) -> String {
    match value {
        Value::Number(n) => format!("{} L", n),
        Value::String(s) if s.parse::<f64>().is_ok() => format!("{} L", s),
        other => scalar_string(other),
    }
}

impl SpecAdapter for OpenVehicleAdapter {
    fn supports(&self, vehicle_type: &str, _vehicle: &Vehicle) -> bool {
        endpoint_for(vehicle_type).is_some()
    }

    fn priority(&self) -> u8 {
        90
    }

    fn fetch_specifications(&self, vehicle: &Vehicle) -> Option<Specification> {
        let make = vehicle.make.trim();
        let model = vehicle.model.trim();
        if make.is_empty() || model.is_empty() {
            return None;
        }

        if self.api_key.is_empty() {
            tracing::error!("Open Vehicles API key not configured");
            return None;
        }

        let vehicle_type = vehicle.vehicle_type.as_deref().unwrap_or("car");
        let endpoint = endpoint_for(vehicle_type).unwrap_or("cars");

        let year_param = vehicle.year.map(|year| year.to_string());
        let variations = model_variations(model);

        for variant in &variations {
            let mut params: Vec<(&str, &str)> = vec![("make", make), ("model", variant)];
            if let Some(year) = year_param.as_deref() {
                params.push(("year", year));
            }
            let url = format!(
                "{}/{}?{}",
                self.base_url,
                endpoint,
                build_query(&params)
            );

            tracing::info!(
                "Fetching specs from Open Vehicles {}: make={} model={} year={:?}",
                endpoint,
                make,
                variant,
                vehicle.year
            );

            let headers = [
                ("Authorization", format!("Bearer {}", self.api_key)),
                ("Accept", "application/json".to_string()),
            ];
            let response = match self.http.get_json(&url, &headers, REQUEST_TIMEOUT) {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!(
                        "Open Vehicles lookup failed for {} {}: {}",
                        make,
                        variant,
                        e
                    );
                    continue;
                }
            };

            // An error status rules out this variant, not the source.
            if response.status >= 400 {
                tracing::error!(
                    "Open Vehicles returned status {} for {} {} on /{}",
                    response.status,
                    make,
                    variant,
                    endpoint
                );
                continue;
            }

            // Both a bare object and a non-empty array are valid shapes.
            let record = match &response.body {
                Value::Object(object) => Some(object),
                Value::Array(items) => items.first().and_then(Value::as_object),
                _ => None,
            };
            let Some(record) = record else {
                tracing::warn!(
                    "Open Vehicles returned an unusable payload for {} {}",
                    make,
                    variant
                );
                continue;
            };

            let mut spec = Self::map_payload(record, vehicle_type);
            spec.stamp(&url);
            return Some(spec);
        }

        tracing::warn!(
            "No data found from Open Vehicles /{} for {} {} year {:?}; variants tried: {:?}",
            endpoint,
            make,
            model,
            vehicle.year,
            variations
        );
        None
    }

    fn name(&self) -> &'static str {
        "open-vehicles"
    }
}
