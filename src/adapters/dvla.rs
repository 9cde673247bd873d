//! DVLA registration lookup adapter.
//!
//! Registration data is authoritative government data rather than a fuzzy
//! text match, so this adapter carries the highest priority and never
//! escalates: exactly one lookup keyed by the registration, mapped or
//! nothing. There are no name variations to generate for a plate.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::{present, scalar_string, set_field, SpecAdapter, REQUEST_TIMEOUT};
use crate::http::HttpClient;
use crate::specification::Specification;
use crate::vehicle::Vehicle;

pub struct DvlaAdapter {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl DvlaAdapter {
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Map a vehicle-enquiry payload onto a specification. The complete
    /// raw payload is preserved in the additional-info bag for
    /// traceability.
    fn map_payload(data: &Map<String, Value>) -> Specification {
        let mut spec = Specification::new();

        if let Some(capacity) = present(data.get("engineCapacity")) {
            // Engine capacity comes back in cc.
            spec.displacement = Some(format!("{} cc", scalar_string(capacity)));
        }
        set_field(&mut spec.power, data.get("enginePower"));
        set_field(&mut spec.fuel_system, data.get("fuelType"));
        set_field(&mut spec.transmission, data.get("transmission"));

        for (key, value) in data {
            spec.insert_additional(key.clone(), value.clone());
        }

        spec
    }
}

impl SpecAdapter for DvlaAdapter {
    fn supports(&self, _vehicle_type: &str, vehicle: &Vehicle) -> bool {
        // A registration is all that is needed; the vehicle type is
        // irrelevant to a plate lookup.
        vehicle.has_registration()
    }

    fn priority(&self) -> u8 {
        100
    }

    fn fetch_specifications(&self, vehicle: &Vehicle) -> Option<Specification> {
        let registration = vehicle.registration.as_deref()?.trim();
        if registration.is_empty() {
            return None;
        }

        tracing::info!("Fetching DVLA record for registration {}", registration);

        let url = format!(
            "{}/{}",
            self.base_url,
            urlencoding::encode(registration)
        );
        let response = match self.http.get_json(&url, &[], REQUEST_TIMEOUT) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("DVLA lookup failed for {}: {}", registration, e);
                return None;
            }
        };

        if !response.is_success() {
            tracing::warn!(
                "No DVLA record for {} (status {})",
                registration,
                response.status
            );
            return None;
        }

        let Some(data) = response.body.as_object() else {
            tracing::warn!("DVLA returned a non-object payload for {}", registration);
            return None;
        };

        let mut spec = Self::map_payload(data);
        spec.stamp("dvla");
        Some(spec)
    }

    fn name(&self) -> &'static str {
        "dvla"
    }
}
