//! API Ninjas motorcycle specification adapter.
//!
//! The motorcycle catalogue behind this source is rich but its naming
//! drifts from what owners type in ("Z1000 JHF R" vs "Z1000", model years
//! offset by one between markets), so this adapter runs the most
//! elaborate search in the crate, escalating in three stages:
//!
//! 1. Direct lookups for every make variation x model variation pair.
//! 2. Per make variation, the full result set for that make and year,
//!    ranked by model-name similarity after a make-equality filter; the
//!    best candidate is accepted at a score of 40 or above.
//! 3. The same batch search across nearby years (+1, -1, +2, -2).
//!
//! Exact triples are cheapest to validate and most likely correct; the
//! batch search trades one extra request for resilience against
//! model-name drift; the nearby-year pass compensates for off-by-one
//! model-year conventions between data sources.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::{
    build_query, present, SpecAdapter, MOTORCYCLE_TYPES, REQUEST_TIMEOUT,
};
use crate::http::HttpClient;
use crate::matching::{make_variations, model_variations, similarity};
use crate::specification::Specification;
use crate::vehicle::Vehicle;

const MOTORCYCLES_URL: &str = "https://api.api-ninjas.com/v1/motorcycles";
const MODELS_URL: &str = "https://api.api-ninjas.com/v1/motorcyclemodels";

/// Lowest similarity score accepted from the fuzzy-ranked batch search.
/// Below this, "plausibly the same model under a different naming
/// convention" turns into "unrelated model".
const MATCH_THRESHOLD: f64 = 40.0;

/// Year offsets tried after the requested model year, in order.
const NEARBY_YEAR_OFFSETS: &[i32] = &[1, -1, 2, -2];

/// Payload keys with a named specification field (or handled specially);
/// everything else lands in the additional-info bag verbatim.
const MAPPED_KEYS: &[&str] = &[
    "engine",
    "displacement",
    "power",
    "torque",
    "compression",
    "bore_stroke",
    "fuel_system",
    "cooling",
    "gearbox",
    "transmission",
    "clutch",
    "frame",
    "front_suspension",
    "rear_suspension",
    "front_brakes",
    "rear_brakes",
    "front_tire",
    "rear_tire",
    "front_wheel_travel",
    "rear_wheel_travel",
    "wheelbase",
    "seat_height",
    "ground_clearance",
    "dry_weight",
    "wet_weight",
    "fuel_capacity",
    "top_speed",
    "make",
    "model",
    "year",
    "type",
];

pub struct NinjaMotorcyclesAdapter {
    http: Arc<dyn HttpClient>,
    api_key: String,
}

impl NinjaMotorcyclesAdapter {
    pub fn new(http: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
        }
    }

    fn map_payload(data: &Map<String, Value>) -> Specification {
        let mut spec = Specification::new();

        macro_rules! map {
            ($($field:ident <- $key:literal,)+) => {
                $(super::set_field(&mut spec.$field, data.get($key));)+
            };
        }
        map!(
            // Engine
            engine_type <- "engine",
            displacement <- "displacement",
            power <- "power",
            torque <- "torque",
            compression <- "compression",
            bore_stroke <- "bore_stroke",
            fuel_system <- "fuel_system",
            cooling <- "cooling",
            // Transmission
            gearbox <- "gearbox",
            transmission <- "transmission",
            clutch <- "clutch",
            // Chassis
            frame <- "frame",
            front_suspension <- "front_suspension",
            rear_suspension <- "rear_suspension",
            // Brakes
            front_brakes <- "front_brakes",
            rear_brakes <- "rear_brakes",
            // Wheels and tyres
            front_tyre <- "front_tire",
            rear_tyre <- "rear_tire",
            front_wheel_travel <- "front_wheel_travel",
            rear_wheel_travel <- "rear_wheel_travel",
            // Dimensions
            wheelbase <- "wheelbase",
            seat_height <- "seat_height",
            ground_clearance <- "ground_clearance",
            // Weight and capacity
            dry_weight <- "dry_weight",
            wet_weight <- "wet_weight",
            fuel_capacity <- "fuel_capacity",
            // Performance
            top_speed <- "top_speed",
        );

        // Category and the matched catalogue name, kept for reference.
        if let Some(category) = present(data.get("type")) {
            spec.insert_additional("category", category.clone());
        }
        if let Some(model) = present(data.get("model")) {
            spec.insert_additional("api_model_name", model.clone());
        }

        for (key, value) in data {
            if !MAPPED_KEYS.contains(&key.as_str()) {
                spec.insert_additional(key.clone(), value.clone());
            }
        }

        spec
    }

    /// One direct catalogue request. Returns the first result mapped, or
    /// `None` on an empty result set or any failure.
    fn try_direct(
        &self,
        make: &str,
        model: Option<&str>,
        year: Option<i32>,
    ) -> Option<Specification> {
        let year_param = year.map(|y| y.to_string());
        let mut params: Vec<(&str, &str)> = vec![("make", make)];
        if let Some(model) = model {
            params.push(("model", model));
        }
        if let Some(year) = year_param.as_deref() {
            params.push(("year", year));
        }
        let url = format!("{}?{}", MOTORCYCLES_URL, build_query(&params));

        tracing::info!(
            "Trying API Ninjas motorcycles: make={} model={:?} year={:?}",
            make,
            model,
            year
        );

        let items = self.get_result_array(&url)?;
        let first = items.first()?.as_object()?;

        tracing::info!(
            "API Ninjas found {} motorcycle result(s); matched model {}",
            items.len(),
            first
                .get("model")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown")
        );

        let mut spec = Self::map_payload(first);
        spec.stamp(&url);
        Some(spec)
    }

    /// Every catalogue entry for a make and year, with no model filter.
    /// Failures collapse to an empty batch.
    fn fetch_all_for_year(&self, make: &str, year: i32) -> (Vec<Value>, String) {
        let year = year.to_string();
        let url = format!(
            "{}?{}",
            MOTORCYCLES_URL,
            build_query(&[("make", make), ("year", &year)])
        );
        let items = self.get_result_array(&url).unwrap_or_default();
        (items, url)
    }

    /// Batch search: fetch everything for the make/year and accept the
    /// best similarity-ranked candidate at or above the threshold.
    fn search_year_batch(
        &self,
        make_variant: &str,
        expected_make: &str,
        target_model: &str,
        year: i32,
    ) -> Option<Specification> {
        let (results, url) = self.fetch_all_for_year(make_variant, year);
        if results.is_empty() {
            return None;
        }

        let (best, score) = find_best_model_match(target_model, &results, expected_make)?;
        let mut spec = Self::map_payload(best.as_object()?);
        spec.stamp(&url);

        tracing::info!(
            "Fuzzy-matched {} to {} at year {} (score {:.1})",
            target_model,
            best.get("model").and_then(serde_json::Value::as_str).unwrap_or("unknown"),
            year,
            score
        );
        Some(spec)
    }

    /// GET a catalogue URL, folding transport errors, error statuses and
    /// unexpected shapes into `None`.
    fn get_result_array(&self, url: &str) -> Option<Vec<Value>> {
        let headers = [("X-Api-Key", self.api_key.clone())];
        let response = match self.http.get_json(url, &headers, REQUEST_TIMEOUT) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Motorcycle lookup request failed: {}", e);
                return None;
            }
        };

        if !response.is_success() {
            tracing::warn!(
                "API Ninjas motorcycles returned status {}",
                response.status
            );
            return None;
        }

        match response.body {
            Value::Array(items) if !items.is_empty() => Some(items),
            Value::Array(_) => None,
            _ => {
                tracing::warn!("API Ninjas motorcycles returned a non-array payload");
                None
            }
        }
    }
}

impl SpecAdapter for NinjaMotorcyclesAdapter {
    fn supports(&self, vehicle_type: &str, _vehicle: &Vehicle) -> bool {
        MOTORCYCLE_TYPES.contains(&vehicle_type.to_lowercase().as_str())
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
            tracing::error!("API Ninjas API key not configured");
            return None;
        }

        let make_variants = make_variations(make);
        let model_variants = model_variations(model);

        for make_variant in &make_variants {
            for model_variant in &model_variants {
                if let Some(spec) =
                    self.try_direct(make_variant, Some(model_variant), vehicle.year)
                {
                    return Some(spec);
                }
            }

            // No direct pair worked for this make variant; widen to the
            // whole make/year batch, then walk nearby years.
            if let Some(year) = vehicle.year {
                if let Some(spec) = self.search_year_batch(make_variant, make, model, year) {
                    return Some(spec);
                }

                let nearby: Vec<i32> =
                    NEARBY_YEAR_OFFSETS.iter().map(|offset| year + offset).collect();
                tracing::info!(
                    "Trying nearby years {:?} for {} {}",
                    nearby,
                    make_variant,
                    model
                );
                for near_year in nearby {
                    if let Some(spec) =
                        self.search_year_batch(make_variant, make, model, near_year)
                    {
                        tracing::info!(
                            "Matched {} {} using nearby year {}",
                            make,
                            model,
                            near_year
                        );
                        return Some(spec);
                    }
                }
            }
        }

        tracing::warn!(
            "No motorcycle data found for {} {} year {:?} after trying {} make and {} model variants",
            make,
            model,
            vehicle.year,
            make_variants.len(),
            model_variants.len()
        );
        None
    }

    fn search_models(&self, make: &str, model: Option<&str>) -> Vec<String> {
        if self.api_key.is_empty() {
            tracing::error!("API Ninjas API key not configured");
            return Vec::new();
        }

        let url = format!("{}?make={}", MODELS_URL, urlencoding::encode(make));
        let headers = [("X-Api-Key", self.api_key.clone())];
        let response = match self.http.get_json(&url, &headers, REQUEST_TIMEOUT) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Model search failed for make {}: {}", make, e);
                return Vec::new();
            }
        };

        if !response.is_success() {
            tracing::warn!(
                "Model search for {} returned status {}",
                make,
                response.status
            );
            return Vec::new();
        }

        let Some(items) = response.body.as_array() else {
            return Vec::new();
        };
        let mut models: Vec<String> = items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        if let Some(filter) = model {
            let filter = filter.to_lowercase();
            models.retain(|name| name.to_lowercase().contains(&filter));
        }

        models
    }

    fn name(&self) -> &'static str {
        "api-ninjas-motorcycles"
    }
}

/// Rank a batch of catalogue entries against the target model name.
///
/// Entries whose reported make does not case-insensitively contain the
/// expected make are excluded before scoring; the catalogue occasionally
/// lists a model under the wrong manufacturer and a perfect name match
/// must not resurrect such an entry. Returns the best candidate and its
/// score, only when the score reaches [`MATCH_THRESHOLD`].
fn find_best_model_match<'a>(
    target_model: &str,
    results: &'a [Value],
    expected_make: &str,
) -> Option<(&'a Value, f64)> {
    let expected = expected_make.to_lowercase();

    let mut best: Option<(&Value, f64)> = None;
    for result in results {
        let api_make = result.get("make").and_then(Value::as_str).unwrap_or("");
        let api_model = result.get("model").and_then(Value::as_str).unwrap_or("");

        if !api_make.to_lowercase().contains(&expected) {
            tracing::debug!(
                "Skipping {} {}: make does not match expected {}",
                api_make,
                api_model,
                expected_make
            );
            continue;
        }

        let score = similarity(target_model, api_model);
        tracing::debug!(
            "Comparing {} against {}: score {:.1}",
            target_model,
            api_model,
            score
        );

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((result, score));
        }
    }

    let (candidate, score) = best?;
    tracing::info!(
        "Best match score {:.1}: {}",
        score,
        if score >= MATCH_THRESHOLD {
            "accepted"
        } else {
            "rejected"
        }
    );

    (score >= MATCH_THRESHOLD).then_some((candidate, score))
}
