//! Adapter dispatcher.
//!
//! Coordinates the registered adapters for one vehicle lookup: filter by
//! applicability, walk in priority order, and take the first populated
//! specification. A result carries exactly one source's data; adapters
//! are never merged across sources.
//!
//! Each lookup is synchronous and stateless. Running lookups for
//! different vehicles concurrently is safe as long as the injected HTTP
//! client is itself safe to share.

use crate::adapters::SpecAdapter;
use crate::specification::Specification;
use crate::vehicle::Vehicle;

/// Dispatches vehicle lookups across the registered
/// [`adapters`](crate::adapters).
#[derive(Default)]
pub struct SpecificationScraper {
    adapters: Vec<Box<dyn SpecAdapter>>,
}

impl SpecificationScraper {
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Build a scraper with all four production adapters sharing one
    /// HTTP client.
    pub fn with_default_adapters(credentials: &crate::config::SourceCredentials) -> Self {
        use std::sync::Arc;

        use crate::adapters::{
            DvlaAdapter, NinjaCarsAdapter, NinjaMotorcyclesAdapter, OpenVehicleAdapter,
        };
        use crate::http::{HttpClient, UreqClient};

        let http: Arc<dyn HttpClient> = Arc::new(UreqClient::new());
        let mut scraper = Self::new();
        scraper.register(Box::new(DvlaAdapter::new(
            Arc::clone(&http),
            credentials.dvla_base_url.clone(),
        )));
        scraper.register(Box::new(NinjaMotorcyclesAdapter::new(
            Arc::clone(&http),
            credentials.api_ninjas_key.clone(),
        )));
        scraper.register(Box::new(NinjaCarsAdapter::new(
            Arc::clone(&http),
            credentials.api_ninjas_key.clone(),
        )));
        scraper.register(Box::new(OpenVehicleAdapter::new(
            http,
            credentials.open_vehicle_key.clone(),
            credentials.open_vehicle_base_url.clone(),
        )));
        scraper
    }

    /// Register an adapter, keeping the list ordered by priority
    /// descending. Registration order breaks ties.
    pub fn register(&mut self, adapter: Box<dyn SpecAdapter>) {
        self.adapters.push(adapter);
        self.adapters
            .sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    pub fn adapter_count(&self) -> usize {
        self.adapters.len()
    }

    /// Resolve specifications for a vehicle. The first adapter returning
    /// a non-empty specification wins; exhaustion yields `None` and the
    /// caller proceeds without one.
    pub fn fetch_specifications(&self, vehicle: &Vehicle) -> Option<Specification> {
        let vehicle_type = vehicle.type_name();
        tracing::info!(
            "Looking up specifications for {} {} year {:?} (type {}, {} adapters)",
            vehicle.make,
            vehicle.model,
            vehicle.year,
            vehicle_type,
            self.adapters.len()
        );

        if self.adapters.is_empty() {
            tracing::error!("No adapters registered");
            return None;
        }

        for adapter in &self.adapters {
            if !adapter.supports(vehicle_type, vehicle) {
                tracing::debug!(
                    "Adapter {} does not support vehicle type {}",
                    adapter.name(),
                    vehicle_type
                );
                continue;
            }

            tracing::info!(
                "Trying adapter {} (priority {})",
                adapter.name(),
                adapter.priority()
            );
            match adapter.fetch_specifications(vehicle) {
                Some(spec) if !spec.is_empty() => {
                    tracing::info!("Specification sourced from {}", adapter.name());
                    return Some(spec);
                }
                Some(_) => {
                    tracing::warn!("Adapter {} returned an empty specification", adapter.name())
                }
                None => tracing::warn!("Adapter {} returned no specification", adapter.name()),
            }
        }

        tracing::warn!(
            "No adapter could fetch specifications for {} {}",
            vehicle.make,
            vehicle.model
        );
        None
    }

    /// Search available model names for a make across the applicable
    /// adapters; the first non-empty list wins.
    pub fn search_models(&self, vehicle: &Vehicle, make: &str, model: Option<&str>) -> Vec<String> {
        let vehicle_type = vehicle.type_name();

        for adapter in &self.adapters {
            if !adapter.supports(vehicle_type, vehicle) {
                continue;
            }

            let models = adapter.search_models(make, model);
            if !models.is_empty() {
                tracing::info!(
                    "Adapter {} found {} models for make {}",
                    adapter.name(),
                    models.len(),
                    make
                );
                return models;
            }
        }

        Vec::new()
    }
}
