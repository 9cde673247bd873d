//! Credential and endpoint configuration for the upstream sources.
//!
//! Keys are optional by design: an adapter whose key is empty logs an
//! error and reports no-match instead of attempting requests, so a
//! partially configured deployment degrades gracefully.

use serde::{Deserialize, Serialize};

fn default_open_vehicle_base_url() -> String {
    "https://api.openvehicles.com/v1".to_string()
}

fn default_dvla_base_url() -> String {
    "https://driver-vehicle-licensing.api.gov.uk/vehicle-enquiry/v1/vehicles".to_string()
}

/// API credentials and endpoint overrides for the registered adapters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceCredentials {
    /// API key shared by the API Ninjas car and motorcycle sources.
    #[serde(default)]
    pub api_ninjas_key: String,
    /// Bearer token for the Open Vehicles API.
    #[serde(default)]
    pub open_vehicle_key: String,
    #[serde(default = "default_open_vehicle_base_url")]
    pub open_vehicle_base_url: String,
    /// Registration-lookup endpoint; overridable to point at an internal
    /// proxy service.
    #[serde(default = "default_dvla_base_url")]
    pub dvla_base_url: String,
}

impl Default for SourceCredentials {
    fn default() -> Self {
        Self {
            api_ninjas_key: String::new(),
            open_vehicle_key: String::new(),
            open_vehicle_base_url: default_open_vehicle_base_url(),
            dvla_base_url: default_dvla_base_url(),
        }
    }
}

impl SourceCredentials {
    /// Load credentials from the process environment. Missing variables
    /// leave the corresponding source unconfigured.
    pub fn from_env() -> Self {
        Self {
            api_ninjas_key: std::env::var("API_NINJAS_KEY").unwrap_or_default(),
            open_vehicle_key: std::env::var("OPENVEHICLE_API_KEY").unwrap_or_default(),
            open_vehicle_base_url: std::env::var("OPENVEHICLE_BASE_URL")
                .unwrap_or_else(|_| default_open_vehicle_base_url()),
            dvla_base_url: std::env::var("DVLA_LOOKUP_URL")
                .unwrap_or_else(|_| default_dvla_base_url()),
        }
    }
}
