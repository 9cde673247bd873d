//! Outbound HTTP collaborator.
//!
//! Adapters depend on the narrow [`HttpClient`] trait rather than on ureq
//! directly, so their search strategies can be exercised against a
//! scripted client in tests. The production implementation is
//! [`UreqClient`].

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// User agent sent with every upstream request
const USER_AGENT: &str = concat!("fleetspec/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while performing an upstream request.
///
/// Non-2xx statuses are not errors at this layer; they are reported via
/// [`JsonResponse::status`] so each adapter decides what it tolerates.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network failure or timeout before a response was received
    #[error("network error: {0}")]
    Network(String),

    /// Response body was not valid JSON
    #[error("parse error: {0}")]
    Parse(String),
}

/// A decoded upstream response.
#[derive(Debug, Clone)]
pub struct JsonResponse {
    pub status: u16,
    pub body: Value,
}

impl JsonResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal GET-with-headers contract consumed by the adapters.
///
/// Implementations must be safe to share across threads; adapters hold one
/// long-lived client and keep no per-lookup state of their own.
pub trait HttpClient: Send + Sync {
    fn get_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        timeout: Duration,
    ) -> Result<JsonResponse, HttpError>;
}

/// ureq-backed [`HttpClient`] used in production.
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new() -> Self {
        // Error statuses must surface as responses so adapters can treat
        // them as "this candidate failed" rather than a transport fault.
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.new_agent(),
        }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for UreqClient {
    fn get_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        timeout: Duration,
    ) -> Result<JsonResponse, HttpError> {
        let mut request = self
            .agent
            .get(url)
            .config()
            .timeout_global(Some(timeout))
            .build()
            .header("User-Agent", USER_AGENT);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let mut response = request
            .call()
            .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            // Error bodies are not guaranteed to be JSON; the status alone
            // carries the signal the adapters act on.
            return Ok(JsonResponse {
                status,
                body: Value::Null,
            });
        }

        let body: Value = response
            .body_mut()
            .read_json()
            .map_err(|e| HttpError::Parse(e.to_string()))?;

        Ok(JsonResponse { status, body })
    }
}
