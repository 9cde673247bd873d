//! Pluggable vehicle specification sources.
//!
//! Each adapter wraps one upstream data source behind the [`SpecAdapter`]
//! contract: the dispatcher asks [`supports`](SpecAdapter::supports) to
//! filter, orders the survivors by [`priority`](SpecAdapter::priority)
//! descending, and calls
//! [`fetch_specifications`](SpecAdapter::fetch_specifications) on each
//! until one returns a populated specification. Specification lookup is a
//! best-effort enrichment, never a required operation, so no failure mode
//! inside an adapter is allowed to escape as an error; everything folds
//! into "no match" and the next candidate or adapter gets its turn.

pub mod dvla;
pub mod ninja_cars;
pub mod ninja_motorcycles;
pub mod open_vehicle;

pub use dvla::DvlaAdapter;
pub use ninja_cars::NinjaCarsAdapter;
pub use ninja_motorcycles::NinjaMotorcyclesAdapter;
pub use open_vehicle::OpenVehicleAdapter;

use std::time::Duration;

use serde_json::Value;

use crate::specification::Specification;
use crate::vehicle::Vehicle;

/// Timeout for each individual upstream attempt. A slow candidate aborts
/// only itself; the enclosing search loop moves on.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Vehicle type names handled by the motorcycle source and excluded from
/// the car source.
pub(crate) const MOTORCYCLE_TYPES: &[&str] = &["motorcycle", "motorbike", "bike"];

/// One pluggable source of vehicle specification data.
pub trait SpecAdapter: Send + Sync {
    /// Whether this adapter can resolve specifications for the given
    /// vehicle type name.
    fn supports(&self, vehicle_type: &str, vehicle: &Vehicle) -> bool;

    /// Relative ordering between adapters, 0-100, higher tried first.
    fn priority(&self) -> u8;

    /// Best-effort lookup. Configuration, transport, and parse failures
    /// are logged and folded into `None`.
    fn fetch_specifications(&self, vehicle: &Vehicle) -> Option<Specification>;

    /// List candidate model names for a make, optionally filtered by a
    /// partial model name. Sources without a models endpoint return an
    /// empty list.
    fn search_models(&self, _make: &str, _model: Option<&str>) -> Vec<String> {
        Vec::new()
    }

    /// Diagnostic name used in logs.
    fn name(&self) -> &'static str;
}

/// Build an URL query string from key/value pairs.
pub(crate) fn build_query(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Filter out values that carry no data. JSON `null` and the empty string
/// count as absent; the number `0` is real data and passes through.
pub(crate) fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value),
    }
}

/// Render a JSON scalar the way a form field would show it: strings
/// unquoted, everything else via its JSON representation.
pub(crate) fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Copy a payload field into a named specification field when present.
pub(crate) fn set_field(field: &mut Option<String>, value: Option<&Value>) {
    if let Some(value) = present(value) {
        *field = Some(scalar_string(value));
    }
}
