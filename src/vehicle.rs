//! Vehicle input types.
//!
//! A [`Vehicle`] is supplied by the caller and is read-only to this crate;
//! adapters never mutate it, they only derive lookup candidates from it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A vehicle to resolve specifications for.
///
/// `make` and `model` are free text as entered by the user; `vehicle_type`
/// is the free-text class name the caller's database carries (e.g.
/// "Motorcycle", "Car", "Van"). Adapters match on it case-insensitively.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Vehicle {
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    /// Registration/plate identifier, when known.
    #[serde(default)]
    pub registration: Option<String>,
    /// Vehicle class name, when known.
    #[serde(default)]
    pub vehicle_type: Option<String>,
}

impl Vehicle {
    /// The vehicle class name used for adapter applicability checks.
    pub fn type_name(&self) -> &str {
        self.vehicle_type.as_deref().unwrap_or("Unknown")
    }

    /// Whether a non-blank registration is present.
    pub fn has_registration(&self) -> bool {
        self.registration
            .as_deref()
            .is_some_and(|reg| !reg.trim().is_empty())
    }
}

/// The vehicle classes recognized across the upstream sources.
///
/// Parsing is case-insensitive ("ev", "EV" and "Ev" all resolve to
/// [`VehicleClass::Ev`]); class names outside this set simply fail to
/// parse, which adapters treat as "not supported".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum VehicleClass {
    Car,
    Motorcycle,
    Van,
    Truck,
    #[strum(serialize = "EV")]
    Ev,
}
