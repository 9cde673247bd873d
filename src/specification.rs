//! The normalized specification value object.
//!
//! A [`Specification`] is a flat, sparsely-populated record of technical
//! attributes. Every named field is optional: absence means "unknown",
//! never zero, so adapters must leave fields unset rather than defaulting
//! them. Attributes a source reports that have no named field here land in
//! the [`additional_info`](Specification::additional_info) bag verbatim.
//!
//! A specification carries exactly one source's data. It is constructed
//! fresh per lookup attempt, discarded if the attempt is a non-match, and
//! handed to the caller for persistence on success.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized vehicle specification sourced from one upstream lookup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Specification {
    // Engine
    pub engine_type: Option<String>,
    pub displacement: Option<String>,
    pub power: Option<String>,
    pub torque: Option<String>,
    pub compression: Option<String>,
    pub bore_stroke: Option<String>,
    pub fuel_system: Option<String>,
    pub cooling: Option<String>,

    // Transmission
    pub gearbox: Option<String>,
    pub transmission: Option<String>,
    pub clutch: Option<String>,

    // Chassis
    pub frame: Option<String>,
    pub front_suspension: Option<String>,
    pub rear_suspension: Option<String>,

    // Brakes
    pub front_brakes: Option<String>,
    pub rear_brakes: Option<String>,

    // Wheels and tyres
    pub front_tyre: Option<String>,
    pub rear_tyre: Option<String>,
    pub front_wheel_travel: Option<String>,
    pub rear_wheel_travel: Option<String>,

    // Dimensions
    pub wheelbase: Option<String>,
    pub seat_height: Option<String>,
    pub ground_clearance: Option<String>,

    // Weight and capacity
    pub dry_weight: Option<String>,
    pub wet_weight: Option<String>,
    pub fuel_capacity: Option<String>,

    // Performance
    pub top_speed: Option<String>,

    /// Source-specific extras with no named field (drivetrain, fuel
    /// economy figures, extra dimensions, raw payloads).
    pub additional_info: BTreeMap<String, Value>,

    // Provenance
    pub scraped_at: Option<DateTime<Utc>>,
    pub source_url: Option<String>,
}

/// Expands to an expression or statement over every named attribute field.
/// Keeps the field list in one place for the whole-record operations below.
macro_rules! with_named_fields {
    ($macro:ident!($($args:tt)*)) => {
        $macro!(
            $($args)*
            engine_type,
            displacement,
            power,
            torque,
            compression,
            bore_stroke,
            fuel_system,
            cooling,
            gearbox,
            transmission,
            clutch,
            frame,
            front_suspension,
            rear_suspension,
            front_brakes,
            rear_brakes,
            front_tyre,
            rear_tyre,
            front_wheel_travel,
            rear_wheel_travel,
            wheelbase,
            seat_height,
            ground_clearance,
            dry_weight,
            wet_weight,
            fuel_capacity,
            top_speed,
        )
    };
}

impl Specification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key into the additional-info bag. Within one mapping pass
    /// later writes to the same key win.
    pub fn insert_additional(&mut self, key: impl Into<String>, value: Value) {
        self.additional_info.insert(key.into(), value);
    }

    /// Stamp provenance metadata: retrieval time (now) and the source
    /// URL/identifier the data came from.
    pub fn stamp(&mut self, source_url: impl Into<String>) {
        self.scraped_at = Some(Utc::now());
        self.source_url = Some(source_url.into());
    }

    /// True when no named attribute and no additional-info entry is set.
    /// Adapters use this to discard mappings that resolved nothing.
    pub fn is_empty(&self) -> bool {
        macro_rules! all_unset {
            ($self:ident, $($field:ident,)+) => {
                true $(&& $self.$field.is_none())+
            };
        }
        with_named_fields!(all_unset!(self,)) && self.additional_info.is_empty()
    }

    /// Copy `other`'s named attributes into fields unset on `self`, and
    /// union the additional-info bags preferring `self`'s existing keys.
    ///
    /// The dispatcher never calls this: a lookup result carries one
    /// source's data only. It exists for callers that enrich an already
    /// stored specification from a later lookup.
    pub fn fill_missing_from(&mut self, other: &Specification) {
        macro_rules! fill {
            ($self:ident, $other:ident, $($field:ident,)+) => {
                $(
                    if $self.$field.is_none() {
                        $self.$field = $other.$field.clone();
                    }
                )+
            };
        }
        with_named_fields!(fill!(self, other,));

        for (key, value) in &other.additional_info {
            self.additional_info
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }

        if self.scraped_at.is_none() {
            self.scraped_at = other.scraped_at;
        }
        if self.source_url.is_none() {
            self.source_url = other.source_url.clone();
        }
    }
}
