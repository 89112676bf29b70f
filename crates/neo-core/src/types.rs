//! Wire types shared between the backend client and the views

use serde::{Deserialize, Serialize};

use crate::units::{Dimension, SortKey, Unit, FEET_PER_METER, MILES_PER_KM, MPH_PER_KMH};

/// A single Near-Earth Object as normalized by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeoItem {
    /// Unique NASA/JPL identifier
    pub id: String,

    /// Display name or provisional designation
    pub name: String,

    /// Estimated diameter in meters
    pub size_meters: f64,

    /// Estimated diameter in feet, when the backend supplies it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_feet: Option<f64>,

    /// Closest approach distance in kilometers
    pub closeness_km: f64,

    /// Closest approach distance in miles, when the backend supplies it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closeness_miles: Option<f64>,

    /// Relative velocity in kilometers per hour
    pub relative_velocity_km_h: f64,

    /// Relative velocity in miles per hour, when the backend supplies it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_velocity_mi_h: Option<f64>,

    /// Potentially hazardous classification
    pub hazardous: bool,
}

impl NeoItem {
    /// Numeric value behind a sort key.
    ///
    /// Imperial values come from the backend when present and fall back to
    /// converting the metric field otherwise.
    pub fn value(&self, key: SortKey) -> f64 {
        match key {
            SortKey::SizeMeters => self.size_meters,
            SortKey::SizeFeet => self
                .size_feet
                .unwrap_or(self.size_meters * FEET_PER_METER),
            SortKey::ClosenessKm => self.closeness_km,
            SortKey::ClosenessMiles => self
                .closeness_miles
                .unwrap_or(self.closeness_km * MILES_PER_KM),
            SortKey::RelativeVelocityKmH => self.relative_velocity_km_h,
            SortKey::RelativeVelocityMiH => self
                .relative_velocity_mi_h
                .unwrap_or(self.relative_velocity_km_h * MPH_PER_KMH),
        }
    }

    /// Value of a logical dimension in the given unit system
    pub fn measure(&self, dimension: Dimension, unit: Unit) -> f64 {
        self.value(SortKey::new(dimension, unit))
    }
}

/// Payload of a successful query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeosResponse {
    pub start_date: String,
    pub end_date: String,
    pub count: usize,
    pub items: Vec<NeoItem>,
}

impl NeosResponse {
    /// Number of objects flagged as potentially hazardous
    pub fn hazardous_count(&self) -> usize {
        self.items.iter().filter(|item| item.hazardous).count()
    }
}

/// Parameters of a backend query, also the cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl QueryParams {
    pub fn new(start_date: impl Into<String>, end_date: Option<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date,
        }
    }
}

impl std::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.end_date {
            Some(end) => write!(f, "{} → {}", self.start_date, end),
            None => write!(f, "{} →", self.start_date),
        }
    }
}
