//! Unit systems, logical dimensions and the sort-key lookup table

use serde::{Deserialize, Serialize};

/// Feet in one meter
pub const FEET_PER_METER: f64 = 3.28084;

/// Miles in one kilometer
pub const MILES_PER_KM: f64 = 0.621371;

/// Miles per hour in one kilometer per hour
pub const MPH_PER_KMH: f64 = 0.621371;

/// Measurement system used for display and sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
}

impl Unit {
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Metric => "Metric",
            Unit::Imperial => "Imperial",
        }
    }

    pub fn toggled(&self) -> Unit {
        match self {
            Unit::Metric => Unit::Imperial,
            Unit::Imperial => Unit::Metric,
        }
    }
}

/// Unit-independent quantity a column measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Size,
    Closeness,
    Velocity,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Size, Dimension::Closeness, Dimension::Velocity];

    /// Column header text
    pub fn title(&self) -> &'static str {
        match self {
            Dimension::Size => "Size",
            Dimension::Closeness => "Closeness to Earth",
            Dimension::Velocity => "Relative Velocity",
        }
    }

    /// Unit suffix used by the formatter
    pub fn suffix(&self, unit: Unit) -> &'static str {
        match (self, unit) {
            (Dimension::Size, Unit::Metric) => "m",
            (Dimension::Size, Unit::Imperial) => "ft",
            (Dimension::Closeness, Unit::Metric) => "km",
            (Dimension::Closeness, Unit::Imperial) => "mi",
            (Dimension::Velocity, Unit::Metric) => "km/h",
            (Dimension::Velocity, Unit::Imperial) => "mph",
        }
    }
}

/// Sortable numeric field of a [`crate::NeoItem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    SizeMeters,
    ClosenessKm,
    RelativeVelocityKmH,
    SizeFeet,
    ClosenessMiles,
    RelativeVelocityMiH,
}

/// `(dimension, metric key, imperial key)`; metric and imperial key sets are disjoint
const KEY_TABLE: [(Dimension, SortKey, SortKey); 3] = [
    (Dimension::Size, SortKey::SizeMeters, SortKey::SizeFeet),
    (Dimension::Closeness, SortKey::ClosenessKm, SortKey::ClosenessMiles),
    (Dimension::Velocity, SortKey::RelativeVelocityKmH, SortKey::RelativeVelocityMiH),
];

impl SortKey {
    /// Key measuring `dimension` in `unit`
    pub fn new(dimension: Dimension, unit: Unit) -> SortKey {
        let (_, metric, imperial) = KEY_TABLE
            .iter()
            .copied()
            .find(|(d, _, _)| *d == dimension)
            .unwrap_or(KEY_TABLE[0]);
        match unit {
            Unit::Metric => metric,
            Unit::Imperial => imperial,
        }
    }

    /// Logical dimension this key measures
    pub fn dimension(&self) -> Dimension {
        KEY_TABLE
            .iter()
            .find(|(_, metric, imperial)| metric == self || imperial == self)
            .map(|(d, _, _)| *d)
            .unwrap_or(Dimension::Size)
    }

    /// Unit system this key belongs to
    pub fn unit(&self) -> Unit {
        if KEY_TABLE.iter().any(|(_, metric, _)| metric == self) {
            Unit::Metric
        } else {
            Unit::Imperial
        }
    }

    /// Equivalent key in another unit system, preserving the dimension
    pub fn for_unit(&self, unit: Unit) -> SortKey {
        SortKey::new(self.dimension(), unit)
    }

    /// Backend field name
    pub fn field_name(&self) -> &'static str {
        match self {
            SortKey::SizeMeters => "sizeMeters",
            SortKey::ClosenessKm => "closenessKm",
            SortKey::RelativeVelocityKmH => "relativeVelocityKmH",
            SortKey::SizeFeet => "sizeFeet",
            SortKey::ClosenessMiles => "closenessMiles",
            SortKey::RelativeVelocityMiH => "relativeVelocityMiH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_preserves_dimension() {
        for dimension in Dimension::ALL {
            let metric = SortKey::new(dimension, Unit::Metric);
            let imperial = metric.for_unit(Unit::Imperial);
            assert_eq!(imperial.dimension(), dimension);
            assert_eq!(imperial.unit(), Unit::Imperial);
            assert_eq!(imperial.for_unit(Unit::Metric), metric);
        }
    }

    #[test]
    fn test_key_sets_are_disjoint() {
        let metric: Vec<_> = Dimension::ALL.iter().map(|d| SortKey::new(*d, Unit::Metric)).collect();
        let imperial: Vec<_> = Dimension::ALL.iter().map(|d| SortKey::new(*d, Unit::Imperial)).collect();
        assert!(metric.iter().all(|k| !imperial.contains(k)));
    }

    #[test]
    fn test_sort_key_serde_matches_field_names() {
        let json = serde_json::to_string(&SortKey::RelativeVelocityMiH).unwrap();
        assert_eq!(json, "\"relativeVelocityMiH\"");
        let key: SortKey = serde_json::from_str("\"closenessKm\"").unwrap();
        assert_eq!(key, SortKey::ClosenessKm);
        assert_eq!(key.field_name(), "closenessKm");
    }
}
