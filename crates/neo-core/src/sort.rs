//! Comparator and stable sort over numeric NEO fields

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::NeoItem;
use crate::units::SortKey;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn toggled(&self) -> Order {
        match self {
            Order::Asc => Order::Desc,
            Order::Desc => Order::Asc,
        }
    }

    /// Arrow shown next to an active column header
    pub fn arrow(&self) -> &'static str {
        match self {
            Order::Asc => "⏶",
            Order::Desc => "⏷",
        }
    }
}

/// Compare two items on a numeric field.
///
/// Uses a total order on `f64` so NaN values from a misbehaving backend
/// cannot break the sort.
pub fn compare(a: &NeoItem, b: &NeoItem, key: SortKey, order: Order) -> Ordering {
    let ordering = a.value(key).total_cmp(&b.value(key));
    match order {
        Order::Asc => ordering,
        Order::Desc => ordering.reverse(),
    }
}

/// Build a reusable comparator for `order` and `key`
pub fn comparator(order: Order, key: SortKey) -> impl Fn(&NeoItem, &NeoItem) -> Ordering {
    move |a, b| compare(a, b, key, order)
}

/// Sort into a new vector, breaking ties by original position.
///
/// The input slice is left untouched.
pub fn stable_sort<T, F>(items: &[T], comparator: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let mut indexed: Vec<(usize, &T)> = items.iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| comparator(a, b).then(ia.cmp(ib)));
    indexed.into_iter().map(|(_, item)| item.clone()).collect()
}
