//! Page-state manager: sorting, unit system and pagination for the table

use serde::{Deserialize, Serialize};

use crate::sort::{comparator, stable_sort, Order};
use crate::types::NeoItem;
use crate::units::{SortKey, Unit};

/// Page sizes offered by the pagination controls
pub const ROWS_PER_PAGE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

/// View state of the results table.
///
/// `order_by` always belongs to the key set of `unit` and `rows_per_page`
/// is at least 1, including after deserialization. The page index is not
/// persisted; a restored state starts on the first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredPageState")]
pub struct PageState {
    order: Order,
    order_by: SortKey,
    unit: Unit,
    #[serde(skip_serializing)]
    page: usize,
    rows_per_page: usize,
}

/// Persisted shape of [`PageState`], normalized on the way in
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPageState {
    #[serde(default)]
    order: Order,
    order_by: SortKey,
    #[serde(default)]
    unit: Unit,
    rows_per_page: usize,
}

impl From<StoredPageState> for PageState {
    fn from(stored: StoredPageState) -> Self {
        Self {
            order: stored.order,
            order_by: stored.order_by.for_unit(stored.unit),
            unit: stored.unit,
            page: 0,
            rows_per_page: stored.rows_per_page.max(1),
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            order: Order::Asc,
            order_by: SortKey::ClosenessKm,
            unit: Unit::Metric,
            page: 0,
            rows_per_page: 10,
        }
    }
}

impl PageState {
    /// Create the default page state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn order_by(&self) -> SortKey {
        self.order_by
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Sort by `key`, toggling direction when it is already the active key
    pub fn request_sort(&mut self, key: SortKey) {
        let key = key.for_unit(self.unit);
        if key == self.order_by {
            self.order = self.order.toggled();
        } else {
            self.order_by = key;
            self.order = Order::Asc;
        }
    }

    /// Switch unit system, keeping the sort dimension, direction and page
    pub fn change_unit(&mut self, unit: Unit) {
        self.unit = unit;
        self.order_by = self.order_by.for_unit(unit);
    }

    /// Jump to a page; out-of-range pages simply render empty
    pub fn change_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Change the page size and go back to the first page
    pub fn change_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page.max(1);
        self.page = 0;
    }

    /// Sort key actually used for the current unit
    pub fn effective_key(&self) -> SortKey {
        self.order_by.for_unit(self.unit)
    }

    /// Whether `key` is the active sort column
    pub fn is_sorted_by(&self, key: SortKey) -> bool {
        self.effective_key() == key.for_unit(self.unit)
    }

    /// All items in display order
    pub fn sorted_rows(&self, items: &[NeoItem]) -> Vec<NeoItem> {
        stable_sort(items, comparator(self.order, self.effective_key()))
    }

    /// Items on the current page, clamped to the available rows
    pub fn paged_rows(&self, items: &[NeoItem]) -> Vec<NeoItem> {
        let sorted = self.sorted_rows(items);
        let (start, end) = self.window(sorted.len());
        sorted[start..end].to_vec()
    }

    /// Half-open row range of the current page within `total` rows
    pub fn window(&self, total: usize) -> (usize, usize) {
        let start = self.page.saturating_mul(self.rows_per_page).min(total);
        let end = start.saturating_add(self.rows_per_page).min(total);
        (start, end)
    }

    /// Number of pages needed for `total` rows (at least one)
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.rows_per_page.max(1)).max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.page.saturating_add(1) < self.page_count(total)
    }

    /// Pagination caption such as `11–20 of 42`
    pub fn range_label(&self, total: usize) -> String {
        let (start, end) = self.window(total);
        if start == end {
            format!("0 of {}", total)
        } else {
            format!("{}–{} of {}", start + 1, end, total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Dimension;

    fn items(n: usize) -> Vec<NeoItem> {
        (0..n)
            .map(|i| NeoItem {
                id: i.to_string(),
                name: format!("NEO {}", i),
                size_meters: (n - i) as f64,
                size_feet: None,
                closeness_km: (i % 7) as f64,
                closeness_miles: None,
                relative_velocity_km_h: (i * 3 % 11) as f64,
                relative_velocity_mi_h: None,
                hazardous: i % 2 == 0,
            })
            .collect()
    }

    #[test]
    fn test_defaults() {
        let state = PageState::new();
        assert_eq!(state.order(), Order::Asc);
        assert_eq!(state.order_by(), SortKey::ClosenessKm);
        assert_eq!(state.unit(), Unit::Metric);
        assert_eq!(state.page(), 0);
        assert_eq!(state.rows_per_page(), 10);
    }

    #[test]
    fn test_request_sort_twice_toggles() {
        let mut state = PageState::new();
        state.request_sort(SortKey::SizeMeters);
        assert_eq!(state.order_by(), SortKey::SizeMeters);
        assert_eq!(state.order(), Order::Asc);

        state.request_sort(SortKey::SizeMeters);
        assert_eq!(state.order(), Order::Desc);

        state.request_sort(SortKey::SizeMeters);
        assert_eq!(state.order(), Order::Asc);
    }

    #[test]
    fn test_new_key_resets_to_ascending() {
        let mut state = PageState::new();
        state.request_sort(SortKey::ClosenessKm);
        assert_eq!(state.order(), Order::Desc);

        state.request_sort(SortKey::RelativeVelocityKmH);
        assert_eq!(state.order_by(), SortKey::RelativeVelocityKmH);
        assert_eq!(state.order(), Order::Asc);
    }

    #[test]
    fn test_unit_change_keeps_dimension_order_and_page() {
        let mut state = PageState::new();
        state.request_sort(SortKey::SizeMeters);
        state.request_sort(SortKey::SizeMeters);
        state.change_page(2);

        state.change_unit(Unit::Imperial);
        assert_eq!(state.order_by(), SortKey::SizeFeet);
        assert_eq!(state.order_by().dimension(), Dimension::Size);
        assert_eq!(state.order(), Order::Desc);
        assert_eq!(state.page(), 2);

        state.change_unit(Unit::Metric);
        assert_eq!(state.order_by(), SortKey::SizeMeters);
    }

    #[test]
    fn test_request_sort_with_other_unit_key_is_remapped() {
        let mut state = PageState::new();
        state.change_unit(Unit::Imperial);
        state.request_sort(SortKey::ClosenessKm);
        assert_eq!(state.order_by(), SortKey::ClosenessMiles);
        assert_eq!(state.order(), Order::Desc);
    }

    #[test]
    fn test_rows_per_page_resets_page() {
        let mut state = PageState::new();
        state.change_page(3);
        state.change_rows_per_page(25);
        assert_eq!(state.page(), 0);
        assert_eq!(state.rows_per_page(), 25);

        state.change_rows_per_page(0);
        assert_eq!(state.rows_per_page(), 1);
    }

    #[test]
    fn test_paged_rows_length_property() {
        for total in [0usize, 1, 7, 10, 23] {
            let data = items(total);
            for rows_per_page in [1usize, 5, 10] {
                for page in 0..6 {
                    let mut state = PageState::new();
                    state.change_rows_per_page(rows_per_page);
                    state.change_page(page);
                    let expected = rows_per_page.min(total.saturating_sub(page * rows_per_page));
                    assert_eq!(state.paged_rows(&data).len(), expected);
                }
            }
        }
    }

    #[test]
    fn test_paged_rows_follow_sorted_order() {
        let data = items(12);
        let mut state = PageState::new();
        state.request_sort(SortKey::SizeMeters);
        state.change_rows_per_page(5);
        state.change_page(1);

        let page: Vec<f64> = state.paged_rows(&data).iter().map(|i| i.size_meters).collect();
        assert_eq!(page, vec![6.0, 7.0, 8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_overrun_page_is_empty() {
        let data = items(3);
        let mut state = PageState::new();
        state.change_page(usize::MAX);
        assert!(state.paged_rows(&data).is_empty());
        assert_eq!(state.range_label(3), "0 of 3");
    }

    #[test]
    fn test_far_page_has_no_next() {
        let mut state = PageState::new();
        state.change_page(usize::MAX);
        assert_eq!(state.range_label(3), "0 of 3");
        assert!(!state.has_next(3));
        assert!(state.has_previous());
        assert_eq!(state.page_count(usize::MAX), usize::MAX / 10 + 1);
    }

    #[test]
    fn test_pagination_helpers() {
        let mut state = PageState::new();
        assert_eq!(state.page_count(0), 1);
        assert_eq!(state.page_count(42), 5);
        assert!(!state.has_previous());
        assert!(state.has_next(42));

        state.change_page(4);
        assert_eq!(state.range_label(42), "41–42 of 42");
        assert!(!state.has_next(42));
        assert!(state.has_previous());
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let mut state = PageState::new();
        state.change_unit(Unit::Imperial);
        state.change_rows_per_page(50);
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"unit\":\"imperial\""));
        let restored: PageState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_restored_state_is_normalized() {
        let restored: PageState = serde_json::from_str(
            r#"{"order":"asc","orderBy":"sizeFeet","unit":"metric","page":0,"rowsPerPage":0}"#,
        )
        .unwrap();
        assert_eq!(restored.rows_per_page(), 1);
        assert_eq!(restored.order_by(), SortKey::SizeMeters);
        assert_eq!(restored.unit(), Unit::Metric);

        let data = items(3);
        assert_eq!(restored.paged_rows(&data).len(), 1);
        assert_eq!(restored.range_label(3), "1–1 of 3");
        assert!(restored.has_next(3));
    }

    #[test]
    fn test_page_is_not_persisted() {
        let mut state = PageState::new();
        state.change_page(7);
        let json = serde_json::to_string(&state).unwrap();
        assert!(!json.contains("\"page\""));

        let restored: PageState =
            serde_json::from_str(r#"{"order":"desc","orderBy":"closenessKm","unit":"metric","page":9,"rowsPerPage":25}"#)
                .unwrap();
        assert_eq!(restored.page(), 0);
        assert_eq!(restored.order(), Order::Desc);
        assert_eq!(restored.rows_per_page(), 25);
    }
}
