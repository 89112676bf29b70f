//! Core functionality for the NEO dashboard
//!
//! This crate provides the data model and the pure data-shaping pipeline:
//! unit remapping, formatting, stable sorting, paging and date-range form
//! handling. Nothing in here touches the network or the UI.

pub mod events;
pub mod form;
pub mod format;
pub mod page;
pub mod sort;
pub mod types;
pub mod units;

// Re-export commonly used types
pub use events::{EventBus, Event, EventHandler, handler_from_fn};
pub use form::{DateRangeForm, FieldErrors};
pub use page::{PageState, ROWS_PER_PAGE_OPTIONS};
pub use sort::{Order, compare, comparator, stable_sort};
pub use types::{NeoItem, NeosResponse, QueryParams};
pub use units::{Dimension, SortKey, Unit};
