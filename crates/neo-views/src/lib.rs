//! Result views for the NEO dashboard

pub mod export;
mod pagination;
mod tables;
mod toolbar;
mod unit_toggle;

pub use export::{default_file_name, export_csv, write_csv, ExportError};
pub use pagination::pagination_controls;
pub use tables::{NeoTableView, TableConfig};
pub use toolbar::{results_toolbar, ToolbarAction};
pub use unit_toggle::unit_toggle;
