//! User interface components for the NEO dashboard
//!
//! This crate provides the egui building blocks shared by the views:
//! theme, page shell, the date-range form and widget ID helpers.

pub mod form;
pub mod shell;
pub mod theme;
pub mod widget_utils;

/// Re-export commonly used types
pub use form::date_range_form;
pub use shell::{error_banner, loading_overlay, page_header, refresh_bar, search_placeholder};
pub use theme::{apply_theme, Theme};
pub use widget_utils::{widget_id, WidgetId};

// Widget creation helpers
pub fn icon_button(ui: &mut egui::Ui, icon: &str, tooltip: &str, enabled: bool) -> egui::Response {
    ui.add_enabled(enabled, egui::Button::new(icon))
        .on_hover_text(tooltip)
}

// Common icon definitions
pub mod icons {
    pub const PREVIOUS: &str = "◀";
    pub const NEXT: &str = "▶";
    pub const WARNING: &str = "⚠";
    pub const SAVE: &str = "💾";
    pub const SEARCH: &str = "🔍";
}
