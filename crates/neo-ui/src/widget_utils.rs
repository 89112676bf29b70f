//! Widget ID helpers
//!
//! Tables and combo boxes are rebuilt every frame; stable, composed IDs
//! keep their scroll and popup state attached to the right widget.

use egui::Id;
use std::fmt::Display;

/// Widget ID builder that combines several components
pub struct WidgetId {
    components: Vec<String>,
}

impl WidgetId {
    /// Create a new widget ID builder
    pub fn new(base: impl Display) -> Self {
        Self {
            components: vec![base.to_string()],
        }
    }

    /// Add a component to the ID
    pub fn with(mut self, component: impl Display) -> Self {
        self.components.push(component.to_string());
        self
    }

    /// Build the final ID string
    pub fn build(&self) -> String {
        self.components.join("_")
    }

    /// Create an egui ID from this widget ID
    pub fn id(&self) -> Id {
        Id::new(self.build())
    }
}

/// Two-part widget ID, e.g. `widget_id("rows_per_page", "results")`
pub fn widget_id(base: impl Display, suffix: impl Display) -> String {
    format!("{}_{}", base, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_id_builder() {
        let id = WidgetId::new("neo_table").with("metric").with(3).build();
        assert_eq!(id, "neo_table_metric_3");
    }

    #[test]
    fn test_same_components_same_id() {
        let a = WidgetId::new("pagination").with("results").id();
        let b = WidgetId::new("pagination").with("results").id();
        assert_eq!(a, b);
        assert_ne!(a, WidgetId::new("pagination").with("export").id());
    }

    #[test]
    fn test_widget_id_helper() {
        assert_eq!(widget_id("rows_per_page", "results"), "rows_per_page_results");
    }
}
