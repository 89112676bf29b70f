//! Sortable, paginated NEO table

use egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};
use neo_core::format::{format_hazardous, format_item_field};
use neo_core::{Dimension, NeoItem, PageState, SortKey};
use neo_ui::theme::{hazard_color, safe_color};
use neo_ui::WidgetId;

/// Configuration for the results table
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub striped_rows: bool,
    pub resizable_columns: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            striped_rows: true,
            resizable_columns: true,
        }
    }
}

/// Table of the current page of results
pub struct NeoTableView {
    id: String,
    pub config: TableConfig,
}

impl NeoTableView {
    /// Create a new table view
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            config: TableConfig::default(),
        }
    }

    /// Render the current page of `items`.
    ///
    /// Header clicks go straight to [`PageState::request_sort`]; returns the
    /// key that was clicked, if any.
    pub fn show(&self, ui: &mut Ui, state: &mut PageState, items: &[NeoItem]) -> Option<SortKey> {
        let id = WidgetId::new(&self.id).with("table").id();
        let clicked = ui.push_id(id, |ui| self.show_table(ui, state, items)).inner;

        if let Some(key) = clicked {
            tracing::debug!(key = key.field_name(), "sort requested");
            state.request_sort(key);
        }
        clicked
    }

    fn show_table(&self, ui: &mut Ui, state: &PageState, items: &[NeoItem]) -> Option<SortKey> {
        let rows = state.paged_rows(items);
        let unit = state.unit();
        let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.8;
        let mut clicked = None;

        let mut builder = TableBuilder::new(ui)
            .striped(self.config.striped_rows)
            .resizable(self.config.resizable_columns)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .min_scrolled_height(0.0)
            .vscroll(true)
            .column(Column::initial(220.0).at_least(120.0).clip(true));

        for _ in Dimension::ALL {
            builder = builder.column(Column::initial(170.0).at_least(110.0).clip(true));
        }
        builder = builder.column(Column::remainder().at_least(90.0));

        builder
            .header(24.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Name");
                });

                for dimension in Dimension::ALL {
                    let key = SortKey::new(dimension, unit);
                    header.col(|ui| {
                        let active = state.is_sorted_by(key);
                        let title = if active {
                            format!("{} {}", dimension.title(), state.order().arrow())
                        } else {
                            dimension.title().to_string()
                        };

                        let response = ui
                            .selectable_label(active, RichText::new(title).strong())
                            .on_hover_text(format!("Sort by {}", key.field_name()));
                        if response.clicked() {
                            clicked = Some(key);
                        }
                    });
                }

                header.col(|ui| {
                    ui.strong("Hazardous");
                });
            })
            .body(|mut body| {
                if rows.is_empty() {
                    body.row(text_height, |mut row| {
                        row.col(|ui| {
                            ui.label(RichText::new("No results").weak());
                        });
                        for _ in Dimension::ALL {
                            row.col(|_| {});
                        }
                        row.col(|_| {});
                    });
                    return;
                }

                for item in &rows {
                    body.row(text_height, |mut row| {
                        row.col(|ui| {
                            ui.label(&item.name).on_hover_text(format!("id {}", item.id));
                        });
                        for dimension in Dimension::ALL {
                            row.col(|ui| {
                                ui.label(format_item_field(item, dimension, unit));
                            });
                        }
                        row.col(|ui| {
                            hazard_chip(ui, item.hazardous);
                        });
                    });
                }
            });

        clicked
    }
}

fn hazard_chip(ui: &mut Ui, hazardous: bool) {
    let color = if hazardous { hazard_color() } else { safe_color() };
    egui::Frame::none()
        .fill(color.linear_multiply(0.25))
        .stroke(egui::Stroke::new(1.0, color))
        .rounding(10.0)
        .inner_margin(egui::Margin::symmetric(8.0, 1.0))
        .show(ui, |ui| {
            ui.label(RichText::new(format_hazardous(hazardous)).small().color(color));
        });
}
