use egui::Ui;
use neo_core::{PageState, ROWS_PER_PAGE_OPTIONS};
use neo_ui::{icon_button, icons, widget_id};

/// Rows-per-page selector, range caption and previous/next buttons.
///
/// Returns true when the page state changed.
pub fn pagination_controls(ui: &mut Ui, id: &str, state: &mut PageState, total: usize) -> bool {
    let mut changed = false;

    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        if icon_button(ui, icons::NEXT, "Next page", state.has_next(total)).clicked() {
            state.change_page(state.page() + 1);
            changed = true;
        }
        if icon_button(ui, icons::PREVIOUS, "Previous page", state.has_previous()).clicked() {
            state.change_page(state.page() - 1);
            changed = true;
        }

        ui.label(state.range_label(total));
        ui.add_space(12.0);

        let mut rows_per_page = state.rows_per_page();
        egui::ComboBox::from_id_source(widget_id("rows_per_page", id))
            .selected_text(rows_per_page.to_string())
            .width(60.0)
            .show_ui(ui, |ui| {
                for option in ROWS_PER_PAGE_OPTIONS {
                    ui.selectable_value(&mut rows_per_page, option, option.to_string());
                }
            });
        ui.label("Rows per page:");

        if rows_per_page != state.rows_per_page() {
            state.change_rows_per_page(rows_per_page);
            changed = true;
        }
    });

    changed
}
