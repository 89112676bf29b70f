use egui::{RichText, Ui};
use neo_core::{NeosResponse, PageState, Unit};
use neo_ui::icons;

use crate::unit_toggle::unit_toggle;

/// What the user did in the results toolbar this frame
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ToolbarAction {
    pub unit_changed: Option<Unit>,
    pub export_requested: bool,
}

/// `Results: N (start → end)` caption with the unit toggle and export button
pub fn results_toolbar(ui: &mut Ui, response: &NeosResponse, state: &mut PageState) -> ToolbarAction {
    let mut action = ToolbarAction::default();

    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!(
                "Results: {} ({} → {})",
                response.count, response.start_date, response.end_date
            ))
            .strong(),
        );

        let hazardous = response.hazardous_count();
        if hazardous > 0 {
            ui.label(
                RichText::new(format!("{} hazardous", hazardous))
                    .color(neo_ui::theme::hazard_color()),
            );
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let export = ui.add_enabled(
                !response.items.is_empty(),
                egui::Button::new(format!("{} Export CSV", icons::SAVE)),
            );
            if export.on_hover_text("Save the sorted rows as CSV").clicked() {
                action.export_requested = true;
            }
            ui.separator();
            action.unit_changed = unit_toggle(ui, state);
        });
    });

    action
}
