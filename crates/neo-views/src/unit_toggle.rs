use egui::Ui;
use neo_core::{PageState, Unit};

/// Metric/Imperial switch; returns the new unit when it was changed
pub fn unit_toggle(ui: &mut Ui, state: &mut PageState) -> Option<Unit> {
    let mut unit = state.unit();
    ui.horizontal(|ui| {
        for option in [Unit::Metric, Unit::Imperial] {
            ui.selectable_value(&mut unit, option, option.label());
        }
    });

    if unit == state.unit() {
        return None;
    }
    state.change_unit(unit);
    Some(unit)
}
