//! Date-range form widget

use egui::{Key, RichText, TextEdit, Ui};
use neo_core::{DateRangeForm, QueryParams};

use crate::icons;
use crate::theme::error_color;

/// Render the form; returns the resolved query when it is submitted and valid.
///
/// Pressing Enter in either field submits, same as the button.
pub fn date_range_form(ui: &mut Ui, form: &mut DateRangeForm) -> Option<QueryParams> {
    let errors = form.errors().clone();
    let mut submit = false;

    ui.horizontal_top(|ui| {
        submit |= date_field(ui, "Start date", &mut form.start_date, errors.start_date.as_deref());
        submit |= date_field(ui, "End date (optional)", &mut form.end_date, errors.end_date.as_deref());

        ui.vertical(|ui| {
            // Keep the button level with the text fields
            ui.label("");
            if ui.button(format!("{} Search", icons::SEARCH)).clicked() {
                submit = true;
            }
        });
    });

    if !submit {
        return None;
    }

    match form.submit() {
        Ok(params) => Some(params),
        Err(_) => None,
    }
}

fn date_field(ui: &mut Ui, label: &str, value: &mut String, error: Option<&str>) -> bool {
    let mut entered = false;
    ui.vertical(|ui| {
        ui.label(label);
        let response = ui.add(
            TextEdit::singleline(value)
                .hint_text("YYYY-MM-DD")
                .desired_width(130.0),
        );
        entered = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        if let Some(error) = error {
            ui.label(RichText::new(error).small().color(error_color()));
        }
    });
    entered
}
