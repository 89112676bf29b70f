//! Page chrome around the results: header, status banners and overlays

use egui::{Color32, Context, RichText, Ui};

use crate::icons;
use crate::theme::{accent_color, error_color};

const TITLE: &str = "NASA Near-Earth Objects";

const ABOUT: &str = "Pick a date range to list the asteroids and comets passing \
closest to Earth in that window, as reported by NASA's NeoWs feed. Leave the end \
date empty to search the seven days after the start date. Columns can be sorted \
and switched between metric and imperial units.";

/// Render the page heading and the about text
pub fn page_header(ui: &mut Ui) {
    ui.heading(TITLE);
    ui.add_space(4.0);
    ui.collapsing("About this app", |ui| {
        ui.label(RichText::new(ABOUT).weak());
    });
    ui.add_space(8.0);
}

/// Show a failed query's message in a framed banner
pub fn error_banner(ui: &mut Ui, message: &str) {
    egui::Frame::none()
        .fill(error_color().linear_multiply(0.2))
        .stroke(egui::Stroke::new(1.0, error_color()))
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(icons::WARNING).color(error_color()));
                ui.label(message);
            });
        });
    ui.add_space(8.0);
}

/// Shown before the first query is submitted
pub fn search_placeholder(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.label(RichText::new(icons::SEARCH).size(32.0).color(accent_color()));
        ui.add_space(12.0);
        ui.label(RichText::new("Select dates above to begin your search").size(16.0).weak());
    });
}

/// Thin animated bar while cached results are being refreshed
pub fn refresh_bar(ui: &mut Ui) {
    ui.add(
        egui::ProgressBar::new(0.0)
            .animate(true)
            .desired_width(ui.available_width()),
    );
}

/// Dim the window and show a spinner while a query has nothing to show yet
pub fn loading_overlay(ctx: &Context) {
    egui::Area::new("loading_overlay_bg")
        .fixed_pos([0.0, 0.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let screen_rect = ctx.screen_rect();
            ui.allocate_rect(screen_rect, egui::Sense::click_and_drag());
            ui.painter()
                .rect_filled(screen_rect, 0.0, Color32::from_black_alpha(140));
        });

    let size = egui::vec2(160.0, 80.0);
    egui::Area::new("loading_overlay_content")
        .fixed_pos(ctx.screen_rect().center() - size * 0.5)
        .order(egui::Order::Tooltip)
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(Color32::from_gray(40))
                .rounding(8.0)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add(egui::Spinner::new().size(24.0));
                        ui.label("Loading…");
                    });
                });
        });
}
