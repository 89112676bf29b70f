use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Deep Space".to_string(),
            dark_mode: true,
        }
    }
}

/// Apply the dashboard theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };

    if theme.dark_mode {
        let bg_color = Color32::from_rgb(14, 17, 26);
        let panel_bg = Color32::from_rgb(22, 26, 38);
        let widget_bg = Color32::from_rgb(32, 37, 52);
        let hover_color = Color32::from_rgb(44, 50, 68);
        let active_color = Color32::from_rgb(56, 63, 84);
        let text_color = Color32::from_rgb(222, 226, 235);

        visuals.window_fill = panel_bg;
        visuals.panel_fill = panel_bg;
        visuals.extreme_bg_color = bg_color;
        visuals.faint_bg_color = widget_bg;

        visuals.widgets.noninteractive.bg_fill = widget_bg;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, Color32::from_rgb(52, 58, 76));
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);

        visuals.widgets.inactive.bg_fill = widget_bg;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, Color32::from_rgb(62, 68, 88));
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);

        visuals.widgets.hovered.bg_fill = hover_color;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Color32::from_rgb(80, 88, 110));
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_color);

        visuals.widgets.active.bg_fill = active_color;
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color());
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, text_color);

        visuals.code_bg_color = Color32::from_rgb(28, 32, 44);
    }

    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.rounding = Rounding::same(4.0);
    }

    visuals.selection.bg_fill = accent_color().linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent_color());
    visuals.hyperlink_color = accent_color();
    visuals.striped = true;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

/// Get the accent color for the theme
pub fn accent_color() -> Color32 {
    Color32::from_rgb(110, 160, 255)
}

/// Get the error color for the theme
pub fn error_color() -> Color32 {
    Color32::from_rgb(230, 80, 80)
}

/// Chip color for potentially hazardous objects
pub fn hazard_color() -> Color32 {
    Color32::from_rgb(235, 110, 60)
}

/// Chip color for objects that are not hazardous
pub fn safe_color() -> Color32 {
    Color32::from_rgb(80, 190, 120)
}
