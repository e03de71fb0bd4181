//! Widget styling and theme colors.
//!
//! Translucent dark panel with a green/blue slider track.

use eframe::egui;

/// Widget theme colors.
pub struct Theme {
    /// Panel fill (translucent black)
    pub panel: egui::Color32,

    /// Panel border
    pub panel_border: egui::Color32,

    /// Button and slider groove background
    pub surface: egui::Color32,

    /// Button border, pressed button background
    pub border: egui::Color32,

    /// Slider track below the handle
    pub track_low: egui::Color32,

    /// Slider track above the handle
    pub track_high: egui::Color32,

    /// Slider handle
    pub handle: egui::Color32,

    /// Label and glyph color
    pub text: egui::Color32,

    /// Label color while the device is not following the widget
    pub text_degraded: egui::Color32,
}

impl Theme {
    /// Corner radius of the panel.
    pub const PANEL_ROUNDING: f32 = 10.0;

    /// Create the dark widget theme.
    pub fn dark() -> Self {
        Self {
            panel: egui::Color32::from_black_alpha(180),
            panel_border: egui::Color32::from_gray(100),
            surface: egui::Color32::from_rgb(0x33, 0x33, 0x33),
            border: egui::Color32::from_rgb(0x55, 0x55, 0x55),
            track_low: egui::Color32::from_rgb(0x4C, 0xAF, 0x50),
            track_high: egui::Color32::from_rgb(0x21, 0x96, 0xF3),
            handle: egui::Color32::WHITE,
            text: egui::Color32::WHITE,
            text_degraded: egui::Color32::from_rgb(245, 158, 11),
        }
    }

    /// Frame for the central panel: rounded, bordered, translucent.
    pub fn panel_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.panel)
            .stroke(egui::Stroke::new(2.0, self.panel_border))
            .rounding(Self::PANEL_ROUNDING)
            .inner_margin(10.0)
    }

    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        // Transparent so only the rounded panel frame is drawn
        style.visuals.panel_fill = egui::Color32::TRANSPARENT;
        style.visuals.window_fill = self.panel;

        // Widget colors
        style.visuals.widgets.inactive.bg_fill = self.surface;
        style.visuals.widgets.inactive.weak_bg_fill = self.surface;
        style.visuals.widgets.inactive.bg_stroke = egui::Stroke::new(2.0, self.border);
        style.visuals.widgets.hovered.bg_fill = self.border;
        style.visuals.widgets.hovered.weak_bg_fill = self.border;
        style.visuals.widgets.active.bg_fill = self.border;
        style.visuals.widgets.active.weak_bg_fill = self.border;

        // Text colors
        style.visuals.widgets.noninteractive.fg_stroke.color = self.text;
        style.visuals.widgets.inactive.fg_stroke.color = self.text;
        style.visuals.widgets.hovered.fg_stroke.color = self.text;
        style.visuals.widgets.active.fg_stroke.color = self.handle;

        style.visuals.widgets.inactive.rounding = egui::Rounding::same(8.0);
        style.visuals.widgets.hovered.rounding = egui::Rounding::same(8.0);
        style.visuals.widgets.active.rounding = egui::Rounding::same(8.0);

        ctx.set_style(style);
    }

    /// Slider colors: `track_low` below the handle, `track_high` above it.
    ///
    /// The rail and the idle handle share `inactive.bg_fill`, so this is meant
    /// for a scope around the slider only.
    pub fn style_slider(&self, visuals: &mut egui::Visuals) {
        visuals.slider_trailing_fill = true;
        visuals.selection.bg_fill = self.track_low;
        visuals.widgets.inactive.bg_fill = self.track_high;
        visuals.widgets.inactive.fg_stroke = egui::Stroke::new(2.0, self.handle);
        visuals.widgets.hovered.fg_stroke = egui::Stroke::new(2.0, self.handle);
        visuals.widgets.active.fg_stroke = egui::Stroke::new(2.0, self.handle);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
