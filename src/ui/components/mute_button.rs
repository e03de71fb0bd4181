//! Mute button UI component.

use crate::ui::theme::Theme;
use eframe::egui;

/// Mute toggle button.
pub struct MuteButton;

impl MuteButton {
    /// Button size in points.
    pub const SIZE: egui::Vec2 = egui::vec2(50.0, 40.0);

    /// Render the button with the given glyph. Returns true if clicked.
    pub fn show(ui: &mut egui::Ui, glyph: &str, theme: &Theme) -> bool {
        let button = egui::Button::new(egui::RichText::new(glyph).size(24.0).color(theme.text))
            .fill(theme.surface)
            .stroke(egui::Stroke::new(2.0, theme.border))
            .rounding(8.0)
            .min_size(Self::SIZE);

        ui.add(button).on_hover_text("Mute / unmute").clicked()
    }
}
