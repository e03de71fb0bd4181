//! Volume slider UI component.
//!
//! Renders the vertical 0-100 volume slider.

use crate::ui::theme::Theme;
use eframe::egui::{self, SliderClamping};

/// Volume slider component.
pub struct VolumeSlider;

impl VolumeSlider {
    /// Render a vertical volume slider. Returns the new value if changed.
    pub fn show_vertical(ui: &mut egui::Ui, volume: u8, length: f32, theme: &Theme) -> Option<u8> {
        let mut value = volume;

        let response = ui
            .scope(|ui| {
                theme.style_slider(ui.visuals_mut());
                ui.spacing_mut().slider_width = length;
                ui.add(
                    egui::Slider::new(&mut value, 0..=100)
                        .vertical()
                        .show_value(false)
                        .clamping(SliderClamping::Always),
                )
            })
            .inner;

        if response.changed() {
            Some(value)
        } else {
            None
        }
    }
}
