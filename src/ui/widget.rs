//! Floating widget implementation using eframe/egui.
//!
//! Displays the mute button, the volume label and the vertical slider, and
//! lets the user drag the frameless window around by its background.

use crate::controller::{DeviceSync, VolumeSnapshot};
use crate::ui::components::{MuteButton, VolumeSlider};
use crate::ui::theme::Theme;
use eframe::egui;

/// Window size in points.
pub const WINDOW_SIZE: egui::Vec2 = egui::vec2(70.0, 200.0);

/// Distance of the default position from the monitor's right edge.
const RIGHT_MARGIN: f32 = 80.0;

/// Distance of the default position from the monitor's top edge.
const TOP_MARGIN: f32 = 50.0;

/// Actions that can be triggered from the widget UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetAction {
    /// Slider moved to a new volume
    SetVolume(u8),
    /// Mute button clicked
    ToggleMute,
}

/// Widget window state.
pub struct VolumeWidget {
    /// Pending actions from the UI
    pub actions: Vec<WidgetAction>,
}

impl VolumeWidget {
    /// Create a new VolumeWidget.
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Render the widget content.
    pub fn show(&mut self, ctx: &egui::Context, snapshot: &VolumeSnapshot, theme: &Theme) {
        self.actions.clear();

        egui::CentralPanel::default()
            .frame(theme.panel_frame())
            .show(ctx, |ui| {
                // Background drag moves the window; widgets added later take priority
                let background = ui.interact(
                    ui.max_rect(),
                    ui.id().with("drag_area"),
                    egui::Sense::drag(),
                );
                if background.drag_started_by(egui::PointerButton::Primary) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }

                ui.vertical_centered(|ui| {
                    ui.spacing_mut().item_spacing.y = 10.0;

                    if MuteButton::show(ui, snapshot.mute_glyph(), theme) {
                        self.actions.push(WidgetAction::ToggleMute);
                    }

                    let label_color = match snapshot.sync {
                        DeviceSync::Applied => theme.text,
                        DeviceSync::UiOnly => theme.text_degraded,
                    };
                    let label = ui.label(
                        egui::RichText::new(snapshot.label())
                            .size(14.0)
                            .strong()
                            .color(label_color),
                    );
                    if snapshot.sync == DeviceSync::UiOnly {
                        label.on_hover_text("Audio device did not accept the change");
                    }

                    let length = ui.available_height().max(20.0);
                    if let Some(volume) =
                        VolumeSlider::show_vertical(ui, snapshot.volume, length, theme)
                    {
                        self.actions.push(WidgetAction::SetVolume(volume));
                    }
                });
            });
    }

    /// Take all pending actions.
    pub fn take_actions(&mut self) -> Vec<WidgetAction> {
        std::mem::take(&mut self.actions)
    }

    /// Default window position: near the top-right corner of the monitor.
    pub fn default_position(monitor_size: egui::Vec2) -> egui::Pos2 {
        egui::pos2((monitor_size.x - RIGHT_MARGIN).max(0.0), TOP_MARGIN)
    }
}

impl Default for VolumeWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_position_top_right() {
        let pos = VolumeWidget::default_position(egui::vec2(1920.0, 1080.0));
        assert_eq!(pos, egui::pos2(1840.0, 50.0));
    }

    #[test]
    fn test_default_position_tiny_monitor() {
        let pos = VolumeWidget::default_position(egui::vec2(40.0, 40.0));
        assert_eq!(pos.x, 0.0);
    }

    #[test]
    fn test_take_actions_drains() {
        let mut widget = VolumeWidget::new();
        widget.actions.push(WidgetAction::SetVolume(3));
        widget.actions.push(WidgetAction::ToggleMute);

        assert_eq!(
            widget.take_actions(),
            vec![WidgetAction::SetVolume(3), WidgetAction::ToggleMute]
        );
        assert!(widget.take_actions().is_empty());
    }
}
