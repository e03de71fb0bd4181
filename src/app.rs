//! Application state and lifecycle management.
//!
//! Wires the widget UI to the volume controller and persists settings when
//! the window closes.

use crate::controller::VolumeController;
use crate::platform::{PersistedSettings, SettingsStore};
use crate::ui::{Theme, VolumeWidget, WidgetAction};
use eframe::egui;
use tracing::{debug, info};

/// Main application state.
pub struct WidgetApp {
    /// Volume and mute state
    pub(crate) controller: VolumeController,

    /// Where settings are written on exit
    store: SettingsStore,

    widget: VolumeWidget,
    theme: Theme,

    /// Last known outer window position, in points
    pub(crate) window_position: Option<(i32, i32)>,

    /// Whether the window still needs its default placement
    needs_placement: bool,

    theme_applied: bool,
}

impl WidgetApp {
    /// Create the application around an initialized controller.
    pub fn new(
        controller: VolumeController,
        store: SettingsStore,
        persisted: &PersistedSettings,
    ) -> Self {
        let window_position = persisted.window_position();

        Self {
            controller,
            store,
            widget: VolumeWidget::new(),
            theme: Theme::default(),
            window_position,
            needs_placement: window_position.is_none(),
            theme_applied: false,
        }
    }

    /// Handle an action from the widget.
    pub fn handle_action(&mut self, action: WidgetAction) {
        let snapshot = match action {
            WidgetAction::SetVolume(volume) => self.controller.set_volume(volume),
            WidgetAction::ToggleMute => self.controller.toggle_mute(),
        };
        debug!(?action, ?snapshot, "handled widget action");
    }

    /// Write the current volume and window position to the settings file.
    pub fn persist(&self) -> bool {
        let (x, y) = self.window_position.unzip();
        let settings = self.controller.persisted_snapshot(x, y);
        info!(?settings, "saving settings");
        self.store.save(&settings)
    }

    /// Remember where the window is so it can be restored next time.
    fn track_window_position(&mut self, ctx: &egui::Context) {
        if let Some(rect) = ctx.input(|i| i.viewport().outer_rect) {
            self.window_position = Some((rect.min.x.round() as i32, rect.min.y.round() as i32));
        }
    }

    /// Move the window to the default spot once the monitor size is known.
    fn place_window(&mut self, ctx: &egui::Context) {
        if let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) {
            let pos = VolumeWidget::default_position(monitor);
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(pos));
            self.needs_placement = false;
        }
    }
}

impl eframe::App for WidgetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            self.theme.apply(ctx);
            self.theme_applied = true;
        }

        if self.needs_placement {
            self.place_window(ctx);
        } else {
            self.track_window_position(ctx);
        }

        let snapshot = self.controller.snapshot();
        self.widget.show(ctx, &snapshot, &self.theme);

        for action in self.widget.take_actions() {
            self.handle_action(action);
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioDevice;
    use crate::controller::tests::RecordingDevice;
    use crate::controller::VolumeState;
    use crate::platform::settings::tests::temp_settings_path;

    fn app_with(device: RecordingDevice, store: SettingsStore) -> WidgetApp {
        let persisted = store.load();
        let device: Box<dyn AudioDevice> = Box::new(device);
        let controller = VolumeController::initialize(device, &persisted);
        WidgetApp::new(controller, store, &persisted)
    }

    #[test]
    fn test_first_run_session_is_persisted() {
        let path = temp_settings_path("first-run");
        let mut app = app_with(RecordingDevice::broken(), SettingsStore::new(&path));
        assert_eq!(app.controller.state().volume, 50);
        assert!(app.needs_placement);

        app.handle_action(WidgetAction::SetVolume(20));
        app.handle_action(WidgetAction::ToggleMute);
        assert_eq!(
            app.controller.state(),
            VolumeState {
                volume: 0,
                muted: true,
                pre_mute_volume: 20
            }
        );

        app.handle_action(WidgetAction::ToggleMute);
        assert_eq!(
            app.controller.state(),
            VolumeState {
                volume: 20,
                muted: false,
                pre_mute_volume: 20
            }
        );

        app.window_position = Some((1840, 50));
        assert!(app.persist());

        let saved = SettingsStore::new(&path).load();
        assert_eq!(saved.volume, Some(20));
        assert_eq!(saved.window_position(), Some((1840, 50)));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_restores_saved_session() {
        let path = temp_settings_path("restore");
        SettingsStore::new(&path).save(&PersistedSettings {
            window_x: Some(12),
            window_y: Some(34),
            volume: Some(66),
        });

        let app = app_with(RecordingDevice::reporting(5), SettingsStore::new(&path));
        assert_eq!(app.controller.state().volume, 66);
        assert_eq!(app.window_position, Some((12, 34)));
        assert!(!app.needs_placement);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_persist_without_position() {
        let path = temp_settings_path("no-position");
        let mut app = app_with(RecordingDevice::reporting(40), SettingsStore::new(&path));
        app.handle_action(WidgetAction::SetVolume(90));
        assert!(app.persist());

        let saved = SettingsStore::new(&path).load();
        assert_eq!(saved.volume, Some(90));
        assert_eq!(saved.window_x, None);

        let _ = std::fs::remove_file(path);
    }
}
