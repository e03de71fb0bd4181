#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Result;
use eframe::egui;
use std::sync::Arc;
use tracing::info;
use volume_widget::platform::icons;
use volume_widget::ui::widget::WINDOW_SIZE;
use volume_widget::{audio, SettingsStore, VolumeController, WidgetApp};

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = SettingsStore::at_default_location();
    let persisted = store.load();

    let device = audio::open_default();
    let controller = VolumeController::initialize(device, &persisted);

    let mut viewport = egui::ViewportBuilder::default()
        .with_title("Desktop Volume Control")
        .with_inner_size(WINDOW_SIZE)
        .with_resizable(false)
        .with_decorations(false)
        .with_transparent(true)
        .with_always_on_top()
        .with_taskbar(false)
        .with_icon(Arc::new(icons::create_window_icon()));
    if let Some((x, y)) = persisted.window_position() {
        viewport = viewport.with_position(egui::pos2(x as f32, y as f32));
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    info!(settings = ?store.path(), "starting volume widget");
    let app = WidgetApp::new(controller, store, &persisted);

    eframe::run_native(
        "Desktop Volume Control",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("UI event loop failed: {e}"))?;

    Ok(())
}
