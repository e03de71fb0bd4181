//! Desktop Volume Control - Library
//!
//! A small floating widget that shows and controls the system master volume.
//!
//! ## Features
//!
//! - Vertical slider and percentage label for the master volume
//! - Mute button that restores the previous volume on unmute
//! - Window position and volume remembered between sessions
//! - Simulated backend where no audio API is available

pub mod app;
pub mod audio;
pub mod controller;
pub mod platform;
pub mod ui;

pub use app::WidgetApp;
pub use audio::{AudioDevice, AudioError, SimulatedDevice};
pub use controller::{DeviceSync, VolumeController, VolumeSnapshot, VolumeState};
pub use platform::{PersistedSettings, SettingsError, SettingsStore};
pub use ui::{Theme, VolumeWidget, WidgetAction};
