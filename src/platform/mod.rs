//! Platform integration for the widget.
//!
//! This module contains settings persistence and the generated window icon.

pub mod icons;
pub mod settings;

pub use settings::{PersistedSettings, SettingsError, SettingsStore};
