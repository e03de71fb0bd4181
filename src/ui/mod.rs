//! UI module for the floating volume widget.
//!
//! This module renders whatever the controller reports and turns user input
//! into [`WidgetAction`]s; it never touches the audio device directly.

pub mod components;
pub mod theme;
pub mod widget;

pub use theme::Theme;
pub use widget::{VolumeWidget, WidgetAction};
