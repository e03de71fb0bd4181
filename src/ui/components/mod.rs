//! Reusable UI components for the widget.

pub mod mute_button;
pub mod volume_slider;

pub use mute_button::MuteButton;
pub use volume_slider::VolumeSlider;
