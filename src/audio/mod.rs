//! Audio module for master volume access.
//!
//! This module provides the [`AudioDevice`] capability, the Windows Core
//! Audio implementation, and a simulated stand-in for other platforms.

pub mod device;
#[cfg(windows)]
pub mod endpoint;
pub mod simulated;

pub use device::{AudioDevice, AudioError, FALLBACK_VOLUME, MAX_VOLUME};
#[cfg(windows)]
pub use endpoint::EndpointVolume;
pub use simulated::SimulatedDevice;

/// Open the best available backend for this platform.
///
/// Falls back to [`SimulatedDevice`] when the platform backend cannot be
/// initialized, so the widget always has something to talk to.
pub fn open_default() -> Box<dyn AudioDevice> {
    #[cfg(windows)]
    {
        match EndpointVolume::new() {
            Ok(endpoint) => {
                tracing::info!("using Windows endpoint volume");
                return Box::new(endpoint);
            }
            Err(e) => {
                tracing::warn!(error = %e, "audio backend unavailable, simulating volume");
            }
        }
    }

    #[cfg(not(windows))]
    tracing::info!("no audio backend on this platform, simulating volume");

    Box::new(SimulatedDevice::new())
}
