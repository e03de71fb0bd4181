//! Simulated master volume.
//!
//! Stand-in backend used where no platform audio API is available. It only
//! remembers the last value it was given, so the widget stays usable.

use super::device::{AudioDevice, AudioError, FALLBACK_VOLUME, MAX_VOLUME};

/// Backend that tracks a local volume value and never fails.
#[derive(Debug, Clone)]
pub struct SimulatedDevice {
    volume: u8,
}

impl SimulatedDevice {
    /// Create a simulated device at the fallback volume.
    pub fn new() -> Self {
        Self {
            volume: FALLBACK_VOLUME,
        }
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDevice for SimulatedDevice {
    fn name(&self) -> &str {
        "simulated"
    }

    fn get_volume(&self) -> Result<u8, AudioError> {
        Ok(self.volume)
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), AudioError> {
        self.volume = volume.min(MAX_VOLUME);
        Ok(())
    }
}
