//! Audio device capability and error types.
//!
//! Defines the interface every master volume backend implements, plus the
//! helpers for converting between percentages and endpoint scalars.

use thiserror::Error;

/// Highest volume percentage accepted by a backend.
pub const MAX_VOLUME: u8 = 100;

/// Volume reported when no backend can answer a query.
pub const FALLBACK_VOLUME: u8 = 50;

/// A gateway to the system master volume.
///
/// Every call is best-effort: callers are expected to treat an `Err` as
/// "not applied to the device" and carry on with their own bookkeeping.
pub trait AudioDevice {
    /// Short backend name for log output.
    fn name(&self) -> &str;

    /// Current master volume (0-100), on the same scale [`Self::set_volume`] writes.
    fn get_volume(&self) -> Result<u8, AudioError>;

    /// Volume to adopt at startup when nothing was persisted.
    ///
    /// Backends may prefer a different source here (such as a per-application
    /// session level); the default is the master volume.
    fn initial_volume(&self) -> Result<u8, AudioError> {
        self.get_volume()
    }

    /// Set the master volume (0-100). Values above 100 are clamped.
    fn set_volume(&mut self, volume: u8) -> Result<(), AudioError>;

    /// Startup volume, or [`FALLBACK_VOLUME`] if the query fails.
    fn initial_volume_or_fallback(&self) -> u8 {
        match self.initial_volume() {
            Ok(volume) => volume,
            Err(e) => {
                tracing::debug!(backend = self.name(), error = %e, "volume query failed, using fallback");
                FALLBACK_VOLUME
            }
        }
    }
}

impl<T: AudioDevice + ?Sized> AudioDevice for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get_volume(&self) -> Result<u8, AudioError> {
        (**self).get_volume()
    }

    fn initial_volume(&self) -> Result<u8, AudioError> {
        (**self).initial_volume()
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), AudioError> {
        (**self).set_volume(volume)
    }
}

/// Volume as percentage (0-100) from an endpoint scalar (0.0 to 1.0).
pub fn scalar_to_percent(level: f32) -> u8 {
    (level.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Endpoint scalar (0.0 to 1.0) from a volume percentage.
pub fn percent_to_scalar(volume: u8) -> f32 {
    f32::from(volume.min(MAX_VOLUME)) / 100.0
}

/// Audio backend error types.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("No audio backend available on this platform")]
    Unavailable,

    #[error("No default output device available")]
    NoDefaultDevice,

    #[error("Volume control not available for device")]
    VolumeNotAvailable,

    #[cfg(windows)]
    #[error("COM initialization failed: {0}")]
    ComInitFailed(#[source] windows::core::Error),

    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsError(#[source] windows::core::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl AudioDevice for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn get_volume(&self) -> Result<u8, AudioError> {
            Err(AudioError::Unavailable)
        }

        fn set_volume(&mut self, _volume: u8) -> Result<(), AudioError> {
            Err(AudioError::Unavailable)
        }
    }

    #[test]
    fn test_scalar_to_percent_rounds() {
        assert_eq!(scalar_to_percent(0.0), 0);
        assert_eq!(scalar_to_percent(0.599_999), 60);
        assert_eq!(scalar_to_percent(1.0), 100);
    }

    #[test]
    fn test_scalar_to_percent_clamps() {
        assert_eq!(scalar_to_percent(-0.5), 0);
        assert_eq!(scalar_to_percent(1.7), 100);
    }

    #[test]
    fn test_percent_to_scalar() {
        assert_eq!(percent_to_scalar(0), 0.0);
        assert_eq!(percent_to_scalar(25), 0.25);
        assert_eq!(percent_to_scalar(250), 1.0);
    }

    #[test]
    fn test_fallback_when_query_fails() {
        assert_eq!(Broken.initial_volume_or_fallback(), FALLBACK_VOLUME);
    }

    struct Fixed(u8);

    impl AudioDevice for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn get_volume(&self) -> Result<u8, AudioError> {
            Ok(self.0)
        }

        fn set_volume(&mut self, volume: u8) -> Result<(), AudioError> {
            self.0 = volume;
            Ok(())
        }
    }

    #[test]
    fn test_initial_volume_defaults_to_master() {
        let device: Box<dyn AudioDevice> = Box::new(Fixed(42));
        assert_eq!(device.initial_volume().unwrap(), 42);
        assert_eq!(device.initial_volume_or_fallback(), 42);
    }

    #[test]
    fn test_boxed_device_delegates() {
        let mut device: Box<dyn AudioDevice> = Box::new(Broken);
        assert_eq!(device.name(), "broken");
        assert!(device.set_volume(10).is_err());
        assert_eq!(device.initial_volume_or_fallback(), 50);
    }
}
