//! Volume state controller.
//!
//! Owns the authoritative volume and mute state and keeps it consistent with
//! the audio device and the persisted settings. Device calls are best-effort:
//! a failed call is logged and the state transition happens anyway, so the
//! widget keeps working with no audio backend at all.

use crate::audio::{AudioDevice, MAX_VOLUME};
use crate::platform::PersistedSettings;
use tracing::{debug, info};

/// In-memory volume state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeState {
    /// Last volume applied (or attempted) on the device (0-100)
    pub volume: u8,

    /// Whether the widget is muted
    pub muted: bool,

    /// Volume to restore on unmute; only meaningful while muted
    pub pre_mute_volume: u8,
}

/// Outcome of the last device call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceSync {
    /// The device accepted the value
    Applied,

    /// The device call failed; only the widget state changed
    UiOnly,
}

/// What the presentation layer should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeSnapshot {
    pub volume: u8,
    pub muted: bool,
    pub sync: DeviceSync,
}

impl VolumeSnapshot {
    /// Numeric label, e.g. `60%`.
    pub fn label(&self) -> String {
        format!("{}%", self.volume)
    }

    /// Glyph for the mute button: the action it will perform.
    pub fn mute_glyph(&self) -> &'static str {
        if self.muted {
            "🔊"
        } else {
            "🔇"
        }
    }
}

/// Single source of truth for volume and mute state.
pub struct VolumeController<D = Box<dyn AudioDevice>> {
    device: D,
    state: VolumeState,
    sync: DeviceSync,
}

impl<D: AudioDevice> VolumeController<D> {
    /// Build the initial state from persisted settings or the device.
    ///
    /// A persisted volume wins and is pushed to the device; otherwise the
    /// device's startup level is adopted (50 if it cannot be read).
    pub fn initialize(device: D, persisted: &PersistedSettings) -> Self {
        let mut controller = Self {
            device,
            state: VolumeState {
                volume: 0,
                muted: false,
                pre_mute_volume: 0,
            },
            sync: DeviceSync::Applied,
        };

        let volume = match persisted.volume {
            Some(volume) => {
                let volume = volume.min(MAX_VOLUME);
                controller.sync = controller.apply(volume);
                volume
            }
            None => controller.device.initial_volume_or_fallback().min(MAX_VOLUME),
        };

        controller.state.volume = volume;
        controller.state.pre_mute_volume = volume;

        info!(
            backend = controller.device.name(),
            volume,
            from_settings = persisted.volume.is_some(),
            "volume initialized"
        );
        controller
    }

    /// Set the volume from the slider. Values above 100 are clamped.
    ///
    /// Does not clear mute: while muted the volume changes but the mute flag
    /// and pre-mute volume are only touched by [`Self::toggle_mute`].
    pub fn set_volume(&mut self, volume: u8) -> VolumeSnapshot {
        let volume = volume.min(MAX_VOLUME);
        self.sync = self.apply(volume);
        self.state.volume = volume;
        self.snapshot()
    }

    /// Mute (remembering the current level) or restore the remembered level.
    pub fn toggle_mute(&mut self) -> VolumeSnapshot {
        if self.state.muted {
            let restore = self.state.pre_mute_volume;
            self.sync = self.apply(restore);
            self.state.volume = restore;
            self.state.muted = false;
            debug!(volume = restore, "unmuted");
        } else {
            // Prefer the live master level; it may have been changed elsewhere
            let live = self.device.get_volume().ok().map(|v| v.min(MAX_VOLUME));
            self.sync = self.apply(0);
            self.state.pre_mute_volume = match (self.sync, live) {
                (DeviceSync::Applied, Some(live)) => live,
                _ => self.state.volume,
            };
            self.state.volume = 0;
            self.state.muted = true;
            debug!(pre_mute_volume = self.state.pre_mute_volume, "muted");
        }
        self.snapshot()
    }

    /// Settings record to write at shutdown.
    pub fn persisted_snapshot(
        &self,
        window_x: Option<i32>,
        window_y: Option<i32>,
    ) -> PersistedSettings {
        PersistedSettings {
            window_x,
            window_y,
            volume: Some(self.state.volume),
        }
    }

    /// Current state.
    pub fn state(&self) -> VolumeState {
        self.state
    }

    /// Current render state.
    pub fn snapshot(&self) -> VolumeSnapshot {
        VolumeSnapshot {
            volume: self.state.volume,
            muted: self.state.muted,
            sync: self.sync,
        }
    }

    /// The backend in use.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Push a volume to the device. Failure is expected and ignored.
    fn apply(&mut self, volume: u8) -> DeviceSync {
        match self.device.set_volume(volume) {
            Ok(()) => DeviceSync::Applied,
            Err(e) => {
                debug!(backend = self.device.name(), volume, error = %e, "device rejected volume");
                DeviceSync::UiOnly
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::audio::{AudioError, SimulatedDevice};

    /// Device double that records every set call.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingDevice {
        /// Level reported by queries; `None` makes queries fail
        pub reported: Option<u8>,
        /// Whether set calls fail
        pub fail_set: bool,
        pub set_calls: Vec<u8>,
    }

    impl RecordingDevice {
        pub(crate) fn reporting(volume: u8) -> Self {
            Self {
                reported: Some(volume),
                ..Self::default()
            }
        }

        pub(crate) fn broken() -> Self {
            Self {
                reported: None,
                fail_set: true,
                set_calls: Vec::new(),
            }
        }
    }

    impl AudioDevice for RecordingDevice {
        fn name(&self) -> &str {
            "recording"
        }

        fn get_volume(&self) -> Result<u8, AudioError> {
            self.reported.ok_or(AudioError::Unavailable)
        }

        fn set_volume(&mut self, volume: u8) -> Result<(), AudioError> {
            self.set_calls.push(volume);
            if self.fail_set {
                return Err(AudioError::Unavailable);
            }
            self.reported = Some(volume);
            Ok(())
        }
    }

    fn persisted_volume(volume: u8) -> PersistedSettings {
        PersistedSettings {
            volume: Some(volume),
            ..PersistedSettings::default()
        }
    }

    #[test]
    fn test_initialize_from_persisted_volume() {
        let controller =
            VolumeController::initialize(RecordingDevice::reporting(10), &persisted_volume(73));

        assert_eq!(controller.state().volume, 73);
        assert!(!controller.state().muted);
        assert_eq!(controller.state().pre_mute_volume, 73);
        assert_eq!(controller.device().set_calls, vec![73]);
    }

    #[test]
    fn test_initialize_from_device() {
        let controller = VolumeController::initialize(
            RecordingDevice::reporting(40),
            &PersistedSettings::default(),
        );

        assert_eq!(controller.state().volume, 40);
        assert!(controller.device().set_calls.is_empty());
    }

    #[test]
    fn test_initialize_defaults_to_fifty() {
        let controller =
            VolumeController::initialize(RecordingDevice::broken(), &PersistedSettings::default());
        assert_eq!(controller.state().volume, 50);
        assert_eq!(controller.snapshot().sync, DeviceSync::Applied);
    }

    #[test]
    fn test_initialize_with_failing_device_keeps_persisted_volume() {
        let controller =
            VolumeController::initialize(RecordingDevice::broken(), &persisted_volume(35));

        assert_eq!(controller.state().volume, 35);
        assert_eq!(controller.snapshot().sync, DeviceSync::UiOnly);
        assert_eq!(controller.device().set_calls, vec![35]);
    }

    #[test]
    fn test_set_volume_updates_state_and_label() {
        let mut controller =
            VolumeController::initialize(SimulatedDevice::new(), &PersistedSettings::default());

        let snapshot = controller.set_volume(20);
        assert_eq!(snapshot.volume, 20);
        assert_eq!(snapshot.label(), "20%");
        assert_eq!(controller.device().get_volume().unwrap(), 20);
    }

    #[test]
    fn test_set_volume_twice_is_stable() {
        let mut controller =
            VolumeController::initialize(RecordingDevice::reporting(50), &persisted_volume(50));

        controller.set_volume(64);
        let first = controller.state();
        controller.set_volume(64);

        assert_eq!(controller.state(), first);
        assert_eq!(controller.device().set_calls, vec![50, 64, 64]);
    }

    #[test]
    fn test_set_volume_clamps() {
        let mut controller =
            VolumeController::initialize(RecordingDevice::reporting(50), &persisted_volume(50));

        assert_eq!(controller.set_volume(180).volume, 100);
        assert_eq!(controller.device().set_calls.last(), Some(&100));
    }

    #[test]
    fn test_toggle_mute_round_trip() {
        let mut controller =
            VolumeController::initialize(RecordingDevice::reporting(60), &persisted_volume(60));

        let muted = controller.toggle_mute();
        assert_eq!(
            controller.state(),
            VolumeState {
                volume: 0,
                muted: true,
                pre_mute_volume: 60
            }
        );
        assert_eq!(muted.mute_glyph(), "🔊");

        let unmuted = controller.toggle_mute();
        assert_eq!(controller.state().volume, 60);
        assert!(!controller.state().muted);
        assert_eq!(unmuted.mute_glyph(), "🔇");
        assert_eq!(controller.device().set_calls, vec![60, 0, 60]);
    }

    #[test]
    fn test_mute_prefers_live_device_volume() {
        let mut controller =
            VolumeController::initialize(RecordingDevice::reporting(60), &persisted_volume(60));
        // Changed outside the widget
        controller.device.reported = Some(45);

        controller.toggle_mute();
        assert_eq!(controller.state().pre_mute_volume, 45);

        controller.toggle_mute();
        assert_eq!(controller.state().volume, 45);
    }

    /// Device whose startup level comes from a per-application session while
    /// reads and writes of the master level go elsewhere.
    struct SessionDevice {
        session: Option<u8>,
        master: u8,
    }

    impl AudioDevice for SessionDevice {
        fn name(&self) -> &str {
            "session"
        }

        fn get_volume(&self) -> Result<u8, AudioError> {
            Ok(self.master)
        }

        fn initial_volume(&self) -> Result<u8, AudioError> {
            Ok(self.session.unwrap_or(self.master))
        }

        fn set_volume(&mut self, volume: u8) -> Result<(), AudioError> {
            self.master = volume;
            Ok(())
        }
    }

    #[test]
    fn test_unmute_restores_master_level_not_session_level() {
        let device = SessionDevice {
            session: Some(100),
            master: 80,
        };
        let mut controller = VolumeController::initialize(device, &persisted_volume(30));

        controller.toggle_mute();
        assert_eq!(controller.state().pre_mute_volume, 30);
        assert_eq!(controller.device().master, 0);

        controller.toggle_mute();
        assert_eq!(controller.state().volume, 30);
        assert_eq!(controller.device().master, 30);
    }

    #[test]
    fn test_initialize_adopts_session_level() {
        let device = SessionDevice {
            session: Some(100),
            master: 45,
        };
        let controller = VolumeController::initialize(device, &PersistedSettings::default());
        assert_eq!(controller.state().volume, 100);
    }

    #[test]
    fn test_toggle_mute_with_failing_device() {
        let mut controller =
            VolumeController::initialize(RecordingDevice::broken(), &persisted_volume(37));

        let muted = controller.toggle_mute();
        assert!(muted.muted);
        assert_eq!(muted.sync, DeviceSync::UiOnly);
        assert_eq!(controller.state().pre_mute_volume, 37);
        assert_eq!(controller.state().volume, 0);

        let unmuted = controller.toggle_mute();
        assert!(!unmuted.muted);
        assert_eq!(unmuted.volume, 37);
        assert_eq!(controller.device().set_calls, vec![37, 0, 37]);
    }

    #[test]
    fn test_mute_uses_ui_volume_when_set_fails_after_query() {
        let mut controller =
            VolumeController::initialize(RecordingDevice::reporting(30), &persisted_volume(30));
        controller.device.reported = Some(90);
        controller.device.fail_set = true;

        controller.toggle_mute();
        assert_eq!(controller.state().pre_mute_volume, 30);
    }

    #[test]
    fn test_set_volume_while_muted_keeps_mute() {
        let mut controller =
            VolumeController::initialize(RecordingDevice::reporting(60), &persisted_volume(60));
        controller.toggle_mute();

        let snapshot = controller.set_volume(25);
        assert!(snapshot.muted);
        assert_eq!(snapshot.volume, 25);
        assert_eq!(controller.state().pre_mute_volume, 60);

        controller.toggle_mute();
        assert_eq!(controller.state().volume, 60);
    }

    #[test]
    fn test_persisted_snapshot() {
        let mut controller =
            VolumeController::initialize(SimulatedDevice::new(), &PersistedSettings::default());
        controller.set_volume(81);

        assert_eq!(
            controller.persisted_snapshot(Some(300), Some(-4)),
            PersistedSettings {
                window_x: Some(300),
                window_y: Some(-4),
                volume: Some(81),
            }
        );
    }
}
