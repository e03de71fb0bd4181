//! Master volume using IAudioEndpointVolume.
//!
//! Talks to the default render endpoint through the Windows Core Audio API.
//! The endpoint is re-resolved on every call so a change of default output
//! device is picked up without restarting.

use super::device::{percent_to_scalar, scalar_to_percent, AudioDevice, AudioError};
use std::path::Path;
use windows::core::PWSTR;
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::Media::Audio::Endpoints::IAudioEndpointVolume;
use windows::Win32::Media::Audio::{
    eConsole, eRender, IAudioSessionControl2, IAudioSessionManager2, IMMDevice,
    IMMDeviceEnumerator, ISimpleAudioVolume, MMDeviceEnumerator,
};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_APARTMENTTHREADED,
};
use windows::Win32::System::Threading::{
    OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_WIN32,
    PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows_core::Interface;

/// Process whose audio session volume is preferred for the startup level.
const SHELL_PROCESS: &str = "explorer.exe";

/// COM initialization guard that uninitializes COM on drop.
pub struct ComGuard {
    initialized: bool,
}

impl ComGuard {
    /// Initialize COM for the current thread.
    pub fn new() -> Result<Self, AudioError> {
        unsafe {
            // Apartment-threaded to share the UI thread with the window
            CoInitializeEx(None, COINIT_APARTMENTTHREADED)
                .ok()
                .map_err(AudioError::ComInitFailed)?;
        }
        Ok(Self { initialized: true })
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        if self.initialized {
            unsafe {
                CoUninitialize();
            }
        }
    }
}

/// Master volume of the default output device.
pub struct EndpointVolume {
    enumerator: IMMDeviceEnumerator,
    // Dropped last so COM outlives the enumerator
    _com: ComGuard,
}

impl EndpointVolume {
    /// Initialize COM and create the device enumerator.
    pub fn new() -> Result<Self, AudioError> {
        let com = ComGuard::new()?;
        let enumerator: IMMDeviceEnumerator = unsafe {
            CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)
                .map_err(AudioError::WindowsError)?
        };

        Ok(Self {
            enumerator,
            _com: com,
        })
    }

    fn default_device(&self) -> Result<IMMDevice, AudioError> {
        unsafe {
            self.enumerator
                .GetDefaultAudioEndpoint(eRender, eConsole)
                .map_err(|_| AudioError::NoDefaultDevice)
        }
    }

    fn endpoint_volume(device: &IMMDevice) -> Result<IAudioEndpointVolume, AudioError> {
        unsafe {
            device
                .Activate(CLSCTX_ALL, None)
                .map_err(|_| AudioError::VolumeNotAvailable)
        }
    }

    fn master_volume(device: &IMMDevice) -> Result<u8, AudioError> {
        let endpoint = Self::endpoint_volume(device)?;
        let level = unsafe {
            endpoint
                .GetMasterVolumeLevelScalar()
                .map_err(AudioError::WindowsError)?
        };
        Ok(scalar_to_percent(level))
    }

    /// Volume of the shell's audio session on the given device, if it has one.
    fn shell_session_volume(device: &IMMDevice) -> Option<u8> {
        unsafe {
            let manager: IAudioSessionManager2 = device.Activate(CLSCTX_ALL, None).ok()?;
            let sessions = manager.GetSessionEnumerator().ok()?;
            let count = sessions.GetCount().ok()?;

            for i in 0..count {
                let Ok(control) = sessions.GetSession(i) else {
                    continue;
                };
                let Ok(control2) = control.cast::<IAudioSessionControl2>() else {
                    continue;
                };
                let pid = match control2.GetProcessId() {
                    Ok(pid) if pid != 0 => pid,
                    _ => continue,
                };

                let is_shell = process_name(pid)
                    .map(|name| name.eq_ignore_ascii_case(SHELL_PROCESS))
                    .unwrap_or(false);
                if !is_shell {
                    continue;
                }

                if let Ok(simple) = control.cast::<ISimpleAudioVolume>() {
                    if let Ok(level) = simple.GetMasterVolume() {
                        return Some(scalar_to_percent(level));
                    }
                }
            }

            None
        }
    }
}

impl AudioDevice for EndpointVolume {
    fn name(&self) -> &str {
        "windows-endpoint"
    }

    fn get_volume(&self) -> Result<u8, AudioError> {
        let device = self.default_device()?;
        Self::master_volume(&device)
    }

    fn initial_volume(&self) -> Result<u8, AudioError> {
        let device = self.default_device()?;

        if let Some(volume) = Self::shell_session_volume(&device) {
            return Ok(volume);
        }

        Self::master_volume(&device)
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), AudioError> {
        let device = self.default_device()?;
        let endpoint = Self::endpoint_volume(&device)?;
        unsafe {
            endpoint
                .SetMasterVolumeLevelScalar(percent_to_scalar(volume), std::ptr::null())
                .map_err(AudioError::WindowsError)?;
        }
        Ok(())
    }
}

/// Executable file name of a process, e.g. `explorer.exe`.
fn process_name(pid: u32) -> Option<String> {
    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid).ok()?;

        let mut buffer = [0u16; 260];
        let mut len = buffer.len() as u32;
        let result = QueryFullProcessImageNameW(
            handle,
            PROCESS_NAME_WIN32,
            PWSTR(buffer.as_mut_ptr()),
            &mut len,
        );
        let _ = CloseHandle(handle);
        result.ok()?;

        let path = String::from_utf16_lossy(&buffer[..len as usize]);
        Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }
}
