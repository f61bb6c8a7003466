//! System audio control via simulated media key taps.

use super::KeyInput;
use crate::{Result, ValetError};
use rdev::{simulate, EventType, Key};
use std::time::Duration;
use tracing::debug;

/// Media keys the system handler can tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKey {
    VolumeMute,
    VolumeUp,
    VolumeDown,
}

/// Key input backed by rdev event simulation.
#[derive(Default)]
pub struct RdevInput;

impl RdevInput {
    pub fn new() -> Self {
        Self
    }
}

impl KeyInput for RdevInput {
    fn tap(&self, key: MediaKey) -> Result<()> {
        let code = keycode(key)?;
        debug!("Tapping media key {:?} (code {})", key, code);
        send(EventType::KeyPress(Key::Unknown(code)))?;
        // Some desktops drop the release when it lands in the same tick.
        std::thread::sleep(Duration::from_millis(20));
        send(EventType::KeyRelease(Key::Unknown(code)))
    }
}

fn send(event: EventType) -> Result<()> {
    simulate(&event).map_err(|e| ValetError::InputError(format!("{e:?}")))
}

#[cfg(target_os = "linux")]
fn keycode(key: MediaKey) -> Result<u32> {
    // X11 keycodes for XF86AudioMute / LowerVolume / RaiseVolume.
    Ok(match key {
        MediaKey::VolumeMute => 121,
        MediaKey::VolumeDown => 122,
        MediaKey::VolumeUp => 123,
    })
}

#[cfg(target_os = "windows")]
fn keycode(key: MediaKey) -> Result<u32> {
    // Virtual-key codes VK_VOLUME_MUTE / _DOWN / _UP.
    Ok(match key {
        MediaKey::VolumeMute => 0xAD,
        MediaKey::VolumeDown => 0xAE,
        MediaKey::VolumeUp => 0xAF,
    })
}

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
fn keycode(key: MediaKey) -> Result<u32> {
    Err(ValetError::InputError(format!(
        "media key {key:?} not supported on this platform"
    )))
}
