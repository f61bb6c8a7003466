//! Process-wide status channel.
//!
//! A small set of named text slots. Writes go to a lock-protected in-memory
//! map and are mirrored to one file per slot so external processes can keep
//! polling; in-process consumers can block on a condition variable instead.
//! A slot read before any write returns the empty string.

use super::state::{AssistantStatus, MicTrigger};
use crate::Result;
use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::warn;

/// Named slots in the status channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    MicTrigger,
    AssistantStatus,
    LastUserText,
    LastAssistantText,
}

impl Slot {
    pub const ALL: [Slot; 4] = [
        Slot::MicTrigger,
        Slot::AssistantStatus,
        Slot::LastUserText,
        Slot::LastAssistantText,
    ];

    /// Mirror file name for external pollers.
    pub fn file_name(&self) -> &'static str {
        match self {
            Slot::MicTrigger => "mic.data",
            Slot::AssistantStatus => "status.data",
            Slot::LastUserText => "user.data",
            Slot::LastAssistantText => "assistant.data",
        }
    }
}

/// Shared status channel.
///
/// Each slot has one logical writer at a time (the pipeline owns
/// `AssistantStatus` and the text slots during a run, the input source owns
/// `MicTrigger`), so no locking is needed beyond keeping a single read or
/// write self-consistent.
pub struct StatusChannel {
    slots: Mutex<HashMap<Slot, String>>,
    changed: Condvar,
    mirror_dir: Option<PathBuf>,
}

impl StatusChannel {
    /// Create a channel with no file mirror (in-memory only, used in tests).
    pub fn in_memory() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            changed: Condvar::new(),
            mirror_dir: None,
        }
    }

    /// Create a channel mirrored to `dir`, one file per slot. Slot files
    /// already present (written by an external frontend before startup) are
    /// absorbed.
    pub fn with_mirror(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        let mut slots = HashMap::new();
        for slot in Slot::ALL {
            let value = read_slot_file(&dir.join(slot.file_name()));
            if !value.is_empty() {
                slots.insert(slot, value);
            }
        }

        Ok(Self {
            slots: Mutex::new(slots),
            changed: Condvar::new(),
            mirror_dir: Some(dir),
        })
    }

    /// Read a slot. Returns the empty string if it was never written.
    pub fn get(&self, slot: Slot) -> String {
        self.slots.lock().get(&slot).cloned().unwrap_or_default()
    }

    /// Write a slot, mirror it to disk, and wake any in-process waiters.
    pub fn set(&self, slot: Slot, value: &str) {
        self.slots.lock().insert(slot, value.to_string());
        if let Some(dir) = &self.mirror_dir {
            if let Err(e) = std::fs::write(dir.join(slot.file_name()), value) {
                warn!("Failed to mirror {:?} to disk: {}", slot, e);
            }
        }
        self.changed.notify_all();
    }

    /// Re-read a slot's mirror file, absorbing writes made by external
    /// processes. Returns the current value either way.
    pub fn poll_mirror(&self, slot: Slot) -> String {
        let Some(dir) = &self.mirror_dir else {
            return self.get(slot);
        };
        let on_disk = read_slot_file(&dir.join(slot.file_name()));
        let mut slots = self.slots.lock();
        let known = slots.get(&slot).cloned().unwrap_or_default();
        if on_disk != known {
            slots.insert(slot, on_disk.clone());
            drop(slots);
            self.changed.notify_all();
        }
        on_disk
    }

    /// Block until `pred` holds for the slot's value or the timeout elapses.
    /// Returns the value that satisfied the predicate, or `None` on timeout.
    pub fn wait_for<F>(&self, slot: Slot, timeout: Duration, pred: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        let deadline = Instant::now() + timeout;
        let mut slots = self.slots.lock();
        loop {
            let value = slots.get(&slot).cloned().unwrap_or_default();
            if pred(&value) {
                return Some(value);
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            self.changed.wait_for(&mut slots, deadline - now);
        }
    }

    pub fn assistant_status(&self) -> AssistantStatus {
        AssistantStatus::parse(&self.get(Slot::AssistantStatus))
    }

    pub fn set_assistant_status(&self, status: AssistantStatus) {
        self.set(Slot::AssistantStatus, &status.to_string());
    }

    pub fn mic_trigger(&self) -> MicTrigger {
        MicTrigger::parse(&self.get(Slot::MicTrigger))
    }

    pub fn set_mic_trigger(&self, trigger: MicTrigger) {
        self.set(Slot::MicTrigger, &trigger.to_string());
    }
}

fn read_slot_file(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}
