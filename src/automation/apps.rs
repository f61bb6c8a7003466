//! Desktop application gateway.
//!
//! Launches applications from the configured registry and terminates running
//! processes, both by fuzzy name match.

use super::AppGateway;
use crate::config::KnownApp;
use crate::Result;
use std::process::Command;
use sysinfo::{ProcessesToUpdate, System};
use tracing::{debug, info, warn};

/// App gateway backed by the known-app registry and the OS process table.
pub struct DesktopApps {
    known: Vec<KnownApp>,
}

impl DesktopApps {
    pub fn new(known: Vec<KnownApp>) -> Self {
        Self { known }
    }
}

impl AppGateway for DesktopApps {
    fn launch(&self, name: &str) -> Result<bool> {
        let Some(app) = self.known.iter().find(|a| name_matches(&a.name, name)) else {
            debug!("No known app matches {:?}", name);
            return Ok(false);
        };

        match Command::new(&app.exec).spawn() {
            Ok(_child) => {
                info!("Spawned {} for {:?}", app.exec, name);
                Ok(true)
            }
            Err(e) => {
                // Treated as a local miss so the caller can fall back.
                warn!("Failed to spawn {}: {}", app.exec, e);
                Ok(false)
            }
        }
    }

    fn terminate(&self, name: &str) -> Result<bool> {
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::All, true);

        let mut closed = false;
        for (pid, process) in sys.processes() {
            let process_name = process.name().to_string_lossy();
            if name_matches(&process_name, name) {
                debug!("Killing {} (pid {})", process_name, pid);
                if process.kill() {
                    closed = true;
                }
            }
        }
        Ok(closed)
    }
}

/// Fuzzy name match: either normalized name contains the other.
pub(crate) fn name_matches(candidate: &str, query: &str) -> bool {
    let candidate = normalize(candidate);
    let query = normalize(query);
    !candidate.is_empty()
        && !query.is_empty()
        && (candidate.contains(&query) || query.contains(&candidate))
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
