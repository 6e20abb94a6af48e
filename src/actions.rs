//! Power and service actions triggered by confirmed dialogs.
//!
//! Actions are fire-and-forget. The render loop must never block on
//! `systemctl`, so [`SystemActions`] runs each command on a detached thread and
//! only logs how it went.

use std::process::Command;
use std::thread;

use log::{error, info, warn};

use crate::state::ServiceAction;

/// Host process lifecycle operations.
pub trait ProcessActions: Send + Sync {
    fn perform_shutdown(&self);

    fn perform_reboot(&self);

    /// `action` is never [`ServiceAction::None`] when called by the scheduler.
    fn perform_service_action(
        &self,
        name: &str,
        action: ServiceAction,
    );
}

/// `systemctl` backed actions.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemActions;

impl SystemActions {
    fn spawn_systemctl(args: Vec<String>) {
        let label = args.join(" ");
        let spawned = thread::Builder::new()
            .name("systemctl".into())
            .spawn(move || match Command::new("systemctl").args(&args).status() {
                Ok(status) if status.success() => info!("systemctl {label} done"),
                Ok(status) => warn!("systemctl {label} exited with {status}"),
                Err(e) => error!("Cannot run systemctl {label}: {e}"),
            });
        if let Err(e) = spawned {
            error!("Cannot spawn action thread: {e}");
        }
    }
}

impl ProcessActions for SystemActions {
    fn perform_shutdown(&self) {
        info!("Shutting down");
        Self::spawn_systemctl(vec!["poweroff".into()]);
    }

    fn perform_reboot(&self) {
        info!("Rebooting");
        Self::spawn_systemctl(vec!["reboot".into()]);
    }

    fn perform_service_action(
        &self,
        name: &str,
        action: ServiceAction,
    ) {
        if !action.is_armed() {
            return;
        }
        info!("{} service {name}", action.label());
        Self::spawn_systemctl(vec![action.verb().into(), format!("{name}.service")]);
    }
}

// =============================================================================
// Test Support
// =============================================================================

/// Records every call instead of acting.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingActions {
    pub calls: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingActions {
    pub fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }

    fn record(
        &self,
        call: String,
    ) {
        self.calls.lock().unwrap().push(call);
    }
}

#[cfg(test)]
impl ProcessActions for RecordingActions {
    fn perform_shutdown(&self) { self.record("shutdown".into()); }

    fn perform_reboot(&self) { self.record("reboot".into()); }

    fn perform_service_action(
        &self,
        name: &str,
        action: ServiceAction,
    ) {
        self.record(format!("{} {name}", action.verb()));
    }
}
