//! Cooperative pause switch for hashing workers.
//!
//! Workers consult the gate once per item, at item boundaries only; pausing
//! never preempts a hash already in progress. The gate is an explicit token
//! handed to each job at construction, so scope is up to the caller: share
//! one `Arc<PauseGate>` across jobs for a process-wide switch, or give each
//! job its own.

use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Upper bound on how long a paused worker waits before re-checking
/// cancellation. Release and cancel both wake waiters explicitly, so this
/// only limits the latency of a missed wakeup.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A cooperative pause switch polled by hashing workers between items.
#[derive(Debug, Default)]
pub struct PauseGate {
    engaged: Mutex<bool>,
    cond: Condvar,
}

impl PauseGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pause every worker consulting this gate, at their next item boundary.
    pub fn engage(&self) {
        *self.engaged.lock().unwrap() = true;
        self.cond.notify_all();
    }

    /// Resume paused workers.
    pub fn release(&self) {
        *self.engaged.lock().unwrap() = false;
        self.cond.notify_all();
    }

    pub fn is_engaged(&self) -> bool {
        *self.engaged.lock().unwrap()
    }

    /// Wake waiting workers without changing the gate, so they re-check
    /// their cancellation flag. Called when a job is cancelled.
    pub(crate) fn nudge(&self) {
        self.cond.notify_all();
    }

    /// Block while the gate is engaged. `cancelled` is re-tested on every
    /// wakeup and at least once per poll interval, so a cancelled job drains
    /// promptly even while paused.
    pub(crate) fn wait_while_engaged(&self, cancelled: impl Fn() -> bool) {
        let mut engaged = self.engaged.lock().unwrap();
        while *engaged && !cancelled() {
            let (guard, _) = self.cond.wait_timeout(engaged, POLL_INTERVAL).unwrap();
            engaged = guard;
        }
    }
}
