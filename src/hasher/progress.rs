//! Progress reporting for hashing jobs.
//!
//! The job owns one [`ProgressReporter`] and is the only writer; updates are
//! serialized by the job's queue lock. The notification sink behind the
//! reporter may render from any thread, so handles must be `Send + Sync`.

/// A live notification created by a [`NotificationSink`].
pub trait NotificationHandle: Send + Sync {
    fn set_title(&self, title: &str);
    /// Replace the displayed label and percentage.
    fn update(&self, label: &str, percent: u8);
    /// Detach from the display. Called exactly once, by the last worker.
    fn close(&self);
}

/// Factory for notifications, implemented by the UI layer.
pub trait NotificationSink: Send + Sync {
    fn create(&self) -> Box<dyn NotificationHandle>;
}

/// Holds the current `(label, percent)` of the item in flight and pushes it
/// to the notification handle.
pub struct ProgressReporter {
    handle: Box<dyn NotificationHandle>,
}

impl ProgressReporter {
    pub fn new(handle: Box<dyn NotificationHandle>) -> Self {
        Self { handle }
    }

    pub fn set_title(&self, title: &str) {
        self.handle.set_title(title);
    }

    pub fn update(&self, label: &str, percent: u8) {
        self.handle.update(label, percent);
    }

    pub fn close(&self) {
        self.handle.close();
    }
}
