//! Progress-bar notification sink backed by indicatif.

use indicatif::{ProgressBar, ProgressStyle};

use crate::hasher::{NotificationHandle, NotificationSink};

/// Creates one indicatif progress bar per notification.
#[derive(Debug, Default)]
pub struct TerminalNotifications;

impl TerminalNotifications {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for TerminalNotifications {
    fn create(&self) -> Box<dyn NotificationHandle> {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix}\n[{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Box::new(TerminalNotification { bar })
    }
}

/// One live progress bar. indicatif bars are internally synchronized, so
/// updates from worker threads and rendering never tear.
struct TerminalNotification {
    bar: ProgressBar,
}

impl NotificationHandle for TerminalNotification {
    fn set_title(&self, title: &str) {
        self.bar.set_prefix(title.to_string());
    }

    fn update(&self, label: &str, percent: u8) {
        self.bar.set_message(label.to_string());
        self.bar.set_position(percent as u64);
    }

    fn close(&self) {
        self.bar.finish_and_clear();
    }
}
