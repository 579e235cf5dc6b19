// Terminal implementations of the hashing job's UI collaborators

pub mod notification;
pub mod prompt;

pub use notification::TerminalNotifications;
pub use prompt::TerminalPrompt;
