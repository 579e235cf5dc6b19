// Background hashing job
// Worker pool, cooperative pause/cancel, progress reporting and teardown

pub mod algorithms;
pub mod controller;
pub mod job;
pub mod lookup;
pub mod pause;
pub mod progress;

// Re-export commonly used types for convenience
pub use algorithms::{EntryHasher, FileHasher};
pub use controller::{JobController, Prompt};
pub use job::Job;
pub use lookup::{AchievementIndex, HashLookupTable, JsonAchievementIndex};
pub use pause::PauseGate;
pub use progress::{NotificationHandle, NotificationSink, ProgressReporter};

use std::ops::BitOr;

/// Which hash kinds a job computes. Kinds are combinable with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashKinds(u8);

impl HashKinds {
    /// CRC32 checksum for netplay verification.
    pub const CHECKSUM: HashKinds = HashKinds(0b01);
    /// MD5 digest for achievement matching.
    pub const DIGEST: HashKinds = HashKinds(0b10);
    /// Both kinds.
    pub const ALL: HashKinds = HashKinds(0b11);

    pub fn contains(self, other: HashKinds) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for HashKinds {
    type Output = HashKinds;

    fn bitor(self, rhs: HashKinds) -> HashKinds {
        HashKinds(self.0 | rhs.0)
    }
}
