//! Digest-to-achievement-id lookup table.
//!
//! Built once at job start from an [`AchievementIndex`] snapshot and never
//! refreshed during the job's lifetime, even if the source changes mid-run.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Source of the digest-to-id mapping, queried once per job.
pub trait AchievementIndex: Send + Sync {
    fn digest_index(&self) -> HashMap<String, String>;
}

/// Immutable snapshot mapping a normalized (uppercase) digest to an external
/// achievement identifier.
#[derive(Debug, Default)]
pub struct HashLookupTable {
    entries: HashMap<String, String>,
}

impl HashLookupTable {
    /// An empty table; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot the index, normalizing keys to uppercase.
    pub fn from_index(index: &dyn AchievementIndex) -> Self {
        let entries = index
            .digest_index()
            .into_iter()
            .map(|(digest, id)| (digest.to_uppercase(), id))
            .collect();
        Self { entries }
    }

    /// Case-insensitive lookup of a digest.
    pub fn lookup(&self, digest: &str) -> Option<&str> {
        self.entries.get(&digest.to_uppercase()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// File-backed achievement index: a JSON object mapping digest to id.
pub struct JsonAchievementIndex {
    entries: HashMap<String, String>,
}

impl JsonAchievementIndex {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading achievement index {}", path.display()))?;
        let entries = serde_json::from_str(&data)
            .with_context(|| format!("parsing achievement index {}", path.display()))?;
        Ok(Self { entries })
    }
}

impl AchievementIndex for JsonAchievementIndex {
    fn digest_index(&self) -> HashMap<String, String> {
        self.entries.clone()
    }
}
