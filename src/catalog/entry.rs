//! Game entries and their metadata fields.
//!
//! A `GameEntry` is shared between the catalog and the hashing workers, so
//! metadata access goes through a read-write lock. The hashing job never
//! copies an entry's data; it reads and writes individual fields through
//! this contract.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Identifier for a writable metadata field on a game entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    /// CRC32 checksum used for netplay verification, uppercase hex.
    Checksum,
    /// MD5 digest used for achievement matching, lowercase hex.
    Digest,
    /// External achievement identifier resolved from the digest.
    AchievementId,
}

#[derive(Debug, Default)]
struct Metadata {
    checksum: String,
    digest: String,
    achievement_id: String,
}

/// One game in the catalog.
#[derive(Debug)]
pub struct GameEntry {
    name: String,
    system_name: String,
    rom_path: PathBuf,
    metadata: RwLock<Metadata>,
}

impl GameEntry {
    pub fn new(
        name: impl Into<String>,
        system_name: impl Into<String>,
        rom_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            system_name: system_name.into(),
            rom_path: rom_path.into(),
            metadata: RwLock::new(Metadata::default()),
        }
    }

    /// Display name of the game.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the system this game belongs to.
    pub fn system_name(&self) -> &str {
        &self.system_name
    }

    /// Path to the rom file on disk.
    pub fn rom_path(&self) -> &Path {
        &self.rom_path
    }

    /// Label used in progress notifications: `[system] name`.
    pub fn display_label(&self) -> String {
        format!("[{}] {}", self.system_name, self.name)
    }

    /// Read a metadata field. Empty string means "not computed yet".
    pub fn metadata(&self, field: MetadataField) -> String {
        let meta = self.metadata.read().unwrap();
        match field {
            MetadataField::Checksum => meta.checksum.clone(),
            MetadataField::Digest => meta.digest.clone(),
            MetadataField::AchievementId => meta.achievement_id.clone(),
        }
    }

    /// Write a metadata field. Safe to call from any worker thread.
    pub fn set_metadata(&self, field: MetadataField, value: impl Into<String>) {
        let value = value.into();
        let mut meta = self.metadata.write().unwrap();
        match field {
            MetadataField::Checksum => meta.checksum = value,
            MetadataField::Digest => meta.digest = value,
            MetadataField::AchievementId => meta.achievement_id = value,
        }
    }
}
