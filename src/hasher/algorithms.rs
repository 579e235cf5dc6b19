//! Hash algorithm collaborators.
//!
//! The job itself only calls through [`EntryHasher`]; [`FileHasher`] is the
//! production implementation, hashing the rom file bytes. Both computations
//! are idempotent: an already-populated field is left alone unless `force`
//! is set, and failures leave the field empty for a later retry.

use crc32fast::Hasher as Crc32;
use md5::{Digest, Md5};
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use crate::catalog::{GameEntry, MetadataField};

/// Computes and stores hash metadata for one entry. `force` recomputes even
/// when a value is already present.
pub trait EntryHasher: Send + Sync {
    fn refresh_checksum(&self, entry: &GameEntry, force: bool);
    fn refresh_digest(&self, entry: &GameEntry, force: bool);
}

// Files below this size are memory-mapped; larger ones use buffered reads.
const MMAP_THRESHOLD: u64 = 2 * 1024 * 1024 * 1024; // 2GB
const READ_BUFFER_SIZE: usize = 1024 * 1024; // 1MB

/// Hashes rom files on disk: CRC32 for netplay, MD5 for achievements.
#[derive(Debug, Default)]
pub struct FileHasher;

impl FileHasher {
    pub fn new() -> Self {
        Self
    }
}

impl EntryHasher for FileHasher {
    fn refresh_checksum(&self, entry: &GameEntry, force: bool) {
        if !force && !entry.metadata(MetadataField::Checksum).is_empty() {
            return;
        }
        match compute_crc32(entry.rom_path()) {
            Ok(crc) => entry.set_metadata(MetadataField::Checksum, format!("{:08X}", crc)),
            Err(e) => warn!(rom = %entry.rom_path().display(), error = %e, "checksum failed"),
        }
    }

    fn refresh_digest(&self, entry: &GameEntry, force: bool) {
        if !force && !entry.metadata(MetadataField::Digest).is_empty() {
            return;
        }
        match compute_md5(entry.rom_path()) {
            Ok(digest) => entry.set_metadata(MetadataField::Digest, digest),
            Err(e) => warn!(rom = %entry.rom_path().display(), error = %e, "digest failed"),
        }
    }
}

fn compute_crc32(path: &Path) -> anyhow::Result<u32> {
    let mut hasher = Crc32::new();
    hash_file(path, |chunk| hasher.update(chunk))?;
    Ok(hasher.finalize())
}

fn compute_md5(path: &Path) -> anyhow::Result<String> {
    let mut hasher = Md5::new();
    hash_file(path, |chunk| Digest::update(&mut hasher, chunk))?;
    let bytes = hasher.finalize();
    Ok(bytes.iter().map(|b| format!("{:02x}", b)).collect())
}

/// Feed a file's bytes to `update`, memory-mapped when small enough.
fn hash_file(path: &Path, mut update: impl FnMut(&[u8])) -> anyhow::Result<()> {
    let mut file = File::open(path)?;
    let file_size = file.metadata()?.len();

    if file_size > 0 && file_size < MMAP_THRESHOLD {
        if let Ok(mmap) = unsafe { Mmap::map(&file) } {
            update(&mmap[..]);
            return Ok(());
        }
        // Fall through to buffered reading if mmap fails
    }

    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        update(&buffer[..bytes_read]);
    }
    Ok(())
}
