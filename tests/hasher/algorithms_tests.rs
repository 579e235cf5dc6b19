// Tests for the file-backed hash algorithms

use romhasher::catalog::{GameEntry, MetadataField};
use romhasher::hasher::{EntryHasher, FileHasher};
use std::fs;
use tempfile::TempDir;

fn entry_for(dir: &TempDir, file_name: &str, contents: &[u8]) -> GameEntry {
    let path = dir.path().join(file_name);
    fs::write(&path, contents).unwrap();
    GameEntry::new("Test Game", "snes", path)
}

#[test]
fn test_known_crc32_and_md5() {
    let dir = TempDir::new().unwrap();
    let entry = entry_for(&dir, "game.sfc", b"hello world");
    let hasher = FileHasher::new();

    hasher.refresh_checksum(&entry, false);
    hasher.refresh_digest(&entry, false);

    assert_eq!(entry.metadata(MetadataField::Checksum), "0D4A1185");
    assert_eq!(
        entry.metadata(MetadataField::Digest),
        "5eb63bbbe01eeed093cb22bb8f5acdc3"
    );
}

#[test]
fn test_empty_file() {
    let dir = TempDir::new().unwrap();
    let entry = entry_for(&dir, "empty.sfc", b"");
    let hasher = FileHasher::new();

    hasher.refresh_checksum(&entry, false);
    hasher.refresh_digest(&entry, false);

    assert_eq!(entry.metadata(MetadataField::Checksum), "00000000");
    assert_eq!(
        entry.metadata(MetadataField::Digest),
        "d41d8cd98f00b204e9800998ecf8427e"
    );
}

#[test]
fn test_existing_values_kept_unless_forced() {
    let dir = TempDir::new().unwrap();
    let entry = entry_for(&dir, "game.sfc", b"hello world");
    let hasher = FileHasher::new();

    hasher.refresh_checksum(&entry, false);
    let first = entry.metadata(MetadataField::Checksum);

    // Change the file; without force the stored value must survive.
    fs::write(entry.rom_path(), b"different bytes").unwrap();
    hasher.refresh_checksum(&entry, false);
    assert_eq!(entry.metadata(MetadataField::Checksum), first);

    hasher.refresh_checksum(&entry, true);
    assert_ne!(entry.metadata(MetadataField::Checksum), first);
}

#[test]
fn test_missing_file_leaves_fields_empty() {
    let dir = TempDir::new().unwrap();
    let entry = GameEntry::new("Gone", "snes", dir.path().join("missing.sfc"));
    let hasher = FileHasher::new();

    hasher.refresh_checksum(&entry, false);
    hasher.refresh_digest(&entry, false);

    assert_eq!(entry.metadata(MetadataField::Checksum), "");
    assert_eq!(entry.metadata(MetadataField::Digest), "");
}

#[test]
fn test_large_buffered_path_matches_mmap_path() {
    // Files are mmapped below the size threshold; an empty file takes the
    // buffered path. Exercise the buffered loop with a multi-chunk file.
    let dir = TempDir::new().unwrap();
    let contents = vec![0xA5u8; 3 * 1024 * 1024];
    let entry = entry_for(&dir, "big.bin", &contents);
    let hasher = FileHasher::new();

    hasher.refresh_checksum(&entry, false);
    let mut expected = crc32fast::Hasher::new();
    expected.update(&contents);
    assert_eq!(
        entry.metadata(MetadataField::Checksum),
        format!("{:08X}", expected.finalize())
    );
}
