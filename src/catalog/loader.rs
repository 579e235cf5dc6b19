//! Catalog loader.
//!
//! Builds a [`Catalog`] from a roms directory. The directory is expected to
//! contain one sub-directory per system plus a `systems.json` manifest that
//! declares each system's capability flags and rom file extensions. Systems
//! present on disk but absent from the manifest are skipped.

use anyhow::{Context, Result};
use jwalk::WalkDir;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use super::entry::GameEntry;
use super::system::{Catalog, SystemData};

/// Manifest file name expected at the root of the roms directory.
pub const MANIFEST_FILE: &str = "systems.json";

/// Per-system declaration in `systems.json`, keyed by directory name.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemManifest {
    /// Display name; defaults to the directory name when omitted.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the system supports netplay checksum hashing.
    #[serde(default)]
    pub netplay: bool,
    /// Whether the system supports achievement digest hashing.
    #[serde(default)]
    pub achievements: bool,
    /// Rom file extensions, without the leading dot. Empty means any file.
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Load a catalog from a roms directory containing a `systems.json` manifest.
pub fn load_catalog(root: &Path) -> Result<Catalog> {
    let manifest_path = root.join(MANIFEST_FILE);
    let data = fs::read_to_string(&manifest_path)
        .with_context(|| format!("reading manifest {}", manifest_path.display()))?;
    // BTreeMap keeps system order stable across runs.
    let manifest: BTreeMap<String, SystemManifest> = serde_json::from_str(&data)
        .with_context(|| format!("parsing manifest {}", manifest_path.display()))?;

    let mut catalog = Catalog::default();
    for (dir_name, decl) in &manifest {
        let system_dir = root.join(dir_name);
        if !system_dir.is_dir() {
            debug!(system = %dir_name, "manifest entry has no directory, skipping");
            continue;
        }

        let system_name = decl.name.clone().unwrap_or_else(|| dir_name.clone());
        let mut system = SystemData::new(&system_name, decl.netplay, decl.achievements);
        for rom in list_roms(&system_dir, &decl.extensions)? {
            system.push_game(Arc::new(rom_entry(&system_name, &rom)));
        }
        debug!(system = %system_name, games = system.games().len(), "loaded system");
        catalog.push_system(system);
    }

    Ok(catalog)
}

/// Recursively list rom files under a system directory, in sorted order.
fn list_roms(dir: &Path, extensions: &[String]) -> Result<Vec<std::path::PathBuf>> {
    let mut roms = Vec::new();
    for entry_result in WalkDir::new(dir).skip_hidden(true).follow_links(false).sort(true) {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "error walking system directory");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if matches_extension(&path, extensions) {
            roms.push(path);
        }
    }
    Ok(roms)
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

fn rom_entry(system_name: &str, rom: &Path) -> GameEntry {
    let name = rom
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();
    GameEntry::new(name, system_name, rom)
}
