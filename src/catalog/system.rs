//! Systems and the catalog that groups them.

use std::sync::Arc;

use super::entry::GameEntry;

/// One system (platform) in the catalog, with its capability flags and games.
#[derive(Debug)]
pub struct SystemData {
    name: String,
    netplay_supported: bool,
    achievements_supported: bool,
    games: Vec<Arc<GameEntry>>,
}

impl SystemData {
    pub fn new(name: impl Into<String>, netplay: bool, achievements: bool) -> Self {
        Self {
            name: name.into(),
            netplay_supported: netplay,
            achievements_supported: achievements,
            games: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this system's games take part in netplay checksum hashing.
    pub fn netplay_supported(&self) -> bool {
        self.netplay_supported
    }

    /// Whether this system's games take part in achievement digest hashing.
    pub fn achievements_supported(&self) -> bool {
        self.achievements_supported
    }

    pub fn push_game(&mut self, game: Arc<GameEntry>) {
        self.games.push(game);
    }

    /// Games in enumeration order. The hashing queue preserves this order.
    pub fn games(&self) -> &[Arc<GameEntry>] {
        &self.games
    }
}

/// The full game catalog: an ordered list of systems.
#[derive(Debug, Default)]
pub struct Catalog {
    systems: Vec<SystemData>,
}

impl Catalog {
    pub fn new(systems: Vec<SystemData>) -> Self {
        Self { systems }
    }

    pub fn systems(&self) -> &[SystemData] {
        &self.systems
    }

    pub fn push_system(&mut self, system: SystemData) {
        self.systems.push(system);
    }

    /// Total number of games across all systems.
    pub fn game_count(&self) -> usize {
        self.systems.iter().map(|s| s.games().len()).sum()
    }
}
