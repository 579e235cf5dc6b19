// End-to-end achievement resolution through the lookup table

use crate::support::*;
use romhasher::catalog::{Catalog, GameEntry, MetadataField, SystemData};
use romhasher::hasher::{HashKinds, PauseGate};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_achievement_ids_resolved_case_insensitively() {
    // The fake hasher writes the entry name as its digest, so naming an
    // entry after a (lowercased) table key steers the lookup.
    let games: Vec<Arc<GameEntry>> = ["abcd1234", "feedface", "0badc0de"]
        .iter()
        .map(|name| Arc::new(GameEntry::new(*name, "psx", format!("/roms/psx/{}.cue", name))))
        .collect();
    let mut system = SystemData::new("psx", false, true);
    for game in &games {
        system.push_game(Arc::clone(game));
    }
    let catalog = Catalog::new(vec![system]);

    let controller = build_controller(
        RecordingSink::new(),
        ScriptedPrompt::answering(false),
        MapIndex::with(&[("ABCD1234", "ra-77")]),
        FakeHasher::new(),
        Arc::new(PauseGate::new()),
        2,
    );

    controller.start(&catalog, HashKinds::DIGEST, false, false);
    assert!(wait_until(Duration::from_secs(10), || !controller.is_running()));

    for game in &games {
        assert!(!game.metadata(MetadataField::Digest).is_empty());
    }
    assert_eq!(games[0].metadata(MetadataField::AchievementId), "ra-77");
    assert_eq!(games[1].metadata(MetadataField::AchievementId), "");
    assert_eq!(games[2].metadata(MetadataField::AchievementId), "");
}
