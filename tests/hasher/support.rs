// Shared fakes and helpers for hasher tests

use romhasher::catalog::{Catalog, GameEntry, MetadataField, SystemData};
use romhasher::hasher::{
    AchievementIndex, EntryHasher, NotificationHandle, NotificationSink, Prompt,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Notification sink that records every update for later inspection.
#[derive(Default)]
pub struct RecordingSink {
    pub titles: Arc<Mutex<Vec<String>>>,
    pub updates: Arc<Mutex<Vec<(String, u8)>>>,
    pub closes: Arc<AtomicUsize>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl NotificationSink for RecordingSink {
    fn create(&self) -> Box<dyn NotificationHandle> {
        Box::new(RecordingHandle {
            titles: Arc::clone(&self.titles),
            updates: Arc::clone(&self.updates),
            closes: Arc::clone(&self.closes),
        })
    }
}

struct RecordingHandle {
    titles: Arc<Mutex<Vec<String>>>,
    updates: Arc<Mutex<Vec<(String, u8)>>>,
    closes: Arc<AtomicUsize>,
}

impl NotificationHandle for RecordingHandle {
    fn set_title(&self, title: &str) {
        self.titles.lock().unwrap().push(title.to_string());
    }

    fn update(&self, label: &str, percent: u8) {
        self.updates.lock().unwrap().push((label.to_string(), percent));
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Prompt with a scripted yes/no answer, counting every call.
pub struct ScriptedPrompt {
    answer: bool,
    pub confirms: AtomicUsize,
    pub infos: AtomicUsize,
}

impl ScriptedPrompt {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            confirms: AtomicUsize::new(0),
            infos: AtomicUsize::new(0),
        })
    }

    pub fn confirm_count(&self) -> usize {
        self.confirms.load(Ordering::SeqCst)
    }

    pub fn info_count(&self) -> usize {
        self.infos.load(Ordering::SeqCst)
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, _question: &str, _yes_label: &str, _no_label: &str) -> bool {
        self.confirms.fetch_add(1, Ordering::SeqCst);
        self.answer
    }

    fn inform(&self, _message: &str) {
        self.infos.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory achievement index.
pub struct MapIndex(pub HashMap<String, String>);

impl MapIndex {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self(HashMap::new()))
    }

    pub fn with(entries: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }
}

impl AchievementIndex for MapIndex {
    fn digest_index(&self) -> HashMap<String, String> {
        self.0.clone()
    }
}

/// Entry hasher writing deterministic values derived from the entry name.
/// While `hold` is set, every call stalls, keeping the job alive.
pub struct FakeHasher {
    pub hold: Arc<AtomicBool>,
    delay: Duration,
}

impl FakeHasher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            hold: Arc::new(AtomicBool::new(false)),
            delay: Duration::ZERO,
        })
    }

    /// Sleep this long per item, to force worker interleaving.
    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            hold: Arc::new(AtomicBool::new(false)),
            delay,
        })
    }

    pub fn hold(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.hold.store(false, Ordering::SeqCst);
    }

    fn stall(&self) {
        while self.hold.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(1));
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

impl EntryHasher for FakeHasher {
    fn refresh_checksum(&self, entry: &GameEntry, force: bool) {
        self.stall();
        if force || entry.metadata(MetadataField::Checksum).is_empty() {
            entry.set_metadata(MetadataField::Checksum, format!("CRC-{}", entry.name()));
        }
    }

    fn refresh_digest(&self, entry: &GameEntry, force: bool) {
        self.stall();
        if force || entry.metadata(MetadataField::Digest).is_empty() {
            // Digest is the entry name, so tests can steer lookup hits.
            entry.set_metadata(MetadataField::Digest, entry.name().to_string());
        }
    }
}

/// Catalog with one system holding `count` games named `game-000`, ...
pub fn single_system_catalog(count: usize, netplay: bool, achievements: bool) -> Catalog {
    let mut system = SystemData::new("testsys", netplay, achievements);
    for i in 0..count {
        system.push_game(Arc::new(GameEntry::new(
            format!("game-{:03}", i),
            "testsys",
            format!("/roms/testsys/game-{:03}.bin", i),
        )));
    }
    Catalog::new(vec![system])
}

/// Poll `cond` until it holds or `timeout` expires; true when it held.
pub fn wait_until(timeout: Duration, cond: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    cond()
}

/// Controller wired with the recording fakes.
pub fn build_controller(
    sink: Arc<RecordingSink>,
    prompt: Arc<ScriptedPrompt>,
    index: Arc<dyn AchievementIndex>,
    hasher: Arc<FakeHasher>,
    pause: Arc<romhasher::hasher::PauseGate>,
    workers: usize,
) -> romhasher::hasher::JobController {
    romhasher::hasher::JobController::new(sink, prompt, index, hasher, pause)
        .with_workers(workers)
}
