//! Job controller: the single entry point for starting and stopping hashing.
//!
//! At most one job is active at a time. `start` serializes submissions,
//! resolves "already running" conflicts through a yes/no prompt, builds the
//! initial queue from the catalog, and publishes the job before spawning its
//! workers. `stop` only flips the cancellation flag; teardown is always
//! performed by a worker thread, never by the caller.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::catalog::{Catalog, GameEntry, MetadataField};

use super::algorithms::EntryHasher;
use super::job::{ActiveSlot, Job};
use super::lookup::{AchievementIndex, HashLookupTable};
use super::pause::PauseGate;
use super::progress::{NotificationSink, ProgressReporter};
use super::HashKinds;

const TITLE_ACHIEVEMENTS: &str = "SEARCHING RETROACHIEVEMENTS";
const TITLE_NETPLAY: &str = "SEARCHING NETPLAY GAMES";
const RUNNING_QUESTION: &str = "GAME HASHING IS RUNNING. DO YOU WANT TO STOP IT?";
const NO_GAMES_MESSAGE: &str = "NO GAMES FIT THAT CRITERIA.";

/// User-facing confirmation and information surface.
pub trait Prompt: Send + Sync {
    /// Ask a yes/no question; true means yes.
    fn confirm(&self, question: &str, yes_label: &str, no_label: &str) -> bool;
    /// Surface an informational message.
    fn inform(&self, message: &str);
}

/// Serializes job submission and owns the active-job slot.
pub struct JobController {
    submit: Mutex<()>,
    active: ActiveSlot,
    notifications: Arc<dyn NotificationSink>,
    prompt: Arc<dyn Prompt>,
    index: Arc<dyn AchievementIndex>,
    hasher: Arc<dyn EntryHasher>,
    pause: Arc<PauseGate>,
    worker_count: usize,
}

impl JobController {
    pub fn new(
        notifications: Arc<dyn NotificationSink>,
        prompt: Arc<dyn Prompt>,
        index: Arc<dyn AchievementIndex>,
        hasher: Arc<dyn EntryHasher>,
        pause: Arc<PauseGate>,
    ) -> Self {
        Self {
            submit: Mutex::new(()),
            active: Arc::new(Mutex::new(None)),
            notifications,
            prompt,
            index,
            hasher,
            pause,
            worker_count: default_worker_count(),
        }
    }

    /// Override the worker pool size. Defaults to half the CPU count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.worker_count = workers.max(1);
        self
    }

    /// Start a hashing job over the catalog.
    ///
    /// If a job is already running: with `silent` this returns without
    /// effect, otherwise the user is asked whether to stop it. If no game
    /// needs hashing, no job is created and, when not silent, an
    /// informational message is surfaced.
    pub fn start(&self, catalog: &Catalog, kinds: HashKinds, force_all: bool, silent: bool) {
        let _submission = self.submit.lock().unwrap();

        let running = self.active.lock().unwrap().clone();
        if let Some(job) = running {
            if silent {
                return;
            }
            if self.prompt.confirm(RUNNING_QUESTION, "YES", "NO") {
                job.cancel();
            }
            return;
        }

        let queue = build_queue(catalog, kinds, force_all);
        if queue.is_empty() {
            debug!("no games fit the hashing criteria");
            if !silent {
                self.prompt.inform(NO_GAMES_MESSAGE);
            }
            return;
        }

        let lookup = if kinds.contains(HashKinds::DIGEST) {
            HashLookupTable::from_index(&*self.index)
        } else {
            HashLookupTable::empty()
        };

        let reporter = ProgressReporter::new(self.notifications.create());
        reporter.set_title(if kinds == HashKinds::DIGEST {
            TITLE_ACHIEVEMENTS
        } else {
            TITLE_NETPLAY
        });

        let job = Job::new(
            queue,
            kinds,
            force_all,
            lookup,
            reporter,
            Arc::clone(&self.pause),
            Arc::clone(&self.hasher),
            Arc::clone(&self.active),
            self.worker_count,
        );

        // Publish before spawning so a worker finishing instantly still
        // finds the slot occupied and clears it during teardown.
        *self.active.lock().unwrap() = Some(Arc::clone(&job));
        job.spawn_workers();
    }

    /// Cancel the active job, if any. Fire-and-forget: never fails, no-op
    /// when nothing is running.
    pub fn stop(&self) {
        if let Some(job) = self.active.lock().unwrap().clone() {
            job.cancel();
        }
    }

    /// Whether a job is currently running or finishing teardown.
    pub fn is_running(&self) -> bool {
        self.active.lock().unwrap().is_some()
    }

    /// Handle to the active job, if any.
    pub fn active_job(&self) -> Option<Arc<Job>> {
        self.active.lock().unwrap().clone()
    }
}

/// Scan the catalog for games needing hashing, in enumeration order.
fn build_queue(catalog: &Catalog, kinds: HashKinds, force_all: bool) -> VecDeque<Arc<GameEntry>> {
    let mut queue = VecDeque::new();
    for system in catalog.systems() {
        let take_checksum = kinds.contains(HashKinds::CHECKSUM) && system.netplay_supported();
        let take_digest = kinds.contains(HashKinds::DIGEST) && system.achievements_supported();
        if !take_checksum && !take_digest {
            continue;
        }

        for game in system.games() {
            let needs_checksum =
                take_checksum && (force_all || game.metadata(MetadataField::Checksum).is_empty());
            let needs_digest =
                take_digest && (force_all || game.metadata(MetadataField::Digest).is_empty());
            if needs_checksum || needs_digest {
                queue.push_back(Arc::clone(game));
            }
        }
    }
    queue
}

fn default_worker_count() -> usize {
    (num_cpus::get() / 2).max(1)
}
