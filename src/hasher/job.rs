//! One run of the hashing task, from queue construction to worker teardown.
//!
//! A fixed pool of worker threads drains a FIFO queue under a single lock.
//! The lock is released for the hash computation itself, so workers hash in
//! true parallel; pop and progress update happen atomically together. The
//! last worker to exit performs teardown exactly once: it closes the
//! reporter and clears the controller's active slot. Teardown is guarded by
//! a one-shot latch on top of the counter decrement, which itself happens
//! under the queue lock.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{debug, info};

use crate::catalog::{GameEntry, MetadataField};

use super::algorithms::EntryHasher;
use super::lookup::HashLookupTable;
use super::pause::PauseGate;
use super::progress::ProgressReporter;
use super::HashKinds;

/// Shared slot holding the currently active job, if any. Cleared by the last
/// worker during teardown; the cycle through the slot is broken at that
/// point, so the job is freed once the workers' own handles drop.
pub(crate) type ActiveSlot = Arc<Mutex<Option<Arc<Job>>>>;

/// Queue and worker counter, kept consistent under one lock.
struct JobState {
    queue: VecDeque<Arc<GameEntry>>,
    remaining_workers: usize,
}

/// A running hashing job. Constructed by the controller, destroyed by its
/// own last worker.
pub struct Job {
    state: Mutex<JobState>,
    total: usize,
    kinds: HashKinds,
    force: bool,
    cancelled: AtomicBool,
    finished: AtomicBool,
    worker_count: usize,
    lookup: HashLookupTable,
    reporter: ProgressReporter,
    pause: Arc<PauseGate>,
    hasher: Arc<dyn EntryHasher>,
    slot: ActiveSlot,
}

impl Job {
    /// Queues are never empty here; the controller refuses to build a job
    /// from an empty candidate set.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        queue: VecDeque<Arc<GameEntry>>,
        kinds: HashKinds,
        force: bool,
        lookup: HashLookupTable,
        reporter: ProgressReporter,
        pause: Arc<PauseGate>,
        hasher: Arc<dyn EntryHasher>,
        slot: ActiveSlot,
        worker_count: usize,
    ) -> Arc<Self> {
        debug_assert!(!queue.is_empty());
        debug_assert!(worker_count >= 1);
        let total = queue.len();
        Arc::new(Self {
            state: Mutex::new(JobState {
                queue,
                remaining_workers: worker_count,
            }),
            total,
            kinds,
            force,
            cancelled: AtomicBool::new(false),
            finished: AtomicBool::new(false),
            worker_count,
            lookup,
            reporter,
            pause,
            hasher,
            slot,
        })
    }

    /// Spawn the worker pool. Threads are detached; completion is observed
    /// through the active slot going empty.
    pub(crate) fn spawn_workers(self: &Arc<Self>) {
        info!(
            items = self.total,
            workers = self.worker_count,
            "starting hashing job"
        );
        for i in 0..self.worker_count {
            let job = Arc::clone(self);
            thread::Builder::new()
                .name(format!("hasher-{}", i))
                .spawn(move || job.run())
                .expect("failed to spawn hasher worker");
        }
    }

    /// Request cancellation. Monotonic: never reset, always succeeds.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        // Wake any worker parked at the pause gate so it re-checks the flag.
        self.pause.nudge();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Initial queue length; fixed at construction, denominator for percent.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Items still waiting to be dequeued.
    pub fn remaining_in_queue(&self) -> usize {
        self.state.lock().unwrap().queue.len()
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// The drain loop, executed by every worker thread.
    fn run(self: Arc<Self>) {
        let mut state = self.state.lock().unwrap();
        loop {
            if self.is_cancelled() || state.queue.is_empty() {
                break;
            }
            let entry = state.queue.pop_front().unwrap();
            let remaining = state.queue.len();
            // Label names the item now leaving the queue; percent grows in
            // dequeue order. Both pushed under the lock so reports stay in
            // queue order even though completion order is not guaranteed.
            let percent = (100 - remaining * 100 / self.total) as u8;
            self.reporter.update(&entry.display_label(), percent);
            drop(state);

            // Checked once per item. A cancellation arriving during the wait
            // lets the worker proceed to finish this in-flight item.
            self.pause.wait_while_engaged(|| self.is_cancelled());

            if self.kinds.contains(HashKinds::CHECKSUM) {
                self.hasher.refresh_checksum(&entry, self.force);
            }
            if self.kinds.contains(HashKinds::DIGEST) {
                self.hasher.refresh_digest(&entry, self.force);
                if !self.lookup.is_empty() {
                    let digest = entry.metadata(MetadataField::Digest);
                    if let Some(id) = self.lookup.lookup(&digest) {
                        entry.set_metadata(MetadataField::AchievementId, id);
                    }
                }
            }

            state = self.state.lock().unwrap();
        }

        // Still holding the lock: decrement and check must be atomic with
        // respect to other workers exiting concurrently.
        state.remaining_workers -= 1;
        let last = state.remaining_workers == 0;
        debug!(last, "hasher worker exiting");
        if last
            && self
                .finished
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
        {
            self.reporter.close();
            *self.slot.lock().unwrap() = None;
            info!(cancelled = self.is_cancelled(), "hashing job finished");
        }
    }
}
