use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use romhasher::catalog::{load_catalog, MetadataField};
use romhasher::hasher::{
    AchievementIndex, FileHasher, HashKinds, JobController, JsonAchievementIndex, PauseGate,
};
use romhasher::ui::{TerminalNotifications, TerminalPrompt};

/// Hash a game library for netplay checksums and achievement digests.
#[derive(Parser)]
#[command(name = "romhasher", version)]
struct Cli {
    /// Roms directory containing a systems.json manifest
    roms: PathBuf,

    /// Which hash kinds to compute
    #[arg(long, value_enum, default_value = "all")]
    kind: KindArg,

    /// Recompute hashes even when a value already exists
    #[arg(long)]
    force: bool,

    /// Suppress informational messages and prompts
    #[arg(long)]
    silent: bool,

    /// JSON file mapping achievement digests to ids
    #[arg(long)]
    index: Option<PathBuf>,

    /// Worker thread count; defaults to half the CPU count
    #[arg(long)]
    workers: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Netplay,
    Achievements,
    All,
}

impl From<KindArg> for HashKinds {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Netplay => HashKinds::CHECKSUM,
            KindArg::Achievements => HashKinds::DIGEST,
            KindArg::All => HashKinds::ALL,
        }
    }
}

/// Used when no index file is given; every lookup misses.
struct EmptyIndex;

impl AchievementIndex for EmptyIndex {
    fn digest_index(&self) -> std::collections::HashMap<String, String> {
        Default::default()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "romhasher=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let catalog = load_catalog(&cli.roms)?;
    println!(
        "Loaded {} systems, {} games",
        catalog.systems().len(),
        catalog.game_count()
    );

    let index: Arc<dyn AchievementIndex> = match &cli.index {
        Some(path) => Arc::new(JsonAchievementIndex::load(path)?),
        None => Arc::new(EmptyIndex),
    };

    let mut controller = JobController::new(
        Arc::new(TerminalNotifications::new()),
        Arc::new(TerminalPrompt::new()),
        index,
        Arc::new(FileHasher::new()),
        Arc::new(PauseGate::new()),
    );
    if let Some(workers) = cli.workers {
        controller = controller.with_workers(workers);
    }

    controller.start(&catalog, cli.kind.into(), cli.force, cli.silent);

    // Teardown is performed by the last worker; wait for the slot to clear.
    while controller.is_running() {
        thread::sleep(Duration::from_millis(50));
    }

    let mut checksums = 0;
    let mut digests = 0;
    let mut achievements = 0;
    for system in catalog.systems() {
        for game in system.games() {
            if !game.metadata(MetadataField::Checksum).is_empty() {
                checksums += 1;
            }
            if !game.metadata(MetadataField::Digest).is_empty() {
                digests += 1;
            }
            if !game.metadata(MetadataField::AchievementId).is_empty() {
                achievements += 1;
            }
        }
    }
    println!(
        "Done: {} checksums, {} digests, {} achievement matches",
        checksums, digests, achievements
    );

    Ok(())
}
