//! Scripted duel between a player and a goblin.
//!
//! Prints every bus event as one JSON line on stdout; logs go to stderr and,
//! with `LOG_TO_FILE=true`, to a log file.
use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use game_content::{Content, ContentFactory};
use game_core::{EntityId, Faction, Position, Tick, skill::registry};
use runtime::{
    ActorSpec, Clock, Event, EventBus, ManualClock, RuntimeConfig, Simulation, TargetRef, Topic,
};
use tokio::sync::broadcast::Receiver;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const FRAME_MS: u64 = 100;
const TIME_LIMIT: Tick = Tick::from_secs(60);
const ROTATION: [&str; 3] = ["stoneskin", "fireball", "strike"];

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = RuntimeConfig::from_env();
    let _guard = setup_logging(&config)?;

    let content = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir).load()?,
        None => Content::builtin()?,
    };
    tracing::info!(
        skills = content.registry.len(),
        max_level = content.config.max_level,
        "content loaded"
    );
    let registry = registry::initialize(content.registry)?;

    let bus = EventBus::with_capacity(config.event_buffer_size);
    let mut receivers = bus.subscribe_all();
    let clock = ManualClock::new(Tick::ZERO);
    let mut sim = Simulation::new(content.config, registry, bus);

    let hero = sim.spawn(
        ActorSpec::new("hero", Faction::Player)
            .with_mana(100)
            .with_base_damage(2)
            .with_skills([
                "strike",
                "fireball",
                "mend",
                "arcane_burst",
                "stoneskin",
                "vitality",
                "meditation",
            ])
            .with_hotbar(),
        clock.now(),
    )?;
    let goblin = sim.spawn(
        ActorSpec::new("goblin", Faction::Hostile)
            .at(Position::new(0.0, 0.0, 2.0))
            .facing(Position::new(0.0, 0.0, -1.0))
            .with_health(140)
            .with_level(2)
            .with_skills(["claw", "frenzy"])
            .with_reward(150)
            .with_aggro(sim.config().aggro_radius),
        clock.now(),
    )?;

    while clock.now() < TIME_LIMIT && sim.actor(goblin)?.is_alive() && sim.actor(hero)?.is_alive()
    {
        let now = clock.now();
        if sim.actor(hero)?.skills.current().is_none() {
            for name in ROTATION {
                sim.set_target(hero, Some(TargetRef::Entity(goblin)))?;
                if sim.cast_by_name(hero, name, now)?.is_started() {
                    break;
                }
            }
        }
        sim.tick(now)?;
        print_events(&mut receivers)?;
        clock.advance(FRAME_MS);
    }

    report(&sim, hero)?;
    report(&sim, goblin)?;
    registry::shutdown();
    Ok(())
}

fn report(sim: &Simulation, id: EntityId) -> Result<()> {
    let actor = sim.actor(id)?;
    tracing::info!(
        entity = %id,
        name = %actor.state.name,
        health = actor.state.health.current,
        mana = actor.state.mana.current,
        level = actor.level(),
        experience = actor.experience.current(),
        "final state"
    );
    Ok(())
}

fn print_events(receivers: &mut HashMap<Topic, Receiver<Event>>) -> Result<()> {
    for receiver in receivers.values_mut() {
        while let Ok(event) = receiver.try_recv() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }
    Ok(())
}

/// Setup logging to stderr and, when enabled, to a file.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(config: &RuntimeConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_new(&config.logging.filter)?;
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = if config.logging.to_file {
        let log_dir = config
            .logging
            .directory
            .clone()
            .unwrap_or_else(default_log_directory);
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = tracing_appender::rolling::never(&log_dir, "duel.log");
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_file)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: filter={}", config.logging.filter);
    Ok(guard)
}

/// Platform cache directory, e.g. `~/.cache/skillcore/logs` on Linux.
fn default_log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "skillcore")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("skillcore").join("logs"))
}
