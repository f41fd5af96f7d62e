//! Headless driver: wires the worker threads to the shared state and
//! runs the fixed-rate simulation loop.

use log::{info, warn};
use planetoids::config::{ConfigError, GameConfig};
use planetoids::entities::{boxed, Decorative, Entity, MoveIntent, Player, TICK_SECONDS};
use planetoids::input::{InputEvent, InputTranslator};
use planetoids::render::RecordingSink;
use planetoids::spawner::AsteroidSpawner;
use planetoids::state::{GamePhase, GameState};
use sim_core::math::Point2;
use sim_core::sync::{OnceFlag, SharedQueue};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Ticks the banner stays up before the driver exits.
const GAME_OVER_GRACE_TICKS: u64 = 180;

#[derive(Debug, Error)]
enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn worker thread: {0}")]
    Thread(#[from] std::io::Error),
}

fn main() -> Result<(), DriverError> {
    sim_core::logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::load_or_default("planetoids.toml"),
    };
    info!(
        "starting planetoids: window {}x{}, belt spawn every {}-{}ms",
        config.window.width,
        config.window.height,
        config.spawning.min_delay_ms,
        config.spawning.max_delay_ms
    );

    let state = Arc::new(GameState::new(config.bounds(), config.build_rng()));
    let player = Arc::new(Player::new(Point2::from(config.bounds() * 0.5)));
    seed_starfield(&state, config.run.starfield);

    let stop = Arc::new(OnceFlag::new());
    let events = Arc::new(SharedQueue::new());

    let translator = InputTranslator::new(Arc::clone(&events), Arc::clone(&player)).spawn()?;
    let spawner = AsteroidSpawner::new(
        Arc::clone(&state),
        Arc::clone(&stop),
        config.spawning.clone(),
    )
    .spawn()?;
    let pilot = spawn_demo_pilot(Arc::clone(&events), Arc::clone(&stop))?;

    let ticks = run_loop(&state, &player, config.run.max_ticks);

    // Workers first check the flag; the parked translator needs the
    // sentinel on top of it.
    stop.set();
    events.push(InputEvent::Shutdown);
    join_worker("input-translator", translator);
    join_worker("asteroid-spawner", spawner);
    join_worker("demo-pilot", pilot);

    info!(
        "run complete: {} points over {} ticks, {} entities live",
        state.score(),
        ticks,
        state.entity_count()
    );
    Ok(())
}

/// Runs the fixed-rate loop until the tick budget or the post-game
/// grace period runs out. Returns the number of ticks simulated.
fn run_loop(state: &GameState, player: &Player, max_ticks: Option<u64>) -> u64 {
    let tick_interval = Duration::from_secs_f32(TICK_SECONDS);
    let mut sink = RecordingSink::new();
    let mut next_tick = Instant::now() + tick_interval;
    let mut ticks: u64 = 0;
    let mut over_since: Option<u64> = None;

    loop {
        if state.phase() == GamePhase::Running {
            player.tick(state);
        }
        state.sweep_expired();
        state.tick();

        sink.clear();
        state.draw_all(&mut sink);
        player.draw(&mut sink);

        ticks += 1;
        if ticks % 600 == 0 {
            info!(
                "t={}s score={} entities={} primitives={}",
                ticks / 120,
                state.score(),
                state.entity_count(),
                sink.ops().len()
            );
        }

        if state.game_is_over() && over_since.is_none() {
            over_since = Some(ticks);
        }
        if let Some(over_tick) = over_since {
            if ticks - over_tick >= GAME_OVER_GRACE_TICKS {
                break;
            }
        }
        if let Some(limit) = max_ticks {
            if ticks >= limit {
                info!("tick budget exhausted");
                break;
            }
        }

        if let Some(wait) = next_tick.checked_duration_since(Instant::now()) {
            thread::sleep(wait);
        } else {
            // Fell behind; drop the debt instead of bursting to catch up.
            next_tick = Instant::now();
        }
        next_tick += tick_interval;
    }
    ticks
}

fn seed_starfield(state: &GameState, count: u32) {
    let bounds = state.bounds();
    for _ in 0..count {
        let position = Point2::new(
            state.rng().gen_range(0.0..bounds.x),
            state.rng().gen_range(0.0..bounds.y),
        );
        state.stage_entity(boxed(Decorative::star(position)));
    }
}

/// Feeds a canned flight plan into the event queue so a headless run
/// exercises the whole input path: turning, thrust and fire bursts.
fn spawn_demo_pilot(
    events: Arc<SharedQueue<InputEvent>>,
    stop: Arc<OnceFlag>,
) -> std::io::Result<JoinHandle<()>> {
    const SCRIPT: [InputEvent; 8] = [
        InputEvent::Pressed(MoveIntent::FIRE),
        InputEvent::Pressed(MoveIntent::LEFT),
        InputEvent::Released(MoveIntent::LEFT),
        InputEvent::Pressed(MoveIntent::FORWARD),
        InputEvent::Released(MoveIntent::FORWARD),
        InputEvent::Pressed(MoveIntent::RIGHT),
        InputEvent::Released(MoveIntent::RIGHT),
        InputEvent::Released(MoveIntent::FIRE),
    ];

    thread::Builder::new()
        .name("demo-pilot".to_string())
        .spawn(move || {
            let mut step = 0;
            while !stop.is_set() {
                events.push(SCRIPT[step % SCRIPT.len()]);
                step += 1;
                thread::sleep(Duration::from_millis(200));
            }
        })
}

fn join_worker(name: &str, handle: JoinHandle<()>) {
    if handle.join().is_err() {
        warn!("worker thread '{name}' panicked");
    }
}
