//! The belt spawner thread.

use crate::config::SpawnConfig;
use crate::state::GameState;
use log::debug;
use sim_core::sync::OnceFlag;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Worker that stages a fresh belt asteroid at a randomized interval.
///
/// The spawner sleeps between spawns and re-checks its stop flag each
/// time it wakes, so shutdown can lag by up to one full interval. The
/// driver sets the flag and joins; it never interrupts the sleep.
pub struct AsteroidSpawner {
    state: Arc<GameState>,
    stop: Arc<OnceFlag>,
    config: SpawnConfig,
}

impl AsteroidSpawner {
    /// Creates a spawner feeding `state` until `stop` is raised.
    #[must_use]
    pub fn new(state: Arc<GameState>, stop: Arc<OnceFlag>, config: SpawnConfig) -> Self {
        Self {
            state,
            stop,
            config,
        }
    }

    /// Spawns asteroids until the stop flag is raised.
    pub fn run(self) {
        while !self.stop.is_set() {
            self.state.add_asteroid();
            let delay = self
                .state
                .rng()
                .gen_range(self.config.min_delay_ms..=self.config.max_delay_ms);
            thread::sleep(Duration::from_millis(delay));
        }
        debug!("asteroid spawner stopping");
    }

    /// Runs the spawner on a named worker thread.
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("asteroid-spawner".to_string())
            .spawn(move || self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::math::Vec2;
    use sim_core::rng::SharedRng;

    #[test]
    fn test_spawner_stages_rocks_until_stopped() {
        let state = Arc::new(GameState::new(
            Vec2::new(500.0, 500.0),
            SharedRng::seeded(17),
        ));
        let stop = Arc::new(OnceFlag::new());
        let spawner = AsteroidSpawner::new(
            Arc::clone(&state),
            Arc::clone(&stop),
            SpawnConfig {
                min_delay_ms: 1,
                max_delay_ms: 2,
            },
        );

        let handle = spawner.spawn().unwrap();
        thread::sleep(Duration::from_millis(50));
        stop.set();
        handle.join().unwrap();

        state.tick();
        assert!(
            state.asteroid_count() > 0,
            "spawner staged nothing in 50ms of 1-2ms intervals"
        );
    }
}
