//! The shared simulation state.
//!
//! [`GameState`] owns every live and staged entity and is the one
//! object all worker threads share. Entities added from any thread go
//! through staging queues first and become live at the top of the next
//! tick, so nothing ever mutates a collection that is mid-iteration.
//!
//! Lock nesting order, outermost first: general entity collection,
//! then the asteroid map, then the staging queues. Entity ticks run
//! under the lock of the collection that owns them and may only call
//! inward along that order.

use crate::entities::{boxed, Asteroid, AsteroidKey, BoxedEntity, Entity, Projectile, TextOverlay};
use crate::render::FrameSink;
use log::{info, trace};
use parking_lot::Mutex;
use sim_core::math::{Point2, Vec2};
use sim_core::rng::SharedRng;
use sim_core::sync::{OnceFlag, SharedQueue, SharedSlotMap, SharedVec};
use std::sync::atomic::{AtomicU64, Ordering};

/// Coarse run state of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Entities are simulated every tick.
    Running,
    /// The ship was lost; the world is frozen under the banner.
    GameOver,
}

/// Central store for everything the simulation owns.
///
/// Shared behind an `Arc` between the driver, the belt spawner and the
/// input translator. All methods take `&self` and are safe to call
/// from any thread; mutation happens behind the internal locks.
pub struct GameState {
    entities: SharedVec<BoxedEntity>,
    asteroids: SharedSlotMap<AsteroidKey, Asteroid>,
    staged_entities: SharedQueue<BoxedEntity>,
    staged_asteroids: SharedQueue<Asteroid>,
    score: AtomicU64,
    game_over: OnceFlag,
    overlay: Mutex<Option<BoxedEntity>>,
    bounds: Vec2,
    rng: SharedRng,
}

impl GameState {
    /// Creates an empty state for a window of `bounds` units.
    #[must_use]
    pub fn new(bounds: Vec2, rng: SharedRng) -> Self {
        Self {
            entities: SharedVec::new(),
            asteroids: SharedSlotMap::new(),
            staged_entities: SharedQueue::new(),
            staged_asteroids: SharedQueue::new(),
            score: AtomicU64::new(0),
            game_over: OnceFlag::new(),
            overlay: Mutex::new(None),
            bounds,
            rng,
        }
    }

    /// Window size in units.
    #[must_use]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// The shared random stream.
    #[must_use]
    pub fn rng(&self) -> &SharedRng {
        &self.rng
    }

    /// Stages a belt asteroid derived from the window bounds: top
    /// tier, just outside a random edge, aimed loosely at the centre.
    pub fn add_asteroid(&self) {
        self.stage_asteroid(Asteroid::spawn_at_edge(self.bounds, &self.rng));
    }

    /// Stages a fully formed asteroid.
    pub fn stage_asteroid(&self, asteroid: Asteroid) {
        self.staged_asteroids.push(asteroid);
    }

    /// Stages a projectile whose tail starts at `muzzle`.
    pub fn add_projectile(&self, muzzle: Point2, heading: f32) {
        self.stage_entity(boxed(Projectile::new(muzzle, heading)));
    }

    /// Stages any boxed entity for admission at the next tick.
    pub fn stage_entity(&self, entity: BoxedEntity) {
        self.staged_entities.push(entity);
    }

    /// Adds to the round score.
    pub fn add_score(&self, points: u64) {
        self.score.fetch_add(points, Ordering::Relaxed);
    }

    /// Current round score.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score.load(Ordering::Relaxed)
    }

    /// Latches the round into [`GamePhase::GameOver`]. Idempotent;
    /// the first call wins and the phase never reverts.
    pub fn set_game_over(&self) {
        self.game_over.set();
    }

    /// True once the round has ended.
    #[must_use]
    pub fn game_is_over(&self) -> bool {
        self.game_over.is_set()
    }

    /// Current phase of the round.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        if self.game_is_over() {
            GamePhase::GameOver
        } else {
            GamePhase::Running
        }
    }

    /// Live entities across both collections.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len() + self.asteroids.len()
    }

    /// Live asteroids only.
    #[must_use]
    pub fn asteroid_count(&self) -> usize {
        self.asteroids.len()
    }

    /// Visits every live asteroid read-only.
    pub fn for_each_asteroid<F>(&self, mut visit: F)
    where
        F: FnMut(&Asteroid),
    {
        self.asteroids.for_each(|_, asteroid| visit(asteroid));
    }

    /// Visits every live asteroid mutably. Crate-internal: entity
    /// ticks use this for collision resolution.
    pub(crate) fn for_each_asteroid_mut<F>(&self, visit: F)
    where
        F: FnMut(AsteroidKey, &mut Asteroid),
    {
        self.asteroids.for_each_mut(visit);
    }

    /// Advances the world one fixed tick.
    ///
    /// Staged arrivals are admitted first, so anything staged before
    /// this call is simulated and drawn from this tick on. After the
    /// round ends only admission keeps running; nothing moves again.
    pub fn tick(&self) {
        while let Some(asteroid) = self.staged_asteroids.try_pop() {
            let key = self.asteroids.insert(asteroid);
            trace!("admitted asteroid {key:?}");
        }
        while let Some(entity) = self.staged_entities.try_pop() {
            self.entities.push(entity);
        }

        if self.game_is_over() {
            self.ensure_game_over_overlay();
            return;
        }

        self.asteroids.for_each_mut(|_, asteroid| asteroid.tick(self));
        self.entities.for_each_mut(|entity| entity.tick(self));
    }

    /// Removes every entity marked expired. Runs outside `tick` so a
    /// kill is visible for the frame it happened in before the body
    /// disappears.
    pub fn sweep_expired(&self) {
        self.asteroids.retain(|_, asteroid| !asteroid.is_expired());
        self.entities.retain(|entity| !entity.is_expired());
    }

    /// Draws every live entity, the overlay last so it stays on top.
    pub fn draw_all(&self, sink: &mut dyn FrameSink) {
        self.entities.for_each(|entity| entity.draw(sink));
        self.asteroids.for_each(|_, asteroid| asteroid.draw(sink));
        if let Some(overlay) = self.overlay.lock().as_ref() {
            overlay.draw(sink);
        }
    }

    fn ensure_game_over_overlay(&self) {
        let mut overlay = self.overlay.lock();
        if overlay.is_none() {
            info!("game over at {} points", self.score());
            *overlay = Some(boxed(TextOverlay::banner(
                "GAME OVER",
                Point2::from(self.bounds * 0.5),
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Decorative, TemporaryTextOverlay};
    use crate::render::{DrawOp, RecordingSink};

    fn test_state() -> GameState {
        GameState::new(Vec2::new(500.0, 500.0), SharedRng::seeded(21))
    }

    #[test]
    fn test_staged_asteroids_invisible_until_next_tick() {
        let state = test_state();
        state.add_asteroid();

        assert_eq!(state.asteroid_count(), 0);
        state.sweep_expired();
        assert_eq!(state.asteroid_count(), 0, "sweep must not admit anything");

        state.tick();
        assert_eq!(state.asteroid_count(), 1);
    }

    #[test]
    fn test_entity_count_spans_both_collections() {
        let state = test_state();
        state.stage_asteroid(Asteroid::new(Point2::new(250.0, 250.0), 0.0, 2));
        state.stage_entity(boxed(Decorative::star(Point2::new(10.0, 10.0))));
        state.tick();

        assert_eq!(state.entity_count(), 2);
        assert_eq!(state.asteroid_count(), 1);
    }

    #[test]
    fn test_score_accumulates() {
        let state = test_state();
        state.add_score(20);
        state.add_score(50);
        assert_eq!(state.score(), 70);
    }

    #[test]
    fn test_game_over_freezes_the_world_but_admission_continues() {
        let state = test_state();
        state.stage_asteroid(Asteroid::new(Point2::new(100.0, 100.0), 0.0, 3));
        state.tick();

        let mut before = Vec::new();
        state.for_each_asteroid(|a| before.push(a.position()));

        state.set_game_over();
        state.stage_asteroid(Asteroid::new(Point2::new(300.0, 300.0), 0.0, 1));
        for _ in 0..3 {
            state.tick();
        }

        assert_eq!(state.asteroid_count(), 2, "drains must keep running");
        let mut after = Vec::new();
        state.for_each_asteroid(|a| after.push(a.position()));
        assert!(after.contains(&before[0]), "asteroid moved after game over");
        assert!(after.contains(&Point2::new(300.0, 300.0)));
    }

    #[test]
    fn test_game_over_overlay_appears_exactly_once() {
        let state = test_state();
        state.set_game_over();
        for _ in 0..5 {
            state.tick();
        }

        let mut sink = RecordingSink::new();
        state.draw_all(&mut sink);
        assert_eq!(sink.text_contents(), vec!["GAME OVER"]);
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_sweep_removes_expired_entities() {
        let state = test_state();
        state.stage_entity(boxed(TemporaryTextOverlay::new(
            "x".to_string(),
            Point2::new(50.0, 50.0),
            Vec2::zeros(),
            1,
        )));
        state.tick();
        assert_eq!(state.entity_count(), 1);

        state.tick();
        state.sweep_expired();
        assert_eq!(state.entity_count(), 0);
    }

    #[test]
    fn test_draw_all_covers_entities_asteroids_and_overlay() {
        let state = test_state();
        state.stage_asteroid(Asteroid::new(Point2::new(250.0, 250.0), 0.0, 2));
        state.stage_entity(boxed(Decorative::star(Point2::new(10.0, 10.0))));
        state.tick();

        let mut sink = RecordingSink::new();
        state.draw_all(&mut sink);
        let circles = sink
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
            .count();
        let points = sink
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Point { .. }))
            .count();
        assert_eq!((circles, points), (1, 1));
        assert!(sink.text_contents().is_empty());
    }
}
