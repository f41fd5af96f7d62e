//! Projectiles: short-lived darts fired from the player's nose.

use super::{boxed, circle_in_bounds, Asteroid, Entity, TemporaryTextOverlay, MAX_SPEED, TICK_SECONDS};
use crate::render::FrameSink;
use crate::state::GameState;
use log::debug;
use sim_core::collision;
use sim_core::math::{heading_vector, Point2};
use sim_core::sync::OnceFlag;

/// Full length of the dart.
const LENGTH: f32 = 12.0;

/// A fired shot.
///
/// Projectiles travel in a straight line at exactly the global speed
/// cap and die on their first hit or on leaving the window. Only the
/// nose tip counts for collisions, so a shot sliding past a rock
/// sideways passes clean through.
#[derive(Debug, Clone)]
pub struct Projectile {
    position: Point2,
    heading: f32,
    expired: OnceFlag,
}

impl Projectile {
    /// Creates a shot whose tail starts at `muzzle`, flying along
    /// `heading` radians.
    #[must_use]
    pub fn new(muzzle: Point2, heading: f32) -> Self {
        Self {
            position: muzzle + heading_vector(heading) * (LENGTH / 2.0),
            heading,
            expired: OnceFlag::new(),
        }
    }

    fn nose(&self) -> Point2 {
        self.position + heading_vector(self.heading) * (LENGTH / 2.0)
    }

    fn tail(&self) -> Point2 {
        self.position - heading_vector(self.heading) * (LENGTH / 2.0)
    }
}

impl Entity for Projectile {
    fn draw(&self, sink: &mut dyn FrameSink) {
        sink.segment(self.tail(), self.nose());
    }

    fn tick(&mut self, state: &GameState) {
        self.position += heading_vector(self.heading) * MAX_SPEED * TICK_SECONDS;
        if !circle_in_bounds(self.position, LENGTH / 2.0, state.bounds()) {
            self.expired.set();
            return;
        }

        state.for_each_asteroid_mut(|_key, asteroid| {
            if self.expired.is_set() || asteroid.is_expired() {
                return;
            }
            if self.overlaps_asteroid(asteroid) {
                let points = asteroid.points();
                debug!(
                    "projectile struck a tier {} asteroid for {points} points",
                    asteroid.tier()
                );
                asteroid.shatter(state);
                state.add_score(points);
                state.stage_entity(boxed(TemporaryTextOverlay::score_popup(
                    points,
                    asteroid.position(),
                )));
                self.expired.set();
            }
        });
    }

    fn position(&self) -> Point2 {
        self.position
    }

    fn radius(&self) -> f32 {
        LENGTH / 2.0
    }

    fn is_expired(&self) -> bool {
        self.expired.is_set()
    }

    /// Only the nose tip is tested, as a zero-radius point.
    fn overlaps_asteroid(&self, asteroid: &Asteroid) -> bool {
        collision::circles_overlap(self.nose(), 0.0, asteroid.position(), asteroid.radius())
    }
}
