//! Game entities and the capability trait they share.
//!
//! Everything the simulation owns implements [`Entity`]: asteroids,
//! projectiles, the player ship, text overlays and decorative bits.
//! The shared collections store entities as [`BoxedEntity`], a
//! deep-cloning box over the trait object, so copying a collection
//! copies the entities themselves.

mod asteroid;
mod decorative;
mod overlay;
mod player;
mod projectile;

pub use asteroid::{Asteroid, AsteroidKey};
pub use decorative::Decorative;
pub use overlay::{TemporaryTextOverlay, TextOverlay};
pub use player::{MoveIntent, Player};
pub use projectile::Projectile;

use crate::render::FrameSink;
use crate::state::GameState;
use sim_core::clone_box::CloneBox;
use sim_core::collision;
use sim_core::math::{Point2, Vec2};

/// Seconds of simulated time per fixed tick.
pub const TICK_SECONDS: f32 = 1.0 / 120.0;

/// Global speed cap for anything that moves, in units per second.
pub const MAX_SPEED: f32 = 240.0;

/// Shared behavior of everything the simulation owns and ticks.
///
/// Entities mutate shared state only through the [`GameState`] handle
/// they are ticked with, and only via its staging and scoring entry
/// points. Re-entering the collection an entity is currently being
/// iterated from would deadlock; the staging queues exist precisely so
/// nothing ever has to.
pub trait Entity: EntityClone + Send {
    /// Emits this entity's shape for the current frame.
    fn draw(&self, sink: &mut dyn FrameSink);

    /// Advances the entity by one fixed tick.
    fn tick(&mut self, state: &GameState);

    /// Current position.
    fn position(&self) -> Point2;

    /// Nominal collision radius. Always positive.
    fn radius(&self) -> f32;

    /// True once the entity is marked for removal at the next sweep.
    fn is_expired(&self) -> bool;

    /// Overlap test against an asteroid.
    ///
    /// The default compares bounding circles; variants with tighter
    /// shapes override it.
    fn overlaps_asteroid(&self, asteroid: &Asteroid) -> bool {
        collision::circles_overlap(
            self.position(),
            self.radius(),
            asteroid.position(),
            asteroid.radius(),
        )
    }
}

/// Object-safe clone hook for [`Entity`] trait objects.
///
/// Implemented for free by every `Entity` that is also `Clone`.
pub trait EntityClone {
    /// Clones this entity into a fresh box.
    fn clone_boxed(&self) -> Box<dyn Entity>;
}

impl<E> EntityClone for E
where
    E: Entity + Clone + 'static,
{
    fn clone_boxed(&self) -> Box<dyn Entity> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Entity> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// Deep-cloning box over any entity.
pub type BoxedEntity = CloneBox<dyn Entity>;

/// Boxes a concrete entity for storage in the shared collections.
pub fn boxed<E: Entity + 'static>(entity: E) -> BoxedEntity {
    CloneBox::new(Box::new(entity))
}

/// True while the circle at `position` sits fully inside the window.
pub(crate) fn circle_in_bounds(position: Point2, radius: f32, bounds: Vec2) -> bool {
    position.x - radius >= 0.0
        && position.y - radius >= 0.0
        && position.x + radius <= bounds.x
        && position.y + radius <= bounds.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_in_bounds_checks_every_edge() {
        let bounds = Vec2::new(100.0, 100.0);
        assert!(circle_in_bounds(Point2::new(50.0, 50.0), 10.0, bounds));
        assert!(circle_in_bounds(Point2::new(10.0, 10.0), 10.0, bounds));
        assert!(!circle_in_bounds(Point2::new(5.0, 50.0), 10.0, bounds));
        assert!(!circle_in_bounds(Point2::new(50.0, 95.0), 10.0, bounds));
        assert!(!circle_in_bounds(Point2::new(101.0, 50.0), 10.0, bounds));
    }

    #[test]
    fn test_boxed_entities_deep_clone() {
        let original = boxed(TextOverlay::banner("hello", Point2::new(1.0, 1.0)));
        let copy = original.clone();
        assert_eq!(copy.position(), original.position());
        assert!(!copy.is_expired());
    }
}
