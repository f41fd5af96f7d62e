//! Asteroids: tiered rocks that split when shot.

use super::{boxed, Decorative, Entity, TICK_SECONDS};
use crate::render::FrameSink;
use crate::state::GameState;
use log::trace;
use sim_core::math::{angle_of, deg_to_rad, heading_vector, Point2, Vec2};
use sim_core::rng::SharedRng;
use sim_core::sync::OnceFlag;
use std::f32::consts::PI;

slotmap::new_key_type! {
    /// Stable handle to a live asteroid.
    pub struct AsteroidKey;
}

/// Collision radius per tier step.
const BASE_RADIUS: f32 = 12.0;

/// Drift speed of every asteroid, in units per second.
const DRIFT_SPEED: f32 = 90.0;

/// Tier of freshly spawned belt asteroids.
const SPAWN_TIER: u32 = 3;

/// Fraction of the window dimension allowed beyond each edge before
/// an asteroid is culled.
const CULL_MARGIN_FRACTION: f32 = 0.1;

/// Decorative sparks staged whenever an asteroid breaks.
const SHATTER_SPARKS: u32 = 4;

/// A drifting rock.
///
/// Tier counts down as asteroids split: belt spawns arrive at tier 3
/// and every hit produces two rocks of the next tier down until tier 1
/// rocks simply die. Smaller tiers are worth more points.
#[derive(Debug, Clone)]
pub struct Asteroid {
    position: Point2,
    velocity: Vec2,
    tier: u32,
    radius: f32,
    expired: OnceFlag,
}

impl Asteroid {
    /// Creates an asteroid drifting along `heading` radians.
    #[must_use]
    pub fn new(position: Point2, heading: f32, tier: u32) -> Self {
        debug_assert!(tier >= 1, "asteroid tiers start at 1");
        Self {
            position,
            velocity: heading_vector(heading) * DRIFT_SPEED,
            tier,
            radius: BASE_RADIUS * tier as f32,
            expired: OnceFlag::new(),
        }
    }

    /// Derives a belt spawn: a top-tier asteroid just outside one of
    /// the window's four edges, aimed loosely at the centre.
    pub(crate) fn spawn_at_edge(bounds: Vec2, rng: &SharedRng) -> Self {
        let radius = BASE_RADIUS * SPAWN_TIER as f32;
        let offset = radius + rng.gen_range(2.0..8.0);
        let position = match rng.gen_range(0u32..4) {
            0 => Point2::new(rng.gen_range(0.0..bounds.x), -offset),
            1 => Point2::new(rng.gen_range(0.0..bounds.x), bounds.y + offset),
            2 => Point2::new(-offset, rng.gen_range(0.0..bounds.y)),
            _ => Point2::new(bounds.x + offset, rng.gen_range(0.0..bounds.y)),
        };
        let centre = Point2::from(bounds * 0.5);
        let aim = angle_of(centre - position) + deg_to_rad(rng.gen_range(-30.0..=30.0));
        Self::new(position, aim, SPAWN_TIER)
    }

    /// Current tier, counting down from the spawn tier to 1.
    #[must_use]
    pub fn tier(&self) -> u32 {
        self.tier
    }

    /// Points awarded for destroying this asteroid. Smaller rocks are
    /// harder to hit and pay better.
    #[must_use]
    pub fn points(&self) -> u64 {
        match self.tier {
            1 => 100,
            2 => 50,
            _ => 20,
        }
    }

    /// Resolves a hit: the rock dies, and any tier above 1 stages two
    /// replacement rocks of the next tier down flying apart along a
    /// random axis with equal speed and opposite phase.
    pub(crate) fn shatter(&mut self, state: &GameState) {
        self.expired.set();
        if self.tier > 1 {
            let phase = state.rng().gen_range(0.0..PI);
            let child_tier = self.tier - 1;
            state.stage_asteroid(Asteroid::new(self.position, phase, child_tier));
            state.stage_asteroid(Asteroid::new(self.position, phase - PI, child_tier));
        }
        for _ in 0..SHATTER_SPARKS {
            state.stage_entity(boxed(Decorative::spark(self.position, state.rng())));
        }
    }

    fn outside_cull_band(&self, bounds: Vec2) -> bool {
        let margin_x = bounds.x * CULL_MARGIN_FRACTION + self.radius;
        let margin_y = bounds.y * CULL_MARGIN_FRACTION + self.radius;
        self.position.x < -margin_x
            || self.position.x > bounds.x + margin_x
            || self.position.y < -margin_y
            || self.position.y > bounds.y + margin_y
    }
}

impl Entity for Asteroid {
    fn draw(&self, sink: &mut dyn FrameSink) {
        sink.circle(self.position, self.radius);
    }

    fn tick(&mut self, state: &GameState) {
        self.position += self.velocity * TICK_SECONDS;
        if self.outside_cull_band(state.bounds()) {
            trace!("tier {} asteroid drifted out of the cull band", self.tier);
            self.expired.set();
        }
    }

    fn position(&self) -> Point2 {
        self.position
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn is_expired(&self) -> bool {
        self.expired.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_state() -> GameState {
        GameState::new(Vec2::new(500.0, 500.0), SharedRng::seeded(11))
    }

    #[test]
    fn test_new_asteroid_drifts_at_fixed_speed() {
        let rock = Asteroid::new(Point2::new(0.0, 0.0), 1.3, 3);
        assert_relative_eq!(rock.velocity.norm(), DRIFT_SPEED, epsilon = 1e-3);
        assert_eq!(rock.radius(), BASE_RADIUS * 3.0);
        assert!(!rock.is_expired());
    }

    #[test]
    fn test_belt_spawns_outside_window_aimed_inward() {
        let bounds = Vec2::new(500.0, 500.0);
        let rng = SharedRng::seeded(3);
        for _ in 0..50 {
            let rock = Asteroid::spawn_at_edge(bounds, &rng);
            let p = rock.position;
            let outside =
                p.x < 0.0 || p.x > bounds.x || p.y < 0.0 || p.y > bounds.y;
            assert!(outside, "belt asteroid spawned inside the window: {p:?}");

            let toward_centre = (Point2::from(bounds * 0.5) - p).dot(&rock.velocity);
            assert!(toward_centre > 0.0, "belt asteroid aimed away from play");
            assert_eq!(rock.tier(), SPAWN_TIER);
        }
    }

    #[test]
    fn test_shatter_above_tier_one_stages_opposed_pair() {
        let state = test_state();
        let mut rock = Asteroid::new(Point2::new(250.0, 250.0), 0.0, 3);

        rock.shatter(&state);
        assert!(rock.is_expired());
        assert_eq!(state.asteroid_count(), 0, "children must stage, not appear");

        state.tick();
        assert_eq!(state.asteroid_count(), 2);

        let mut velocities = Vec::new();
        state.for_each_asteroid(|child| {
            assert_eq!(child.tier(), 2);
            velocities.push(child.velocity);
        });
        assert_relative_eq!(velocities[0].norm(), DRIFT_SPEED, epsilon = 1e-3);
        assert_relative_eq!(velocities[1].norm(), DRIFT_SPEED, epsilon = 1e-3);
        // Opposite phase: the pair cancels out.
        assert_relative_eq!((velocities[0] + velocities[1]).norm(), 0.0, epsilon = 1e-2);
    }

    #[test]
    fn test_shatter_at_tier_one_stages_no_children() {
        let state = test_state();
        let mut rock = Asteroid::new(Point2::new(250.0, 250.0), 0.0, 1);

        rock.shatter(&state);
        state.tick();

        assert!(rock.is_expired());
        assert_eq!(state.asteroid_count(), 0);
    }

    #[test]
    fn test_points_rise_as_tiers_shrink() {
        let at = |tier| Asteroid::new(Point2::origin(), 0.0, tier).points();
        assert_eq!(at(3), 20);
        assert_eq!(at(2), 50);
        assert_eq!(at(1), 100);
    }

    #[test]
    fn test_cull_band_tolerates_near_offscreen_rocks() {
        let state = test_state();
        // Tier 3 on a 500 unit window: margin is 50 + 36 beyond each edge.
        let mut inside_band = Asteroid::new(Point2::new(-50.0, 250.0), 0.0, 3);
        inside_band.tick(&state);
        assert!(!inside_band.is_expired());

        let mut outside_band = Asteroid::new(Point2::new(-90.0, 250.0), PI, 3);
        outside_band.tick(&state);
        assert!(outside_band.is_expired());
    }

    #[test]
    fn test_draw_emits_one_circle() {
        use crate::render::{DrawOp, RecordingSink};

        let rock = Asteroid::new(Point2::new(10.0, 20.0), 0.0, 2);
        let mut sink = RecordingSink::new();
        rock.draw(&mut sink);

        assert_eq!(
            sink.ops(),
            &[DrawOp::Circle {
                center: Point2::new(10.0, 20.0),
                radius: BASE_RADIUS * 2.0
            }]
        );
    }
}
