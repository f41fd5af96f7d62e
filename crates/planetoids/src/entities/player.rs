//! The player ship.
//!
//! The ship is shared between two threads: the input translator flips
//! intent bits through atomics while the simulation thread runs the
//! kinematics under a mutex. Intent flips landing mid-tick are picked
//! up one tick later; each tick reads a single snapshot of the bits so
//! it never acts on a half-updated combination.

use super::{circle_in_bounds, Asteroid, Entity, MAX_SPEED, TICK_SECONDS};
use crate::render::FrameSink;
use crate::state::GameState;
use bitflags::bitflags;
use log::info;
use parking_lot::Mutex;
use sim_core::collision;
use sim_core::math::{heading_vector, Point2, Rot2, Vec2};
use std::f32::consts::FRAC_PI_2;
use std::sync::atomic::{AtomicU8, Ordering};

bitflags! {
    /// Latched movement intents, one bit per control.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MoveIntent: u8 {
        /// Thrust along the current heading.
        const FORWARD = 1 << 0;
        /// Thrust against the current heading.
        const BACKWARD = 1 << 1;
        /// Turn counter-clockwise.
        const LEFT = 1 << 2;
        /// Turn clockwise.
        const RIGHT = 1 << 3;
        /// Fire, rate limited by the shot cooldown.
        const FIRE = 1 << 4;
    }
}

/// Thrust added to the acceleration per held tick, units per second
/// squared.
const THRUST_STEP: f32 = 3.0;

/// Damping strength relative to one thrust step.
const DAMPING_FACTOR: f32 = 10.0;

/// Speeds below this are snapped to a full stop, units per second.
const MOMENTUM_EPSILON: f32 = 1.0;

/// Turn rate per held tick, radians.
const TURN_STEP: f32 = 0.04;

/// Ticks between shots while fire is held.
const FIRE_COOLDOWN_TICKS: u32 = 24;

/// Thrust stops feeding the acceleration past this fraction of the
/// speed cap; the damping branch then acts as a governor.
const SPEED_LIMIT_FRACTION: f32 = 0.95;

/// How far a wall contact shifts the ship back toward the centre.
const NUDGE_FRACTION: f32 = 0.01;

/// Bounding radius of the hull.
const RADIUS: f32 = 22.0;

/// Hull vertices in ship-local space, nose first, for a ship facing
/// along positive x.
fn hull_local() -> [Vec2; 3] {
    [
        Vec2::new(22.0, 0.0),
        Vec2::new(-14.0, 13.0),
        Vec2::new(-14.0, -13.0),
    ]
}

#[derive(Debug, Clone)]
struct Kinematics {
    position: Point2,
    heading: f32,
    velocity: Vec2,
    accel: Vec2,
    cooldown: u32,
}

impl Kinematics {
    fn hull(&self) -> [Point2; 3] {
        let rot = Rot2::new(self.heading);
        hull_local().map(|v| self.position + rot * v)
    }

    fn nose(&self) -> Point2 {
        self.position + Rot2::new(self.heading) * hull_local()[0]
    }

    /// Commits a move, clamping per axis at the window walls. A
    /// blocked axis loses its velocity and acceleration and the ship
    /// is nudged a step back toward the centre on that axis.
    fn apply_move(&mut self, next_position: Point2, next_velocity: Vec2, bounds: Vec2) {
        let mut position = self.position;
        let mut velocity = next_velocity;

        if circle_in_bounds(Point2::new(next_position.x, position.y), RADIUS, bounds) {
            position.x = next_position.x;
        } else {
            velocity.x = 0.0;
            self.accel.x = 0.0;
            position.x += (bounds.x * 0.5 - position.x) * NUDGE_FRACTION;
        }

        if circle_in_bounds(Point2::new(position.x, next_position.y), RADIUS, bounds) {
            position.y = next_position.y;
        } else {
            velocity.y = 0.0;
            self.accel.y = 0.0;
            position.y += (bounds.y * 0.5 - position.y) * NUDGE_FRACTION;
        }

        self.position = position;
        self.velocity = velocity;
    }
}

/// The player ship.
///
/// Never stored in the shared entity collections; the driver owns it
/// behind an `Arc` and ticks it ahead of the store each frame.
#[derive(Debug)]
pub struct Player {
    kinematics: Mutex<Kinematics>,
    intents: AtomicU8,
}

impl Player {
    /// Creates a ship at rest at `position`, facing up.
    #[must_use]
    pub fn new(position: Point2) -> Self {
        Self {
            kinematics: Mutex::new(Kinematics {
                position,
                heading: FRAC_PI_2,
                velocity: Vec2::zeros(),
                accel: Vec2::zeros(),
                cooldown: 0,
            }),
            intents: AtomicU8::new(0),
        }
    }

    #[cfg(test)]
    fn facing(position: Point2, heading: f32) -> Self {
        let player = Self::new(position);
        player.kinematics.lock().heading = heading;
        player
    }

    /// Latches an intent on. Callable from any thread.
    pub fn press(&self, intent: MoveIntent) {
        self.intents.fetch_or(intent.bits(), Ordering::AcqRel);
    }

    /// Latches an intent off. Callable from any thread.
    pub fn release(&self, intent: MoveIntent) {
        self.intents.fetch_and(!intent.bits(), Ordering::AcqRel);
    }

    /// Snapshot of the currently latched intents.
    #[must_use]
    pub fn intents(&self) -> MoveIntent {
        MoveIntent::from_bits_truncate(self.intents.load(Ordering::Acquire))
    }

    /// World-space hull vertices, nose first.
    #[must_use]
    pub fn hull(&self) -> [Point2; 3] {
        self.kinematics.lock().hull()
    }

    /// Current heading in radians.
    #[must_use]
    pub fn heading(&self) -> f32 {
        self.kinematics.lock().heading
    }

    /// Current speed in units per second.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.kinematics.lock().velocity.norm()
    }

    /// Advances the ship one tick: apply intents, fire, integrate,
    /// then scan for asteroid contact unless the round already ended.
    ///
    /// Opposed thrust bits cancel into the damping branch; opposed
    /// turn bits resolve in favor of the left turn.
    pub fn tick(&self, state: &GameState) {
        let intents = self.intents();
        let (hull, centre) = {
            let mut k = self.kinematics.lock();
            k.cooldown = k.cooldown.saturating_sub(1);

            if intents.contains(MoveIntent::LEFT) {
                k.heading += TURN_STEP;
            } else if intents.contains(MoveIntent::RIGHT) {
                k.heading -= TURN_STEP;
            }

            let forward = intents.contains(MoveIntent::FORWARD);
            let backward = intents.contains(MoveIntent::BACKWARD);
            let speed = k.velocity.norm();
            let under_limit = speed <= MAX_SPEED * SPEED_LIMIT_FRACTION;
            if forward && !backward && under_limit {
                let thrust = heading_vector(k.heading) * THRUST_STEP;
                k.accel += thrust;
            } else if backward && !forward && under_limit {
                let thrust = heading_vector(k.heading) * THRUST_STEP;
                k.accel -= thrust;
            } else if speed > MOMENTUM_EPSILON {
                // Idle, opposed, or past the limit: bleed speed off.
                k.accel = -k.velocity.normalize() * THRUST_STEP * DAMPING_FACTOR;
            } else {
                k.velocity = Vec2::zeros();
                k.accel = Vec2::zeros();
            }

            if intents.contains(MoveIntent::FIRE) && k.cooldown == 0 {
                state.add_projectile(k.nose(), k.heading);
                k.cooldown = FIRE_COOLDOWN_TICKS;
            }

            let next_velocity = k.velocity + k.accel * TICK_SECONDS;
            let next_position = k.position + next_velocity * TICK_SECONDS;
            k.apply_move(next_position, next_velocity, state.bounds());
            (k.hull(), k.position)
        };

        // Scan outside the kinematics lock against a hull snapshot.
        if !state.game_is_over() {
            state.for_each_asteroid(|asteroid| {
                if collision::hull_overlaps_circle(
                    &hull,
                    centre,
                    RADIUS,
                    asteroid.position(),
                    asteroid.radius(),
                ) {
                    info!("ship struck a tier {} asteroid", asteroid.tier());
                    state.set_game_over();
                }
            });
        }
    }
}

impl Clone for Player {
    fn clone(&self) -> Self {
        Self {
            kinematics: Mutex::new(self.kinematics.lock().clone()),
            intents: AtomicU8::new(self.intents.load(Ordering::Acquire)),
        }
    }
}

impl Entity for Player {
    fn draw(&self, sink: &mut dyn FrameSink) {
        sink.hull(&self.hull());
    }

    fn tick(&mut self, state: &GameState) {
        Player::tick(self, state);
    }

    fn position(&self) -> Point2 {
        self.kinematics.lock().position
    }

    fn radius(&self) -> f32 {
        RADIUS
    }

    fn is_expired(&self) -> bool {
        false
    }

    fn overlaps_asteroid(&self, asteroid: &Asteroid) -> bool {
        let k = self.kinematics.lock();
        let (hull, centre) = (k.hull(), k.position);
        drop(k);
        collision::hull_overlaps_circle(&hull, centre, RADIUS, asteroid.position(), asteroid.radius())
    }
}
