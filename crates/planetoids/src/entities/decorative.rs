//! Decorative entities: background stars and break-up sparks.

use super::{Entity, TICK_SECONDS};
use crate::render::FrameSink;
use crate::state::GameState;
use sim_core::math::{heading_vector, Point2, Vec2};
use sim_core::rng::SharedRng;
use sim_core::sync::OnceFlag;
use std::f32::consts::TAU;

/// Ticks a spark stays alive.
const SPARK_LIFETIME_TICKS: u32 = 36;

/// Outward speed of a spark, units per second.
const SPARK_SPEED: f32 = 70.0;

/// Non-interactive dressing drawn as a point marker.
///
/// Stars sit still and live forever; sparks scatter from a break-up
/// and burn out after a moment or once they leave the window.
#[derive(Debug, Clone)]
pub struct Decorative {
    position: Point2,
    velocity: Vec2,
    ticks_left: Option<u32>,
    expired: OnceFlag,
}

impl Decorative {
    /// A motionless background star.
    #[must_use]
    pub fn star(position: Point2) -> Self {
        Self {
            position,
            velocity: Vec2::zeros(),
            ticks_left: None,
            expired: OnceFlag::new(),
        }
    }

    /// A spark flying out of `origin` along a random heading.
    #[must_use]
    pub fn spark(origin: Point2, rng: &SharedRng) -> Self {
        Self {
            position: origin,
            velocity: heading_vector(rng.gen_range(0.0..TAU)) * SPARK_SPEED,
            ticks_left: Some(SPARK_LIFETIME_TICKS),
            expired: OnceFlag::new(),
        }
    }
}

impl Entity for Decorative {
    fn draw(&self, sink: &mut dyn FrameSink) {
        sink.point(self.position);
    }

    fn tick(&mut self, state: &GameState) {
        self.position += self.velocity * TICK_SECONDS;
        if let Some(left) = &mut self.ticks_left {
            *left = left.saturating_sub(1);
            if *left == 0 {
                self.expired.set();
            }
        }

        let bounds = state.bounds();
        let moving = self.velocity != Vec2::zeros();
        let outside = self.position.x < 0.0
            || self.position.y < 0.0
            || self.position.x > bounds.x
            || self.position.y > bounds.y;
        if moving && outside {
            self.expired.set();
        }
    }

    fn position(&self) -> Point2 {
        self.position
    }

    fn radius(&self) -> f32 {
        1.0
    }

    fn is_expired(&self) -> bool {
        self.expired.is_set()
    }
}
