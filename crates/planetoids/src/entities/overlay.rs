//! Text overlays: the game-over banner and transient score popups.

use super::{Entity, TICK_SECONDS};
use crate::render::FrameSink;
use crate::state::GameState;
use sim_core::math::{Point2, Vec2};

/// Ticks a score popup stays alive.
const POPUP_LIFETIME_TICKS: u32 = 90;

/// Upward drift of a score popup, units per second.
const POPUP_RISE_SPEED: f32 = 28.0;

/// Static text pinned to the frame, alive until the store is dropped.
#[derive(Debug, Clone)]
pub struct TextOverlay {
    anchor: Point2,
    content: String,
}

impl TextOverlay {
    /// Creates a permanent label anchored at `anchor`.
    #[must_use]
    pub fn banner(content: &str, anchor: Point2) -> Self {
        Self {
            anchor,
            content: content.to_string(),
        }
    }
}

impl Entity for TextOverlay {
    fn draw(&self, sink: &mut dyn FrameSink) {
        sink.text(self.anchor, &self.content);
    }

    fn tick(&mut self, _state: &GameState) {}

    fn position(&self) -> Point2 {
        self.anchor
    }

    fn radius(&self) -> f32 {
        1.0
    }

    fn is_expired(&self) -> bool {
        false
    }
}

/// Short-lived label that drifts upward and expires on its own.
#[derive(Debug, Clone)]
pub struct TemporaryTextOverlay {
    anchor: Point2,
    velocity: Vec2,
    content: String,
    ticks_left: u32,
}

impl TemporaryTextOverlay {
    /// Creates a label that lives for `lifetime` ticks.
    #[must_use]
    pub fn new(content: String, anchor: Point2, velocity: Vec2, lifetime: u32) -> Self {
        Self {
            anchor,
            velocity,
            content,
            ticks_left: lifetime,
        }
    }

    /// The floating "+points" popup staged where an asteroid broke.
    #[must_use]
    pub fn score_popup(points: u64, position: Point2) -> Self {
        Self::new(
            format!("+{points}"),
            position,
            Vec2::new(0.0, POPUP_RISE_SPEED),
            POPUP_LIFETIME_TICKS,
        )
    }
}

impl Entity for TemporaryTextOverlay {
    fn draw(&self, sink: &mut dyn FrameSink) {
        sink.text(self.anchor, &self.content);
    }

    fn tick(&mut self, _state: &GameState) {
        self.anchor += self.velocity * TICK_SECONDS;
        self.ticks_left = self.ticks_left.saturating_sub(1);
    }

    fn position(&self) -> Point2 {
        self.anchor
    }

    fn radius(&self) -> f32 {
        1.0
    }

    fn is_expired(&self) -> bool {
        self.ticks_left == 0
    }
}
