//! Input events and their translation onto the player.
//!
//! External front ends produce discrete [`InputEvent`]s into a shared
//! queue; the [`InputTranslator`] consumes them on its own thread and
//! applies them as intent flips on the player. The queue is the only
//! coupling between the two sides, so the producer never blocks on
//! simulation locks.

use crate::entities::{MoveIntent, Player};
use log::debug;
use sim_core::sync::SharedQueue;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A discrete control event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A control was pressed.
    Pressed(MoveIntent),
    /// A control was released.
    Released(MoveIntent),
    /// Sentinel: stop the translator. Pushing this is the only way to
    /// release a translator parked on an empty queue.
    Shutdown,
}

/// Worker that drains the event queue onto the player's intent bits.
pub struct InputTranslator {
    events: Arc<SharedQueue<InputEvent>>,
    player: Arc<Player>,
}

impl InputTranslator {
    /// Creates a translator reading from `events` and driving `player`.
    #[must_use]
    pub fn new(events: Arc<SharedQueue<InputEvent>>, player: Arc<Player>) -> Self {
        Self { events, player }
    }

    /// Consumes events until the [`InputEvent::Shutdown`] sentinel
    /// arrives, parking between events.
    pub fn run(self) {
        loop {
            match self.events.wait_pop() {
                InputEvent::Pressed(intent) => self.player.press(intent),
                InputEvent::Released(intent) => self.player.release(intent),
                InputEvent::Shutdown => {
                    debug!("input translator stopping");
                    return;
                }
            }
        }
    }

    /// Runs the translator on a named worker thread.
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("input-translator".to_string())
            .spawn(move || self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::math::Point2;

    #[test]
    fn test_events_land_as_intent_flips() {
        let events = Arc::new(SharedQueue::new());
        let player = Arc::new(Player::new(Point2::new(250.0, 250.0)));

        events.push(InputEvent::Pressed(MoveIntent::FORWARD));
        events.push(InputEvent::Pressed(MoveIntent::LEFT));
        events.push(InputEvent::Released(MoveIntent::LEFT));
        events.push(InputEvent::Pressed(MoveIntent::FIRE));
        events.push(InputEvent::Shutdown);

        let translator = InputTranslator::new(Arc::clone(&events), Arc::clone(&player));
        let handle = translator.spawn().unwrap();
        handle.join().unwrap();

        assert_eq!(player.intents(), MoveIntent::FORWARD | MoveIntent::FIRE);
        assert!(events.is_empty());
    }

    #[test]
    fn test_sentinel_stops_a_parked_translator() {
        let events = Arc::new(SharedQueue::new());
        let player = Arc::new(Player::new(Point2::new(250.0, 250.0)));

        let translator = InputTranslator::new(Arc::clone(&events), player);
        let handle = translator.spawn().unwrap();

        // The translator is parked on the empty queue; the sentinel
        // must be enough to bring it home.
        events.push(InputEvent::Shutdown);
        handle.join().unwrap();
    }
}
