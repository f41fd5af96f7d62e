//! Planetoids: a threaded asteroids-style game simulation.
//!
//! The playfield is a fixed window patrolled by a player ship while a
//! background thread feeds belt asteroids in from the edges and an
//! input thread translates control events into ship intents. A driver
//! owns the fixed-rate loop: player tick, expiry sweep, store tick,
//! draw.
//!
//! All cross-thread traffic funnels through [`state::GameState`],
//! built on the shared containers from `sim_core`. Rendering is
//! abstracted behind [`render::FrameSink`], so the same simulation
//! runs headless under tests and benchmarks or against a windowed
//! front end.

pub mod config;
pub mod entities;
pub mod input;
pub mod render;
pub mod spawner;
pub mod state;
