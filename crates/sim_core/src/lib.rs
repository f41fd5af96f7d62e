//! Concurrency-safe building blocks for real-time simulation cores.
//!
//! This crate collects the small, reusable pieces a threaded game
//! simulation needs under the hood:
//!
//! - [`sync`]: lock-guarded containers shared between producer and
//!   consumer threads ([`sync::SharedVec`], [`sync::SharedQueue`],
//!   [`sync::SharedSlotMap`]) plus a set-once [`sync::OnceFlag`]
//! - [`clone_box`]: value-semantic ownership of trait objects
//! - [`collision`]: 2D overlap predicates for circles, segments and
//!   convex hulls
//! - [`rng`]: a lockable, seedable random source shared by workers
//! - [`math`]: the 2D vector aliases the rest of the workspace uses
//!
//! Every container here takes `&self` for its operations so callers can
//! share them behind an `Arc` without wrapping them in further locks.
//!
//! # Quick Start
//!
//! ```
//! use sim_core::sync::SharedQueue;
//!
//! let queue = SharedQueue::new();
//! queue.push(7u32);
//! assert_eq!(queue.try_pop(), Some(7));
//! assert_eq!(queue.try_pop(), None);
//! ```

pub mod clone_box;
pub mod collision;
pub mod logging;
pub mod math;
pub mod rng;
pub mod sync;

/// Common imports for crates built on the simulation core.
pub mod prelude {
    pub use crate::clone_box::CloneBox;
    pub use crate::math::{Point2, Rot2, Vec2};
    pub use crate::rng::SharedRng;
    pub use crate::sync::{OnceFlag, SharedQueue, SharedSlotMap, SharedVec};
}
