//! Lock-guarded containers shared between simulation threads.
//!
//! The containers here all follow the same contract: every operation
//! takes `&self`, acquires the internal lock for its full duration and
//! releases it before returning. Callers therefore always observe a
//! consistent snapshot and never a half-written element.
//!
//! The flip side of that contract is reentrancy: a visitor closure
//! passed to `for_each`-style methods runs while the lock is held and
//! must not call back into the same container. Calling into a
//! *different* container is fine as long as all call paths agree on
//! the nesting order.

mod flag;
mod queue;
mod sequence;
mod slots;

pub use flag::OnceFlag;
pub use queue::SharedQueue;
pub use sequence::SharedVec;
pub use slots::SharedSlotMap;
