//! Window planners: the policies deciding what is materialized.
//!
//! Each planner is pure index and position bookkeeping over a logical
//! list it never owns. Mutations return [`crate::types::SlotOp`]
//! sequences for an executor to apply against real visuals.

mod block;
mod circular;
mod group;

pub use block::{BlockWindow, StepOutcome};
pub use circular::CircularWindow;
pub use group::{GroupSlot, GroupWindow};
