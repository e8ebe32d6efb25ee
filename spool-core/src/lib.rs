//! # Spool Core
//!
//! Windowed virtualization for scrolling UI: keep a small, bounded set of
//! live visual slots representing a subrange of a much larger logical
//! list, slide that subrange under continuous scroll input, and reuse
//! released visuals through a pool instead of reconstructing them.
//!
//! ## Overview
//!
//! Three pieces cooperate, none of which touches a real widget:
//!
//! - [`context::ContextList`] owns the ordered item contexts, identified
//!   by reference rather than value.
//! - The planners in [`window`] decide which logical indices should be
//!   materialized. [`window::CircularWindow`] keeps a fixed-size wrapping
//!   window centered on a main index; [`window::GroupWindow`] pages
//!   header lines and body runs as atomic groups with planner-owned
//!   layout; [`window::BlockWindow`] steps a linear range in fixed-size
//!   blocks.
//! - [`pool::SlotPool`] parks released visual handles per kind for O(1)
//!   reuse.
//!
//! Planners express every mutation as a [`types::SlotOp`] sequence. An
//! executor (see the `spool-widgets` crate) applies those ops against a
//! host toolkit: acquiring or constructing handles, binding contexts,
//! positioning, and releasing back to the pool. This keeps the windowing
//! algorithms synchronous, single-threaded, and fully testable without a
//! UI runtime.
//!
//! ## Motion
//!
//! Scroll gestures accumulate a signed offset. The [`motion`] module
//! provides the two frame-tick animations built on top: an exponential
//! [`motion::Settle`] back toward a rest position and a constant-rate
//! [`motion::Glide`] for programmatic stepping. Both are cooperative and
//! cancellable, driven by the host's tick.

pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod motion;
pub mod pool;
pub mod types;
pub mod window;

pub use error::{Result, SpoolError};

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::config::{BlockPagingConfig, CarouselConfig, GroupPagingConfig};
    pub use crate::context::ContextList;
    pub use crate::error::{Result, SpoolError};
    pub use crate::motion::{Glide, Settle};
    pub use crate::pool::{PoolStats, SlotPool};
    pub use crate::types::{Direction, Extent, Placement, SlotKind, SlotOp, SlotPosition};
    pub use crate::window::{BlockWindow, CircularWindow, GroupSlot, GroupWindow, StepOutcome};
}
