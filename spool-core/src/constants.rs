//! Default tuning values for the windowing policies.
//!
//! Every value here is a starting point, overridable through the config
//! structs in [`crate::config`]. Distances are in host layout units, rates
//! in units per second.

/// Circular (carousel) window defaults.
pub mod carousel {
    /// Smallest window the circular policy will operate with. Configured
    /// sizes below this are clamped up.
    pub const MIN_WINDOW: usize = 5;

    /// Default number of live slots.
    pub const WINDOW: usize = 5;

    /// Scroll offset magnitude that triggers a one-step advance.
    pub const LOAD_THRESHOLD: f32 = 120.0;

    /// Offset subtracted after a successful advance so the content appears
    /// continuous across the index shift. Usually one slot's spacing.
    pub const COMPENSATION: f32 = 240.0;

    /// Exponential rate at which the offset decays back to center after a
    /// gesture ends.
    pub const SETTLE_RATE: f32 = 20.0;

    /// Scale applied to the centered slot when highlighting is enabled.
    pub const HIGHLIGHT_SCALE: f32 = 1.25;

    /// Scroll speed of a programmatic glide to the next or previous item.
    pub const GLIDE_RATE: f32 = 1800.0;
}

/// Grouped paging window defaults.
pub mod group {
    /// Maximum body slots per layout line.
    pub const RUN_LENGTH: usize = 7;

    /// Groups loaded per paging step.
    pub const LOAD_RATE: usize = 2;

    /// Margin past the viewport edge at which the next group loads.
    pub const LOAD_OFFSET: f32 = 100.0;

    /// Gap between consecutive layout lines along the main axis.
    pub const LINE_SPACING: f32 = 8.0;

    /// Gap between body cells along the cross axis.
    pub const CELL_SPACING: f32 = 8.0;

    /// Header size: one full-width line.
    pub const HEADER_EXTENT: (f32, f32) = (48.0, 320.0);

    /// Body cell size.
    pub const BODY_EXTENT: (f32, f32) = (96.0, 96.0);

    /// Cross-axis inset of header slots.
    pub const HEADER_INSET: f32 = 0.0;

    /// Cross-axis inset of the first body cell on a line.
    pub const CELL_INSET: f32 = 0.0;

    /// Exponential rate at which the scroll settles back inside bounds.
    pub const SETTLE_RATE: f32 = 12.0;
}

/// Block paging window defaults.
pub mod block {
    /// Target number of live slots between steps.
    pub const SHOW_COUNT: usize = 15;

    /// Slots loaded (and unloaded) per paging step.
    pub const BLOCK: usize = 5;

    /// Offset above which a forward step fires.
    pub const FORWARD_THRESHOLD: f32 = 30.0;

    /// Offset below which a backward step fires.
    pub const BACKWARD_THRESHOLD: f32 = 10.0;

    /// Offset rebase applied after a forward step. Must sit at or below
    /// the forward threshold or stepping would retrigger immediately.
    pub const FORWARD_REBASE: f32 = 10.0;

    /// Offset rebase applied after a backward step. Sits above the
    /// backward threshold so each step makes progress toward rest.
    pub const BACKWARD_REBASE: f32 = 20.0;
}

/// Shared motion defaults.
pub mod motion {
    /// Upper bound on a single frame delta, in seconds. Keeps long frame
    /// hitches from teleporting animated offsets.
    pub const MAX_FRAME_DELTA: f32 = 0.033;

    /// A settle animation snaps to its target once the remaining distance
    /// drops below this fraction of the settle rate.
    pub const SETTLE_EPSILON_FACTOR: f32 = 0.01;
}
