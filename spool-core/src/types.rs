//! Shared vocabulary for window planning.
//!
//! Window managers are pure planners: they never touch visuals directly.
//! Each mutating operation returns a sequence of [`SlotOp`]s describing the
//! loads and unloads the executor must perform, in order. Slot positions
//! inside an op always refer to the live window *as it stands when that op
//! is applied*, so ops must be applied strictly in sequence.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Role of a visual slot, resolved once when an item enters the logical
/// list and cached for the item's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// Section heading occupying a full layout line on its own.
    Header,
    /// Regular item, laid out in runs of up to the configured run length.
    Body,
}

/// Direction of a window step along the main scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward higher logical indices.
    Forward,
    /// Toward lower logical indices.
    Backward,
}

impl Direction {
    /// Signed unit step, `Forward` being positive.
    #[inline]
    pub fn signum(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Where a freshly loaded slot is inserted relative to the live window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Before the current first slot.
    Front,
    /// After the current last slot.
    Back,
    /// At an exact slot position, shifting later slots back by one.
    At(usize),
}

/// Layout position of a slot in host units, split into the scroll (main)
/// axis and the perpendicular (cross) axis. The host maps these onto
/// whatever concrete axes its layout uses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotPosition {
    /// Offset along the scroll axis.
    pub main: f32,
    /// Offset along the perpendicular axis.
    pub cross: f32,
}

/// Two-axis size of a visual, in host units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extent {
    /// Size along the scroll axis.
    pub main: f32,
    /// Size along the perpendicular axis.
    pub cross: f32,
}

/// One window mutation for the executor to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotOp {
    /// Materialize the item at `index` as a live slot.
    Load {
        /// Logical index of the item to bind.
        index: usize,
        /// Pool key for handle reuse.
        kind: SlotKind,
        /// Where the new slot lands in the live window.
        placement: Placement,
        /// Layout position, when the planner owns positioning. `None`
        /// leaves placement entirely to the host's own layout.
        position: Option<SlotPosition>,
    },
    /// Release the slot at this window position back to the pool.
    Unload {
        /// Position in the live window at the time the op is applied.
        slot: usize,
    },
}

impl SlotOp {
    /// True for load operations.
    #[inline]
    pub fn is_load(&self) -> bool {
        matches!(self, SlotOp::Load { .. })
    }

    /// True for unload operations.
    #[inline]
    pub fn is_unload(&self) -> bool {
        matches!(self, SlotOp::Unload { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_signum() {
        assert_eq!(Direction::Forward.signum(), 1);
        assert_eq!(Direction::Backward.signum(), -1);
    }

    #[test]
    fn op_predicates() {
        let load = SlotOp::Load {
            index: 3,
            kind: SlotKind::Body,
            placement: Placement::Back,
            position: None,
        };
        assert!(load.is_load());
        assert!(!load.is_unload());
        assert!(SlotOp::Unload { slot: 0 }.is_unload());
    }
}
