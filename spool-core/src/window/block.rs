//! Block paging window: a linear range stepped in fixed-size blocks.
//!
//! The window covers `[start, end)` of the logical list, normally
//! `show_count` wide. A forward step loads up to `block_size` indices at
//! the back and unloads the same number from the front; a backward step
//! mirrors that and re-trims the window to `show_count`. Layout is left
//! entirely to the host, so loads carry no positions.

use crate::config::BlockPagingConfig;
use crate::types::{Placement, SlotKind, SlotOp};

/// Result of a paging step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The window moved; apply the ops and rebase the scroll offset.
    Advanced(Vec<SlotOp>),
    /// New indices loaded but the window is pinned at a ragged list tail:
    /// nothing was unloaded and the offset must not be rebased, or the
    /// short tail would jump out of view.
    Pinned(Vec<SlotOp>),
    /// The edge of the list; nothing changed.
    Blocked,
}

/// Planner for the block paging window.
#[derive(Debug, Default)]
pub struct BlockWindow {
    start: usize,
    end: usize,
}

impl BlockWindow {
    /// Creates an empty window.
    pub fn new() -> Self {
        Self { start: 0, end: 0 }
    }

    /// First materialized logical index.
    #[inline]
    pub fn start_index(&self) -> usize {
        self.start
    }

    /// One past the last materialized logical index.
    #[inline]
    pub fn end_index(&self) -> usize {
        self.end
    }

    /// Number of materialized slots.
    #[inline]
    pub fn live(&self) -> usize {
        self.end - self.start
    }

    /// Forgets all window state. The caller releases the live handles.
    pub fn clear(&mut self) {
        self.start = 0;
        self.end = 0;
    }

    fn load(index: usize, placement: Placement) -> SlotOp {
        SlotOp::Load {
            index,
            kind: SlotKind::Body,
            placement,
            position: None,
        }
    }

    /// Rebuilds the window at the list head: `[0, show_count)` or the
    /// whole list when shorter.
    pub fn rebuild(&mut self, len: usize, cfg: &BlockPagingConfig) -> Vec<SlotOp> {
        self.start = 0;
        self.end = len.min(cfg.show_count);
        (0..self.end)
            .map(|index| Self::load(index, Placement::Back))
            .collect()
    }

    /// Steps the window one block toward the list end.
    pub fn step_forward(&mut self, len: usize, cfg: &BlockPagingConfig) -> StepOutcome {
        if self.end >= len {
            return StepOutcome::Blocked;
        }
        let to = (self.end + cfg.block_size).min(len);
        let loaded = to - self.end;
        let mut ops: Vec<SlotOp> = (self.end..to)
            .map(|index| Self::load(index, Placement::Back))
            .collect();
        self.end = to;

        // A ragged tail shorter than a full page stays pinned: keep the
        // extra slots live rather than scrolling a partial page in.
        if self.end == len && len % cfg.show_count != 0 {
            return StepOutcome::Pinned(ops);
        }

        for _ in 0..loaded {
            ops.push(SlotOp::Unload { slot: 0 });
        }
        self.start += loaded;
        StepOutcome::Advanced(ops)
    }

    /// Steps the window one block toward the list head, trimming the back
    /// down to `show_count` afterwards.
    pub fn step_backward(&mut self, _len: usize, cfg: &BlockPagingConfig) -> StepOutcome {
        if self.start == 0 {
            return StepOutcome::Blocked;
        }
        let from = self.start.saturating_sub(cfg.block_size);
        let mut ops: Vec<SlotOp> = (from..self.start)
            .rev()
            .map(|index| Self::load(index, Placement::Front))
            .collect();
        self.start = from;

        let mut width = self.end - self.start;
        let excess = width.saturating_sub(cfg.show_count);
        for _ in 0..excess {
            width -= 1;
            ops.push(SlotOp::Unload { slot: width });
        }
        self.end -= excess;
        StepOutcome::Advanced(ops)
    }

    /// Accounts for an insertion at `index` (`len` is the list length
    /// after it).
    ///
    /// Insertions before the window shift it; ones inside mount at their
    /// exact slot; ones past the end only top the window up while it is
    /// still short of `show_count`.
    pub fn insert_fill(&mut self, index: usize, len: usize, cfg: &BlockPagingConfig) -> Vec<SlotOp> {
        if index < self.start {
            self.start += 1;
            self.end += 1;
            return Vec::new();
        }
        if index < self.end {
            let slot = index - self.start;
            self.end += 1;
            return vec![Self::load(index, Placement::At(slot))];
        }
        let missing = cfg.show_count.saturating_sub(self.live());
        if missing > 0 && len > self.end {
            let op = Self::load(self.end, Placement::Back);
            self.end += 1;
            return vec![op];
        }
        Vec::new()
    }

    /// Accounts for the removal of the item previously at `old_index`
    /// (`len` is the list length after it).
    ///
    /// A removal inside the window unloads its slot and tops the window
    /// back up, preferring the back edge and falling back to the front
    /// when the list end is already covered.
    pub fn remove_rebalance(&mut self, old_index: usize, len: usize) -> Vec<SlotOp> {
        if old_index < self.start {
            self.start -= 1;
            self.end -= 1;
            return Vec::new();
        }
        if old_index >= self.end {
            return Vec::new();
        }
        let mut ops = vec![SlotOp::Unload {
            slot: old_index - self.start,
        }];
        self.end -= 1;
        if len > self.end {
            ops.push(Self::load(self.end, Placement::Back));
            self.end += 1;
        } else if self.start > 0 {
            ops.push(Self::load(self.start - 1, Placement::Front));
            self.start -= 1;
        }
        ops
    }
}
