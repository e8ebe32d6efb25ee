//! Grouped paging window: headers interleaved with body runs.
//!
//! Items are tagged [`SlotKind::Header`] or [`SlotKind::Body`] when they
//! enter the logical list. A *group* is the load unit: either a single
//! header line or one layout line of up to `run_length` contiguous body
//! items. Groups load and unload atomically, so the window boundary never
//! splits a line.
//!
//! Unlike the circular window, this planner owns layout along the main
//! axis: lines stack forward with `line_spacing` between them and body
//! cells spread across the line by column. Positions travel with each
//! loaded slot, which is also how whole-line unloads are detected (every
//! slot of a line shares its main position).

use std::collections::VecDeque;

use crate::config::GroupPagingConfig;
use crate::types::{Placement, SlotKind, SlotOp, SlotPosition};

/// One materialized slot of the paging window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupSlot {
    /// Logical index of the bound item.
    pub index: usize,
    /// Resolved kind.
    pub kind: SlotKind,
    /// Layout position assigned at load time.
    pub position: SlotPosition,
}

/// Planner for the grouped paging window.
#[derive(Debug, Default)]
pub struct GroupWindow {
    entries: VecDeque<GroupSlot>,
    scroll: f32,
    content_extent: f32,
    /// Highest logical index whose line has been counted into
    /// `content_extent`. Backward re-loads must not count lines twice.
    max_laid_out: isize,
}

impl GroupWindow {
    /// Creates an empty window.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            scroll: 0.0,
            content_extent: 0.0,
            max_laid_out: -1,
        }
    }

    /// Number of materialized slots.
    #[inline]
    pub fn live(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is materialized.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest materialized logical index.
    #[inline]
    pub fn first_index(&self) -> Option<usize> {
        self.entries.front().map(|e| e.index)
    }

    /// Highest materialized logical index.
    #[inline]
    pub fn last_index(&self) -> Option<usize> {
        self.entries.back().map(|e| e.index)
    }

    /// Materialized slots in window order.
    pub fn slots(&self) -> impl Iterator<Item = &GroupSlot> {
        self.entries.iter()
    }

    /// Accumulated scroll position along the main axis.
    #[inline]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Total laid-out extent along the main axis. Grows as new lines are
    /// first loaded; never shrinks until [`GroupWindow::clear`].
    #[inline]
    pub fn content_extent(&self) -> f32 {
        self.content_extent
    }

    /// Adds a scroll delta. Overdrag past the content bounds is allowed
    /// here; [`GroupWindow::settle_target`] gives the in-bounds position
    /// to ease back to.
    pub fn apply_scroll(&mut self, delta: f32) {
        self.scroll += delta;
    }

    /// Nearest in-bounds scroll position for the current content extent.
    pub fn settle_target(&self, viewport: f32) -> f32 {
        let max = (self.content_extent - viewport).max(0.0);
        self.scroll.clamp(0.0, max)
    }

    /// Drops all window state. The caller releases the live handles.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.scroll = 0.0;
        self.content_extent = 0.0;
        self.max_laid_out = -1;
    }

    fn line_extent(&self, kind: SlotKind, cfg: &GroupPagingConfig) -> f32 {
        match kind {
            SlotKind::Header => cfg.header_extent.main,
            SlotKind::Body => cfg.body_extent.main,
        }
    }

    fn column(&self, cfg: &GroupPagingConfig, col: usize) -> usize {
        if cfg.reverse_grid {
            cfg.run_length - 1 - col
        } else {
            col
        }
    }

    fn cell_cross(&self, cfg: &GroupPagingConfig, col: usize) -> f32 {
        cfg.cell_inset + (cfg.body_extent.cross + cfg.cell_spacing) * self.column(cfg, col) as f32
    }

    fn mark_laid_out(&mut self, index: usize, kind: SlotKind, cfg: &GroupPagingConfig) {
        if index as isize > self.max_laid_out {
            self.max_laid_out = index as isize;
            self.content_extent += cfg.line_spacing + self.line_extent(kind, cfg);
        }
    }

    /// Loads the group starting at `from` after the current back edge.
    fn add_forward(&mut self, kinds: &[SlotKind], cfg: &GroupPagingConfig, from: usize) -> Vec<SlotOp> {
        let (back_main, back_extent) = self
            .entries
            .back()
            .map(|e| (e.position.main, self.line_extent(e.kind, cfg)))
            .unwrap_or((0.0, 0.0));
        let line_main = back_main + back_extent + cfg.line_spacing;

        let mut ops = Vec::new();
        match kinds[from] {
            SlotKind::Header => {
                let position = SlotPosition {
                    main: line_main,
                    cross: cfg.header_inset,
                };
                self.entries.push_back(GroupSlot {
                    index: from,
                    kind: SlotKind::Header,
                    position,
                });
                ops.push(SlotOp::Load {
                    index: from,
                    kind: SlotKind::Header,
                    placement: Placement::Back,
                    position: Some(position),
                });
                self.mark_laid_out(from, SlotKind::Header, cfg);
            }
            SlotKind::Body => {
                let mut last = from;
                for col in 0..cfg.run_length {
                    let index = from + col;
                    if index >= kinds.len() || kinds[index] == SlotKind::Header {
                        break;
                    }
                    let position = SlotPosition {
                        main: line_main,
                        cross: self.cell_cross(cfg, col),
                    };
                    self.entries.push_back(GroupSlot {
                        index,
                        kind: SlotKind::Body,
                        position,
                    });
                    ops.push(SlotOp::Load {
                        index,
                        kind: SlotKind::Body,
                        placement: Placement::Back,
                        position: Some(position),
                    });
                    last = index;
                }
                self.mark_laid_out(last, SlotKind::Body, cfg);
            }
        }
        ops
    }

    /// Loads the group ending at `from` before the current front edge.
    ///
    /// For a body item this finds the nearest preceding header (the list
    /// start acts as one) and derives the tail-line length modulo
    /// `run_length`, so backward paging restores exactly the lines that
    /// forward paging laid out.
    fn add_backward(&mut self, kinds: &[SlotKind], cfg: &GroupPagingConfig, from: usize) -> Vec<SlotOp> {
        let Some(front) = self.entries.front() else {
            return Vec::new();
        };
        let front_main = front.position.main;

        let mut ops = Vec::new();
        match kinds[from] {
            SlotKind::Header => {
                let position = SlotPosition {
                    main: front_main - cfg.line_spacing - cfg.header_extent.main,
                    cross: cfg.header_inset,
                };
                self.entries.push_front(GroupSlot {
                    index: from,
                    kind: SlotKind::Header,
                    position,
                });
                ops.push(SlotOp::Load {
                    index: from,
                    kind: SlotKind::Header,
                    placement: Placement::Front,
                    position: Some(position),
                });
            }
            SlotKind::Body => {
                let preceding_header = (0..from)
                    .rev()
                    .find(|&i| kinds[i] == SlotKind::Header)
                    .map(|i| i as isize)
                    .unwrap_or(-1);
                let span = (from as isize - preceding_header) as usize;
                let mut count = span % cfg.run_length;
                if count == 0 {
                    count = cfg.run_length;
                }
                let line_main = front_main - cfg.line_spacing - cfg.body_extent.main;
                for k in 0..count {
                    let index = from - k;
                    if kinds[index] == SlotKind::Header {
                        break;
                    }
                    let position = SlotPosition {
                        main: line_main,
                        cross: self.cell_cross(cfg, count - 1 - k),
                    };
                    self.entries.push_front(GroupSlot {
                        index,
                        kind: SlotKind::Body,
                        position,
                    });
                    ops.push(SlotOp::Load {
                        index,
                        kind: SlotKind::Body,
                        placement: Placement::Front,
                        position: Some(position),
                    });
                }
            }
        }
        ops
    }

    /// Unloads one whole group from the front edge.
    fn unload_front_group(&mut self) -> Vec<SlotOp> {
        let Some(front) = self.entries.front() else {
            return Vec::new();
        };
        if front.kind == SlotKind::Header {
            self.entries.pop_front();
            return vec![SlotOp::Unload { slot: 0 }];
        }
        let line_main = front.position.main;
        let mut ops = Vec::new();
        while let Some(entry) = self.entries.front() {
            if entry.kind == SlotKind::Body && entry.position.main == line_main {
                self.entries.pop_front();
                ops.push(SlotOp::Unload { slot: 0 });
            } else {
                break;
            }
        }
        ops
    }

    /// Unloads one whole group from the back edge.
    fn unload_back_group(&mut self) -> Vec<SlotOp> {
        let Some(back) = self.entries.back() else {
            return Vec::new();
        };
        if back.kind == SlotKind::Header {
            let slot = self.entries.len() - 1;
            self.entries.pop_back();
            return vec![SlotOp::Unload { slot }];
        }
        let line_main = back.position.main;
        let mut ops = Vec::new();
        while let Some(entry) = self.entries.back() {
            if entry.kind == SlotKind::Body && entry.position.main == line_main {
                let slot = self.entries.len() - 1;
                self.entries.pop_back();
                ops.push(SlotOp::Unload { slot });
            } else {
                break;
            }
        }
        ops
    }

    /// One step of the initial fill: loads the next forward group, or
    /// returns `None` once the laid-out extent covers the viewport plus
    /// the load margin (or the list is exhausted).
    ///
    /// Callers drive this once per frame so the host can render between
    /// steps.
    pub fn fill_step(
        &mut self,
        kinds: &[SlotKind],
        cfg: &GroupPagingConfig,
        viewport: f32,
    ) -> Option<Vec<SlotOp>> {
        if self.content_extent >= viewport + cfg.load_offset {
            return None;
        }
        let next = self.last_index().map(|last| last + 1).unwrap_or(0);
        if next >= kinds.len() {
            return None;
        }
        Some(self.add_forward(kinds, cfg, next))
    }

    /// Loads `load_rate` groups forward starting at `from`, unloading one
    /// front group after each so the materialized size stays bounded.
    pub fn load_forward(&mut self, kinds: &[SlotKind], cfg: &GroupPagingConfig, from: usize) -> Vec<SlotOp> {
        let mut ops = Vec::new();
        for step in 0..cfg.load_rate {
            let target = if step == 0 {
                from
            } else {
                match self.last_index() {
                    Some(last) if last + 1 < kinds.len() => last + 1,
                    _ => break,
                }
            };
            if target >= kinds.len() {
                break;
            }
            ops.extend(self.add_forward(kinds, cfg, target));
            ops.extend(self.unload_front_group());
        }
        ops
    }

    /// Loads `load_rate` groups backward starting at `from`, unloading
    /// one back group after each.
    pub fn load_backward(&mut self, kinds: &[SlotKind], cfg: &GroupPagingConfig, from: usize) -> Vec<SlotOp> {
        let mut ops = Vec::new();
        for step in 0..cfg.load_rate {
            let target = if step == 0 {
                from
            } else {
                match self.first_index() {
                    Some(first) if first > 0 => first - 1,
                    _ => break,
                }
            };
            ops.extend(self.add_backward(kinds, cfg, target));
            ops.extend(self.unload_back_group());
        }
        ops
    }

    /// Index to load next when the scroll has moved far enough past the
    /// front edge, if any.
    pub fn check_forward(&self, kinds: &[SlotKind], cfg: &GroupPagingConfig) -> Option<usize> {
        let front = self.entries.front()?;
        let last = self.last_index()?;
        if last + 1 >= kinds.len() {
            return None;
        }
        (self.scroll - front.position.main > cfg.load_offset).then_some(last + 1)
    }

    /// Index to load next when the back edge has moved far enough below
    /// the viewport, if any.
    pub fn check_backward(&self, cfg: &GroupPagingConfig, viewport: f32) -> Option<usize> {
        let back = self.entries.back()?;
        let first = self.first_index()?;
        if first == 0 {
            return None;
        }
        (back.position.main - self.scroll > viewport + cfg.load_offset).then_some(first - 1)
    }

    /// Adjusts bookkeeping after the item at `old_index` was removed from
    /// the logical list.
    ///
    /// Returns `true` when the window absorbed the removal (the item was
    /// not materialized; stored indices were shifted). Returns `false`
    /// when the removed item sat inside the window, in which case the
    /// caller must tear down and refill.
    pub fn on_removed(&mut self, old_index: usize) -> bool {
        let inside = match (self.first_index(), self.last_index()) {
            (Some(first), Some(last)) => old_index >= first && old_index <= last,
            _ => false,
        };
        if inside {
            return false;
        }
        if self.first_index().is_some_and(|first| old_index < first) {
            for entry in &mut self.entries {
                entry.index -= 1;
            }
        }
        if (old_index as isize) <= self.max_laid_out {
            self.max_laid_out -= 1;
        }
        true
    }
}
