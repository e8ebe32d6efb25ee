//! Circular sliding window over a wrapping logical list.
//!
//! The window keeps `window_size` slots materialized, centered on
//! `main_index` and wrapping modulo the list length. Scroll input
//! accumulates into a signed offset; crossing the configured threshold
//! advances the window by exactly one step and pulls the offset back by
//! the compensation distance so the content appears continuous.
//!
//! Sign convention: a positive offset means the content has been dragged
//! toward higher positions, revealing *earlier* items, so crossing the
//! positive threshold steps backward and crossing the negative threshold
//! steps forward.

use crate::config::CarouselConfig;
use crate::constants::carousel::MIN_WINDOW;
use crate::types::{Direction, Placement, SlotKind, SlotOp};

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Planner for the circular carousel window.
///
/// Pure index bookkeeping: every mutation returns the [`SlotOp`]s the
/// executor must apply, in order. Unloads are emitted before the load
/// that replaces them so the freed handle is immediately reusable.
#[derive(Debug)]
pub struct CircularWindow {
    main: usize,
    size: usize,
    live: usize,
    offset: f32,
}

impl CircularWindow {
    /// Creates a window of `window_size` slots (clamped to the minimum).
    pub fn new(window_size: usize) -> Self {
        Self {
            main: 0,
            size: window_size.max(MIN_WINDOW),
            live: 0,
            offset: 0.0,
        }
    }

    /// The centered logical index.
    #[inline]
    pub fn main_index(&self) -> usize {
        self.main
    }

    /// Accumulated scroll offset.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Number of currently materialized slots.
    #[inline]
    pub fn live(&self) -> usize {
        self.live
    }

    /// Configured slot count of a fully populated window.
    #[inline]
    pub fn window_size(&self) -> usize {
        self.size
    }

    #[inline]
    fn half(&self) -> usize {
        self.size / 2
    }

    /// Logical indices currently materialized, in window order.
    pub fn indices(&self, len: usize) -> Vec<usize> {
        if self.live == 0 {
            return Vec::new();
        }
        if self.live == self.size && len >= self.size {
            let half = self.half();
            (0..self.size)
                .map(|i| (self.main + len - half + i) % len)
                .collect()
        } else {
            (0..self.live).collect()
        }
    }

    /// Steps the window by one in `direction`.
    ///
    /// Unloads the slot at the leading edge and loads the index entering
    /// at the trailing edge, then moves `main_index`. Returns `None`
    /// without touching anything when the list is smaller than the window.
    pub fn advance(&mut self, len: usize, direction: Direction) -> Option<Vec<SlotOp>> {
        if len < self.size || self.live < self.size {
            return None;
        }
        let half = self.half();
        let ops = match direction {
            Direction::Forward => {
                let load_index = (self.main + 1 + half) % len;
                self.main = (self.main + 1) % len;
                vec![
                    SlotOp::Unload { slot: 0 },
                    SlotOp::Load {
                        index: load_index,
                        kind: SlotKind::Body,
                        placement: Placement::Back,
                        position: None,
                    },
                ]
            }
            Direction::Backward => {
                let load_index = (self.main + len - half - 1) % len;
                self.main = (self.main + len - 1) % len;
                vec![
                    SlotOp::Unload {
                        slot: self.size - 1,
                    },
                    SlotOp::Load {
                        index: load_index,
                        kind: SlotKind::Body,
                        placement: Placement::Front,
                        position: None,
                    },
                ]
            }
        };
        Some(ops)
    }

    /// Accumulates a scroll delta and performs at most one threshold
    /// advance, compensating the offset on success.
    pub fn apply_scroll(&mut self, cfg: &CarouselConfig, len: usize, delta: f32) -> Vec<SlotOp> {
        self.offset += delta;
        if self.offset > cfg.load_threshold {
            if let Some(ops) = self.advance(len, Direction::Backward) {
                self.offset -= cfg.compensation;
                return ops;
            }
        } else if self.offset < -cfg.load_threshold {
            if let Some(ops) = self.advance(len, Direction::Forward) {
                self.offset += cfg.compensation;
                return ops;
            }
        }
        Vec::new()
    }

    /// Rebuilds a fresh window centered at index 0 with a zeroed offset.
    ///
    /// The caller must have released all live slots first; only loads are
    /// emitted. Lists smaller than the window load each index exactly
    /// once instead of a full window.
    pub fn rebuild(&mut self, len: usize) -> Vec<SlotOp> {
        self.main = 0;
        self.offset = 0.0;
        self.live = len.min(self.size);
        let half = self.half();
        let load = |index: usize| SlotOp::Load {
            index,
            kind: SlotKind::Body,
            placement: Placement::Back,
            position: None,
        };
        if len >= self.size {
            (0..self.size)
                .map(|i| load((self.main + len - half + i) % len))
                .collect()
        } else {
            (0..len).map(load).collect()
        }
    }

    /// Forgets all live slots and recenters. The caller releases the
    /// actual handles.
    pub fn clear(&mut self) {
        self.main = 0;
        self.live = 0;
        self.offset = 0.0;
    }

    /// Repairs the window after the item at `old_index` was removed.
    ///
    /// `len` is the list length after removal. A removal outside the
    /// window only shifts `main_index`; one inside a fully populated
    /// window unloads the vacated slot and tops the window back up at the
    /// edge that lost coverage. When the list drops below the window
    /// size the whole window is torn down and rebuilt.
    pub fn on_removed(&mut self, len: usize, old_index: usize) -> Vec<SlotOp> {
        if self.live == 0 {
            self.main = 0;
            return Vec::new();
        }

        if self.live == self.size && len >= self.size {
            let old_len = len + 1;
            let half = self.half();
            let front = (self.main + old_len - half) % old_len;
            let slot = (old_index + old_len - front) % old_len;

            let new_main = if old_index < self.main {
                self.main - 1
            } else {
                self.main % len
            };
            self.main = new_main;

            if slot >= self.size {
                return Vec::new();
            }

            let mut ops = vec![SlotOp::Unload { slot }];
            let (index, placement) = if slot < half {
                ((new_main + len - half) % len, Placement::Front)
            } else {
                ((new_main + half) % len, Placement::Back)
            };
            ops.push(SlotOp::Load {
                index,
                kind: SlotKind::Body,
                placement,
                position: None,
            });
            return ops;
        }

        // Window can no longer stay fully populated (or was not to begin
        // with): tear down and rebuild from scratch.
        let mut ops: Vec<SlotOp> = (0..self.live)
            .rev()
            .map(|slot| SlotOp::Unload { slot })
            .collect();
        ops.extend(self.rebuild(len));
        ops
    }

    /// Per-slot scale factors for center emphasis, computed purely from
    /// the current offset.
    ///
    /// The centered slot eases from the highlight scale toward 1 as the
    /// offset approaches the threshold, while the neighbor on the
    /// approached side eases up in exchange. Every other slot reports 1.
    pub fn highlight(&self, cfg: &CarouselConfig) -> Vec<(usize, f32)> {
        if !cfg.highlight_center || self.live == 0 {
            return Vec::new();
        }
        let t = (self.offset.abs() / cfg.load_threshold).clamp(0.0, 1.0);
        let center_scale = lerp(cfg.highlight_scale, 1.0, t);
        let neighbor_scale = lerp(1.0, cfg.highlight_scale, t);

        let (center, prev, next) = if self.live == self.size {
            let half = self.half();
            (half, Some(half - 1), Some(half + 1))
        } else {
            // Partially populated windows lay slots out in logical order
            // with the main index at slot 0.
            let prev = (self.live > 1).then_some(self.live - 1);
            let next = (self.live > 1).then_some(1);
            (0, prev, next)
        };

        let mut scales = vec![1.0; self.live];
        scales[center] = center_scale;
        if self.offset > 0.0 {
            if let Some(slot) = prev {
                scales[slot] = neighbor_scale;
            }
        } else if self.offset < 0.0 {
            if let Some(slot) = next {
                scales[slot] = neighbor_scale;
            }
        }
        scales.into_iter().enumerate().collect()
    }
}
