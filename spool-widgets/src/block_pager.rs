//! Block paging widget: headerless fixed-count pages.
//!
//! The simplest of the three controllers: no deferred work and no
//! animation, so it needs no tick. Everything happens synchronously in
//! the gesture and binding callbacks. The accumulated offset is a rest
//! position between the two thresholds; a gesture pushes it out and the
//! post-drag snap loop steps the window block by block, rebasing the
//! offset after each step, until it is back inside the rest band.

use std::fmt;
use std::rc::Rc;

use log::{debug, error};

use spool_core::config::BlockPagingConfig;
use spool_core::context::ContextList;
use spool_core::pool::{PoolStats, SlotPool};
use spool_core::types::SlotOp;
use spool_core::window::{BlockWindow, StepOutcome};

use crate::host::SlotHost;
use crate::slots::Slots;

/// A linear paging scroller keeping `show_count` slots live and stepping
/// them in `block_size` batches.
pub struct BlockPager<C, H> {
    cfg: BlockPagingConfig,
    list: ContextList<C>,
    window: BlockWindow,
    pool: SlotPool<H>,
    slots: Slots<C, H>,
    offset: f32,
    dragging: bool,
    started: bool,
}

impl<C, H> BlockPager<C, H> {
    /// Creates a stopped pager with `config` (normalized on entry).
    pub fn new(config: BlockPagingConfig) -> Self {
        Self {
            cfg: config.normalized(),
            list: ContextList::new(),
            window: BlockWindow::new(),
            pool: SlotPool::new(),
            slots: Slots::new(),
            offset: 0.0,
            dragging: false,
            started: false,
        }
    }

    /// Applies a new configuration. A started pager rebuilds at the list
    /// head under the new page size.
    pub fn configure<Host>(&mut self, host: &mut Host, config: BlockPagingConfig)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.cfg = config.normalized();
        if self.started {
            self.rebuild(host);
        }
    }

    /// Begins operation, loading the first page immediately.
    pub fn start<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.started = true;
        self.rebuild(host);
    }

    /// Releases all visuals and stops reacting to input. The pool keeps
    /// its parked handles for a later [`BlockPager::start`].
    pub fn stop<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.started = false;
        self.dragging = false;
        self.offset = 0.0;
        self.slots.teardown(&mut self.pool, host);
        self.window.clear();
    }

    /// Inserts `ctx` at `index` (appending when past the end).
    ///
    /// Insertions inside the window mount at their exact slot; ones past
    /// it only top an under-filled window up.
    pub fn on_item_added<Host>(&mut self, host: &mut Host, index: usize, ctx: Rc<C>)
    where
        Host: SlotHost<C, Handle = H>,
    {
        let at = index.min(self.list.len());
        self.list.insert(index, ctx);
        if self.started {
            let ops = self.window.insert_fill(at, self.list.len(), &self.cfg);
            self.apply_ops(host, &ops);
        }
    }

    /// Removes `ctx` by identity, topping the window back up from the
    /// nearest uncovered edge. Returns `false` when absent.
    pub fn on_item_removed<Host>(&mut self, host: &mut Host, ctx: &Rc<C>) -> bool
    where
        Host: SlotHost<C, Handle = H>,
    {
        let Some(old_index) = self.list.remove(ctx) else {
            return false;
        };
        if self.started {
            let ops = self.window.remove_rebalance(old_index, self.list.len());
            self.apply_ops(host, &ops);
        }
        true
    }

    /// Drops every context and live visual, rebuilding empty.
    pub fn on_data_reset<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.list.clear();
        self.offset = 0.0;
        if self.started {
            self.rebuild(host);
        } else {
            self.slots.teardown(&mut self.pool, host);
            self.window.clear();
        }
    }

    /// A scroll gesture began; deltas accumulate until it ends.
    pub fn drag_began(&mut self) {
        self.dragging = true;
    }

    /// Feeds one signed scroll delta from the active gesture.
    pub fn drag_delta(&mut self, delta: f32) {
        if !self.started || !self.dragging {
            return;
        }
        self.offset += delta;
    }

    /// The gesture ended with a final `delta`; the snap loop then steps
    /// the window until the offset rests between the thresholds.
    pub fn drag_ended<Host>(&mut self, host: &mut Host, delta: f32)
    where
        Host: SlotHost<C, Handle = H>,
    {
        if !self.started {
            return;
        }
        self.dragging = false;
        self.offset += delta;
        self.snap(host);
    }

    /// Feeds one inertial (non-gesture) delta: at most a single step
    /// fires, with a half-strength rebase so decaying fling input walks
    /// the offset back to rest instead of retriggering.
    pub fn scroll_delta<Host>(&mut self, host: &mut Host, delta: f32)
    where
        Host: SlotHost<C, Handle = H>,
    {
        if !self.started || self.dragging {
            return;
        }
        self.offset += delta;
        if self.offset > self.cfg.forward_threshold {
            match self.window.step_forward(self.list.len(), &self.cfg) {
                StepOutcome::Advanced(ops) => {
                    self.apply_ops(host, &ops);
                    self.offset =
                        self.cfg.forward_rebase + (self.offset - self.cfg.forward_threshold) * 0.5;
                }
                StepOutcome::Pinned(ops) => self.apply_ops(host, &ops),
                StepOutcome::Blocked => {}
            }
        } else if self.offset < self.cfg.backward_threshold {
            match self.window.step_backward(self.list.len(), &self.cfg) {
                StepOutcome::Advanced(ops) | StepOutcome::Pinned(ops) => {
                    self.apply_ops(host, &ops);
                    self.offset = self.cfg.backward_rebase
                        + (self.offset - self.cfg.backward_threshold) * 0.5;
                }
                StepOutcome::Blocked => {}
            }
        }
    }

    /// Steps until the offset rests inside `[backward_threshold,
    /// forward_threshold]` or the window hits a list edge. Each forward
    /// rebase lowers the offset and each backward rebase raises it, so
    /// the loop always terminates.
    fn snap<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        loop {
            if self.offset > self.cfg.forward_threshold {
                match self.window.step_forward(self.list.len(), &self.cfg) {
                    StepOutcome::Advanced(ops) => {
                        self.apply_ops(host, &ops);
                        self.offset =
                            self.cfg.forward_rebase + (self.offset - self.cfg.forward_threshold);
                    }
                    StepOutcome::Pinned(ops) => {
                        // Ragged tail: the extra slots stay live and the
                        // offset keeps its position so the short page
                        // does not jump.
                        self.apply_ops(host, &ops);
                        break;
                    }
                    StepOutcome::Blocked => break,
                }
            } else if self.offset < self.cfg.backward_threshold {
                match self.window.step_backward(self.list.len(), &self.cfg) {
                    StepOutcome::Advanced(ops) | StepOutcome::Pinned(ops) => {
                        self.apply_ops(host, &ops);
                        self.offset =
                            self.cfg.backward_rebase + (self.offset - self.cfg.backward_threshold);
                    }
                    StepOutcome::Blocked => break,
                }
            } else {
                break;
            }
        }
    }

    fn rebuild<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.slots.teardown(&mut self.pool, host);
        self.offset = 0.0;
        let ops = self.window.rebuild(self.list.len(), &self.cfg);
        if let Err(err) = self.slots.apply(&ops, &self.list, &mut self.pool, host) {
            error!("block pager: rebuild failed, window left empty: {err}");
            self.slots.teardown(&mut self.pool, host);
            self.window.clear();
            return;
        }
        debug!("block pager: rebuilt with {} slots", self.slots.len());
    }

    fn apply_ops<Host>(&mut self, host: &mut Host, ops: &[SlotOp])
    where
        Host: SlotHost<C, Handle = H>,
    {
        if let Err(err) = self.slots.apply(ops, &self.list, &mut self.pool, host) {
            error!("block pager: slot update failed, rebuilding: {err}");
            self.rebuild(host);
        }
    }

    /// First materialized logical index.
    #[inline]
    pub fn start_index(&self) -> usize {
        self.window.start_index()
    }

    /// One past the last materialized logical index.
    #[inline]
    pub fn end_index(&self) -> usize {
        self.window.end_index()
    }

    /// Number of live slots.
    #[inline]
    pub fn live(&self) -> usize {
        self.slots.len()
    }

    /// Contexts bound to the live slots, in window order.
    pub fn live_contexts(&self) -> Vec<Rc<C>> {
        self.slots.contexts().cloned().collect()
    }

    /// Accumulated scroll offset.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Number of item contexts.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// True when no contexts are present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Pool usage counters.
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Empties the pool for final host-side destruction of the handles.
    pub fn drain_pool(&mut self) -> Vec<H> {
        self.pool.drain()
    }
}

impl<C, H> fmt::Debug for BlockPager<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockPager")
            .field("len", &self.list.len())
            .field("range", &(self.window.start_index()..self.window.end_index()))
            .field("offset", &self.offset)
            .finish()
    }
}
