//! Grouped paging widget: header lines and body runs.
//!
//! Items declare a layout role ([`ItemRole`]) when they enter the list;
//! the resolved kind is cached per index so the planner never inspects a
//! context twice. The initial fill is frame-deferred: one group loads per
//! tick until the laid-out extent covers the viewport plus the load
//! margin, keeping the host responsive while long sections mount.
//!
//! Scrolling pages whole groups through [`GroupWindow`]; releasing a
//! gesture outside the content bounds eases the scroll back to the
//! nearest bound.

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use log::{debug, error};

use spool_core::config::GroupPagingConfig;
use spool_core::context::ContextList;
use spool_core::motion::Settle;
use spool_core::pool::{PoolStats, SlotPool};
use spool_core::types::{SlotKind, SlotOp};
use spool_core::window::{GroupSlot, GroupWindow};
use spool_core::{Result, SpoolError};

use crate::epoch::Epoch;
use crate::host::SlotHost;
use crate::slots::Slots;

/// Declares an item's layout role for grouped paging.
///
/// Resolved exactly once, when the item enters the logical list, and
/// cached for the item's lifetime. Returning `None` is a data-contract
/// violation by the producer, reported as [`SpoolError::UnresolvedKind`].
pub trait ItemRole {
    /// The item's declared role, if any.
    fn role(&self) -> Option<SlotKind>;
}

/// A paging scroller over header lines and body runs, materializing only
/// the groups near the viewport.
pub struct GroupPager<C, H> {
    cfg: GroupPagingConfig,
    list: ContextList<C>,
    /// Kind per logical index, resolved at ingestion. Parallel to `list`.
    kinds: Vec<SlotKind>,
    window: GroupWindow,
    pool: SlotPool<H>,
    slots: Slots<C, H>,
    settle: Settle,
    epoch: Epoch,
    /// Epoch token of the deferred fill, doubling as the busy flag:
    /// while set, gesture input is ignored and further structural
    /// changes coalesce into the one pending refill.
    pending_fill: Option<u64>,
    viewport: f32,
    started: bool,
}

impl<C, H> GroupPager<C, H> {
    /// Creates a stopped pager with `config` (normalized on entry).
    pub fn new(config: GroupPagingConfig) -> Self {
        Self {
            cfg: config.normalized(),
            list: ContextList::new(),
            kinds: Vec::new(),
            window: GroupWindow::new(),
            pool: SlotPool::new(),
            slots: Slots::new(),
            settle: Settle::default(),
            epoch: Epoch::default(),
            pending_fill: None,
            viewport: 0.0,
            started: false,
        }
    }

    /// Applies a new configuration. A started pager tears down and
    /// schedules a refill under the new layout.
    pub fn configure<Host>(&mut self, host: &mut Host, config: GroupPagingConfig)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.cfg = config.normalized();
        self.slots.teardown(&mut self.pool, host);
        self.window.clear();
        if self.started {
            self.schedule_refill(host);
        }
    }

    /// Sets the viewport extent along the main axis. The initial fill
    /// (and any later top-up) loads until the content covers it plus the
    /// configured margin, so a grown viewport resumes filling.
    pub fn set_viewport(&mut self, viewport: f32) {
        self.viewport = viewport.max(0.0);
        if self.started && self.pending_fill.is_none() {
            self.pending_fill = Some(self.epoch.token());
        }
    }

    /// Begins operation; the first group loads on the next tick.
    pub fn start<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.started = true;
        self.schedule_refill(host);
    }

    /// Releases all visuals and stops reacting to input. The pool keeps
    /// its parked handles for a later [`GroupPager::start`].
    pub fn stop<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.started = false;
        self.settle.cancel();
        self.epoch.bump();
        self.pending_fill = None;
        self.slots.teardown(&mut self.pool, host);
        self.window.clear();
    }

    /// Drops every context and live visual.
    pub fn on_data_reset<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.list.clear();
        self.kinds.clear();
        self.epoch.bump();
        self.pending_fill = None;
        self.settle.cancel();
        self.slots.teardown(&mut self.pool, host);
        self.window.clear();
        if self.started {
            self.schedule_refill(host);
        }
    }

    /// Removes `ctx` by identity. Returns `false` when absent.
    ///
    /// A removal outside the window only renumbers; one inside tears
    /// down and refills, since the removal may have merged two body
    /// lines or orphaned a header.
    pub fn on_item_removed<Host>(&mut self, host: &mut Host, ctx: &Rc<C>) -> bool
    where
        Host: SlotHost<C, Handle = H>,
    {
        let Some(old_index) = self.list.remove(ctx) else {
            return false;
        };
        self.kinds.remove(old_index);
        if !self.started || self.pending_fill.is_some() {
            // The pending refill reads the list fresh when it runs.
            return true;
        }
        if !self.window.on_removed(old_index) {
            self.schedule_refill(host);
        }
        true
    }

    /// A scroll gesture began: cancels any settle in flight.
    pub fn drag_began(&mut self) {
        self.settle.cancel();
    }

    /// Feeds one signed scroll delta from an active gesture. Overdrag
    /// past the content bounds is allowed until the gesture ends.
    pub fn drag_delta<Host>(&mut self, host: &mut Host, delta: f32)
    where
        Host: SlotHost<C, Handle = H>,
    {
        if !self.started || self.is_busy() {
            return;
        }
        self.scroll_by(host, delta);
    }

    /// The gesture ended with a final `delta`; a scroll left outside the
    /// content bounds eases back to the nearest bound.
    pub fn drag_ended<Host>(&mut self, host: &mut Host, delta: f32)
    where
        Host: SlotHost<C, Handle = H>,
    {
        if !self.started || self.is_busy() {
            return;
        }
        self.scroll_by(host, delta);
        let target = self.window.settle_target(self.viewport);
        if target != self.window.scroll() {
            self.settle.start(target, self.cfg.settle_rate);
        }
    }

    /// Runs one frame: advances the deferred fill by one group, or the
    /// bounds settle, applying any paging they trigger. Returns `true`
    /// while more ticks are wanted.
    pub fn tick<Host>(&mut self, host: &mut Host, now: Instant) -> bool
    where
        Host: SlotHost<C, Handle = H>,
    {
        if let Some(token) = self.pending_fill.take() {
            if self.epoch.is_current(token) && self.started && !self.list.is_empty() {
                match self.window.fill_step(&self.kinds, &self.cfg, self.viewport) {
                    Some(ops) => {
                        self.apply_ops(host, &ops);
                        // An apply failure bumped the epoch and armed a
                        // fresh refill; only the still-current fill
                        // continues next tick.
                        if self.pending_fill.is_none() && self.epoch.is_current(token) {
                            self.pending_fill = Some(token);
                        }
                    }
                    None => {
                        debug!(
                            "group pager: fill complete, {} slots over extent {}",
                            self.slots.len(),
                            self.window.content_extent()
                        );
                    }
                }
            }
        } else if self.started && self.settle.is_active() {
            if let Some(next) = self.settle.tick(now, self.window.scroll()) {
                let delta = next - self.window.scroll();
                self.scroll_by(host, delta);
            }
        }
        self.pending_fill.is_some() || self.settle.is_active()
    }

    fn schedule_refill<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        if self.pending_fill.is_some() {
            return;
        }
        self.settle.cancel();
        self.slots.teardown(&mut self.pool, host);
        self.window.clear();
        self.epoch.bump();
        self.pending_fill = Some(self.epoch.token());
    }

    fn scroll_by<Host>(&mut self, host: &mut Host, delta: f32)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.window.apply_scroll(delta);
        // Each load moves the checked edge, so both loops make progress
        // and stop at the list ends.
        while let Some(from) = self.window.check_forward(&self.kinds, &self.cfg) {
            let ops = self.window.load_forward(&self.kinds, &self.cfg, from);
            self.apply_ops(host, &ops);
            if self.is_busy() {
                return;
            }
        }
        while let Some(from) = self.window.check_backward(&self.cfg, self.viewport) {
            let ops = self.window.load_backward(&self.kinds, &self.cfg, from);
            self.apply_ops(host, &ops);
            if self.is_busy() {
                return;
            }
        }
    }

    fn apply_ops<Host>(&mut self, host: &mut Host, ops: &[SlotOp])
    where
        Host: SlotHost<C, Handle = H>,
    {
        if let Err(err) = self.slots.apply(ops, &self.list, &mut self.pool, host) {
            error!("group pager: slot update failed, refilling: {err}");
            self.schedule_refill(host);
        }
    }

    /// Lowest materialized logical index.
    #[inline]
    pub fn first_index(&self) -> Option<usize> {
        self.window.first_index()
    }

    /// Highest materialized logical index.
    #[inline]
    pub fn last_index(&self) -> Option<usize> {
        self.window.last_index()
    }

    /// Number of live slots.
    #[inline]
    pub fn live(&self) -> usize {
        self.slots.len()
    }

    /// Accumulated scroll position along the main axis.
    #[inline]
    pub fn scroll(&self) -> f32 {
        self.window.scroll()
    }

    /// Total laid-out content extent along the main axis.
    #[inline]
    pub fn content_extent(&self) -> f32 {
        self.window.content_extent()
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

    /// True while the deferred fill is pending; gesture input is ignored
    /// until it completes.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.pending_fill.is_some()
    }

    /// Snapshot of the materialized slots in window order, with their
    /// resolved kinds and assigned positions.
    pub fn materialized_slots(&self) -> Vec<GroupSlot> {
        self.window.slots().copied().collect()
    }

    /// Contexts bound to the live slots, in window order.
    pub fn live_contexts(&self) -> Vec<Rc<C>> {
        self.slots.contexts().cloned().collect()
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

impl<C: ItemRole, H> GroupPager<C, H> {
    /// Inserts `ctx` at `index` (appending when past the end), resolving
    /// and caching its role. When started, schedules the deferred refill.
    ///
    /// Fails without inserting when the context declares no role; the
    /// producer violated the formatting contract and the error is
    /// propagated rather than recovered.
    pub fn on_item_added<Host>(&mut self, host: &mut Host, index: usize, ctx: Rc<C>) -> Result<()>
    where
        Host: SlotHost<C, Handle = H>,
    {
        let kind = ctx.role().ok_or(SpoolError::UnresolvedKind { index })?;
        let at = index.min(self.list.len());
        self.list.insert(index, ctx);
        self.kinds.insert(at, kind);
        if self.started {
            self.schedule_refill(host);
        }
        Ok(())
    }
}

impl<C, H> fmt::Debug for GroupPager<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupPager")
            .field("len", &self.list.len())
            .field("first_index", &self.window.first_index())
            .field("last_index", &self.window.last_index())
            .field("live", &self.slots.len())
            .field("busy", &self.is_busy())
            .finish()
    }
}
