//! Circular carousel widget.
//!
//! Wraps a [`CircularWindow`] with the pieces a host needs to run it:
//! the logical list, the slot executor and pool, gesture input, and the
//! frame-tick animations. All loading after a structural change is
//! deferred by one tick and coalesced, mirroring how hosts batch item
//! notifications within a frame.

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use log::{debug, error};

use spool_core::config::CarouselConfig;
use spool_core::context::ContextList;
use spool_core::motion::{Glide, Settle};
use spool_core::pool::{PoolStats, SlotPool};
use spool_core::types::{Direction, SlotOp};
use spool_core::window::CircularWindow;

use crate::epoch::Epoch;
use crate::host::SlotHost;
use crate::slots::Slots;

/// A wrapping carousel over an arbitrarily long item list, materializing
/// only a fixed-size window of visuals.
pub struct Carousel<C, H> {
    cfg: CarouselConfig,
    list: ContextList<C>,
    window: CircularWindow,
    pool: SlotPool<H>,
    slots: Slots<C, H>,
    settle: Settle,
    glide: Option<Glide>,
    epoch: Epoch,
    /// Epoch token of the deferred rebuild, doubling as the busy flag:
    /// while set, gesture input is ignored and further structural
    /// changes coalesce into the one pending rebuild.
    pending_rebuild: Option<u64>,
    started: bool,
}

impl<C, H> Carousel<C, H> {
    /// Creates a stopped carousel with `config` (normalized on entry).
    pub fn new(config: CarouselConfig) -> Self {
        let cfg = config.normalized();
        let window = CircularWindow::new(cfg.window_size);
        Self {
            cfg,
            list: ContextList::new(),
            window,
            pool: SlotPool::new(),
            slots: Slots::new(),
            settle: Settle::default(),
            glide: None,
            epoch: Epoch::default(),
            pending_rebuild: None,
            started: false,
        }
    }

    /// Applies a new configuration. A started carousel tears down and
    /// schedules a rebuild under the new window size.
    pub fn configure<Host>(&mut self, host: &mut Host, config: CarouselConfig)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.cfg = config.normalized();
        self.slots.teardown(&mut self.pool, host);
        self.window = CircularWindow::new(self.cfg.window_size);
        if self.started {
            self.schedule_rebuild(host);
        }
    }

    /// Begins operation; the first window loads on the next tick.
    pub fn start<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.started = true;
        self.schedule_rebuild(host);
    }

    /// Releases all visuals and stops reacting to input. The pool keeps
    /// its parked handles for a later [`Carousel::start`].
    pub fn stop<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.started = false;
        self.settle.cancel();
        self.glide = None;
        self.epoch.bump();
        self.pending_rebuild = None;
        self.slots.teardown(&mut self.pool, host);
        self.window.clear();
    }

    /// Inserts `ctx` at `index` (appending when past the end) and, when
    /// started, schedules the deferred window rebuild.
    pub fn on_item_added<Host>(&mut self, host: &mut Host, index: usize, ctx: Rc<C>)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.list.insert(index, ctx);
        if self.started {
            self.schedule_rebuild(host);
        }
    }

    /// Removes `ctx` by identity. Returns `false` when absent.
    ///
    /// A removal inside the live window swaps the vacated slot for the
    /// index entering at the uncovered edge; one outside only renumbers.
    pub fn on_item_removed<Host>(&mut self, host: &mut Host, ctx: &Rc<C>) -> bool
    where
        Host: SlotHost<C, Handle = H>,
    {
        let Some(old_index) = self.list.remove(ctx) else {
            return false;
        };
        if !self.started || self.pending_rebuild.is_some() {
            // The pending rebuild reads the list fresh when it runs.
            return true;
        }
        let ops = self.window.on_removed(self.list.len(), old_index);
        self.apply_ops(host, &ops);
        self.refresh_highlight(host);
        true
    }

    /// Drops every context and live visual.
    pub fn on_data_reset<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        self.list.clear();
        self.epoch.bump();
        self.pending_rebuild = None;
        self.settle.cancel();
        self.glide = None;
        self.slots.teardown(&mut self.pool, host);
        self.window.clear();
        if self.started {
            self.schedule_rebuild(host);
        }
    }

    /// A scroll gesture began: cancels any settle or glide in flight.
    pub fn drag_began(&mut self) {
        self.settle.cancel();
        self.glide = None;
    }

    /// Feeds one signed scroll delta from an active gesture.
    pub fn drag_delta<Host>(&mut self, host: &mut Host, delta: f32)
    where
        Host: SlotHost<C, Handle = H>,
    {
        if !self.started || self.is_busy() {
            return;
        }
        self.scroll_by(host, delta);
    }

    /// The gesture ended with a final `delta`; the offset then settles
    /// back to center.
    pub fn drag_ended<Host>(&mut self, host: &mut Host, delta: f32)
    where
        Host: SlotHost<C, Handle = H>,
    {
        if !self.started || self.is_busy() {
            return;
        }
        self.scroll_by(host, delta);
        self.settle.start(0.0, self.cfg.settle_rate);
    }

    /// Glides forward until the center advances by one, then settles.
    pub fn glide_to_next(&mut self) {
        self.glide_to(Direction::Forward);
    }

    /// Glides backward until the center retreats by one, then settles.
    pub fn glide_to_previous(&mut self) {
        self.glide_to(Direction::Backward);
    }

    fn glide_to(&mut self, direction: Direction) {
        if !self.started {
            return;
        }
        self.settle.cancel();
        self.glide = Some(Glide::new(direction, self.cfg.glide_rate));
    }

    /// Runs one frame: executes a due rebuild, advances glide and settle,
    /// and applies any window changes they trigger. Returns `true` while
    /// more ticks are wanted.
    pub fn tick<Host>(&mut self, host: &mut Host, now: Instant) -> bool
    where
        Host: SlotHost<C, Handle = H>,
    {
        if let Some(token) = self.pending_rebuild.take() {
            if self.epoch.is_current(token) && self.started && !self.list.is_empty() {
                let ops = self.window.rebuild(self.list.len());
                self.apply_ops(host, &ops);
                self.refresh_highlight(host);
                debug!(
                    "carousel: rebuilt {} slots over {} items",
                    self.slots.len(),
                    self.list.len()
                );
            }
        } else if self.started {
            let glide_step = self.glide.as_mut().map(|g| (g.direction(), g.tick(now)));
            if let Some((direction, magnitude)) = glide_step {
                // A forward glide pulls the content backward along the
                // scroll axis, toward the negative threshold.
                let delta = -(direction.signum() as f32) * magnitude;
                let before = self.window.main_index();
                self.scroll_by(host, delta);
                if self.window.main_index() != before {
                    self.glide = None;
                    self.settle.start(0.0, self.cfg.settle_rate);
                }
            }
            if self.settle.is_active() {
                if let Some(next) = self.settle.tick(now, self.window.offset()) {
                    let delta = next - self.window.offset();
                    self.scroll_by(host, delta);
                }
            }
        }
        self.pending_rebuild.is_some() || self.glide.is_some() || self.settle.is_active()
    }

    fn schedule_rebuild<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        if self.pending_rebuild.is_some() {
            return;
        }
        self.settle.cancel();
        self.glide = None;
        self.slots.teardown(&mut self.pool, host);
        self.window.clear();
        self.epoch.bump();
        self.pending_rebuild = Some(self.epoch.token());
    }

    fn scroll_by<Host>(&mut self, host: &mut Host, delta: f32)
    where
        Host: SlotHost<C, Handle = H>,
    {
        let ops = self.window.apply_scroll(&self.cfg, self.list.len(), delta);
        if !ops.is_empty() {
            self.apply_ops(host, &ops);
        }
        self.refresh_highlight(host);
    }

    fn apply_ops<Host>(&mut self, host: &mut Host, ops: &[SlotOp])
    where
        Host: SlotHost<C, Handle = H>,
    {
        if let Err(err) = self.slots.apply(ops, &self.list, &mut self.pool, host) {
            error!("carousel: slot update failed, rebuilding: {err}");
            self.schedule_rebuild(host);
        }
    }

    fn refresh_highlight<Host>(&mut self, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        if !self.cfg.highlight_center {
            return;
        }
        let scales = self.window.highlight(&self.cfg);
        self.slots.apply_scales(&scales, host);
    }

    /// Logical index currently centered.
    #[inline]
    pub fn main_index(&self) -> usize {
        self.window.main_index()
    }

    /// Accumulated scroll offset.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.window.offset()
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

    /// True while a deferred rebuild is pending; gesture input is
    /// ignored until it runs.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.pending_rebuild.is_some()
    }

    /// Logical indices materialized right now, in window order.
    pub fn materialized_indices(&self) -> Vec<usize> {
        self.window.indices(self.list.len())
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

impl<C, H> fmt::Debug for Carousel<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("len", &self.list.len())
            .field("main_index", &self.window.main_index())
            .field("live", &self.slots.len())
            .field("busy", &self.is_busy())
            .finish()
    }
}
