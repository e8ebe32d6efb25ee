//! Executor applying planner ops against the host.

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use spool_core::context::ContextList;
use spool_core::pool::SlotPool;
use spool_core::types::{Placement, SlotKind, SlotOp};
use spool_core::{Result, SpoolError};

use crate::host::SlotHost;

struct Slot<C, H> {
    ctx: Rc<C>,
    kind: SlotKind,
    handle: H,
}

/// Live slot registry, mirroring the planner's window order exactly.
///
/// Ops are applied in sequence: each op's slot numbers refer to the
/// registry as left by the previous op. Loads acquire from the pool
/// first and only construct through the host when the pool is empty.
pub(crate) struct Slots<C, H> {
    entries: VecDeque<Slot<C, H>>,
}

impl<C, H> Slots<C, H> {
    pub(crate) fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn apply<Host>(
        &mut self,
        ops: &[SlotOp],
        list: &ContextList<C>,
        pool: &mut SlotPool<H>,
        host: &mut Host,
    ) -> Result<()>
    where
        Host: SlotHost<C, Handle = H>,
    {
        for &op in ops {
            match op {
                SlotOp::Load {
                    index,
                    kind,
                    placement,
                    position,
                } => {
                    let ctx = list.get(index).ok_or_else(|| {
                        SpoolError::SlotDesync(format!(
                            "load references index {index} past the list end"
                        ))
                    })?;
                    let mut handle = pool.acquire(kind).unwrap_or_else(|| host.create(kind));
                    host.bind(&mut handle, ctx, index, placement);
                    if let Some(position) = position {
                        host.place(&mut handle, position);
                    }
                    let slot = Slot {
                        ctx: ctx.clone(),
                        kind,
                        handle,
                    };
                    match placement {
                        Placement::Front => self.entries.push_front(slot),
                        Placement::Back => self.entries.push_back(slot),
                        Placement::At(at) => {
                            if at > self.entries.len() {
                                return Err(SpoolError::SlotDesync(format!(
                                    "load at slot {at} with only {} live",
                                    self.entries.len()
                                )));
                            }
                            self.entries.insert(at, slot);
                        }
                    }
                }
                SlotOp::Unload { slot } => {
                    let mut entry = self.entries.remove(slot).ok_or_else(|| {
                        SpoolError::SlotDesync(format!(
                            "unload references slot {slot} with only {} live",
                            self.entries.len()
                        ))
                    })?;
                    host.release(&mut entry.handle);
                    pool.release(entry.kind, entry.handle);
                }
            }
        }
        Ok(())
    }

    /// Releases every live slot back to the pool, front to back.
    pub(crate) fn teardown<Host>(&mut self, pool: &mut SlotPool<H>, host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        while let Some(mut entry) = self.entries.pop_front() {
            host.release(&mut entry.handle);
            pool.release(entry.kind, entry.handle);
        }
    }

    /// Contexts of the live slots in window order.
    pub(crate) fn contexts(&self) -> impl Iterator<Item = &Rc<C>> {
        self.entries.iter().map(|slot| &slot.ctx)
    }

    /// Pushes per-slot scale factors through the host.
    pub(crate) fn apply_scales<Host>(&mut self, scales: &[(usize, f32)], host: &mut Host)
    where
        Host: SlotHost<C, Handle = H>,
    {
        for &(slot, scale) in scales {
            if let Some(entry) = self.entries.get_mut(slot) {
                host.set_scale(&mut entry.handle, scale);
            }
        }
    }

}

impl<C, H> Default for Slots<C, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, H> fmt::Debug for Slots<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slots").field("live", &self.entries.len()).finish()
    }
}
