//! Reuse pool for released visual handles.
//!
//! Materializing a slot is the hot path while scrolling, so handles are
//! never destroyed on unload. They park in a per-kind free list and the
//! next load of the same kind takes one back instead of constructing.

use std::collections::VecDeque;
use std::fmt;

use log::trace;

use crate::types::SlotKind;

/// Free-list pool of visual handles, keyed by slot kind.
///
/// The pool never constructs handles itself: [`SlotPool::acquire`] returns
/// `None` when the matching free list is empty and the caller constructs
/// through its host. Pooled entries persist until [`SlotPool::drain`].
pub struct SlotPool<H> {
    headers: VecDeque<H>,
    bodies: VecDeque<H>,
    acquired: u64,
    reused: u64,
    returned: u64,
}

/// Counters describing pool usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Header handles currently parked in the pool.
    pub pooled_headers: usize,
    /// Body handles currently parked in the pool.
    pub pooled_bodies: usize,
    /// Total acquire calls.
    pub acquired: u64,
    /// Acquire calls satisfied from the pool.
    pub reused: u64,
    /// Handles returned to the pool.
    pub returned: u64,
}

impl<H> SlotPool<H> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            headers: VecDeque::new(),
            bodies: VecDeque::new(),
            acquired: 0,
            reused: 0,
            returned: 0,
        }
    }

    fn free_list(&mut self, kind: SlotKind) -> &mut VecDeque<H> {
        match kind {
            SlotKind::Header => &mut self.headers,
            SlotKind::Body => &mut self.bodies,
        }
    }

    /// Takes a previously released handle of `kind`, if one is pooled.
    ///
    /// `None` signals the caller to construct a new handle.
    pub fn acquire(&mut self, kind: SlotKind) -> Option<H> {
        self.acquired += 1;
        match self.free_list(kind).pop_front() {
            Some(handle) => {
                self.reused += 1;
                trace!("slot pool: reusing pooled {kind:?} handle");
                Some(handle)
            }
            None => {
                trace!("slot pool: no pooled {kind:?} handle, caller constructs");
                None
            }
        }
    }

    /// Parks a released handle for later reuse.
    pub fn release(&mut self, kind: SlotKind, handle: H) {
        self.returned += 1;
        self.free_list(kind).push_back(handle);
        trace!("slot pool: parked {kind:?} handle");
    }

    /// Current usage counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            pooled_headers: self.headers.len(),
            pooled_bodies: self.bodies.len(),
            acquired: self.acquired,
            reused: self.reused,
            returned: self.returned,
        }
    }

    /// Empties the pool, handing every parked handle back to the caller
    /// for destruction. Counters are kept.
    pub fn drain(&mut self) -> Vec<H> {
        self.headers.drain(..).chain(self.bodies.drain(..)).collect()
    }
}

impl<H> Default for SlotPool<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for SlotPool<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotPool")
            .field("pooled_headers", &self.headers.len())
            .field("pooled_bodies", &self.bodies.len())
            .finish()
    }
}
