//! Reusable test support: a recording host and seeded scenario fixtures.
//!
//! Public so embeddings can assert widget behavior against the same
//! tooling this crate's own tests use.

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use spool_core::types::{Placement, SlotKind, SlotPosition};

use crate::host::SlotHost;

/// One host call observed by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// A fresh visual was constructed (pool miss).
    Created {
        /// Identity of the new handle.
        handle: usize,
        /// Kind requested.
        kind: SlotKind,
    },
    /// A context was bound to a handle.
    Bound {
        /// Handle receiving the context.
        handle: usize,
        /// Logical index of the bound item.
        index: usize,
        /// Sibling-order hint delivered with the bind.
        placement: Placement,
    },
    /// A handle was positioned.
    Placed {
        /// Handle being positioned.
        handle: usize,
        /// Assigned layout position.
        position: SlotPosition,
    },
    /// A handle's scale changed.
    Scaled {
        /// Handle being scaled.
        handle: usize,
        /// New uniform scale.
        scale: f32,
    },
    /// A handle was deactivated and returned toward the pool.
    Released {
        /// Handle being released.
        handle: usize,
    },
}

/// [`SlotHost`] implementation that constructs sequential `usize` handles
/// and records every call, so tests can assert construction counts,
/// handle identity across pool reuse, bind order, and positions.
#[derive(Debug, Default)]
pub struct RecordingHost {
    next_handle: usize,
    /// Every observed call, in order.
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles constructed so far.
    pub fn created_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HostEvent::Created { .. }))
            .count()
    }

    /// Number of release calls so far.
    pub fn released_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HostEvent::Released { .. }))
            .count()
    }

    /// Logical indices bound so far, in call order.
    pub fn bound_indices(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Bound { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    /// Takes the recorded events, leaving the recorder empty.
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }
}

impl<C> SlotHost<C> for RecordingHost {
    type Handle = usize;

    fn create(&mut self, kind: SlotKind) -> usize {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.events.push(HostEvent::Created { handle, kind });
        handle
    }

    fn bind(&mut self, handle: &mut usize, _ctx: &Rc<C>, index: usize, placement: Placement) {
        self.events.push(HostEvent::Bound {
            handle: *handle,
            index,
            placement,
        });
    }

    fn place(&mut self, handle: &mut usize, position: SlotPosition) {
        self.events.push(HostEvent::Placed {
            handle: *handle,
            position,
        });
    }

    fn set_scale(&mut self, handle: &mut usize, scale: f32) {
        self.events.push(HostEvent::Scaled {
            handle: *handle,
            scale,
        });
    }

    fn release(&mut self, handle: &mut usize) {
        self.events.push(HostEvent::Released { handle: *handle });
    }
}

/// Deterministic scenario generator. Seeding keeps randomized
/// advance/paging sequences reproducible when a failure needs replaying.
#[derive(Debug)]
pub struct Fixtures {
    rng: StdRng,
}

impl Fixtures {
    /// Creates a generator from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `count` signed scroll deltas, each within `±magnitude`.
    pub fn deltas(&mut self, count: usize, magnitude: f32) -> Vec<f32> {
        (0..count)
            .map(|_| self.rng.random_range(-magnitude..magnitude))
            .collect()
    }

    /// `count` coin-flip step directions as signed units.
    pub fn signs(&mut self, count: usize) -> Vec<f32> {
        (0..count)
            .map(|_| if self.rng.random_bool(0.5) { 1.0 } else { -1.0 })
            .collect()
    }

    /// A kind pattern of `count` items starting with a header, each
    /// further item a header with probability `header_chance`.
    pub fn kind_pattern(&mut self, count: usize, header_chance: f64) -> Vec<SlotKind> {
        (0..count)
            .map(|i| {
                if i == 0 || self.rng.random_bool(header_chance) {
                    SlotKind::Header
                } else {
                    SlotKind::Body
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_host_tracks_handle_identity() {
        let mut host = RecordingHost::new();
        let ctx = Rc::new(());
        let mut first = SlotHost::<()>::create(&mut host, SlotKind::Body);
        let second = SlotHost::<()>::create(&mut host, SlotKind::Header);
        assert_ne!(first, second);

        host.bind(&mut first, &ctx, 4, Placement::Back);
        SlotHost::<()>::release(&mut host, &mut first);
        assert_eq!(host.created_count(), 2);
        assert_eq!(host.released_count(), 1);
        assert_eq!(host.bound_indices(), vec![4]);
    }

    #[test]
    fn fixtures_are_reproducible_per_seed() {
        let mut a = Fixtures::seeded(7);
        let mut b = Fixtures::seeded(7);
        assert_eq!(a.deltas(8, 50.0), b.deltas(8, 50.0));
        assert_eq!(a.kind_pattern(16, 0.2), b.kind_pattern(16, 0.2));
    }

    #[test]
    fn kind_pattern_starts_with_header() {
        let mut fixtures = Fixtures::seeded(1);
        let pattern = fixtures.kind_pattern(10, 0.0);
        assert_eq!(pattern[0], SlotKind::Header);
        assert!(pattern[1..].iter().all(|k| *k == SlotKind::Body));
    }
}
