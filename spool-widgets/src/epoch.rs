//! Cancellation tokens for frame-deferred work.

/// Monotonic generation counter.
///
/// Deferred work captures a token at schedule time; anything that must
/// cancel in-flight work (a reset, a new gesture, teardown) bumps the
/// epoch, and the stale continuation notices on its next tick.
#[derive(Debug, Default)]
pub(crate) struct Epoch(u64);

impl Epoch {
    /// Token identifying the current generation.
    #[inline]
    pub(crate) fn token(&self) -> u64 {
        self.0
    }

    /// Invalidates all outstanding tokens.
    #[inline]
    pub(crate) fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    /// True while `token` belongs to the current generation.
    #[inline]
    pub(crate) fn is_current(&self, token: u64) -> bool {
        self.0 == token
    }
}
