//! The authoritative ordered list of item contexts.

use std::fmt;
use std::rc::Rc;

/// Ordered sequence of item contexts, independent of what is visually
/// materialized.
///
/// Contexts are identified by reference, not by value: two contexts that
/// compare equal are still distinct items, and removal matches on pointer
/// identity. Structural mutations shift later indices by one, so window
/// bookkeeping must be re-derived from the index a mutation reports.
pub struct ContextList<C> {
    items: Vec<Rc<C>>,
}

impl<C> ContextList<C> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of contexts.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no contexts are present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Context at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Rc<C>> {
        self.items.get(index)
    }

    /// Inserts `ctx` at `index`, appending when `index` is at or past the
    /// current count.
    pub fn insert(&mut self, index: usize, ctx: Rc<C>) {
        if index >= self.items.len() {
            self.items.push(ctx);
        } else {
            self.items.insert(index, ctx);
        }
    }

    /// Removes the context matching `ctx` by pointer identity.
    ///
    /// Returns the index it occupied, or `None` when absent. Callers use
    /// the returned index to shift their window bounds.
    pub fn remove(&mut self, ctx: &Rc<C>) -> Option<usize> {
        let index = self.index_of(ctx)?;
        self.items.remove(index);
        Some(index)
    }

    /// Index of the context matching `ctx` by pointer identity.
    pub fn index_of(&self, ctx: &Rc<C>) -> Option<usize> {
        self.items.iter().position(|item| Rc::ptr_eq(item, ctx))
    }

    /// Iterates over the contexts in logical order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<C>> {
        self.items.iter()
    }

    /// Drops every context.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<C> Default for ContextList<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ContextList<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextList")
            .field("len", &self.items.len())
            .finish()
    }
}
