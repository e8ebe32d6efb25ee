//! The toolkit-facing seam.

use std::rc::Rc;

use spool_core::types::{Placement, SlotKind, SlotPosition};

/// Bridge between the windowing widgets and a concrete UI toolkit.
///
/// Widgets own *which* items are live; the host owns everything visual:
/// constructing widgets, parenting and sibling order, geometry, and
/// visibility. The widgets drive it through this trait and never hold
/// the host between calls, so a `&mut` borrow per call is all it costs.
///
/// Handle lifecycle: [`SlotHost::create`] constructs a fresh handle only
/// when the pool has nothing to reuse. [`SlotHost::bind`] attaches an
/// item context and activates the visual; `index` is the logical index
/// for the host's binding path and `placement` tells the host where the
/// visual belongs in its sibling order. [`SlotHost::release`] deactivates
/// the visual and clears the bound context; the handle then parks in the
/// pool until the next bind.
pub trait SlotHost<C> {
    /// Host-side visual handle.
    type Handle;

    /// Constructs a new, inactive visual of `kind`.
    fn create(&mut self, kind: SlotKind) -> Self::Handle;

    /// Binds an item context and activates the visual.
    fn bind(&mut self, handle: &mut Self::Handle, ctx: &Rc<C>, index: usize, placement: Placement);

    /// Positions the visual. Only called for widgets whose planner owns
    /// layout; otherwise positioning stays with the host.
    fn place(&mut self, handle: &mut Self::Handle, position: SlotPosition);

    /// Applies a uniform scale, used by center-highlight emphasis.
    fn set_scale(&mut self, handle: &mut Self::Handle, scale: f32);

    /// Deactivates the visual and clears its bound context.
    fn release(&mut self, handle: &mut Self::Handle);
}
