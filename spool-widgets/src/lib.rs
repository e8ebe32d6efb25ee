//! # Spool Widgets
//!
//! Host-facing widget controllers built on the planners in `spool-core`.
//! Each widget owns a logical context list, a window planner, a slot pool,
//! and the live slot bookkeeping, and drives a UI toolkit through the
//! [`SlotHost`] trait. The toolkit keeps everything visual: construction,
//! geometry, draw order, visibility.
//!
//! Three controllers ship:
//!
//! - [`Carousel`] — a wrapping scroller keeping a fixed-size window of
//!   slots centered on a main index.
//! - [`GroupPager`] — a grouped scroller paging header lines and body
//!   runs atomically, with planner-owned line layout.
//! - [`BlockPager`] — a headerless scroller stepping a linear range in
//!   fixed-size blocks.
//!
//! All widgets are single-threaded and frame-driven: the embedding feeds
//! gesture deltas as they arrive and calls `tick` once per frame to run
//! deferred loads and settle animations. Deferred work is cancelled by
//! generation stamps, so a reset or a new gesture never races a stale
//! continuation.
//!
//! The [`testing`] module provides a recording host and seeded fixtures
//! for embeddings that want to assert widget behavior without a real
//! toolkit.

pub mod block_pager;
pub mod carousel;
mod epoch;
pub mod group_pager;
pub mod host;
mod slots;
pub mod testing;

pub use block_pager::BlockPager;
pub use carousel::Carousel;
pub use group_pager::{GroupPager, ItemRole};
pub use host::SlotHost;
