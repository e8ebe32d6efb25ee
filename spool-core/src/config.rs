//! Configuration for the three windowing policies.
//!
//! Each config derives its defaults from [`crate::constants`] and offers a
//! `normalized` pass that clamps out-of-range values instead of failing.
//! Clamps are logged at warn level so misconfiguration stays visible.

use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{block, carousel, group};
use crate::types::Extent;

/// Tuning for the circular carousel window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Number of live slots. Odd values center cleanly; the minimum of
    /// [`carousel::MIN_WINDOW`] is enforced by [`Self::normalized`].
    pub window_size: usize,
    /// Offset magnitude that triggers an advance.
    pub load_threshold: f32,
    /// Offset compensation applied after a successful advance.
    pub compensation: f32,
    /// Exponential decay rate of the post-gesture settle.
    pub settle_rate: f32,
    /// Whether the centered slot (and its approached neighbor) scale up.
    pub highlight_center: bool,
    /// Scale of a fully centered slot when highlighting is enabled.
    pub highlight_scale: f32,
    /// Scroll speed of programmatic glides, in units per second.
    pub glide_rate: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            window_size: carousel::WINDOW,
            load_threshold: carousel::LOAD_THRESHOLD,
            compensation: carousel::COMPENSATION,
            settle_rate: carousel::SETTLE_RATE,
            highlight_center: false,
            highlight_scale: carousel::HIGHLIGHT_SCALE,
            glide_rate: carousel::GLIDE_RATE,
        }
    }
}

impl CarouselConfig {
    /// Returns a copy with out-of-range values clamped.
    pub fn normalized(&self) -> Self {
        let mut cfg = self.clone();
        if cfg.window_size < carousel::MIN_WINDOW {
            warn!(
                "carousel window_size {} below minimum, clamping to {}",
                cfg.window_size,
                carousel::MIN_WINDOW
            );
            cfg.window_size = carousel::MIN_WINDOW;
        }
        if cfg.load_threshold <= 0.0 {
            warn!(
                "carousel load_threshold {} not positive, using default {}",
                cfg.load_threshold,
                carousel::LOAD_THRESHOLD
            );
            cfg.load_threshold = carousel::LOAD_THRESHOLD;
        }
        if cfg.settle_rate <= 0.0 {
            warn!(
                "carousel settle_rate {} not positive, using default {}",
                cfg.settle_rate,
                carousel::SETTLE_RATE
            );
            cfg.settle_rate = carousel::SETTLE_RATE;
        }
        cfg
    }
}

/// Tuning for the grouped (header plus body runs) paging window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GroupPagingConfig {
    /// Maximum body slots per layout line.
    pub run_length: usize,
    /// Groups loaded per paging step.
    pub load_rate: usize,
    /// Margin past the viewport edge at which the next group loads.
    pub load_offset: f32,
    /// Exponential decay rate of the out-of-bounds settle.
    pub settle_rate: f32,
    /// Lay body cells out right-to-left within a line.
    pub reverse_grid: bool,
    /// Gap between consecutive layout lines along the main axis.
    pub line_spacing: f32,
    /// Gap between body cells along the cross axis.
    pub cell_spacing: f32,
    /// Size of a header slot.
    pub header_extent: Extent,
    /// Size of a body cell.
    pub body_extent: Extent,
    /// Cross-axis inset of header slots.
    pub header_inset: f32,
    /// Cross-axis inset of the first body cell on a line.
    pub cell_inset: f32,
}

impl Default for GroupPagingConfig {
    fn default() -> Self {
        Self {
            run_length: group::RUN_LENGTH,
            load_rate: group::LOAD_RATE,
            load_offset: group::LOAD_OFFSET,
            settle_rate: group::SETTLE_RATE,
            reverse_grid: false,
            line_spacing: group::LINE_SPACING,
            cell_spacing: group::CELL_SPACING,
            header_extent: Extent {
                main: group::HEADER_EXTENT.0,
                cross: group::HEADER_EXTENT.1,
            },
            body_extent: Extent {
                main: group::BODY_EXTENT.0,
                cross: group::BODY_EXTENT.1,
            },
            header_inset: group::HEADER_INSET,
            cell_inset: group::CELL_INSET,
        }
    }
}

impl GroupPagingConfig {
    /// Returns a copy with out-of-range values clamped.
    pub fn normalized(&self) -> Self {
        let mut cfg = self.clone();
        if cfg.run_length == 0 {
            warn!("group run_length 0, clamping to 1");
            cfg.run_length = 1;
        }
        if cfg.load_rate == 0 {
            warn!("group load_rate 0, clamping to 1");
            cfg.load_rate = 1;
        }
        if cfg.settle_rate <= 0.0 {
            warn!(
                "group settle_rate {} not positive, using default {}",
                cfg.settle_rate,
                group::SETTLE_RATE
            );
            cfg.settle_rate = group::SETTLE_RATE;
        }
        cfg
    }
}

/// Tuning for the block paging window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BlockPagingConfig {
    /// Target number of live slots between steps.
    pub show_count: usize,
    /// Slots loaded (and unloaded) per paging step.
    pub block_size: usize,
    /// Offset above which a forward step fires.
    pub forward_threshold: f32,
    /// Offset below which a backward step fires.
    pub backward_threshold: f32,
    /// Offset rebase after a forward step.
    pub forward_rebase: f32,
    /// Offset rebase after a backward step.
    pub backward_rebase: f32,
}

impl Default for BlockPagingConfig {
    fn default() -> Self {
        Self {
            show_count: block::SHOW_COUNT,
            block_size: block::BLOCK,
            forward_threshold: block::FORWARD_THRESHOLD,
            backward_threshold: block::BACKWARD_THRESHOLD,
            forward_rebase: block::FORWARD_REBASE,
            backward_rebase: block::BACKWARD_REBASE,
        }
    }
}

impl BlockPagingConfig {
    /// Returns a copy with out-of-range values clamped.
    pub fn normalized(&self) -> Self {
        let mut cfg = self.clone();
        if cfg.show_count == 0 {
            warn!("block show_count 0, clamping to 1");
            cfg.show_count = 1;
        }
        if cfg.block_size == 0 {
            warn!("block block_size 0, clamping to 1");
            cfg.block_size = 1;
        }
        if cfg.block_size > cfg.show_count {
            warn!(
                "block block_size {} exceeds show_count {}, clamping",
                cfg.block_size, cfg.show_count
            );
            cfg.block_size = cfg.show_count;
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carousel_window_clamped_to_minimum() {
        let cfg = CarouselConfig {
            window_size: 3,
            ..CarouselConfig::default()
        }
        .normalized();
        assert_eq!(cfg.window_size, carousel::MIN_WINDOW);
    }

    #[test]
    fn group_rates_clamped_to_one() {
        let cfg = GroupPagingConfig {
            run_length: 0,
            load_rate: 0,
            ..GroupPagingConfig::default()
        }
        .normalized();
        assert_eq!(cfg.run_length, 1);
        assert_eq!(cfg.load_rate, 1);
    }

    #[test]
    fn block_size_capped_by_show_count() {
        let cfg = BlockPagingConfig {
            show_count: 4,
            block_size: 9,
            ..BlockPagingConfig::default()
        }
        .normalized();
        assert_eq!(cfg.block_size, 4);
    }

    #[test]
    fn defaults_pass_normalization_unchanged() {
        assert_eq!(CarouselConfig::default().normalized(), CarouselConfig::default());
        assert_eq!(
            GroupPagingConfig::default().normalized(),
            GroupPagingConfig::default()
        );
        assert_eq!(
            BlockPagingConfig::default().normalized(),
            BlockPagingConfig::default()
        );
    }
}
