//! Error types shared by the windowing core.

use thiserror::Error;

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpoolError>;

/// Errors surfaced by window planning and slot bookkeeping.
///
/// Most window operations report recoverable conditions (list too small,
/// context absent) through `bool` or `Option` returns rather than errors.
/// The variants here are reserved for data-contract violations and broken
/// internal invariants.
#[derive(Debug, Error)]
pub enum SpoolError {
    /// An item declared neither a header nor a body role.
    ///
    /// Grouped windows cannot place such an item; the producer of the
    /// logical list violated the formatting contract.
    #[error("item at index {index} declares neither a header nor a body role")]
    UnresolvedKind {
        /// Logical index the offending item was inserted at.
        index: usize,
    },

    /// A slot operation referenced a logical index or slot position that no
    /// longer exists. Indicates window and slot bookkeeping drifted apart.
    #[error("slot bookkeeping out of sync: {0}")]
    SlotDesync(String),
}
