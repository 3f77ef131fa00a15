//! Errors reported by explicit resize requests.

use thiserror::Error;

/// Why a `try_resize_table` request was turned down.
///
/// `resize_table` swallows these; `try_resize_table` hands them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResizeError {
    /// The requested bucket count is below what the engine accepts.
    #[error("requested capacity {requested} is below the minimum of {minimum}")]
    CapacityTooSmall {
        /// Capacity passed by the caller.
        requested: usize,
        /// Smallest capacity the engine accepts.
        minimum: usize,
    },
    /// The requested bucket count cannot hold the live entries.
    #[error("requested capacity {requested} cannot hold {size} live entries")]
    BelowSize {
        /// Capacity passed by the caller.
        requested: usize,
        /// Live entries at the time of the request.
        size: usize,
    },
}
