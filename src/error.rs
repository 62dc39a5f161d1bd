use thiserror::Error;

/// Errors reported by [`VebTree`](crate::VebTree) construction and mutation.
///
/// Queries never fail; absence is reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VebError {
    /// The universe size is below 2 or not a power of two.
    #[error("universe size {universe} must be a power of two and at least 2")]
    InvalidUniverse { universe: i64 },

    /// A key passed to `insert` or `remove` lies outside `[0, universe)`.
    #[error("key {key} is outside the universe [0, {universe})")]
    OutOfRange { key: i64, universe: i64 },

    /// Node storage could not be reserved. `requested` saturates at
    /// `u64::MAX` when the node count itself overflows.
    #[error("could not allocate {requested} tree nodes")]
    AllocationFailure { requested: u64 },
}

pub type Result<T, E = VebError> = std::result::Result<T, E>;
