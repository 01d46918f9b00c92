//! Construction errors.

use thiserror::Error;

/// The only error a `ProbeTable` reports. Raised by constructors when an
/// argument or configuration value is out of range; every other operation
/// is total.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidArgument {
    #[error("capacity cannot be negative (got {0})")]
    NegativeCapacity(i64),
    /// Only reachable where `usize` is narrower than `i64` (32-bit targets).
    #[error("capacity {0} does not fit in usize")]
    CapacityOverflow(i64),
    #[error("load factor must be in (0, 1] (got {0})")]
    LoadFactor(f32),
    #[error("minimum capacity must be at least 1")]
    MinCapacity,
    #[error("probe gap must be odd and non-zero (got {0})")]
    ProbeGap(usize),
}
