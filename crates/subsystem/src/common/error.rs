//! Initialization error definitions.
//!
//! The cache engines themselves have no failure modes: every 32-bit address
//! and every control value is meaningful, and all engine operations are
//! total. The only recoverable errors in the subsystem are configuration
//! errors caught when main memory is sized, defined here.

use thiserror::Error;

/// Errors raised while initializing the memory subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The requested main-memory size was zero.
    #[error("main memory size must be non-zero")]
    ZeroSize,

    /// The requested main-memory size is not a whole number of cache lines.
    ///
    /// Main memory is accessed a line at a time, so its size must be a
    /// multiple of the 64-byte line.
    #[error("main memory size {0} is not a multiple of the 64-byte cache line")]
    UnalignedSize(usize),
}
