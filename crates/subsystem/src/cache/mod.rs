//! Cache Engines.
//!
//! This module implements the two cache levels of the hierarchy:
//! 1. **L1:** 64 KiB direct-mapped, write-back, word-granular access.
//! 2. **L2:** 1 MiB 4-way set-associative, write-back, line-granular
//!    access, NRU replacement with a periodic reference-bit sweep.
//!
//! Both engines share the same lifecycle: entries are born invalid, become
//! valid through line insertion, become dirty when written through at that
//! level, and become clean again only when a later insertion displaces
//! them, after any dirty contents have been handed back for write-back.
//! Entries are never individually invalidated.

/// Direct-mapped L1 cache engine.
pub mod l1;

/// Set-associative L2 cache engine.
pub mod l2;

/// NRU victim selection for the L2 cache.
pub mod policy;

pub use l1::L1Cache;
pub use l2::L2Cache;

use crate::common::{CacheLine, PhysAddr};

/// A dirty line displaced by an insertion, owed to the next level down.
///
/// The address is reconstructed from the entry's stored tag and its
/// position in the cache; its offset bits are always zero, because
/// write-back moves whole lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Writeback {
    /// Line-aligned address the evicted data belongs to.
    pub address: PhysAddr,
    /// The full 16-word contents of the evicted line.
    pub line: CacheLine,
}
