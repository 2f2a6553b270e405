//! Physical Address type and field decomposition.
//!
//! This module defines a strong type for 32-bit physical addresses and the
//! total, failure-free decomposition into the fields each cache level
//! consumes. It provides the following:
//! 1. **Type Safety:** Addresses cannot be confused with word values at call sites.
//! 2. **Field Extraction:** Word offset, L1 index/tag, and L2 set/tag accessors.
//! 3. **Reconstruction:** Building line-aligned write-back addresses from a
//!    stored tag and an index, the inverse of extraction.
//!
//! The L1 and L2 fields are independent slices of the same address: L1 uses
//! a 10-bit index (bits 6-15) and a 16-bit tag, L2 a 12-bit set index
//! (bits 6-17) and a 14-bit tag. Byte-offset bits 0-1 are ignored
//! everywhere; all access is word aligned.

use super::constants::{
    L1_INDEX_MASK, L1_INDEX_SHIFT, L1_TAG_SHIFT, L2_SET_MASK, L2_SET_SHIFT, L2_TAG_SHIFT,
    LINE_BASE_MASK, WORD_OFFSET_MASK, WORD_OFFSET_SHIFT,
};

/// A 32-bit physical address within the simulated memory space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u32);

impl PhysAddr {
    /// Creates a new physical address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Extracts the word offset within the cache line (bits 2-5).
    ///
    /// # Returns
    ///
    /// The offset (0-15) of the addressed word within its 16-word line.
    #[inline(always)]
    pub const fn word_offset(self) -> usize {
        ((self.0 & WORD_OFFSET_MASK) >> WORD_OFFSET_SHIFT) as usize
    }

    /// Returns the address of the first byte of the containing cache line.
    ///
    /// Clears the byte- and word-offset bits (bits 0-5).
    #[inline(always)]
    pub const fn line_base(self) -> Self {
        Self(self.0 & LINE_BASE_MASK)
    }

    /// Extracts the L1 cache index (bits 6-15).
    ///
    /// # Returns
    ///
    /// The index (0-1023) of the single L1 entry this address maps to.
    #[inline(always)]
    pub const fn l1_index(self) -> usize {
        ((self.0 & L1_INDEX_MASK) >> L1_INDEX_SHIFT) as usize
    }

    /// Extracts the L1 tag (bits 16-31).
    #[inline(always)]
    pub const fn l1_tag(self) -> u16 {
        (self.0 >> L1_TAG_SHIFT) as u16
    }

    /// Extracts the L2 set index (bits 6-17).
    ///
    /// # Returns
    ///
    /// The index (0-4095) of the four-way L2 set this address maps to.
    #[inline(always)]
    pub const fn l2_set(self) -> usize {
        ((self.0 & L2_SET_MASK) >> L2_SET_SHIFT) as usize
    }

    /// Extracts the L2 tag (bits 18-31).
    ///
    /// The value occupies the low 14 bits of the returned integer.
    #[inline(always)]
    pub const fn l2_tag(self) -> u16 {
        (self.0 >> L2_TAG_SHIFT) as u16
    }

    /// Reconstructs the line-aligned address of an L1 entry from its stored
    /// tag and its position in the cache.
    ///
    /// This is the write-back address of an evicted entry. The offset bits
    /// are zero: write-back moves whole lines, never partial updates.
    #[inline(always)]
    pub const fn from_l1_parts(tag: u16, index: usize) -> Self {
        Self(((tag as u32) << L1_TAG_SHIFT) | ((index as u32) << L1_INDEX_SHIFT))
    }

    /// Reconstructs the line-aligned address of an L2 entry from its stored
    /// tag and the index of its set.
    #[inline(always)]
    pub const fn from_l2_parts(tag: u16, set: usize) -> Self {
        Self(((tag as u32) << L2_TAG_SHIFT) | ((set as u32) << L2_SET_SHIFT))
    }
}
