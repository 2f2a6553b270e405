//! Geometry Constants.
//!
//! This module defines the fixed architecture of the hierarchy. It includes:
//! 1. **Line Geometry:** Words per line and the derived byte sizes.
//! 2. **Address Fields:** Shift and mask pairs for every address slice.
//! 3. **Array Sizes:** Entry and set counts for both cache levels.
//!
//! All of these are architectural: a 32-bit address is carved into byte
//! offset (bits 0-1), word offset (bits 2-5), index/set (from bit 6), and
//! tag (the remainder). They are constants rather than configuration.

/// Bytes per 32-bit word.
pub const BYTES_PER_WORD: usize = 4;

/// Words per cache line (the unit of transfer between levels).
pub const WORDS_PER_LINE: usize = 16;

/// Bytes per cache line.
pub const BYTES_PER_LINE: usize = BYTES_PER_WORD * WORDS_PER_LINE;

/// Shift that moves the word offset (bits 2-5) down to bit 0.
pub const WORD_OFFSET_SHIFT: u32 = 2;

/// Mask selecting the word-offset field of an address.
pub const WORD_OFFSET_MASK: u32 = 0xF << WORD_OFFSET_SHIFT;

/// Mask clearing the byte- and word-offset bits, leaving the line base.
pub const LINE_BASE_MASK: u32 = !(BYTES_PER_LINE as u32 - 1);

/// Number of lines in the direct-mapped L1 cache (64 KiB / 64 B).
pub const L1_NUM_LINES: usize = 1 << 10;

/// Shift that moves the L1 index (bits 6-15) down to bit 0.
pub const L1_INDEX_SHIFT: u32 = 6;

/// Mask selecting the L1 index field of an address.
pub const L1_INDEX_MASK: u32 = ((L1_NUM_LINES as u32) - 1) << L1_INDEX_SHIFT;

/// Shift that moves the L1 tag (bits 16-31) down to bit 0.
pub const L1_TAG_SHIFT: u32 = 16;

/// Mask selecting the L1 tag field of an address.
pub const L1_TAG_MASK: u32 = 0xFFFF << L1_TAG_SHIFT;

/// Number of sets in the 4-way set-associative L2 cache (1 MiB / 64 B / 4).
pub const L2_NUM_SETS: usize = 1 << 12;

/// Associativity of the L2 cache.
pub const L2_WAYS: usize = 4;

/// Shift that moves the L2 set index (bits 6-17) down to bit 0.
pub const L2_SET_SHIFT: u32 = 6;

/// Mask selecting the L2 set-index field of an address.
pub const L2_SET_MASK: u32 = ((L2_NUM_SETS as u32) - 1) << L2_SET_SHIFT;

/// Shift that moves the L2 tag (bits 18-31) down to bit 0.
pub const L2_TAG_SHIFT: u32 = 18;

/// Mask selecting the L2 tag field of an address.
pub const L2_TAG_MASK: u32 = 0x3FFF << L2_TAG_SHIFT;
