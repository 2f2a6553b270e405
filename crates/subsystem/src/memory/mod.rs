//! Main Memory.
//!
//! The backing store of the hierarchy: a flat, byte-addressable memory
//! accessed a cache line at a time. It provides:
//! 1. **Buffer:** Word-granular backing storage, lazily allocated.
//! 2. **Line Access:** Combined read/write of 16-word lines with
//!    read-before-write semantics.
//!
//! Main memory has no tags, no hit/miss notion, and no metadata; every
//! in-range line address is always "present". The word- and byte-offset
//! bits of an incoming address are ignored, so any address within a line
//! names the whole line.

/// Word buffer implementation (mmap or `Vec`) for raw storage.
pub mod buffer;

use tracing::debug;

use self::buffer::WordBuffer;
use crate::common::constants::{BYTES_PER_LINE, BYTES_PER_WORD};
use crate::common::{CacheLine, Control, MemoryError, PhysAddr};

/// Flat main memory with line-granular access.
#[derive(Debug)]
pub struct MainMemory {
    buffer: WordBuffer,
}

impl MainMemory {
    /// Allocates a zeroed main memory of the given size.
    ///
    /// # Arguments
    ///
    /// * `size_in_bytes` - Capacity; must be a non-zero multiple of the
    ///   64-byte cache line.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::ZeroSize`] or [`MemoryError::UnalignedSize`]
    /// when the size constraint is violated.
    pub fn new(size_in_bytes: usize) -> Result<Self, MemoryError> {
        if size_in_bytes == 0 {
            return Err(MemoryError::ZeroSize);
        }
        if size_in_bytes % BYTES_PER_LINE != 0 {
            return Err(MemoryError::UnalignedSize(size_in_bytes));
        }
        debug!(size_in_bytes, "allocating main memory");
        Ok(Self {
            buffer: WordBuffer::new(size_in_bytes / BYTES_PER_WORD),
        })
    }

    /// Returns the capacity of the memory in bytes.
    pub const fn size_in_bytes(&self) -> usize {
        self.buffer.len() * BYTES_PER_WORD
    }

    /// Reads and/or writes the cache line containing the address.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address anywhere within the line; offset bits are ignored.
    /// * `write_data` - Line stored when write is enabled; ignored otherwise.
    /// * `control` - Independent read/write enable flags.
    ///
    /// # Returns
    ///
    /// The line's contents when read is enabled, otherwise `None`. When
    /// both flags are set, the returned line is the contents held *before*
    /// the write; the write still persists.
    ///
    /// # Panics
    ///
    /// Panics if the line lies outside the allocated memory.
    pub fn access(
        &mut self,
        addr: PhysAddr,
        write_data: &CacheLine,
        control: Control,
    ) -> Option<CacheLine> {
        let base = Self::line_word_index(addr);
        let read_data = control.read_enable().then(|| self.buffer.read_line(base));
        if control.write_enable() {
            self.buffer.write_line(base, write_data);
        }
        read_data
    }

    /// Reads the cache line containing the address.
    ///
    /// # Panics
    ///
    /// Panics if the line lies outside the allocated memory.
    pub fn read_line(&self, addr: PhysAddr) -> CacheLine {
        self.buffer.read_line(Self::line_word_index(addr))
    }

    /// Writes the cache line containing the address.
    ///
    /// # Panics
    ///
    /// Panics if the line lies outside the allocated memory.
    pub fn write_line(&mut self, addr: PhysAddr, line: &CacheLine) {
        self.buffer.write_line(Self::line_word_index(addr), line);
    }

    /// Word index of the first word of the line containing the address.
    #[inline(always)]
    const fn line_word_index(addr: PhysAddr) -> usize {
        addr.line_base().val() as usize / BYTES_PER_WORD
    }
}
