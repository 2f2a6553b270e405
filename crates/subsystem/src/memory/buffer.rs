//! Word Buffer Implementation.
//!
//! This module provides a safe wrapper around the raw allocation backing
//! main memory. On Unix systems it uses anonymous `mmap`, so pages of a
//! large simulated memory are only materialized by the host OS when first
//! touched; other platforms fall back to a `Vec` allocation. Either way
//! the storage starts zeroed.
//!
//! The buffer is word granular: main memory never deals in bytes, only in
//! 32-bit words and 16-word lines.

use std::fmt;

use crate::common::CacheLine;
use crate::common::constants::{BYTES_PER_WORD, WORDS_PER_LINE};

/// A zero-initialized buffer of 32-bit words.
pub struct WordBuffer {
    ptr: *mut u32,
    words: usize,
    is_mmap: bool,
}

// SAFETY: WordBuffer owns its allocation exclusively; the raw pointer is
// never aliased outside &self/&mut self method scopes.
unsafe impl Send for WordBuffer {}
// SAFETY: shared references only permit reads of plain-old-data words.
unsafe impl Sync for WordBuffer {}

impl WordBuffer {
    /// Allocates a buffer of the given number of words, all zero.
    ///
    /// On Unix, uses `mmap` for lazy allocation; on other platforms,
    /// allocates a `Vec`.
    ///
    /// # Panics
    ///
    /// Panics if `mmap` fails on Unix.
    pub fn new(words: usize) -> Self {
        #[cfg(unix)]
        {
            use std::ptr;
            let size = words * BYTES_PER_WORD;
            // SAFETY: anonymous private mapping with no file descriptor;
            // the arguments are self-consistent and the result is checked.
            let ptr = unsafe {
                libc::mmap(
                    ptr::null_mut(),
                    size,
                    libc::PROT_READ | libc::PROT_WRITE,
                    libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                    -1,
                    0,
                )
            };

            assert!(
                ptr != libc::MAP_FAILED,
                "failed to mmap word buffer of {size} bytes"
            );

            Self {
                ptr: ptr as *mut u32,
                words,
                is_mmap: true,
            }
        }

        #[cfg(not(unix))]
        {
            let mut vec = vec![0u32; words];
            let ptr = vec.as_mut_ptr();
            std::mem::forget(vec);
            Self {
                ptr,
                words,
                is_mmap: false,
            }
        }
    }

    /// Returns the capacity of the buffer in words.
    pub const fn len(&self) -> usize {
        self.words
    }

    /// Whether the buffer holds no words.
    pub const fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Reads the word at the given word index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn read_word(&self, index: usize) -> u32 {
        assert!(index < self.words, "main memory read out of bounds");
        // SAFETY: index is bounds-checked above and the allocation is
        // word-aligned (page-aligned mmap or Vec<u32>).
        unsafe { *self.ptr.add(index) }
    }

    /// Writes the word at the given word index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn write_word(&mut self, index: usize, val: u32) {
        assert!(index < self.words, "main memory write out of bounds");
        // SAFETY: index is bounds-checked above; &mut self guarantees
        // exclusive access.
        unsafe {
            *self.ptr.add(index) = val;
        }
    }

    /// Copies the 16 words starting at the given word index into a line.
    ///
    /// # Panics
    ///
    /// Panics if the line would extend past the end of the buffer.
    pub fn read_line(&self, index: usize) -> CacheLine {
        assert!(
            index + WORDS_PER_LINE <= self.words,
            "main memory line read out of bounds"
        );
        let mut line = CacheLine::ZERO;
        // SAFETY: the range [index, index + WORDS_PER_LINE) is
        // bounds-checked above and the destination array is exactly
        // WORDS_PER_LINE words long.
        unsafe {
            std::ptr::copy_nonoverlapping(self.ptr.add(index), line.0.as_mut_ptr(), WORDS_PER_LINE);
        }
        line
    }

    /// Copies a line into the 16 words starting at the given word index.
    ///
    /// # Panics
    ///
    /// Panics if the line would extend past the end of the buffer.
    pub fn write_line(&mut self, index: usize, line: &CacheLine) {
        assert!(
            index + WORDS_PER_LINE <= self.words,
            "main memory line write out of bounds"
        );
        // SAFETY: the range is bounds-checked above, the source array is
        // exactly WORDS_PER_LINE words long, and &mut self guarantees
        // exclusive access.
        unsafe {
            std::ptr::copy_nonoverlapping(line.0.as_ptr(), self.ptr.add(index), WORDS_PER_LINE);
        }
    }
}

impl Drop for WordBuffer {
    /// Releases the allocation.
    ///
    /// Unmaps `mmap`-backed storage; otherwise reconstructs the `Vec` to
    /// trigger its destructor.
    fn drop(&mut self) {
        if self.is_mmap {
            #[cfg(unix)]
            // SAFETY: ptr/size are exactly what mmap returned in new().
            unsafe {
                let _ = libc::munmap(self.ptr as *mut _, self.words * BYTES_PER_WORD);
            }
        } else {
            #[cfg(not(unix))]
            // SAFETY: ptr/len/capacity are exactly what the forgotten Vec
            // held in new().
            unsafe {
                let _ = Vec::from_raw_parts(self.ptr, self.words, self.words);
            }
        }
    }
}

impl fmt::Debug for WordBuffer {
    /// Formats the buffer by capacity, not contents.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordBuffer")
            .field("words", &self.words)
            .field("is_mmap", &self.is_mmap)
            .finish()
    }
}
