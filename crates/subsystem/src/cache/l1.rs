//! Direct-Mapped L1 Cache Engine.
//!
//! A 64 KiB write-back cache of 1024 lines. Each address maps to exactly
//! one entry, selected by the 10-bit index field (bits 6-15); the 16-bit
//! tag (bits 16-31) disambiguates the 64 KiB-apart addresses sharing an
//! index. Access is word granular, unlike L2 and main memory which move
//! whole lines.
//!
//! The engine never fetches on its own. A miss mutates nothing and obliges
//! the caller to fetch the line from the next level and [`insert`] it
//! before retrying.
//!
//! [`insert`]: L1Cache::insert

use tracing::trace;

use super::Writeback;
use crate::common::constants::L1_NUM_LINES;
use crate::common::{CacheLine, Control, PhysAddr};

/// A single L1 entry: metadata bits, tag, and the cached line.
///
/// While `valid` is false the other fields are meaningless and are never
/// consulted.
#[derive(Clone, Copy, Debug, Default)]
struct L1Entry {
    valid: bool,
    dirty: bool,
    tag: u16,
    line: CacheLine,
}

/// Direct-mapped, write-back L1 cache.
#[derive(Clone, Debug)]
pub struct L1Cache {
    entries: Vec<L1Entry>,
}

impl Default for L1Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl L1Cache {
    /// Creates an L1 cache with every entry invalid.
    pub fn new() -> Self {
        Self {
            entries: vec![L1Entry::default(); L1_NUM_LINES],
        }
    }

    /// Reads and/or writes a single word.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address of the word; may point anywhere within a line.
    /// * `write_data` - Word stored on a write hit; ignored otherwise.
    /// * `control` - Independent read/write enable flags.
    ///
    /// # Returns
    ///
    /// `(read_data, hit)`. `read_data` is `Some` only on a read-enabled
    /// hit. When both flags are set, the returned word is the value held
    /// *before* the write. A miss returns `(None, false)` and mutates
    /// nothing.
    pub fn access(
        &mut self,
        addr: PhysAddr,
        write_data: u32,
        control: Control,
    ) -> (Option<u32>, bool) {
        let entry = &mut self.entries[addr.l1_index()];

        if !entry.valid || entry.tag != addr.l1_tag() {
            return (None, false);
        }

        let offset = addr.word_offset();
        let read_data = control.read_enable().then(|| entry.line[offset]);
        if control.write_enable() {
            entry.line[offset] = write_data;
            entry.dirty = true;
        }
        (read_data, true)
    }

    /// Installs a fetched line into the entry the address maps to.
    ///
    /// If the displaced occupant is valid and dirty, its contents are
    /// returned for write-back, addressed by its stored tag and index with
    /// the offset bits zeroed. The new line is installed valid and clean.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address anywhere within the incoming line.
    /// * `line` - The 16 words to install.
    ///
    /// # Returns
    ///
    /// The displaced dirty line, or `None` when no write-back is owed.
    pub fn insert(&mut self, addr: PhysAddr, line: &CacheLine) -> Option<Writeback> {
        let index = addr.l1_index();
        let entry = &mut self.entries[index];

        let evicted = (entry.valid && entry.dirty).then(|| Writeback {
            address: PhysAddr::from_l1_parts(entry.tag, index),
            line: entry.line,
        });
        if let Some(wb) = &evicted {
            trace!(address = wb.address.val(), index, "l1 evicting dirty line");
        }

        *entry = L1Entry {
            valid: true,
            dirty: false,
            tag: addr.l1_tag(),
            line: *line,
        };
        evicted
    }
}
