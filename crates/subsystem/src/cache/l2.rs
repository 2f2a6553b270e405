//! Set-Associative L2 Cache Engine.
//!
//! A 1 MiB write-back cache organized as 4096 sets of 4 ways. The 12-bit
//! set index (bits 6-17) selects a set; the 14-bit tag (bits 18-31)
//! disambiguates the lines mapping to it. A line's way position within its
//! set carries no meaning beyond replacement tie-breaking.
//!
//! Unlike L1, access is line granular: a hit moves all 16 words at once.
//! Each hit also sets the entry's reference bit, the recency hint consumed
//! by the NRU replacement policy in [`policy`]. The bits are cleared en
//! masse by [`sweep_reference_bits`], which the host drives from a
//! periodic clock interrupt.
//!
//! [`policy`]: super::policy
//! [`sweep_reference_bits`]: L2Cache::sweep_reference_bits

use tracing::trace;

use super::Writeback;
use super::policy::{self, WayState};
use crate::common::constants::{L2_NUM_SETS, L2_WAYS};
use crate::common::{CacheLine, Control, PhysAddr};

/// A single L2 entry: metadata bits, tag, and the cached line.
///
/// While `valid` is false the other fields are meaningless and are never
/// consulted. Within a set, no two valid entries share a tag.
#[derive(Clone, Copy, Debug, Default)]
struct L2Entry {
    valid: bool,
    referenced: bool,
    dirty: bool,
    tag: u16,
    line: CacheLine,
}

/// 4-way set-associative, write-back L2 cache with NRU replacement.
#[derive(Clone, Debug)]
pub struct L2Cache {
    sets: Vec<[L2Entry; L2_WAYS]>,
}

impl Default for L2Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl L2Cache {
    /// Creates an L2 cache with every entry in every set invalid.
    pub fn new() -> Self {
        Self {
            sets: vec![[L2Entry::default(); L2_WAYS]; L2_NUM_SETS],
        }
    }

    /// Reads and/or writes a full cache line.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address anywhere within the line.
    /// * `write_data` - Line stored on a write hit; ignored otherwise.
    /// * `control` - Independent read/write enable flags.
    ///
    /// # Returns
    ///
    /// `(read_data, hit)`. `read_data` is `Some` only on a read-enabled
    /// hit. When both flags are set, the returned line is the contents
    /// held *before* the write. A hit sets the entry's reference bit; a
    /// miss returns `(None, false)` and mutates nothing.
    pub fn access(
        &mut self,
        addr: PhysAddr,
        write_data: &CacheLine,
        control: Control,
    ) -> (Option<CacheLine>, bool) {
        let tag = addr.l2_tag();
        let set = &mut self.sets[addr.l2_set()];

        let Some(entry) = set.iter_mut().find(|e| e.valid && e.tag == tag) else {
            return (None, false);
        };

        entry.referenced = true;
        let read_data = control.read_enable().then(|| entry.line);
        if control.write_enable() {
            entry.line = *write_data;
            entry.dirty = true;
        }
        (read_data, true)
    }

    /// Installs a line into the set the address maps to, evicting the NRU
    /// victim.
    ///
    /// An empty way is filled without eviction. Otherwise the victim is
    /// chosen by [`policy::select_victim`]; if it is dirty, its contents
    /// are returned for write-back, addressed by its stored tag and set
    /// index with the offset bits zeroed. The new line is installed valid
    /// and clean with its reference bit clear.
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
        let set_index = addr.l2_set();
        let set = &mut self.sets[set_index];

        let states: [WayState; L2_WAYS] = std::array::from_fn(|way| WayState {
            valid: set[way].valid,
            referenced: set[way].referenced,
            dirty: set[way].dirty,
        });
        let victim = policy::select_victim(&states);
        let entry = &mut set[victim];

        let evicted = (entry.valid && entry.dirty).then(|| Writeback {
            address: PhysAddr::from_l2_parts(entry.tag, set_index),
            line: entry.line,
        });
        if let Some(wb) = &evicted {
            trace!(
                address = wb.address.val(),
                set = set_index,
                way = victim,
                "l2 evicting dirty line"
            );
        }

        *entry = L2Entry {
            valid: true,
            referenced: false,
            dirty: false,
            tag: addr.l2_tag(),
            line: *line,
        };
        evicted
    }

    /// Clears the reference bit of every entry in every set.
    ///
    /// Applies to valid and invalid entries alike and touches nothing
    /// else. Idempotent; the host calls this from its periodic clock
    /// interrupt to re-arm the NRU heuristic.
    pub fn sweep_reference_bits(&mut self) {
        trace!("l2 reference-bit sweep");
        for set in &mut self.sets {
            for entry in set {
                entry.referenced = false;
            }
        }
    }
}
