//! Hierarchy Orchestrator.
//!
//! [`MemorySubsystem`] owns the two cache engines and main memory and
//! glues them into a single word-granular memory. On an L1 miss it fetches
//! the containing line from L2, or from main memory when L2 also misses,
//! installs it in L1, and retries. Every displaced dirty line is pushed
//! one level down, so a single client access produces at most three
//! write-backs: the L1 victim into L2, the L2 victim displaced by that
//! victim into main memory, and the L2 victim displaced by the freshly
//! fetched line into main memory.
//!
//! The orchestrator is deterministic given the cache state and the request
//! stream. It is single threaded and synchronous; every operation runs to
//! completion before the next begins.

use tracing::info;

use crate::cache::{L1Cache, L2Cache};
use crate::common::{CacheLine, Control, MemoryError, PhysAddr};
use crate::config::Config;
use crate::memory::MainMemory;
use crate::stats::MemStats;

/// The two-level cache hierarchy in front of main memory.
#[derive(Debug)]
pub struct MemorySubsystem {
    l1: L1Cache,
    l2: L2Cache,
    memory: MainMemory,
    stats: MemStats,
}

impl MemorySubsystem {
    /// Builds a subsystem from a configuration.
    ///
    /// Both caches start with every entry invalid and main memory starts
    /// zeroed.
    ///
    /// # Errors
    ///
    /// Returns a [`MemoryError`] when the configured memory size is zero
    /// or not a multiple of the 64-byte cache line.
    pub fn new(config: &Config) -> Result<Self, MemoryError> {
        Self::with_memory_size(config.memory.size_bytes)
    }

    /// Builds a subsystem with the given main-memory size in bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`MemoryError`] when the size is zero or not a multiple
    /// of the 64-byte cache line.
    pub fn with_memory_size(size_in_bytes: usize) -> Result<Self, MemoryError> {
        let memory = MainMemory::new(size_in_bytes)?;
        info!(size_in_bytes, "memory subsystem initialized");
        Ok(Self {
            l1: L1Cache::new(),
            l2: L2Cache::new(),
            memory,
            stats: MemStats::default(),
        })
    }

    /// Reads and/or writes one word of memory through the hierarchy.
    ///
    /// On an L1 hit the access completes immediately. Otherwise the
    /// containing line is fetched from L2 or main memory, installed in L1
    /// (with write-backs propagated downward), and the access is retried
    /// against L1, which then hits by construction.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address of the word; the byte-offset bits are ignored.
    /// * `write_data` - Word stored when write is enabled; ignored otherwise.
    /// * `control` - Independent read/write enable flags.
    ///
    /// # Returns
    ///
    /// The addressed word when read is enabled, otherwise `None`. When
    /// both flags are set, the returned word is the value held *before*
    /// the write.
    ///
    /// # Panics
    ///
    /// Panics if the address lies outside the allocated main memory and
    /// the line has to be fetched from or written back to it.
    pub fn access(&mut self, addr: PhysAddr, write_data: u32, control: Control) -> Option<u32> {
        let (read_data, hit) = self.l1.access(addr, write_data, control);
        if hit {
            self.stats.l1_hits += 1;
            return read_data;
        }
        self.stats.l1_misses += 1;

        let line_addr = addr.line_base();

        // Fetch the missing line: L2 first, then main memory.
        let (l2_data, l2_hit) = self.l2.access(line_addr, &CacheLine::ZERO, Control::READ);
        let fetched = if let Some(line) = l2_data {
            self.stats.l2_hits += 1;
            line
        } else {
            self.stats.l2_misses += 1;
            self.stats.line_fills += 1;
            self.memory.read_line(line_addr)
        };

        // Install in L1; a displaced dirty line moves down into L2.
        if let Some(evicted) = self.l1.insert(line_addr, &fetched) {
            let (_, resident) = self.l2.access(evicted.address, &evicted.line, Control::WRITE);
            if !resident {
                if let Some(displaced) = self.l2.insert(evicted.address, &evicted.line) {
                    self.stats.writebacks += 1;
                    self.memory.write_line(displaced.address, &displaced.line);
                }
            }
        }

        // On an L2 miss the fetched line is installed in L2 as well.
        if !l2_hit {
            if let Some(displaced) = self.l2.insert(line_addr, &fetched) {
                self.stats.writebacks += 1;
                self.memory.write_line(displaced.address, &displaced.line);
            }
        }

        // The line is resident now, so the retry hits.
        let (read_data, hit) = self.l1.access(addr, write_data, control);
        debug_assert!(hit, "L1 access must hit after line fill");
        read_data
    }

    /// Handles the periodic clock interrupt.
    ///
    /// Clears every L2 reference bit, re-arming the NRU replacement
    /// heuristic. L1 is direct mapped and keeps no reference bits, so no
    /// symmetric sweep exists.
    pub fn handle_clock_interrupt(&mut self) {
        self.l2.sweep_reference_bits();
    }

    /// Returns the traffic counters accumulated since the last reset.
    pub const fn stats(&self) -> &MemStats {
        &self.stats
    }

    /// Clears all traffic counters.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Returns the backing main memory.
    ///
    /// Useful for hosts that inspect what has been written back; lines
    /// still dirty in a cache are not visible here.
    pub const fn memory(&self) -> &MainMemory {
        &self.memory
    }
}
