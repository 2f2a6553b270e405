//! Hierarchy statistics collection and reporting.
//!
//! Tracks the traffic the orchestrator generates: hit/miss counts per
//! cache level, line fills from main memory, and lines written back to it.
//! The miss counters are the normative observability surface; hosts and
//! test harnesses may reset everything between measurement windows.

/// Counters describing hierarchy traffic since the last reset.
///
/// Misses are demand misses: lookups performed on behalf of a client
/// access. Probes made while installing an evicted line do not count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemStats {
    /// L1 lookups that hit on the first attempt.
    pub l1_hits: u64,
    /// L1 lookups that missed and triggered a line fill.
    pub l1_misses: u64,
    /// L2 demand lookups that hit.
    pub l2_hits: u64,
    /// L2 demand lookups that missed and fell through to main memory.
    pub l2_misses: u64,
    /// Lines fetched from main memory.
    pub line_fills: u64,
    /// Lines written back to main memory.
    pub writebacks: u64,
}

impl MemStats {
    /// Clears every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// L1 miss rate over all L1 lookups, or 0.0 before any access.
    pub fn l1_miss_rate(&self) -> f64 {
        Self::rate(self.l1_misses, self.l1_hits)
    }

    /// L2 miss rate over all L2 demand lookups, or 0.0 before any miss.
    pub fn l2_miss_rate(&self) -> f64 {
        Self::rate(self.l2_misses, self.l2_hits)
    }

    fn rate(misses: u64, hits: u64) -> f64 {
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            misses as f64 / total as f64
        }
    }

    /// Prints all counters to stdout in a fixed-width table.
    pub fn report(&self) {
        let print_level = |name: &str, hits: u64, misses: u64, rate: f64| {
            println!(
                "  {:<4} accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
                name,
                hits + misses,
                hits,
                rate * 100.0
            );
        };
        println!("==========================================================");
        println!("MEMORY HIERARCHY STATISTICS");
        println!("==========================================================");
        print_level("L1", self.l1_hits, self.l1_misses, self.l1_miss_rate());
        print_level("L2", self.l2_hits, self.l2_misses, self.l2_miss_rate());
        println!("  line_fills             {}", self.line_fills);
        println!("  writebacks             {}", self.writebacks);
        println!("==========================================================");
    }
}
