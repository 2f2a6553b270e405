//! Hierarchy Orchestrator Unit Tests.
//!
//! Drives word-granular accesses through the full L1 / L2 / main-memory
//! stack and checks round trips, write-back propagation, and the demand
//! miss counters.
//!
//! Geometry cheat sheet for the counter math below: L1 holds 1024 lines
//! (64 KiB), L2 holds 4096 sets of 4 lines (1 MiB). A 1 MiB main memory
//! therefore maps exactly one tag to each L1 entry per 64 KiB and exactly
//! four tags to each L2 set, so a linear sweep fills L2 without a single
//! L2 eviction.

use memhier_core::MemorySubsystem;
use memhier_core::common::{Control, MemoryError, PhysAddr};
use pretty_assertions::assert_eq;

use crate::common::init_tracing;

// ══════════════════════════════════════════════════════════
// 1. Initialization
// ══════════════════════════════════════════════════════════

#[test]
fn initialization_validates_the_memory_size() {
    assert_eq!(
        MemorySubsystem::with_memory_size(0).unwrap_err(),
        MemoryError::ZeroSize
    );
    assert_eq!(
        MemorySubsystem::with_memory_size(1000).unwrap_err(),
        MemoryError::UnalignedSize(1000)
    );
    assert!(MemorySubsystem::with_memory_size(1 << 16).is_ok());
}

#[test]
fn fresh_memory_reads_zero() {
    let mut subsystem = MemorySubsystem::with_memory_size(1 << 16).unwrap();
    assert_eq!(subsystem.access(PhysAddr::new(0x1234), 0, Control::READ), Some(0));
}

// ══════════════════════════════════════════════════════════
// 2. Round trips
// ══════════════════════════════════════════════════════════

#[test]
fn single_word_round_trip() {
    init_tracing();
    let mut subsystem = MemorySubsystem::with_memory_size(1 << 16).unwrap();

    assert_eq!(subsystem.access(PhysAddr::new(0x40), 7, Control::WRITE), None);
    assert_eq!(subsystem.access(PhysAddr::new(0x40), 0, Control::READ), Some(7));
}

#[test]
fn combined_access_reads_the_prior_word() {
    let mut subsystem = MemorySubsystem::with_memory_size(1 << 16).unwrap();

    let addr = PhysAddr::new(0x88);
    let _ = subsystem.access(addr, 11, Control::WRITE);
    assert_eq!(
        subsystem.access(addr, 22, Control::READ | Control::WRITE),
        Some(11)
    );
    assert_eq!(subsystem.access(addr, 0, Control::READ), Some(22));
}

#[test]
fn byte_offset_bits_reach_the_same_word() {
    let mut subsystem = MemorySubsystem::with_memory_size(1 << 16).unwrap();

    let _ = subsystem.access(PhysAddr::new(0x100), 5, Control::WRITE);
    for byte in 0..4u32 {
        assert_eq!(
            subsystem.access(PhysAddr::new(0x100 + byte), 0, Control::READ),
            Some(5),
            "byte offset {byte}"
        );
    }
}

/// Values survive eviction through both levels down to main memory.
///
/// Twelve addresses sharing L1 index 0 and L2 set 0 overwhelm both the
/// single L1 entry and the four L2 ways, so the oldest lines must travel
/// L1 -> L2 -> memory and come back intact.
#[test]
fn conflict_pressure_round_trips_through_memory() {
    let mut subsystem = MemorySubsystem::with_memory_size(4 << 20).unwrap();

    let addrs: Vec<PhysAddr> = (0..12).map(|k| PhysAddr::new(k << 18)).collect();
    for (k, addr) in addrs.iter().enumerate() {
        let _ = subsystem.access(*addr, 1000 + k as u32, Control::WRITE);
    }
    assert!(
        subsystem.stats().writebacks >= 1,
        "set 0 overflowed, something reached memory"
    );
    for (k, addr) in addrs.iter().enumerate() {
        assert_eq!(
            subsystem.access(*addr, 0, Control::READ),
            Some(1000 + k as u32),
            "address {:#x}",
            addr.val()
        );
    }
}

// ══════════════════════════════════════════════════════════
// 3. Miss counters
// ══════════════════════════════════════════════════════════

#[test]
fn counters_track_demand_misses_only_once_per_line() {
    let mut subsystem = MemorySubsystem::with_memory_size(1 << 16).unwrap();

    let _ = subsystem.access(PhysAddr::new(0x40), 1, Control::WRITE);
    let _ = subsystem.access(PhysAddr::new(0x44), 2, Control::WRITE);
    let _ = subsystem.access(PhysAddr::new(0x48), 0, Control::READ);

    let stats = subsystem.stats();
    assert_eq!(stats.l1_misses, 1, "one line fill services all three");
    assert_eq!(stats.l1_hits, 2);
    assert_eq!(stats.l2_misses, 1);
    assert_eq!(stats.l2_hits, 0);
    assert_eq!(stats.line_fills, 1);
}

#[test]
fn reset_clears_the_counters() {
    let mut subsystem = MemorySubsystem::with_memory_size(1 << 16).unwrap();
    let _ = subsystem.access(PhysAddr::new(0), 1, Control::WRITE);
    assert!(subsystem.stats().l1_misses > 0);

    subsystem.reset_stats();
    assert_eq!(subsystem.stats().l1_misses, 0);
    assert_eq!(subsystem.stats().l1_hits, 0);
}

/// Writing then reading every word of a 1 MiB memory produces exact,
/// reproducible miss counts on both passes.
#[test]
fn sequential_sweep_has_exact_miss_counts() {
    init_tracing();
    const MEMORY_SIZE: u32 = 1 << 20;
    const LINES: u64 = (MEMORY_SIZE as u64) / 64;

    let mut subsystem = MemorySubsystem::with_memory_size(MEMORY_SIZE as usize).unwrap();

    // Pass 1: write every word. Each line misses once in both caches;
    // L2 never evicts because the memory exactly fits it.
    for addr in (0..MEMORY_SIZE).step_by(4) {
        let _ = subsystem.access(PhysAddr::new(addr), addr >> 2, Control::WRITE);
    }
    let stats = *subsystem.stats();
    assert_eq!(stats.l1_misses, LINES);
    assert_eq!(stats.l2_misses, LINES);
    assert_eq!(stats.line_fills, LINES);
    assert_eq!(stats.writebacks, 0, "a 1 MiB sweep never overflows L2");
    assert_eq!(stats.l1_hits, (MEMORY_SIZE as u64) / 4 - LINES);

    // Pass 2: read every word back. L1 still misses once per line, but
    // every line is resident in L2 (dirty copies pushed down as L1
    // recycled its entries), so L2 serves everything.
    subsystem.reset_stats();
    for addr in (0..MEMORY_SIZE).step_by(4) {
        assert_eq!(
            subsystem.access(PhysAddr::new(addr), 0, Control::READ),
            Some(addr >> 2),
            "address {addr:#x}"
        );
    }
    let stats = *subsystem.stats();
    assert_eq!(stats.l1_misses, LINES);
    assert_eq!(stats.l2_misses, 0, "pass 2 is served entirely from L2");
    assert_eq!(stats.line_fills, 0);
    assert_eq!(stats.writebacks, 0);
}

// ══════════════════════════════════════════════════════════
// 4. Clock interrupt
// ══════════════════════════════════════════════════════════

/// The sweep changes replacement preferences, never contents or counters.
#[test]
fn clock_interrupt_preserves_data_and_counters() {
    let mut subsystem = MemorySubsystem::with_memory_size(1 << 16).unwrap();

    let _ = subsystem.access(PhysAddr::new(0x200), 77, Control::WRITE);
    let before = *subsystem.stats();

    subsystem.handle_clock_interrupt();
    subsystem.handle_clock_interrupt();

    assert_eq!(*subsystem.stats(), before);
    assert_eq!(subsystem.access(PhysAddr::new(0x200), 0, Control::READ), Some(77));
}
