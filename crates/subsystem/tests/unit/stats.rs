//! Statistics Unit Tests.
//!
//! Verifies counter defaults, reset, and the derived miss rates.

use memhier_core::stats::MemStats;
use pretty_assertions::assert_eq;

#[test]
fn counters_start_at_zero() {
    let stats = MemStats::default();
    assert_eq!(stats.l1_hits, 0);
    assert_eq!(stats.l1_misses, 0);
    assert_eq!(stats.l2_hits, 0);
    assert_eq!(stats.l2_misses, 0);
    assert_eq!(stats.line_fills, 0);
    assert_eq!(stats.writebacks, 0);
}

#[test]
fn reset_restores_the_default() {
    let mut stats = MemStats {
        l1_hits: 10,
        l1_misses: 2,
        l2_hits: 1,
        l2_misses: 1,
        line_fills: 1,
        writebacks: 3,
    };
    stats.reset();
    assert_eq!(stats, MemStats::default());
}

#[test]
fn miss_rates_divide_misses_by_lookups() {
    let stats = MemStats {
        l1_hits: 3,
        l1_misses: 1,
        l2_hits: 1,
        l2_misses: 3,
        line_fills: 3,
        writebacks: 0,
    };
    assert!((stats.l1_miss_rate() - 0.25).abs() < 1e-12);
    assert!((stats.l2_miss_rate() - 0.75).abs() < 1e-12);
}

#[test]
fn miss_rates_are_zero_without_traffic() {
    let stats = MemStats::default();
    assert_eq!(stats.l1_miss_rate(), 0.0);
    assert_eq!(stats.l2_miss_rate(), 0.0);
}

#[test]
fn report_prints_without_panicking() {
    MemStats {
        l1_hits: 100,
        l1_misses: 25,
        l2_hits: 20,
        l2_misses: 5,
        line_fills: 5,
        writebacks: 2,
    }
    .report();
}
