//! Two-level write-back cache hierarchy simulator.
//!
//! This crate models a CPU-side memory subsystem servicing single-word
//! load/store requests, with the following pieces:
//! 1. **Common:** Strong address type, geometry constants, cache line and
//!    control types, initialization errors.
//! 2. **Caches:** 64 KiB direct-mapped L1 and 1 MiB 4-way set-associative
//!    L2, both write-back, with NRU replacement at L2.
//! 3. **Memory:** Flat main memory with line-granular access over a lazily
//!    allocated word buffer.
//! 4. **Subsystem:** The orchestrator gluing L1, L2, and main memory into
//!    one word-granular memory, plus traffic statistics.
//!
//! ```
//! use memhier_core::MemorySubsystem;
//! use memhier_core::common::{Control, PhysAddr};
//!
//! let mut subsystem = MemorySubsystem::with_memory_size(1 << 20).unwrap();
//! let _ = subsystem.access(PhysAddr::new(0x40), 7, Control::WRITE);
//! assert_eq!(subsystem.access(PhysAddr::new(0x40), 0, Control::READ), Some(7));
//! ```

/// Cache engines (L1, L2) and the NRU replacement policy.
pub mod cache;
/// Common types and constants (addresses, lines, control, errors).
pub mod common;
/// Subsystem configuration (defaults, JSON deserialization).
pub mod config;
/// Main memory and its backing word buffer.
pub mod memory;
/// Traffic statistics collection and reporting.
pub mod stats;
/// Hierarchy orchestrator tying the levels together.
pub mod subsystem;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main subsystem type; owns both caches, main memory, and the counters.
pub use crate::subsystem::MemorySubsystem;
