//! Configuration for the memory subsystem.
//!
//! The cache geometry (64 KiB direct-mapped L1, 1 MiB 4-way L2, 16-word
//! lines) is architectural and fixed by the constants in
//! [`common::constants`]; only the main-memory size is configurable.
//! Configuration is supplied as JSON from an embedding host or use
//! `Config::default()` directly.
//!
//! [`common::constants`]: crate::common::constants

use serde::Deserialize;

/// Default configuration constants for the subsystem.
mod defaults {
    /// Default main-memory size (32 MiB).
    ///
    /// Large enough that random workloads thrash both cache levels, which
    /// is the regime the hierarchy is usually studied in.
    pub const MEMORY_SIZE: usize = 32 * 1024 * 1024;
}

/// Root configuration structure.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use memhier_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.memory.size_bytes, 32 * 1024 * 1024);
/// ```
///
/// Deserializing from JSON (typical host usage):
///
/// ```
/// use memhier_core::config::Config;
///
/// let json = r#"{
///     "memory": {
///         "size_bytes": 1048576
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.memory.size_bytes, 1048576);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Main memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error for malformed JSON or
    /// mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory: MemoryConfig::default(),
        }
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Main-memory capacity in bytes; must be a non-zero multiple of the
    /// 64-byte cache line
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    /// Returns the default main-memory size in bytes.
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_SIZE,
        }
    }
}
