//! Set-associative cache behavior simulator library.
//!
//! This crate replays memory reference traces against a modeled cache and classifies
//! every access without storing any data. It provides the following:
//! 1. **Common:** Validated cache geometry, address decomposition, and error types.
//! 2. **Cache:** Sets of lines with a logical access clock and LRU replacement.
//! 3. **Trace:** Parsing of valgrind-style `"<op> <hex-address>,<size>"` lines.
//! 4. **Simulation:** A trace runner that feeds records into the cache.
//! 5. **Statistics:** Hit, miss, and eviction counters plus report rendering.

/// Cache model (sets, lines, access classification, LRU victim selection).
pub mod cache;
/// Common types (geometry, address parts, constants, errors).
pub mod common;
/// Simulator configuration (defaults, JSON loading, geometry validation).
pub mod config;
/// Trace runner driving the cache from a stream of trace records.
pub mod sim;
/// Hit, miss, and eviction counters and their report formats.
pub mod stats;
/// Trace file parsing.
pub mod trace;

/// Main cache type; construct with `Cache::new` from a validated `Geometry`.
pub use crate::cache::{Cache, Classification};
/// Validated cache shape (`s`, `E`, `b`).
pub use crate::common::Geometry;
/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Drives a trace through a cache.
pub use crate::sim::TraceRunner;
/// Aggregate counters read by reporters.
pub use crate::stats::CacheStats;
