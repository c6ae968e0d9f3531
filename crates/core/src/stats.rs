//! Simulation statistics collection and reporting.
//!
//! This module tracks the three totals a cache run produces. It provides:
//! 1. **Counters:** Hits, misses (fills and evictions), and evictions.
//! 2. **Derived metrics:** Total accesses and hit rate.
//! 3. **Reports:** The `hits:<h> misses:<m> evictions:<e>` summary line, JSON via
//!    serde, and the space-separated results file read by graders.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::cache::Classification;

/// Aggregate access counters.
///
/// Incremented by the cache on every access; reporters only read them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that did not (includes evicting misses).
    pub misses: u64,
    /// Misses that displaced a valid line.
    pub evictions: u64,
}

impl CacheStats {
    /// Counts one access outcome.
    pub const fn record(&mut self, outcome: Classification) {
        match outcome {
            Classification::Hit => self.hits += 1,
            Classification::MissFill => self.misses += 1,
            Classification::MissEvict => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    /// Hits plus misses.
    pub const fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or 0.0 before any access.
    pub const fn hit_rate(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// The parser-friendly summary line: `hits:<h> misses:<m> evictions:<e>`.
    pub fn summary(&self) -> String {
        format!(
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }

    /// Writes `"<h> <m> <e>\n"` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be written.
    pub fn write_results(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(
            path,
            format!("{} {} {}\n", self.hits, self.misses, self.evictions),
        )
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
