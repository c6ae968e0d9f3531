//! Trace Runner: owns the cache and replays a trace through it.
//!
//! Instruction fetches are skipped. Loads and stores access the cache once;
//! a modify accesses it twice in a row at the same address, and both accesses
//! are classified and counted independently.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::cache::{Cache, Classification};
use crate::common::SimError;
use crate::stats::CacheStats;
use crate::trace::{TraceReader, TraceRecord};

/// Replays trace records against a cache.
#[derive(Debug)]
pub struct TraceRunner {
    cache: Cache,
    verbose: bool,
}

impl TraceRunner {
    /// Creates a runner around `cache`.
    ///
    /// # Arguments
    ///
    /// * `cache` - The cache to drive; usually freshly constructed.
    /// * `verbose` - When set, each data record is echoed with its classifications.
    pub const fn new(cache: Cache, verbose: bool) -> Self {
        Self { cache, verbose }
    }

    /// Applies one record and returns the classifications it produced.
    ///
    /// Returns an empty vector for instruction fetches.
    pub fn step(&mut self, record: TraceRecord) -> Vec<Classification> {
        (0..record.op.accesses())
            .map(|_| self.cache.access(record.address))
            .collect()
    }

    /// Replays every record from `reader`, writing verbose lines to `out`.
    ///
    /// Stops at the first unreadable or malformed line; counters then reflect
    /// only the records before it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Trace`] for trace failures and [`SimError::Io`] if
    /// verbose output cannot be written.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        out: &mut W,
    ) -> Result<CacheStats, SimError> {
        self.replay(TraceReader::new(reader), out)
    }

    /// Opens `path` and replays it; see [`TraceRunner::run`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Trace`] if the file cannot be opened, plus everything
    /// [`TraceRunner::run`] can return.
    pub fn run_file<W: Write>(
        &mut self,
        path: impl AsRef<Path>,
        out: &mut W,
    ) -> Result<CacheStats, SimError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening trace");
        self.replay(TraceReader::open(path)?, out)
    }

    fn replay<R: BufRead, W: Write>(
        &mut self,
        trace: TraceReader<R>,
        out: &mut W,
    ) -> Result<CacheStats, SimError> {
        let mut records = 0usize;
        for record in trace {
            let record = record?;
            let outcomes = self.step(record);
            records += 1;

            if self.verbose && !outcomes.is_empty() {
                write!(out, "{record}")?;
                for outcome in &outcomes {
                    write!(out, " {outcome}")?;
                }
                writeln!(out)?;
            }
        }

        let stats = *self.cache.stats();
        debug!(
            records,
            accesses = self.cache.access_counter(),
            hits = stats.hits,
            misses = stats.misses,
            evictions = stats.evictions,
            "trace finished"
        );
        Ok(stats)
    }

    /// Current counters.
    pub const fn stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    /// The driven cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Consumes the runner, returning the cache.
    pub fn into_cache(self) -> Cache {
        self.cache
    }
}
