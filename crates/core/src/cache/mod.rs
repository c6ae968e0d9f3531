//! Set-Associative Cache Simulator.
//!
//! This module models the hit/miss/eviction behavior of a set-associative cache.
//! It stores no data: only valid bits, tags, and LRU stamps. It provides:
//! 1. **Cache:** `2^s` sets of `E` lines built from a validated [`Geometry`].
//! 2. **Access Classification:** Every access is a hit, a miss into a free line,
//!    or a miss that evicts the least recently used line of its set.
//! 3. **Logical Clock:** A cache-wide counter, advanced once per access, orders
//!    recency. Wall time is never consulted, so a trace always replays identically.

/// LRU victim selection.
pub mod lru;

/// Sets and lines.
pub mod set;

use std::fmt;

use tracing::{debug, trace};

use crate::common::Geometry;
use crate::stats::CacheStats;

use self::set::Placement;
pub use self::set::{Line, Set};

/// Outcome of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The block was resident.
    Hit,
    /// The block was absent and loaded into an empty line.
    MissFill,
    /// The block was absent and displaced the set's least recently used line.
    MissEvict,
}

impl Classification {
    /// Whether the access hit.
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Whether the access missed (with or without eviction).
    #[inline]
    pub const fn is_miss(self) -> bool {
        !self.is_hit()
    }

    /// Whether the access evicted a valid line.
    #[inline]
    pub const fn is_eviction(self) -> bool {
        matches!(self, Self::MissEvict)
    }

    /// Verbose-trace label: `hit`, `miss`, or `miss eviction`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::MissFill => "miss",
            Self::MissEvict => "miss eviction",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A set-associative cache with LRU replacement.
///
/// Owns its sets, its logical clock, and its hit/miss/eviction counters.
/// [`Cache::access`] is the only operation that changes any of them.
#[derive(Clone, Debug)]
pub struct Cache {
    geometry: Geometry,
    sets: Vec<Set>,
    access_counter: u64,
    stats: CacheStats,
}

impl Cache {
    /// Builds an empty cache: every line invalid, clock at 0.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Validated shape; see [`Geometry::new`].
    pub fn new(geometry: Geometry) -> Self {
        let sets = (0..geometry.num_sets())
            .map(|_| Set::new(geometry.associativity()))
            .collect();

        debug!(
            s = geometry.set_index_bits(),
            e = geometry.associativity(),
            b = geometry.block_offset_bits(),
            sets = geometry.num_sets(),
            capacity_bytes = geometry.capacity_bytes(),
            "cache constructed"
        );

        Self {
            geometry,
            sets,
            access_counter: 0,
            stats: CacheStats::default(),
        }
    }

    /// Accesses `address`, updating line state, the clock, and the counters.
    ///
    /// The clock advances by exactly one before any line is touched, then the
    /// target set is searched for the tag, then for a free line, and finally
    /// its LRU line is replaced. Only that one line is modified.
    ///
    /// # Panics
    ///
    /// This function will not panic. The set index is masked to `s` bits, so
    /// it is always below `2^s == sets.len()`.
    pub fn access(&mut self, address: u64) -> Classification {
        let parts = self.geometry.decode(address);
        self.access_counter += 1;
        let stamp = self.access_counter;

        let set = &mut self.sets[parts.set_index as usize];
        let (outcome, way) = match set.place(parts.tag, stamp) {
            Placement::Hit(way) => (Classification::Hit, way),
            Placement::Filled(way) => (Classification::MissFill, way),
            Placement::Evicted { way, victim_tag } => {
                trace!(way, victim_tag = format_args!("{victim_tag:#x}"), "evicted");
                (Classification::MissEvict, way)
            }
        };

        trace!(
            address = format_args!("{address:#x}"),
            set = parts.set_index,
            way,
            tag = format_args!("{:#x}", parts.tag),
            clock = stamp,
            %outcome,
            "access"
        );

        self.stats.record(outcome);
        outcome
    }

    /// Whether `address` is resident. Does not advance the clock or touch any line.
    pub fn contains(&self, address: u64) -> bool {
        let parts = self.geometry.decode(address);
        self.sets[parts.set_index as usize].find(parts.tag).is_some()
    }

    /// The geometry this cache was built with.
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Number of accesses performed so far.
    pub const fn access_counter(&self) -> u64 {
        self.access_counter
    }

    /// Hit, miss, and eviction totals.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// All sets, indexed by set index.
    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    /// The set at `index`, if it exists.
    pub fn set(&self, index: usize) -> Option<&Set> {
        self.sets.get(index)
    }
}
