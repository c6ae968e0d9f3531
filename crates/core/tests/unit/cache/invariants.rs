//! Cache Invariant Property Tests.
//!
//! Drives small caches with random address streams and checks:
//! - the access clock equals the number of accesses,
//! - no set ever holds the same tag twice,
//! - only the addressed set changes on each access,
//! - classifications match a straightforward recency-list LRU model,
//! - replaying a stream on a fresh cache gives identical results.

use std::collections::VecDeque;

use csim_core::Classification::{self, Hit, MissEvict, MissFill};
use csim_core::cache::Cache;
use csim_core::common::Geometry;
use proptest::prelude::*;

/// Recency-list LRU: front is most recent.
struct ModelCache {
    geometry: Geometry,
    sets: Vec<VecDeque<u64>>,
}

impl ModelCache {
    fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            sets: vec![VecDeque::new(); geometry.num_sets()],
        }
    }

    fn access(&mut self, address: u64) -> Classification {
        let parts = self.geometry.decode(address);
        let set = &mut self.sets[parts.set_index as usize];
        if let Some(pos) = set.iter().position(|&t| t == parts.tag) {
            let tag = set.remove(pos).unwrap();
            set.push_front(tag);
            return Hit;
        }
        set.push_front(parts.tag);
        if set.len() > self.geometry.associativity() {
            let _ = set.pop_back();
            MissEvict
        } else {
            MissFill
        }
    }
}

fn geometry() -> impl Strategy<Value = Geometry> {
    (0u32..=3, 1usize..=4, 0u32..=3).prop_map(|(s, e, b)| Geometry::new(s, e, b).unwrap())
}

/// Addresses confined to a small window so sets actually conflict.
fn addresses() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..512, 0..200)
}

fn assert_unique_tags(cache: &Cache) -> Result<(), TestCaseError> {
    for (index, set) in cache.sets().iter().enumerate() {
        let mut tags: Vec<u64> = set
            .lines()
            .iter()
            .filter(|l| l.is_valid())
            .map(|l| l.tag())
            .collect();
        let resident = tags.len();
        tags.sort_unstable();
        tags.dedup();
        prop_assert_eq!(tags.len(), resident, "duplicate tag in set {}", index);
    }
    Ok(())
}

proptest! {
    #[test]
    fn clock_counts_every_access(geometry in geometry(), stream in addresses()) {
        let mut cache = Cache::new(geometry);
        for (n, &address) in stream.iter().enumerate() {
            let before = cache.access_counter();
            let _ = cache.access(address);
            prop_assert_eq!(cache.access_counter(), before + 1);
            prop_assert_eq!(cache.access_counter(), n as u64 + 1);
        }
    }

    #[test]
    fn at_most_one_resident_copy_per_set(geometry in geometry(), stream in addresses()) {
        let mut cache = Cache::new(geometry);
        for &address in &stream {
            let _ = cache.access(address);
            assert_unique_tags(&cache)?;
        }
    }

    #[test]
    fn access_touches_only_its_set(geometry in geometry(), stream in addresses()) {
        let mut cache = Cache::new(geometry);
        for &address in &stream {
            let before = cache.sets().to_vec();
            let target = geometry.decode(address).set_index as usize;
            let _ = cache.access(address);

            for (index, (old, new)) in before.iter().zip(cache.sets()).enumerate() {
                if index != target {
                    prop_assert_eq!(old, new);
                }
            }
            let changed = before[target]
                .lines()
                .iter()
                .zip(cache.sets()[target].lines())
                .filter(|(old, new)| old != new)
                .count();
            prop_assert_eq!(changed, 1);
            prop_assert!(cache.contains(address));
        }
    }

    #[test]
    fn matches_recency_list_model(geometry in geometry(), stream in addresses()) {
        let mut cache = Cache::new(geometry);
        let mut model = ModelCache::new(geometry);
        for &address in &stream {
            prop_assert_eq!(cache.access(address), model.access(address));
        }
    }

    #[test]
    fn replay_is_deterministic(geometry in geometry(), stream in addresses()) {
        let mut first = Cache::new(geometry);
        let mut second = Cache::new(geometry);
        let a: Vec<_> = stream.iter().map(|&x| first.access(x)).collect();
        let b: Vec<_> = stream.iter().map(|&x| second.access(x)).collect();
        prop_assert_eq!(a, b);
        prop_assert_eq!(first.stats(), second.stats());
    }

    #[test]
    fn counters_are_consistent(geometry in geometry(), stream in addresses()) {
        let mut cache = Cache::new(geometry);
        for &address in &stream {
            let _ = cache.access(address);
        }
        let stats = cache.stats();
        prop_assert_eq!(stats.total_accesses(), stream.len() as u64);
        prop_assert!(stats.evictions <= stats.misses);
        let resident: usize = cache.sets().iter().map(|s| s.occupancy()).sum();
        prop_assert_eq!(stats.misses - stats.evictions, resident as u64);
    }
}
