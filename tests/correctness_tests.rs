//! Correctness Tests for the LRU cache
//!
//! These tests validate the eviction policy with simple, predictable access
//! patterns. Each test checks explicitly which key gets evicted when a put
//! causes an eviction.
//!
//! ## Test Strategy
//! - Small caches (1-5 entries) for step-by-step scenarios
//! - A 100-entry cache for the bulk fill/evict scenarios
//! - Every scenario finishes with a full structural check

use recency_cache::config::LruCacheConfig;
use recency_cache::LruCache;
use std::num::NonZeroUsize;

const CAPACITY: usize = 100;

// ============================================================================
// HELPER FUNCTIONS FOR CACHE CREATION
// ============================================================================

/// Helper to create an LruCache with the given capacity
fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config, None)
}

/// Helper that fails the test with the broken invariant's description
fn assert_consistent<K: std::hash::Hash + Eq, V>(cache: &LruCache<K, V>) {
    if let Err(err) = cache.check_invariants() {
        panic!("cache invariant violated: {}", err);
    }
}

// ============================================================================
// BASIC CONTRACT
// ============================================================================

#[test]
fn test_single_put_then_get() {
    let mut cache = make_lru(CAPACITY);
    cache.put(2, 2);
    assert_eq!(cache.get(&2), Some(&2));
    assert_eq!(cache.len(), 1);
    assert_consistent(&cache);
}

#[test]
fn test_empty_cache_misses() {
    let mut cache: LruCache<i32, i32> = make_lru(CAPACITY);
    assert_eq!(cache.get(&2), None);
    assert_eq!(cache.len(), 0);
    assert!(cache.is_empty());
    assert_eq!(cache.peek_head_key(), None);
    assert_eq!(cache.peek_head_value(), None);
    assert_consistent(&cache);
}

#[test]
fn test_size_never_exceeds_capacity() {
    let mut cache = make_lru(CAPACITY);
    for i in 0..=CAPACITY {
        cache.put(i, i);
        assert!(cache.len() <= CAPACITY, "len exceeded capacity after put({})", i);
    }
    assert_eq!(cache.len(), CAPACITY);
    assert_consistent(&cache);
}

#[test]
fn test_update_in_place_keeps_size() {
    let mut cache = make_lru(CAPACITY);
    cache.put(1, 1);
    assert_eq!(cache.get(&1), Some(&1));
    assert_eq!(cache.len(), 1);

    assert_eq!(cache.put(1, 2), Some((1, 1)));
    assert_eq!(cache.get(&1), Some(&2));
    assert_eq!(cache.len(), 1);
    assert_consistent(&cache);
}

#[test]
fn test_capacity_one() {
    let mut cache = make_lru(1);
    cache.put(1, 1);
    assert_eq!(cache.put(2, 2), Some((1, 1)));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&2), Some(&2));
    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.peek_head(), Some((&2, &2)));
    assert_consistent(&cache);
}

#[test]
fn test_zero_capacity_is_rejected() {
    assert!(LruCacheConfig::try_from_capacity(0).is_err());
    assert!(LruCache::<u32, u32>::try_new(0).is_err());
}

// ============================================================================
// LRU CORRECTNESS
// ============================================================================
// Correctness criteria:
// 1. Most recently accessed items stay in cache
// 2. Oldest accessed items are evicted first
// 3. Access (get) updates recency, preventing eviction

#[test]
fn test_first_inserted_key_is_evicted_first() {
    let mut cache = make_lru(CAPACITY);
    for i in 0..CAPACITY {
        cache.put(i, i);
    }
    assert_eq!(cache.put(CAPACITY, CAPACITY), Some((0, 0)));
    assert_eq!(cache.get(&0), None);
    for i in 1..=CAPACITY {
        assert_eq!(cache.get(&i), Some(&i), "key {} should remain", i);
    }
    assert_consistent(&cache);
}

#[test]
fn test_last_used_elements_survive_double_fill() {
    let mut cache = make_lru(CAPACITY);
    for i in 0..=2 * CAPACITY {
        cache.put(i, i);
    }
    assert_eq!(cache.get(&0), None);
    for i in CAPACITY + 1..=2 * CAPACITY {
        assert_eq!(cache.get(&i), Some(&i));
    }
    assert_eq!(cache.peek_head_key(), Some(&(2 * CAPACITY)));
    assert_eq!(cache.peek_head_value(), Some(&(2 * CAPACITY)));
    assert_eq!(cache.len(), CAPACITY);
    assert_consistent(&cache);
}

#[test]
fn test_get_promotes_to_head() {
    let mut cache = make_lru(CAPACITY);
    for i in 0..CAPACITY {
        cache.put(i, i);
    }
    assert_eq!(cache.get(&4), Some(&4));
    assert_eq!(cache.peek_head_key(), Some(&4));
    assert_eq!(cache.peek_head_value(), Some(&4));
}

#[test]
fn test_access_reorders_eviction_victims() {
    let mut cache = make_lru(CAPACITY);
    for i in 0..CAPACITY {
        cache.put(i, i);
    }
    cache.get(&4);
    assert_eq!(cache.peek_head_key(), Some(&4));

    // Least recent first: everything but 4 in insertion order, then 4.
    let expected_victims: Vec<usize> = (0..CAPACITY)
        .filter(|&k| k != 4)
        .chain(std::iter::once(4))
        .collect();

    for (i, victim) in expected_victims.into_iter().enumerate() {
        let key = CAPACITY + i;
        assert_eq!(
            cache.put(key, key),
            Some((victim, victim)),
            "put({}) should evict {}",
            key,
            victim
        );
        assert_eq!(cache.peek_head_key(), Some(&key));
        if victim != 4 {
            assert!(cache.contains(&4), "key 4 evicted before key {}", victim);
        }
    }
    assert!(!cache.contains(&4));
    assert_eq!(cache.len(), CAPACITY);
    assert_consistent(&cache);
}

#[test]
fn test_lru_evicts_least_recently_used() {
    let mut cache = make_lru(3);

    // Fill cache: order of insertion determines initial LRU order
    cache.put(1, 10);
    cache.put(2, 20);
    cache.put(3, 30);
    // LRU order: 1 (LRU) -> 2 -> 3 (MRU)

    assert!(cache.get(&1).is_some(), "Key 1 should be present");
    assert!(cache.get(&2).is_some(), "Key 2 should be present");
    assert!(cache.get(&3).is_some(), "Key 3 should be present");
    // After gets: LRU order is 1 -> 2 -> 3 (order of access)

    cache.put(4, 40);
    assert!(
        cache.get(&1).is_none(),
        "Key 1 should have been evicted (was LRU)"
    );
    assert!(cache.get(&2).is_some(), "Key 2 should remain");
    assert!(cache.get(&3).is_some(), "Key 3 should remain");
    assert!(cache.get(&4).is_some(), "Key 4 should be present");
    // After gets: LRU order is 2 -> 3 -> 4

    cache.put(5, 50);
    assert!(
        cache.get(&2).is_none(),
        "Key 2 should have been evicted (was LRU)"
    );
    assert!(cache.get(&3).is_some(), "Key 3 should remain");
    assert!(cache.get(&4).is_some(), "Key 4 should remain");
    assert!(cache.get(&5).is_some(), "Key 5 should be present");
}

#[test]
fn test_lru_eviction_order_is_predictable() {
    let mut cache = make_lru(5);
    for i in 0..5 {
        cache.put(i, i * 10);
    }
    // LRU order: 0 (LRU) -> 1 -> 2 -> 3 -> 4 (MRU)

    assert_eq!(cache.put(5, 50), Some((0, 0)));
    assert_eq!(cache.put(6, 60), Some((1, 10)));
    assert_eq!(cache.put(7, 70), Some((2, 20)));

    let remaining: Vec<i32> = cache.iter().map(|(k, _)| *k).collect();
    assert_eq!(remaining, vec![7, 6, 5, 4, 3]);
    assert_consistent(&cache);
}

#[test]
fn test_lru_get_updates_recency() {
    let mut cache = make_lru(3);
    cache.put(1, 10);
    cache.put(2, 20);
    cache.put(3, 30);
    // LRU order: 1 (LRU) -> 2 -> 3 (MRU)

    assert_eq!(cache.get(&1), Some(&10));
    // LRU order: 2 (LRU) -> 3 -> 1 (MRU)

    assert_eq!(cache.put(4, 40), Some((2, 20)));
    assert!(
        cache.get(&1).is_some(),
        "Key 1 should survive due to recent access"
    );
    assert!(cache.get(&3).is_some(), "Key 3 should remain");
    assert!(cache.get(&4).is_some(), "Key 4 should be present");
}

#[test]
fn test_lru_put_updates_recency() {
    let mut cache = make_lru(3);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);

    // Rewriting "a" makes it most recent, so "b" becomes the victim
    cache.put("a", 10);
    assert_eq!(cache.peek_lru(), Some((&"b", &2)));
    assert_eq!(cache.put("d", 4), Some(("b", 2)));
    assert_eq!(cache.peek(&"a"), Some(&10));
}

#[test]
fn test_lru_peek_does_not_update_recency() {
    let mut cache = make_lru(2);
    cache.put(1, 1);
    cache.put(2, 2);
    assert_eq!(cache.peek(&1), Some(&1));
    assert_eq!(cache.put(3, 3), Some((1, 1)));
}

#[test]
fn test_lru_remove_then_refill() {
    let mut cache = make_lru(3);
    cache.extend([(1, 1), (2, 2), (3, 3)]);
    assert_eq!(cache.remove(&2), Some(2));
    assert_eq!(cache.len(), 2);

    // Freed capacity is used before anything is evicted
    assert_eq!(cache.put(4, 4), None);
    assert_eq!(cache.put(5, 5), Some((1, 1)));
    assert_consistent(&cache);
}

#[test]
fn test_lru_alternating_hot_key_never_evicted() {
    let mut cache = make_lru(4);
    cache.put(u32::MAX, 0);
    for i in 0..1_000u32 {
        cache.put(i, i);
        assert_eq!(cache.get(&u32::MAX), Some(&0));
    }
    assert_eq!(cache.len(), 4);
    assert_consistent(&cache);
}
