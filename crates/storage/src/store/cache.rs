#![forbid(unsafe_code)]

//! Query memoization for the knowledge store.
//!
//! Entries never expire on their own: after the knowledge database changes, the owner of the
//! cache calls [`KnowledgeCache::invalidate`]. Each query family has its own bounded map and
//! evicts its oldest entry first once the capacity is reached.

use super::types::{EvidenceRow, ReviewPointRow, TemplateRow};
use lr_core::ids::CaseId;
use lr_core::model::{CaseType, FrameworkPart, Role};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const DEFAULT_CACHE_CAPACITY: usize = 512;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    fn merge(self, other: CacheStats) -> CacheStats {
        CacheStats {
            entries: self.entries + other.entries,
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
        }
    }
}

struct CacheInner<K, V> {
    entries: HashMap<K, V>,
    order: VecDeque<K>,
    hits: u64,
    misses: u64,
}

/// Bounded map with first-in-first-out eviction. A capacity of zero disables caching.
pub struct QueryCache<K, V> {
    capacity: usize,
    inner: Mutex<CacheInner<K, V>>,
}

impl<K, V> QueryCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
                hits: 0,
                misses: 0,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner<K, V>> {
        // Entries are plain copies of query results; a panic mid-update cannot leave them torn.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.lock();
        match inner.entries.get(key).cloned() {
            Some(value) => {
                inner.hits += 1;
                Some(value)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    pub fn insert(&self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        let mut inner = self.lock();
        if inner.entries.contains_key(&key) {
            inner.entries.insert(key, value);
            return;
        }
        while inner.order.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }
        inner.order.push_back(key.clone());
        inner.entries.insert(key, value);
    }

    /// Returns the cached value or runs `load`, caching its successful result.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: K,
        load: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = load()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry. Hit and miss counters survive.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            entries: inner.entries.len(),
            hits: inner.hits,
            misses: inner.misses,
        }
    }
}

/// Per-query caches of a [`KnowledgeStore`](super::KnowledgeStore), shareable behind an `Arc`.
pub struct KnowledgeCache {
    pub(crate) case_types: QueryCache<(), Vec<CaseType>>,
    pub(crate) case_type: QueryCache<CaseId, Option<CaseType>>,
    pub(crate) search: QueryCache<String, Vec<CaseType>>,
    pub(crate) review_points: QueryCache<(CaseId, FrameworkPart), Vec<ReviewPointRow>>,
    pub(crate) core_points: QueryCache<CaseId, Vec<ReviewPointRow>>,
    pub(crate) evidence: QueryCache<(CaseId, Role), Vec<EvidenceRow>>,
    pub(crate) templates: QueryCache<(CaseId, i64), Vec<TemplateRow>>,
}

impl KnowledgeCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            case_types: QueryCache::new(capacity),
            case_type: QueryCache::new(capacity),
            search: QueryCache::new(capacity),
            review_points: QueryCache::new(capacity),
            core_points: QueryCache::new(capacity),
            evidence: QueryCache::new(capacity),
            templates: QueryCache::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.case_types.capacity()
    }

    pub fn invalidate(&self) {
        self.case_types.clear();
        self.case_type.clear();
        self.search.clear();
        self.review_points.clear();
        self.core_points.clear();
        self.evidence.clear();
        self.templates.clear();
        tracing::info!("knowledge cache invalidated");
    }

    /// Totals across all query families.
    pub fn stats(&self) -> CacheStats {
        [
            self.case_types.stats(),
            self.case_type.stats(),
            self.search.stats(),
            self.review_points.stats(),
            self.core_points.stats(),
            self.evidence.stats(),
            self.templates.stats(),
        ]
        .into_iter()
        .fold(CacheStats::default(), CacheStats::merge)
    }
}

impl Default for KnowledgeCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_entry_is_evicted_first() {
        let cache = QueryCache::<i64, &str>::new(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        assert_eq!(cache.get(&1), Some("a"));
        cache.insert(3, "c");
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some("b"));
        assert_eq!(cache.get(&3), Some("c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn overwrite_keeps_insertion_slot() {
        let cache = QueryCache::<i64, &str>::new(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(1, "a2");
        cache.insert(3, "c");
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some("b"));
    }

    #[test]
    fn zero_capacity_never_stores() {
        let cache = QueryCache::<i64, i64>::new(0);
        cache.insert(1, 1);
        assert!(cache.is_empty());
        let mut calls = 0;
        for _ in 0..2 {
            let value: Result<i64, ()> = cache.get_or_try_insert_with(7, || {
                calls += 1;
                Ok(42)
            });
            assert_eq!(value, Ok(42));
        }
        assert_eq!(calls, 2);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let cache = QueryCache::<i64, i64>::new(4);
        let err: Result<i64, &str> = cache.get_or_try_insert_with(1, || Err("boom"));
        assert_eq!(err, Err("boom"));
        assert!(cache.is_empty());
        let ok: Result<i64, &str> = cache.get_or_try_insert_with(1, || Ok(5));
        assert_eq!(ok, Ok(5));
        let cached: Result<i64, &str> = cache.get_or_try_insert_with(1, || Err("unused"));
        assert_eq!(cached, Ok(5));
        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
    }

    #[test]
    fn invalidate_clears_every_family() {
        let cache = KnowledgeCache::new(8);
        cache.case_types.insert((), Vec::new());
        cache.evidence.insert((CaseId::new(1), Role::Plaintiff), Vec::new());
        assert_eq!(cache.stats().entries, 2);
        cache.invalidate();
        assert_eq!(cache.stats().entries, 0);
    }
}
