//! Bounded MRU Table Module
//!
//! Main table engine combining a HashMap index with the recency ring.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::table::ring::{RecencyRing, Slot};
use crate::table::{FnLifecycle, Lifecycle, TableEntry, TableStats, DEFAULT_MIN_LIMIT};

/// Most slots reserved up front when a table is created.
const PREALLOC_LIMIT: usize = 1024;

// == CTable ==
/// Fixed-capacity table of lazily constructed values, evicted least recently
/// used first.
///
/// Every value is produced by [`Lifecycle::create`] on the first lookup of
/// its key and handed back to [`Lifecycle::destroy`] exactly once when the
/// table stops holding it. Lookups hand out borrows, so a value can never be
/// used after the table has released it.
pub struct CTable<L: Lifecycle> {
    /// Key to ring slot index
    index: HashMap<String, Slot>,
    /// Entries ordered from most to least recently used
    ring: RecencyRing<TableEntry<L::Value>>,
    /// Constructor, destructor and application context
    lifecycle: L,
    /// Maximum number of live entries
    limit: usize,
    /// Usage counters
    stats: TableStats,
}

impl<L: Lifecycle> CTable<L> {
    // == Constructor ==
    /// Creates an empty table holding at most `limit` entries.
    ///
    /// Requests below [`DEFAULT_MIN_LIMIT`] are raised to it.
    ///
    /// # Panics
    /// Panics if `limit` is zero.
    pub fn new(limit: usize, lifecycle: L) -> Self {
        Self::with_min_limit(limit, DEFAULT_MIN_LIMIT, lifecycle)
    }

    /// Creates an empty table, raising `limit` to at least `min_limit`.
    ///
    /// # Panics
    /// Panics if `limit` or `min_limit` is zero.
    pub fn with_min_limit(limit: usize, min_limit: usize, lifecycle: L) -> Self {
        assert!(limit >= 1, "ctable: bad cache limit: {}", limit);
        assert!(min_limit >= 1, "ctable: bad minimum cache limit: {}", min_limit);

        let limit = limit.max(min_limit);
        debug!(limit, "ctable: created");

        // The limit is an upper bound, not a reservation
        let initial = limit.min(PREALLOC_LIMIT);
        Self {
            index: HashMap::with_capacity(initial),
            ring: RecencyRing::with_capacity(initial),
            lifecycle,
            limit,
            stats: TableStats::new(),
        }
    }

    // == Locate ==
    /// Returns the value for `key`, constructing it on a miss.
    ///
    /// A miss on a full table first evicts the least recently used entry.
    /// Either way `key` becomes the most recently used entry.
    pub fn locate(&mut self, key: &str) -> &L::Value {
        let slot = match self.index.get(key).copied() {
            Some(slot) => {
                self.touch(slot, key);
                self.stats.record_hit();
                slot
            }
            None => {
                self.stats.record_miss();
                self.admit(key)
            }
        };
        &self.entry_at(slot, key).value
    }

    // == Refresh ==
    /// Replaces the value for `key` with a freshly constructed one.
    ///
    /// The old value is destroyed before the new one is built, so at most one
    /// value per key is ever live. A key that is not present is simply
    /// located.
    pub fn refresh(&mut self, key: &str) -> &L::Value {
        let slot = match self.index.get(key).copied() {
            Some(slot) => {
                self.entry_at(slot, key);
                // Key leaves index and ring before any callback runs
                self.index.remove(key);
                let stale = self.ring.unlink(slot);
                self.lifecycle.destroy(stale.value);

                let value = self.lifecycle.create(key);
                let slot = self.ring.push_front(TableEntry::new(stale.key, value));
                self.index.insert(key.to_string(), slot);
                self.stats.record_refresh();
                debug!(key, "ctable: refreshed entry");
                slot
            }
            None => {
                self.stats.record_miss();
                self.admit(key)
            }
        };
        &self.entry_at(slot, key).value
    }

    // == Walk ==
    /// Calls `action` for every entry from most to least recently used.
    pub fn walk<F>(&self, mut action: F)
    where
        F: FnMut(&str, &L::Value),
    {
        for (_, entry) in self.ring.iter() {
            action(&entry.key, &entry.value);
        }
    }

    /// Iterates `(key, value)` pairs from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &L::Value)> + '_ {
        self.ring
            .iter()
            .map(|(_, entry)| (entry.key.as_str(), &entry.value))
    }

    /// Iterates full entries, metadata included, from most to least recently used.
    pub fn entries(&self) -> impl Iterator<Item = &TableEntry<L::Value>> + '_ {
        self.ring.iter().map(|(_, entry)| entry)
    }

    // == Free ==
    /// Destroys every remaining value and releases the table.
    ///
    /// Dropping the table has the same effect.
    pub fn free(self) {
        drop(self);
    }

    // == Lifecycle Access ==
    pub fn lifecycle(&self) -> &L {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut L {
        &mut self.lifecycle
    }

    /// Installs a new lifecycle and returns the previous one.
    ///
    /// Live values are kept and will be released through the new lifecycle.
    pub fn set_lifecycle(&mut self, lifecycle: L) -> L {
        std::mem::replace(&mut self.lifecycle, lifecycle)
    }

    // == Introspection ==
    /// Returns true if `key` is live, without touching its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Key of the most recently used entry.
    pub fn mru_key(&self) -> Option<&str> {
        self.ring
            .front()
            .and_then(|slot| self.ring.get(slot))
            .map(|entry| entry.key.as_str())
    }

    /// Key of the next eviction candidate.
    pub fn lru_key(&self) -> Option<&str> {
        self.ring
            .back()
            .and_then(|slot| self.ring.get(slot))
            .map(|entry| entry.key.as_str())
    }

    /// Effective capacity, after the minimum floor was applied.
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns a snapshot of the usage counters.
    pub fn stats(&self) -> TableStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Internals ==
    /// Builds and links a new entry for `key`, evicting first if full.
    fn admit(&mut self, key: &str) -> Slot {
        if self.index.len() >= self.limit {
            self.evict_oldest();
        }

        let value = self.lifecycle.create(key);
        let slot = self.ring.push_front(TableEntry::new(key.to_string(), value));
        self.index.insert(key.to_string(), slot);
        slot
    }

    /// Unlinks the least recently used entry and destroys its value.
    fn evict_oldest(&mut self) {
        let slot = match self.ring.back() {
            Some(slot) => slot,
            None => panic!(
                "ctable: interface violation: {} indexed entries but empty ring",
                self.index.len()
            ),
        };

        let entry = self.ring.unlink(slot);
        if self.index.remove(&entry.key) != Some(slot) {
            panic!(
                "ctable: interface violation: ring tail {:?} not indexed",
                entry.key
            );
        }

        debug!(
            key = %entry.key,
            hits = entry.hits,
            age_ms = entry.age_ms(),
            "ctable: evicting least recently used entry"
        );
        self.stats.record_eviction();
        self.lifecycle.destroy(entry.value);
    }

    /// Moves a hit to the front of the ring.
    fn touch(&mut self, slot: Slot, key: &str) {
        match self.ring.get_mut(slot) {
            Some(entry) if entry.key == key => entry.record_hit(),
            _ => panic!("ctable: interface violation: index slot for {:?} is stale", key),
        }
        if !self.ring.is_front(slot) {
            self.ring.move_to_front(slot);
        }
    }

    fn entry_at(&self, slot: Slot, key: &str) -> &TableEntry<L::Value> {
        match self.ring.get(slot) {
            Some(entry) if entry.key == key => entry,
            _ => panic!("ctable: interface violation: index slot for {:?} is stale", key),
        }
    }

    /// Asserts that index and ring describe the same set of entries.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.ring.len(), "index/ring size mismatch");
        assert!(self.index.len() <= self.limit, "table over its limit");
        for (slot, entry) in self.ring.iter() {
            assert_eq!(
                self.index.get(&entry.key),
                Some(&slot),
                "ring entry {:?} not indexed at its slot",
                entry.key
            );
        }
    }
}

impl<C, V, F, D> CTable<FnLifecycle<C, F, D>>
where
    F: FnMut(&str, &mut C) -> V,
    D: FnMut(V, &mut C),
{
    /// Creates a table from a constructor, a destructor and a context value.
    pub fn from_fns(limit: usize, create: F, destroy: D, context: C) -> Self {
        Self::new(limit, FnLifecycle::new(context, create, destroy))
    }
}

// == Teardown ==
impl<L: Lifecycle> Drop for CTable<L> {
    fn drop(&mut self) {
        let mut released = 0usize;
        while let Some(entry) = self.ring.pop_front() {
            self.lifecycle.destroy(entry.value);
            released += 1;
        }
        self.index.clear();

        if released > 0 {
            debug!(released, "ctable: released entries on teardown");
        }
    }
}

impl<L: Lifecycle> fmt::Debug for CTable<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CTable")
            .field("limit", &self.limit)
            .field("len", &self.index.len())
            .field("mru", &self.mru_key())
            .field("lru", &self.lru_key())
            .field("stats", &self.stats)
            .finish()
    }
}
