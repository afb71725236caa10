//! ChainTable: fixed-capacity, string-keyed hash table with separate chaining.

use crate::chain::{Arena, Chain};
use crate::config::TableConfig;
use crate::cursor::{Iter, KeyCursor, Keys};
use crate::error::TableError;
use crate::hash::{bucket_index, polynomial_hash};
use crate::reentrancy::DebugReentrancy;
use crate::release::{Destructor, DropValue};
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use log::{debug, trace};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a table. Cursors record it to reject use
/// against a table they were not created from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TableId(u64);

impl TableId {
    fn next() -> Self {
        TableId(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub(crate) key: Box<str>,
    pub(crate) value: V,
}

/// Bucket layout and entry storage. Kept apart from the destructor and the
/// reentrancy tracker so guarded methods can borrow each independently.
struct Store<V> {
    chains: Vec<Chain>,
    entries: Arena<Entry<V>>,
    multiplier: i32,
    // Bumped on every structural mutation; cursors compare against it.
    version: u64,
}

impl<V> Store<V> {
    fn bucket_of(&self, key: &str) -> usize {
        bucket_index(polynomial_hash(key, self.multiplier), self.chains.len())
    }

    fn find(&self, key: &str) -> Option<&Entry<V>> {
        let b = self.bucket_of(key);
        self.chains[b].iter(&self.entries).find(|e| &*e.key == key)
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut Entry<V>> {
        let b = self.bucket_of(key);
        self.chains[b].find_mut(&mut self.entries, |e| &*e.key == key)
    }

    fn unlink(&mut self, key: &str) -> Option<Entry<V>> {
        let b = self.bucket_of(key);
        let pos = self.chains[b].position(&self.entries, |e| &*e.key == key)?;
        let entry = self.chains[b].remove_at(&mut self.entries, pos)?;
        self.touch();
        Some(entry)
    }

    fn append(&mut self, entry: Entry<V>) {
        let b = self.bucket_of(&entry.key);
        self.chains[b].push_back(&mut self.entries, entry);
        self.touch();
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

/// A string-keyed hash table with a fixed number of buckets.
///
/// Keys are copied into the table. Values are owned by the table and handed
/// to the destructor `D` exactly once when they leave it (remove, overwrite,
/// clear, teardown), unless `take` returns them to the caller.
///
/// There is no rehashing: the bucket count chosen at construction holds for
/// the table's whole life, and with many keys per bucket every operation
/// degrades to a linear scan of that bucket.
pub struct ChainTable<V, D: Destructor<V> = DropValue> {
    store: Store<V>,
    destructor: D,
    id: TableId,
    reentrancy: DebugReentrancy,
}

impl<V> ChainTable<V> {
    /// Table with `capacity` buckets whose values are simply dropped.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig::new(capacity), DropValue)
    }
}

impl<V, D: Destructor<V>> ChainTable<V, D> {
    pub fn with_destructor(destructor: D, capacity: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig::new(capacity), destructor)
    }

    pub fn with_config(config: TableConfig, destructor: D) -> Result<Self, TableError> {
        config.validate()?;
        let mut chains = Vec::new();
        chains.try_reserve_exact(config.capacity)?;
        chains.resize_with(config.capacity, Chain::new);

        let id = TableId::next();
        debug!(
            "table {:?}: created with {} buckets (multiplier {})",
            id, config.capacity, config.multiplier
        );
        Ok(Self {
            store: Store {
                chains,
                entries: Arena::new(),
                multiplier: config.multiplier,
                version: 0,
            },
            destructor,
            id,
            reentrancy: DebugReentrancy::new(),
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.store.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.entries.is_empty()
    }

    /// Number of buckets; fixed at construction.
    pub fn capacity(&self) -> usize {
        self.store.chains.len()
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    /// Bucket that `key` is stored in (or would be).
    pub fn bucket_index(&self, key: &str) -> usize {
        self.store.bucket_of(key)
    }

    /// Number of entries chained in bucket `index`; `None` past the end.
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        self.store.chains.get(index).map(Chain::len)
    }

    /// Store `value` under `key`.
    ///
    /// An existing entry for `key` is removed first and its value handed to
    /// the destructor; the new entry goes to the end of its bucket. On
    /// `Allocation` failure the table is unchanged and `value` is dropped.
    pub fn insert(&mut self, key: &str, value: V) -> Result<(), TableError> {
        let _g = self.reentrancy.enter();
        let owned = copy_key(key)?;
        if let Some(old) = self.store.unlink(key) {
            trace!("table {:?}: overwriting {:?}", self.id, key);
            self.destructor.destroy(old.value);
        } else {
            trace!("table {:?}: inserting {:?}", self.id, key);
        }
        self.store.append(Entry { key: owned, value });
        Ok(())
    }

    /// Remove the entry for `key`, passing its value to the destructor.
    pub fn remove(&mut self, key: &str) -> Result<(), TableError> {
        let _g = self.reentrancy.enter();
        let entry = self.store.unlink(key).ok_or(TableError::NotFound)?;
        trace!("table {:?}: removed {:?}", self.id, key);
        self.destructor.destroy(entry.value);
        Ok(())
    }

    /// Remove the entry for `key` and return its value without running the
    /// destructor.
    pub fn take(&mut self, key: &str) -> Option<V> {
        let _g = self.reentrancy.enter();
        let entry = self.store.unlink(key)?;
        trace!("table {:?}: took {:?}", self.id, key);
        Some(entry.value)
    }

    /// Borrow the value stored under `key`. Ownership stays with the table.
    pub fn get(&self, key: &str) -> Option<&V> {
        let _g = self.reentrancy.enter();
        self.store.find(key).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let _g = self.reentrancy.enter();
        self.store.find_mut(key).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        let _g = self.reentrancy.enter();
        self.store.find(key).is_some()
    }

    /// Release every value through the destructor. Buckets are kept.
    pub fn clear(&mut self) {
        let released = self.release_all();
        self.store.touch();
        debug!("table {:?}: cleared {} entries", self.id, released);
    }

    /// Tear the table down, releasing every remaining value. Dropping the
    /// table does the same.
    pub fn destroy(self) {
        drop(self);
    }

    /// Detached cursor positioned before the first key.
    pub fn cursor(&self) -> KeyCursor {
        KeyCursor::new(self)
    }

    pub fn keys(&self) -> Keys<'_, V, D> {
        Keys::new(self)
    }

    pub fn iter(&self) -> Iter<'_, V, D> {
        Iter::new(self)
    }

    pub(crate) fn version(&self) -> u64 {
        self.store.version
    }

    pub(crate) fn chains(&self) -> &[Chain] {
        &self.store.chains
    }

    pub(crate) fn arena(&self) -> &Arena<Entry<V>> {
        &self.store.entries
    }

    // Bucket order, then chain order.
    fn release_all(&mut self) -> usize {
        let _g = self.reentrancy.enter();
        let mut released = 0;
        for chain in &mut self.store.chains {
            while let Some(entry) = chain.pop_front(&mut self.store.entries) {
                self.destructor.destroy(entry.value);
                released += 1;
            }
        }
        released
    }
}

impl<V, D: Destructor<V>> Drop for ChainTable<V, D> {
    fn drop(&mut self) {
        let released = self.release_all();
        debug!("table {:?}: destroyed, released {} values", self.id, released);
    }
}

impl<V: fmt::Debug, D: Destructor<V>> fmt::Debug for ChainTable<V, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V, D: Destructor<V>> IntoIterator for &'a ChainTable<V, D> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn copy_key(key: &str) -> Result<Box<str>, TableError> {
    let mut owned = String::new();
    owned.try_reserve_exact(key.len())?;
    owned.push_str(key);
    Ok(owned.into_boxed_str())
}
