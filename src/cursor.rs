//! External key cursor and the borrowing iterators built on it.
//!
//! `KeyCursor` does not borrow its table between calls: each call takes the
//! table explicitly, the same way a handle is resolved against its map. That
//! leaves the caller free to mutate the table between calls, so every call
//! first checks that the table is the one the cursor came from and that it
//! has not been mutated since. A stale cursor fails with an error; it never
//! reads through dangling positions.
//!
//! Traversal order: ascending bucket index, then chain order within a
//! bucket (insertion order, with overwritten keys moved to the end).

use crate::chain::ChainCursor;
use crate::error::TableError;
use crate::release::{Destructor, DropValue};
use crate::table::{ChainTable, Entry, TableId};
use core::iter::FusedIterator;

#[derive(Clone, Debug)]
pub struct KeyCursor {
    table: TableId,
    version: u64,
    bucket: usize,
    inner: ChainCursor,
    exhausted: bool,
}

impl KeyCursor {
    pub(crate) fn new<V, D: Destructor<V>>(table: &ChainTable<V, D>) -> Self {
        // Capacity is never zero, so bucket 0 always exists.
        let inner = table.chains()[0].cursor();
        Self {
            table: table.id(),
            version: table.version(),
            bucket: 0,
            inner,
            exhausted: false,
        }
    }

    /// Bucket currently being walked.
    pub fn bucket(&self) -> usize {
        self.bucket
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Whether another key remains. Looks ahead into later buckets without
    /// moving the cursor.
    pub fn has_next<V, D: Destructor<V>>(&self, table: &ChainTable<V, D>) -> Result<bool, TableError> {
        self.check(table)?;
        Ok(self.peek(table))
    }

    /// Next key, or `Ok(None)` once every bucket is exhausted. Further calls
    /// keep returning `Ok(None)`.
    pub fn next<'t, V, D: Destructor<V>>(
        &mut self,
        table: &'t ChainTable<V, D>,
    ) -> Result<Option<&'t str>, TableError> {
        self.check(table)?;
        Ok(self.advance(table).map(|e| &*e.key))
    }

    /// Like `next`, also borrowing the value.
    pub fn next_entry<'t, V, D: Destructor<V>>(
        &mut self,
        table: &'t ChainTable<V, D>,
    ) -> Result<Option<(&'t str, &'t V)>, TableError> {
        self.check(table)?;
        Ok(self.advance(table).map(|e| (&*e.key, &e.value)))
    }

    fn check<V, D: Destructor<V>>(&self, table: &ChainTable<V, D>) -> Result<(), TableError> {
        if table.id() != self.table {
            return Err(TableError::WrongTable);
        }
        if table.version() != self.version {
            return Err(TableError::Invalidated);
        }
        Ok(())
    }

    fn peek<V, D: Destructor<V>>(&self, table: &ChainTable<V, D>) -> bool {
        if self.exhausted {
            return false;
        }
        self.inner.peek(table.arena()).is_some()
            || table.chains()[self.bucket + 1..]
                .iter()
                .any(|c| !c.is_empty())
    }

    // Unchecked step; callers validate the table first.
    fn advance<'t, V, D: Destructor<V>>(&mut self, table: &'t ChainTable<V, D>) -> Option<&'t Entry<V>> {
        if self.exhausted {
            return None;
        }
        loop {
            if let Some(entry) = self.inner.advance(table.arena()) {
                return Some(entry);
            }
            match table.chains().get(self.bucket + 1) {
                Some(chain) => {
                    self.bucket += 1;
                    self.inner = chain.cursor();
                }
                None => {
                    self.exhausted = true;
                    return None;
                }
            }
        }
    }
}

/// Borrowing iterator over `(key, value)` pairs.
///
/// Holds `&ChainTable`, so the table cannot change underneath it and no
/// validity check is needed.
pub struct Iter<'a, V, D: Destructor<V> = DropValue> {
    table: &'a ChainTable<V, D>,
    cursor: KeyCursor,
    remaining: usize,
}

impl<'a, V, D: Destructor<V>> Iter<'a, V, D> {
    pub(crate) fn new(table: &'a ChainTable<V, D>) -> Self {
        Self {
            table,
            cursor: KeyCursor::new(table),
            remaining: table.len(),
        }
    }
}

impl<'a, V, D: Destructor<V>> Iterator for Iter<'a, V, D> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor.advance(self.table)?;
        self.remaining -= 1;
        Some((&*entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V, D: Destructor<V>> ExactSizeIterator for Iter<'_, V, D> {}
impl<V, D: Destructor<V>> FusedIterator for Iter<'_, V, D> {}

/// Borrowing iterator over keys.
pub struct Keys<'a, V, D: Destructor<V> = DropValue> {
    inner: Iter<'a, V, D>,
}

impl<'a, V, D: Destructor<V>> Keys<'a, V, D> {
    pub(crate) fn new(table: &'a ChainTable<V, D>) -> Self {
        Self {
            inner: Iter::new(table),
        }
    }
}

impl<'a, V, D: Destructor<V>> Iterator for Keys<'a, V, D> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V, D: Destructor<V>> ExactSizeIterator for Keys<'_, V, D> {}
impl<V, D: Destructor<V>> FusedIterator for Keys<'_, V, D> {}
