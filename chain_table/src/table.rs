//! [`ChainTable`] is a fixed-capacity hash map resolving collisions by separate chaining.
use std::{borrow::Borrow, fmt, fmt::Display, mem};

use crate::{chain, chain::ChainedList, hash::bucket_index};

/// The default number of buckets, a prime to spread keys whose display forms share structure.
pub const DEFAULT_BUCKET_COUNT: usize = 193;

#[derive(Clone)]
struct TableEntry<K, V> {
    key: K,
    value: V,
}

/// A hash map with a fixed number of buckets, each a singly linked chain of entries.
///
/// Keys are hashed via their [`Display`] form, so any key type with a stable textual rendering
/// works; two keys are the same entry when they compare equal with [`Eq`]. The bucket count is
/// chosen at construction and never changes: there is no rehashing, and the load factor is
/// unbounded. Lookups degrade from O(len / buckets) on average to O(len) once the table is
/// heavily overfilled, which is the documented trade-off of this design rather than a defect;
/// size the table via [`with_buckets`][Self::with_buckets] when the entry count is known.
///
/// Absence is an ordinary outcome, not an error: every lookup and removal returns an [`Option`].
pub struct ChainTable<K, V> {
    buckets: Vec<ChainedList<TableEntry<K, V>>>,
}

impl<K, V> Default for ChainTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ChainTable<K, V> {
    /// Returns an empty table with [`DEFAULT_BUCKET_COUNT`] buckets.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT)
    }

    /// Returns an empty table with exactly `buckets` buckets.
    ///
    /// The bucket count is fixed for the table's entire lifetime.
    ///
    /// Panics if `buckets` is zero.
    pub fn with_buckets(buckets: usize) -> Self {
        assert!(buckets > 0, "a chain table requires at least one bucket");
        let mut table = ChainTable {
            buckets: Vec::with_capacity(buckets),
        };
        table.buckets.resize_with(buckets, ChainedList::new);
        table
    }

    /// Returns the fixed number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of entries by walking every chain.
    ///
    /// No entry counter is maintained, so this is O(len + buckets).
    pub fn len(&self) -> usize {
        self.buckets.iter().map(ChainedList::len).sum()
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(ChainedList::is_empty)
    }

    /// Removes every entry, leaving each bucket a fresh empty chain.
    ///
    /// The bucket count is unchanged.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Returns an iterator over all entries: buckets in ascending index order, each chain head to
    /// tail.
    ///
    /// The order is deterministic for a fixed table state but has no relation to insertion order
    /// across buckets.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
        }
    }

    /// Returns an iterator over all entries in the same order as [`iter`][Self::iter], allowing
    /// mutation of values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            chain: Default::default(),
        }
    }

    /// Returns an iterator over all keys, in [`iter`][Self::iter] order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over all values, in [`iter`][Self::iter] order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over all values, in [`iter`][Self::iter] order, allowing mutation.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }
}

impl<K: Display + Eq, V> ChainTable<K, V> {
    /// Inserts `value` at `key`, returning the previous value if the key was present.
    ///
    /// On an update the existing entry's value is replaced in place, preserving the entry's
    /// position within its chain; otherwise a new entry is appended to the addressed bucket's
    /// chain. Never touches any other bucket.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = bucket_index(&key, self.buckets.len());
        let bucket = &mut self.buckets[index];
        if let Some(entry) = bucket.find_mut(|entry| entry.key == key) {
            return Some(mem::replace(&mut entry.value, value));
        }
        bucket.push_back(TableEntry { key, value });
        None
    }

    /// Returns a reference to the value stored at `key`, if any.
    ///
    /// The borrowed key form must display identically to the owned key it stands for, analogous
    /// to the hash/eq consistency required of [`Borrow`] keys in std's maps.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Display + Eq + ?Sized,
    {
        self.buckets[bucket_index(key, self.buckets.len())]
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value stored at `key`, if any.
    ///
    /// This is the handle for updating a stored value in place; since the table stores the value
    /// itself, mutations through it are visible to every subsequent lookup without re-inserting.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Display + Eq + ?Sized,
    {
        let index = bucket_index(key, self.buckets.len());
        self.buckets[index]
            .find_mut(|entry| entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    /// Returns `true` if an entry with `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Display + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes the entry stored at `key` and returns its value, if any.
    ///
    /// Removing an absent key returns `None` and leaves the table unchanged.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Display + Eq + ?Sized,
    {
        let index = bucket_index(key, self.buckets.len());
        self.buckets[index]
            .remove(|entry| entry.key.borrow() == key)
            .map(|entry| entry.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ChainTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Clone, V: Clone> Clone for ChainTable<K, V> {
    fn clone(&self) -> Self {
        ChainTable {
            buckets: self.buckets.clone(),
        }
    }
}

impl<K: Display + Eq, V> Extend<(K, V)> for ChainTable<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Display + Eq, V> FromIterator<(K, V)> for ChainTable<K, V> {
    /// Collects into a table with [`DEFAULT_BUCKET_COUNT`] buckets; later duplicate keys
    /// overwrite earlier values, as with repeated [`insert`][ChainTable::insert] calls.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = ChainTable::new();
        table.extend(iter);
        table
    }
}

/// An iterator over the entries of a [`ChainTable`].
///
/// This struct is created by the [`iter`](`ChainTable::iter`) method on [`ChainTable`].
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, ChainedList<TableEntry<K, V>>>,
    chain: chain::Iter<'a, TableEntry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                return Some((&entry.key, &entry.value));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }
}

/// An iterator over the entries of a [`ChainTable`], allowing mutation of values.
///
/// This struct is created by the [`iter_mut`](`ChainTable::iter_mut`) method on [`ChainTable`].
pub struct IterMut<'a, K, V> {
    buckets: std::slice::IterMut<'a, ChainedList<TableEntry<K, V>>>,
    chain: chain::IterMut<'a, TableEntry<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                return Some((&entry.key, &mut entry.value));
            }
            self.chain = self.buckets.next()?.iter_mut();
        }
    }
}

/// An iterator over the keys of a [`ChainTable`].
///
/// This struct is created by the [`keys`](`ChainTable::keys`) method on [`ChainTable`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| entry.0)
    }
}

/// An iterator over the values of a [`ChainTable`].
///
/// This struct is created by the [`values`](`ChainTable::values`) method on [`ChainTable`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| entry.1)
    }
}

/// An iterator over the values of a [`ChainTable`], allowing mutation.
///
/// This struct is created by the [`values_mut`](`ChainTable::values_mut`) method on
/// [`ChainTable`].
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| entry.1)
    }
}

/// An iterator moving entries out of a [`ChainTable`].
///
/// This struct is created by the `into_iter` method on [`ChainTable`].
pub struct IntoIter<K, V> {
    buckets: std::vec::IntoIter<ChainedList<TableEntry<K, V>>>,
    chain: Option<chain::IntoIter<TableEntry<K, V>>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(Iterator::next) {
                return Some((entry.key, entry.value));
            }
            self.chain = Some(self.buckets.next()?.into_iter());
        }
    }
}

impl<K, V> IntoIterator for ChainTable<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_iter(),
            chain: None,
        }
    }
}

impl<'a, K, V> IntoIterator for &'a ChainTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut ChainTable<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
