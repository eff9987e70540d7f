//! SymTable: string keys to caller values, chained over a prime-sized bucket
//! array that grows through `BUCKET_COUNTS`.

use crate::chain::{Chain, Entry};
use crate::error::{AllocError, PutError};
use crate::hash::bucket_index;
use core::fmt;
use log::{debug, trace, warn};
use std::collections::TryReserveError;
use std::iter::Rev;
use std::slice;

/// Bucket counts the table moves through as it fills. Growth stops at the
/// last one; past that, chains just get longer.
pub const BUCKET_COUNTS: [usize; 8] = [509, 1021, 2039, 4093, 8191, 16381, 32749, 65521];

/// A symbol table: a set of bindings from owned string keys to values of
/// type `V`.
///
/// Keys are copied on `put`, so callers may reuse or free their buffers as
/// soon as the call returns. Values are moved in and handed back by
/// `replace`/`remove`; the table never clones or inspects them. To bind
/// shared or externally owned data, use `&T`, `Rc<T>` or similar as `V`.
///
/// Single-threaded: the table carries no synchronization. Traversal
/// borrows the table, so it cannot be mutated mid-iteration.
pub struct SymTable<V> {
    buckets: Vec<Chain<V>>,
    len: usize,
}

fn empty_buckets<V>(count: usize) -> Vec<Chain<V>> {
    let mut buckets = Vec::with_capacity(count);
    buckets.resize_with(count, Chain::new);
    buckets
}

fn try_empty_buckets<V>(count: usize) -> Result<Vec<Chain<V>>, TryReserveError> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(count)?;
    buckets.resize_with(count, Chain::new);
    Ok(buckets)
}

// Smallest scheduled count >= `min`, clamped to the largest.
fn scheduled_count(min: usize) -> usize {
    let last = BUCKET_COUNTS[BUCKET_COUNTS.len() - 1];
    BUCKET_COUNTS
        .iter()
        .copied()
        .find(|&c| c >= min)
        .unwrap_or(last)
}

impl<V> SymTable<V> {
    /// Empty table at the smallest bucket count. Aborts on allocation
    /// failure like `Vec::with_capacity`; see `try_new` for a fallible
    /// constructor.
    pub fn new() -> Self {
        Self {
            buckets: empty_buckets(BUCKET_COUNTS[0]),
            len: 0,
        }
    }

    /// Empty table at the smallest bucket count, or `AllocError` if the
    /// bucket array cannot be allocated.
    pub fn try_new() -> Result<Self, AllocError> {
        Ok(Self {
            buckets: try_empty_buckets(BUCKET_COUNTS[0])?,
            len: 0,
        })
    }

    /// Empty table starting at the smallest scheduled bucket count that is
    /// at least `min` (the largest one if `min` exceeds them all).
    pub fn with_min_buckets(min: usize) -> Self {
        Self {
            buckets: empty_buckets(scheduled_count(min)),
            len: 0,
        }
    }

    /// Number of bindings. Maintained on every insert and removal.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count. Only ever grows.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn chain(&self, key: &str) -> &Chain<V> {
        &self.buckets[bucket_index(key, self.buckets.len())]
    }

    #[inline]
    fn chain_mut(&mut self, key: &str) -> &mut Chain<V> {
        let i = bucket_index(key, self.buckets.len());
        &mut self.buckets[i]
    }

    /// Bind `key` to `value`.
    ///
    /// Fails with `DuplicateKey` if `key` is already bound (the existing
    /// value is kept), or `OutOfMemory` if the key copy or chain slot cannot
    /// be allocated. On failure the table is unchanged and `value` is
    /// dropped.
    pub fn put(&mut self, key: &str, value: V) -> Result<(), PutError> {
        let chain = self.chain_mut(key);
        if chain.contains(key) {
            return Err(PutError::DuplicateKey);
        }
        let entry = Entry::try_new(key, value)?;
        chain.try_reserve(1)?;
        chain.link_front(entry);
        self.len += 1;
        trace!("put {key:?} (len {})", self.len);

        if self.len > self.buckets.len() {
            self.grow();
        }
        Ok(())
    }

    /// Swap in `value` for the binding of `key`, returning the previous
    /// value, or `None` (table unchanged, `value` dropped) if `key` is not
    /// bound.
    pub fn replace(&mut self, key: &str, value: V) -> Option<V> {
        self.get_mut(key)
            .map(|slot| core::mem::replace(slot, value))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.chain(key).contains(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key).get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.chain_mut(key).get_mut(key)
    }

    /// Unbind `key`, dropping the table's copy of it and returning the
    /// value. The bucket count is left as is.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let entry = self.chain_mut(key).unlink(key)?;
        self.len -= 1;
        trace!("remove {key:?} (len {})", self.len);
        Some(entry.into_value())
    }

    /// Drop every binding. The bucket count is left as is.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
    }

    /// Call `visit` once per binding, in bucket order and head-first within
    /// each bucket.
    pub fn map<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V),
    {
        for (key, value) in self.iter() {
            visit(key, value);
        }
    }

    /// Like `map`, with mutable access to each value.
    pub fn map_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&str, &mut V),
    {
        for (key, value) in self.iter_mut() {
            visit(key, value);
        }
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            remaining: self.len,
            buckets: self.buckets.iter_mut(),
            chain: None,
        }
    }

    // Move to the next scheduled bucket count, if any. Allocation failure
    // abandons the attempt and leaves the current buckets in place.
    fn grow(&mut self) {
        let old = self.buckets.len();
        let Some(new) = BUCKET_COUNTS.iter().copied().find(|&c| c > old) else {
            return;
        };
        match self.try_rehash(new) {
            Ok(()) => debug!("grew buckets {old} -> {new} at {} entries", self.len),
            Err(e) => warn!("growth {old} -> {new} abandoned, keeping {old} buckets: {e}"),
        }
    }

    // Every allocation happens before the first entry moves, so an error
    // return leaves the table untouched.
    fn try_rehash(&mut self, count: usize) -> Result<(), TryReserveError> {
        let mut fresh = try_empty_buckets(count)?;

        let mut sizes: Vec<usize> = Vec::new();
        sizes.try_reserve_exact(count)?;
        sizes.resize(count, 0);
        for entry in self.buckets.iter().flat_map(|c| c.iter()) {
            sizes[bucket_index(entry.key(), count)] += 1;
        }
        for (chain, &n) in fresh.iter_mut().zip(&sizes) {
            if n > 0 {
                chain.try_reserve(n)?;
            }
        }

        for chain in &mut self.buckets {
            for entry in chain.drain() {
                let i = bucket_index(entry.key(), count);
                fresh[i].link_front(entry);
            }
        }
        self.buckets = fresh;
        Ok(())
    }

    /// Panics unless every entry sits in the bucket its key hashes to, no
    /// key appears twice and `len` matches the chain lengths.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let count = self.buckets.len();
        let mut seen = std::collections::HashSet::new();
        let mut total = 0;
        for (i, chain) in self.buckets.iter().enumerate() {
            total += chain.len();
            for entry in chain.iter() {
                assert_eq!(bucket_index(entry.key(), count), i, "misplaced {:?}", entry.key());
                assert!(seen.insert(entry.key().to_string()), "duplicate {:?}", entry.key());
            }
        }
        assert_eq!(total, self.len, "len out of sync with chains");
    }
}

impl<V> Default for SymTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for SymTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(key, &value)` for every binding in a `SymTable`.
pub struct Iter<'a, V> {
    buckets: slice::Iter<'a, Chain<V>>,
    chain: Option<Rev<slice::Iter<'a, Entry<V>>>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(|c| c.next()) {
                self.remaining -= 1;
                return Some((entry.key(), entry.value()));
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// Iterator over `(key, &mut value)` for every binding in a `SymTable`.
pub struct IterMut<'a, V> {
    buckets: slice::IterMut<'a, Chain<V>>,
    chain: Option<Rev<slice::IterMut<'a, Entry<V>>>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(|c| c.next()) {
                self.remaining -= 1;
                return Some(entry.parts_mut());
            }
            self.chain = Some(self.buckets.next()?.iter_mut());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

impl<'a, V> IntoIterator for &'a SymTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut SymTable<V> {
    type Item = (&'a str, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
