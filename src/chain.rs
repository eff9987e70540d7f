//! Chain: the entries of one bucket.
//!
//! A chain owns its entries outright; an entry leaves the chain only by
//! being moved out (`unlink`, `drain`) or dropped with it. The head of
//! the chain is the most recently linked entry, stored at the end of the
//! backing vector so that linking at the head is an amortized O(1) push.

use std::collections::TryReserveError;
use std::iter::Rev;
use std::slice;

/// One binding: an owned copy of the key and the caller's value.
#[derive(Debug)]
pub(crate) struct Entry<V> {
    key: String,
    value: V,
}

impl<V> Entry<V> {
    /// Copy `key` into a fresh allocation. Fails without side effects when
    /// the copy cannot be allocated.
    pub(crate) fn try_new(key: &str, value: V) -> Result<Self, TryReserveError> {
        let mut owned = String::new();
        owned.try_reserve_exact(key.len())?;
        owned.push_str(key);
        Ok(Self { key: owned, value })
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn parts_mut(&mut self) -> (&str, &mut V) {
        (&self.key, &mut self.value)
    }

    pub(crate) fn into_value(self) -> V {
        self.value
    }
}

#[derive(Debug)]
pub(crate) struct Chain<V> {
    entries: Vec<Entry<V>>,
}

impl<V> Chain<V> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    // Index into `entries`, searching from the head.
    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().rposition(|e| e.key == key)
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        self.position(key).map(|i| &self.entries[i].value)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.position(key).map(move |i| &mut self.entries[i].value)
    }

    /// Make room for `additional` more entries without linking anything.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.entries.try_reserve_exact(additional)
    }

    /// Link `entry` at the head. The caller reserves space first; this
    /// never allocates when it has.
    pub(crate) fn link_front(&mut self, entry: Entry<V>) {
        self.entries.push(entry);
    }

    /// Unlink and return the entry bound to `key`. Remaining entries keep
    /// their relative order.
    pub(crate) fn unlink(&mut self, key: &str) -> Option<Entry<V>> {
        let i = self.position(key)?;
        Some(self.entries.remove(i))
    }

    /// Move every entry out, oldest first, leaving the chain empty.
    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, Entry<V>> {
        self.entries.drain(..)
    }

    /// Head-to-tail traversal.
    pub(crate) fn iter(&self) -> Rev<slice::Iter<'_, Entry<V>>> {
        self.entries.iter().rev()
    }

    pub(crate) fn iter_mut(&mut self) -> Rev<slice::IterMut<'_, Entry<V>>> {
        self.entries.iter_mut().rev()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
