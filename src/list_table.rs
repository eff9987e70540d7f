//! ListSymTable: the unbucketed baseline.
//!
//! Same contract as `SymTable`, backed by one singly linked chain. Every
//! operation walks the chain, so costs are O(n). Nodes live in a
//! generational `SlotMap` and link to each other by key; unlinking a node
//! removes its slot, and a stale key can never resolve to a later node.

use crate::error::PutError;
use core::fmt;
use log::trace;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
    next: Option<DefaultKey>,
}

pub struct ListSymTable<V> {
    nodes: SlotMap<DefaultKey, Node<V>>,
    first: Option<DefaultKey>,
}

impl<V> ListSymTable<V> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            first: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // Walk the chain from the head, returning the matching node's key and
    // its predecessor's.
    fn find_with_prev(&self, key: &str) -> Option<(Option<DefaultKey>, DefaultKey)> {
        let mut prev = None;
        let mut cur = self.first;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.key == key {
                return Some((prev, k));
            }
            prev = Some(k);
            cur = node.next;
        }
        None
    }

    fn find(&self, key: &str) -> Option<DefaultKey> {
        self.find_with_prev(key).map(|(_, k)| k)
    }

    /// Bind `key` to `value` at the head of the chain. Fails with
    /// `DuplicateKey` if already bound, or `OutOfMemory` if the key copy
    /// cannot be allocated; either way the table is unchanged.
    pub fn put(&mut self, key: &str, value: V) -> Result<(), PutError> {
        if self.find(key).is_some() {
            return Err(PutError::DuplicateKey);
        }
        let mut owned = String::new();
        owned.try_reserve_exact(key.len())?;
        owned.push_str(key);

        let k = self.nodes.insert(Node {
            key: owned,
            value,
            next: self.first,
        });
        self.first = Some(k);
        trace!("list put {key:?} (len {})", self.len());
        Ok(())
    }

    pub fn replace(&mut self, key: &str, value: V) -> Option<V> {
        self.get_mut(key)
            .map(|slot| core::mem::replace(slot, value))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(|k| &self.nodes[k].value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.find(key)?;
        Some(&mut self.nodes[k].value)
    }

    /// Unlink the node bound to `key` and return its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let (prev, k) = self.find_with_prev(key)?;
        let node = self.nodes.remove(k)?;
        match prev {
            None => self.first = node.next,
            Some(p) => self.nodes[p].next = node.next,
        }
        trace!("list remove {key:?} (len {})", self.len());
        Some(node.value)
    }

    /// Call `visit` once per binding, head (newest) first.
    pub fn map<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V),
    {
        for (key, value) in self.iter() {
            visit(key, value);
        }
    }

    pub fn map_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&str, &mut V),
    {
        let mut cur = self.first;
        while let Some(k) = cur {
            let node = &mut self.nodes[k];
            visit(&node.key, &mut node.value);
            cur = node.next;
        }
    }

    pub fn iter(&self) -> ListIter<'_, V> {
        ListIter {
            nodes: &self.nodes,
            cur: self.first,
            remaining: self.nodes.len(),
        }
    }
}

impl<V> Default for ListSymTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for ListSymTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the bindings of a `ListSymTable`, newest first.
pub struct ListIter<'a, V> {
    nodes: &'a SlotMap<DefaultKey, Node<V>>,
    cur: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, V> Iterator for ListIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cur?)?;
        self.cur = node.next;
        self.remaining -= 1;
        Some((node.key.as_str(), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for ListIter<'_, V> {}

impl<'a, V> IntoIterator for &'a ListSymTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = ListIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
