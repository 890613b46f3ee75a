/*
 * This file is a part of nsd
 * nsd is a free and open-source concurrent in-memory folder namespace
 * maintained by the nsd contributors.
 *
 * Copyright (c) 2024, nsd contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

//! The `MAP` collaborator: a string-keyed child map.
//!
//! This container is thread-compatible, not thread-safe: all concurrency
//! safety comes from the embedding [`crate::room::Room`]. No sharding and no
//! locking of its own.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug)]
pub struct ChildMap<K, V> {
    inner: HashMap<K, V>,
}

impl<K, V> Default for ChildMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> ChildMap<K, V> {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key)
    }

    /// Inserts `value` under `key` only if `key` is absent. Returns `true`
    /// if the insert happened.
    pub fn insert_if_absent(&mut self, key: K, value: V) -> bool {
        if self.inner.contains_key(&key) {
            false
        } else {
            self.inner.insert(key, value);
            true
        }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_if_absent_rejects_duplicate_key() {
        let mut m = ChildMap::new();
        assert!(m.insert_if_absent("a", 1));
        assert!(!m.insert_if_absent("a", 2));
        assert_eq!(m.get("a"), Some(&1));
    }

    #[test]
    fn remove_returns_owned_value() {
        let mut m = ChildMap::new();
        m.insert_if_absent("a", 1);
        assert_eq!(m.remove("a"), Some(1));
        assert_eq!(m.remove("a"), None);
    }

    #[test]
    fn len_and_is_empty_track_contents() {
        let mut m: ChildMap<&str, i32> = ChildMap::new();
        assert!(m.is_empty());
        m.insert_if_absent("a", 1);
        assert_eq!(m.len(), 1);
        assert!(!m.is_empty());
    }
}
