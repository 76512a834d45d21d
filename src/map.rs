//! Scoped changes to one entry of a map.
//!
//! The scope functions here lend the whole map to the caller's closure, so
//! the action can touch any entry; only the named key is captured and
//! restored. Restoration never disturbs the relative order of other
//! entries in maps that have one: writing an existing key updates it in
//! place, and removal uses order-preserving deletion.

use crate::dup::{CopyOptions, Duplicate};
use crate::slot::Slot;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Keyed probe/write/clear access to a map's entries.
pub trait MapLike {
    type Key;
    type Value;

    /// Read the entry at `key`, or `None` if the key is not present.
    fn probe_entry(&self, key: &Self::Key) -> Option<Self::Value>;

    /// Set the entry at `key`, updating an existing entry in place.
    fn write_entry(&mut self, key: &Self::Key, value: Self::Value);

    /// Remove the entry at `key` without disturbing the order of other
    /// entries; a no-op if the key is not present.
    fn clear_entry(&mut self, key: &Self::Key);
}

impl<K: Clone + Eq + Hash, V: Clone> MapLike for HashMap<K, V> {
    type Key = K;
    type Value = V;

    fn probe_entry(&self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }

    fn write_entry(&mut self, key: &K, value: V) {
        match self.get_mut(key) {
            Some(entry) => *entry = value,
            None => {
                self.insert(key.clone(), value);
            }
        }
    }

    fn clear_entry(&mut self, key: &K) {
        self.remove(key);
    }
}

impl<K: Clone + Ord, V: Clone> MapLike for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn probe_entry(&self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }

    fn write_entry(&mut self, key: &K, value: V) {
        match self.get_mut(key) {
            Some(entry) => *entry = value,
            None => {
                self.insert(key.clone(), value);
            }
        }
    }

    fn clear_entry(&mut self, key: &K) {
        self.remove(key);
    }
}

impl<K: Clone + Eq + Hash, V: Clone> MapLike for IndexMap<K, V> {
    type Key = K;
    type Value = V;

    fn probe_entry(&self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }

    fn write_entry(&mut self, key: &K, value: V) {
        // IndexMap keeps an existing key's position on insert.
        match self.get_mut(key) {
            Some(entry) => *entry = value,
            None => {
                self.insert(key.clone(), value);
            }
        }
    }

    fn clear_entry(&mut self, key: &K) {
        // swap_remove would reorder the tail.
        self.shift_remove(key);
    }
}

/// One key of a borrowed map, viewed as a [`Slot`].
pub struct MapEntry<'a, M: MapLike> {
    map: &'a mut M,
    key: M::Key,
}

impl<'a, M: MapLike> MapEntry<'a, M> {
    pub fn new(map: &'a mut M, key: M::Key) -> Self {
        MapEntry { map, key }
    }
}

impl<M: MapLike> Slot for MapEntry<'_, M> {
    type Value = M::Value;

    fn probe(&mut self) -> Option<M::Value> {
        self.map.probe_entry(&self.key)
    }

    fn write(&mut self, value: M::Value) {
        self.map.write_entry(&self.key, value);
    }

    fn clear(&mut self) {
        self.map.clear_entry(&self.key);
    }
}

/// Set `map[key]` to `value` for the duration of `f`, restoring the
/// entry's prior state (value or absence) after.
pub fn set<M, R>(map: &mut M, key: M::Key, value: M::Value, f: impl FnOnce(&mut M) -> R) -> R
where
    M: MapLike,
{
    let mut slot = MapEntry::new(map, key);
    crate::scope::set(&mut slot, value, |s| f(&mut *s.map))
}

/// Remove `map[key]` for the duration of `f`, restoring the entry's prior
/// state after. A missing key is tolerated on entry.
pub fn unset<M, R>(map: &mut M, key: M::Key, f: impl FnOnce(&mut M) -> R) -> R
where
    M: MapLike,
{
    let mut slot = MapEntry::new(map, key);
    crate::scope::unset(&mut slot, |s| f(&mut *s.map))
}

/// Leave `map[key]` alone on entry, but restore its prior state after `f`
/// regardless of what `f` did to it.
pub fn rollback<M, R>(map: &mut M, key: M::Key, f: impl FnOnce(&mut M) -> R) -> R
where
    M: MapLike,
{
    let mut slot = MapEntry::new(map, key);
    crate::scope::rollback(&mut slot, |s| f(&mut *s.map))
}

/// Like [`rollback`], duplicating the captured value per `opts`.
pub fn rollback_with<M, R>(
    map: &mut M,
    key: M::Key,
    opts: CopyOptions,
    f: impl FnOnce(&mut M) -> R,
) -> R
where
    M: MapLike,
    M::Value: Duplicate,
{
    let mut slot = MapEntry::new(map, key);
    crate::scope::rollback_with(&mut slot, opts, |s| f(&mut *s.map))
}
