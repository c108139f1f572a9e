use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::errors::CacheError;

type DisposeFn<V> = Box<dyn FnMut(V)>;

struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A least-recently-used map holding at most `capacity` entries.
///
/// Entries live in a slab and are threaded onto an intrusive doubly linked
/// list ordered from least (`head`) to most (`tail`) recently used, so
/// promotion and eviction are O(1). Values leaving the cache through
/// eviction, replacement, [`remove`](Self::remove) or [`clear`](Self::clear)
/// are handed to the disposal callback.
pub struct LruCache<K, V> {
    capacity: usize,
    index: HashMap<K, usize>,
    slots: Vec<Option<Entry<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    dispose: Option<DisposeFn<V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Create a cache without a disposal callback. A capacity of zero is
    /// treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            index: HashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            dispose: None,
        }
    }

    /// Create a cache that invokes `dispose` on every value it drops.
    pub fn with_disposal(capacity: usize, dispose: impl FnMut(V) + 'static) -> Self {
        let mut cache = Self::new(capacity);
        cache.dispose = Some(Box::new(dispose));
        cache
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Look up `key` and promote it to most-recently-used.
    ///
    /// A missing key is an error; use [`try_get`](Self::try_get) or check
    /// [`contains_key`](Self::contains_key) first.
    pub fn get(&mut self, key: &K) -> Result<&V, CacheError> {
        let slot = *self.index.get(key).ok_or_else(|| CacheError::KeyNotFound {
            key: format!("{:?}", key),
        })?;
        self.promote(slot);
        Ok(&self.entry(slot).value)
    }

    /// Look up `key`, promoting it on a hit.
    pub fn try_get(&mut self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.promote(slot);
        Some(&self.entry(slot).value)
    }

    /// Read without touching recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entry(slot).value)
    }

    /// Insert `value` as most-recently-used.
    ///
    /// Replacing an existing key disposes the old value. Inserting a new key
    /// into a full cache evicts and disposes the least-recently-used entry.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(&slot) = self.index.get(&key) {
            let old = std::mem::replace(&mut self.entry_mut(slot).value, value);
            self.promote(slot);
            self.dispose_value(old);
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let entry = Entry {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };
        self.push_back(slot);
        self.index.insert(key, slot);
    }

    /// Remove `key`, disposing its value. Returns whether it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(slot) = self.index.remove(key) else {
            return false;
        };
        let value = self.release(slot);
        self.dispose_value(value);
        true
    }

    /// Dispose every value and empty the cache.
    pub fn clear(&mut self) {
        while self.head.is_some() {
            self.evict_lru();
        }
        self.slots.clear();
        self.free.clear();
    }

    /// Keys ordered from least to most recently used.
    pub fn keys(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let entry = self.entry(slot);
            keys.push(entry.key.clone());
            cursor = entry.next;
        }
        keys
    }

    fn evict_lru(&mut self) {
        let Some(slot) = self.head else {
            return;
        };
        let key = self.entry(slot).key.clone();
        self.index.remove(&key);
        let value = self.release(slot);
        self.dispose_value(value);
    }

    fn dispose_value(&mut self, value: V) {
        if let Some(dispose) = self.dispose.as_mut() {
            dispose(value);
        }
    }

    /// Unlink `slot` and free it, returning the stored value.
    fn release(&mut self, slot: usize) -> V {
        self.unlink(slot);
        self.free.push(slot);
        match self.slots[slot].take() {
            Some(entry) => entry.value,
            None => unreachable!("linked LRU slot {} was empty", slot),
        }
    }

    fn promote(&mut self, slot: usize) {
        if self.tail == Some(slot) {
            return;
        }
        self.unlink(slot);
        self.push_back(slot);
    }

    fn push_back(&mut self, slot: usize) {
        let old_tail = self.tail;
        {
            let entry = self.entry_mut(slot);
            entry.prev = old_tail;
            entry.next = None;
        }
        match old_tail {
            Some(tail) => self.entry_mut(tail).next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = {
            let entry = self.entry(slot);
            (entry.prev, entry.next)
        };
        match prev {
            Some(prev) => self.entry_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.entry_mut(next).prev = prev,
            None => self.tail = prev,
        }
        let entry = self.entry_mut(slot);
        entry.prev = None;
        entry.next = None;
    }

    fn entry(&self, slot: usize) -> &Entry<K, V> {
        match &self.slots[slot] {
            Some(entry) => entry,
            None => unreachable!("indexed LRU slot {} was empty", slot),
        }
    }

    fn entry_mut(&mut self, slot: usize) -> &mut Entry<K, V> {
        match &mut self.slots[slot] {
            Some(entry) => entry,
            None => unreachable!("indexed LRU slot {} was empty", slot),
        }
    }
}

impl<K, V> Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.index.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tracked(capacity: usize) -> (LruCache<u64, String>, Rc<RefCell<Vec<String>>>) {
        let disposed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&disposed);
        let cache = LruCache::with_disposal(capacity, move |v: String| sink.borrow_mut().push(v));
        (cache, disposed)
    }

    #[test]
    fn test_insert_past_capacity_evicts_first_inserted() {
        let (mut cache, disposed) = tracked(3);
        for key in 1..=4u64 {
            cache.insert(key, format!("title-{}", key));
        }

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains_key(&1));
        assert_eq!(cache.keys(), vec![2, 3, 4]);
        assert_eq!(*disposed.borrow(), vec!["title-1".to_string()]);
    }

    #[test]
    fn test_get_promotes_entry() {
        let (mut cache, disposed) = tracked(3);
        cache.insert(1, "a".to_string());
        cache.insert(2, "b".to_string());
        cache.insert(3, "c".to_string());

        assert_eq!(cache.get(&1).unwrap(), "a");
        cache.insert(4, "d".to_string());

        assert!(cache.contains_key(&1));
        assert!(!cache.contains_key(&2));
        assert_eq!(*disposed.borrow(), vec!["b".to_string()]);
        assert_eq!(cache.keys(), vec![3, 1, 4]);
    }

    #[test]
    fn test_get_missing_key_is_error() {
        let mut cache: LruCache<u64, String> = LruCache::new(2);
        let err = cache.get(&7).unwrap_err();
        assert!(matches!(err, CacheError::KeyNotFound { .. }));
        assert!(cache.try_get(&7).is_none());
    }

    #[test]
    fn test_peek_does_not_promote() {
        let mut cache = LruCache::new(2);
        cache.insert(1u64, 10);
        cache.insert(2u64, 20);
        assert_eq!(cache.peek(&1), Some(&10));
        cache.insert(3, 30);
        assert!(!cache.contains_key(&1));
    }

    #[test]
    fn test_replace_disposes_old_value_and_promotes() {
        let (mut cache, disposed) = tracked(2);
        cache.insert(1, "old".to_string());
        cache.insert(2, "other".to_string());
        cache.insert(1, "new".to_string());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(&1).map(String::as_str), Some("new"));
        assert_eq!(cache.keys(), vec![2, 1]);
        assert_eq!(*disposed.borrow(), vec!["old".to_string()]);
    }

    #[test]
    fn test_remove_and_clear_dispose() {
        let (mut cache, disposed) = tracked(4);
        cache.insert(1, "a".to_string());
        cache.insert(2, "b".to_string());
        cache.insert(3, "c".to_string());

        assert!(cache.remove(&2));
        assert!(!cache.remove(&2));
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(
            *disposed.borrow(),
            vec!["b".to_string(), "a".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_slots_are_reused_after_eviction() {
        let mut cache = LruCache::new(2);
        for key in 0..100u64 {
            cache.insert(key, key * 2);
        }
        assert_eq!(cache.len(), 2);
        assert!(cache.slots.len() <= 3);
        assert_eq!(cache.try_get(&99), Some(&198));
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut cache = LruCache::new(0);
        cache.insert(1u64, 1);
        cache.insert(2u64, 2);
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.keys(), vec![2]);
    }
}
