use std::hash::Hasher;

use fnv::FnvHasher;
use lexer::RawToken;
use thiserror::Error;

use crate::value::Value;

/// Smallest table [`Index::build`] will allocate.
pub const MIN_CAPACITY: usize = 16;

/// A stored key and its typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("index is full ({capacity} slots)")]
    CapacityExceeded { capacity: usize },
}

/// 64-bit FNV-1a hash of `bytes`.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(bytes);
    hasher.finish()
}

/// Open-addressed hash table from key to [`Value`].
///
/// Slots are probed linearly starting at `fnv1a(key) % capacity`. The capacity
/// is fixed when the table is created; once every slot holds a different key,
/// inserting a new key fails with [`IndexError::CapacityExceeded`] and lookups
/// for absent keys return `None` after one full sweep.
///
/// Entries are never removed individually, so an empty slot always ends a
/// probe sequence.
#[derive(Debug)]
pub struct Index {
    slots: Vec<Option<Entry>>,
    count: usize,
}

enum Probe {
    Found(usize),
    Vacant(usize),
    Full,
}

impl Index {
    /// Creates an empty table with exactly `capacity` slots (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
            count: 0,
        }
    }

    /// Table size for `entries` keys: the next power of two at or above twice
    /// the entry count, and never below `min`.
    pub fn capacity_for(entries: usize, min: usize) -> usize {
        entries
            .saturating_mul(2)
            .max(min)
            .max(1)
            .next_power_of_two()
    }

    /// Builds a table sized for `tokens` and inserts every token in order.
    ///
    /// A key that appears more than once keeps the value from its last
    /// occurrence.
    pub fn build(tokens: &[RawToken<'_>], min_capacity: usize) -> Result<Self, IndexError> {
        let mut index = Self::with_capacity(Self::capacity_for(tokens.len(), min_capacity));
        for token in tokens {
            let previous = index.insert(token.key.to_string(), Value::from_token(token))?;
            if previous.is_some() {
                log::debug!(
                    "line {}: `{}` overrides an earlier value",
                    token.line,
                    token.key
                );
            }
        }
        Ok(index)
    }

    fn probe(&self, key: &str) -> Probe {
        let capacity = self.slots.len();
        let start = (fnv1a(key.as_bytes()) % capacity as u64) as usize;
        let mut idx = start;
        loop {
            match &self.slots[idx] {
                None => return Probe::Vacant(idx),
                Some(entry) if entry.key == key => return Probe::Found(idx),
                Some(_) => {}
            }
            idx = (idx + 1) % capacity;
            if idx == start {
                return Probe::Full;
            }
        }
    }

    /// Inserts or replaces the value for `key`.
    ///
    /// Returns the superseded value when the key was already present.
    ///
    /// # Errors
    ///
    /// [`IndexError::CapacityExceeded`] if `key` is new and no slot is free.
    pub fn insert(&mut self, key: String, value: Value) -> Result<Option<Value>, IndexError> {
        match self.probe(&key) {
            Probe::Found(idx) => {
                let entry = self.slots[idx].as_mut().map(|e| std::mem::replace(&mut e.value, value));
                Ok(entry)
            }
            Probe::Vacant(idx) => {
                self.slots[idx] = Some(Entry { key, value });
                self.count += 1;
                Ok(None)
            }
            Probe::Full => Err(IndexError::CapacityExceeded {
                capacity: self.slots.len(),
            }),
        }
    }

    /// Looks up `key`. Keys compare byte-for-byte, case-sensitively.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.probe(key) {
            Probe::Found(idx) => self.slots[idx].as_ref().map(|e| &e.value),
            Probe::Vacant(_) | Probe::Full => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total number of slots. Fixed for the lifetime of the table.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over occupied slots in table order (not key order).
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Drops every entry but keeps the capacity.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexer::{tokenize, Dialect};

    /// Finds `n` distinct keys that all start probing at the same slot.
    fn colliding_keys(capacity: usize, n: usize) -> Vec<String> {
        let target = (fnv1a(b"k0") % capacity as u64) as usize;
        (0..100_000)
            .map(|i| format!("k{}", i))
            .filter(|k| (fnv1a(k.as_bytes()) % capacity as u64) as usize == target)
            .take(n)
            .collect()
    }

    // -------------------- FNV-1a --------------------

    #[test]
    fn fnv1a_reference_vectors() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(fnv1a(b"foobar"), 0x8594_4171_f739_67e8);
    }

    // -------------------- Basic insert / get --------------------

    #[test]
    fn insert_and_get() {
        let mut idx = Index::with_capacity(16);
        assert_eq!(idx.insert("a".into(), Value::Int(1)), Ok(None));
        assert_eq!(idx.insert("b".into(), Value::from("two")), Ok(None));
        assert_eq!(idx.get("a"), Some(&Value::Int(1)));
        assert_eq!(idx.get("b"), Some(&Value::String("two".into())));
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn get_missing_on_empty_table() {
        let idx = Index::with_capacity(16);
        assert!(idx.get("nope").is_none());
        assert!(idx.is_empty());
    }

    #[test]
    fn keys_are_case_sensitive() {
        let mut idx = Index::with_capacity(16);
        idx.insert("Key".into(), Value::Int(1)).unwrap();
        assert!(idx.get("key").is_none());
        assert!(idx.get("KEY").is_none());
        assert!(idx.contains_key("Key"));
    }

    #[test]
    fn last_write_wins() {
        let mut idx = Index::with_capacity(16);
        idx.insert("k".into(), Value::from("old")).unwrap();
        let prev = idx.insert("k".into(), Value::Int(2)).unwrap();
        assert_eq!(prev, Some(Value::String("old".into())));
        assert_eq!(idx.get("k"), Some(&Value::Int(2)));
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut idx = Index::with_capacity(0);
        assert_eq!(idx.capacity(), 1);
        idx.insert("only".into(), Value::Int(1)).unwrap();
        assert_eq!(idx.get("only"), Some(&Value::Int(1)));
    }

    // -------------------- Collisions --------------------

    #[test]
    fn colliding_keys_are_all_retrievable() {
        let capacity = 16;
        let keys = colliding_keys(capacity, 6);
        assert_eq!(keys.len(), 6);

        let mut idx = Index::with_capacity(capacity);
        for (i, k) in keys.iter().enumerate() {
            idx.insert(k.clone(), Value::Int(i as i32)).unwrap();
        }
        for (i, k) in keys.iter().enumerate() {
            assert_eq!(idx.get(k), Some(&Value::Int(i as i32)), "key {}", k);
        }
    }

    #[test]
    fn probe_wraps_around_table_end() {
        let capacity = 8;
        // keys whose home slot is the last slot must wrap to slot 0
        let last: Vec<String> = (0..100_000)
            .map(|i| format!("w{}", i))
            .filter(|k| fnv1a(k.as_bytes()) % capacity as u64 == capacity as u64 - 1)
            .take(3)
            .collect();

        let mut idx = Index::with_capacity(capacity);
        for k in &last {
            idx.insert(k.clone(), Value::from(k.as_str())).unwrap();
        }
        for k in &last {
            assert_eq!(idx.get(k).and_then(Value::as_str), Some(k.as_str()));
        }
    }

    // -------------------- Capacity ceiling --------------------

    #[test]
    fn full_table_rejects_new_keys() {
        let mut idx = Index::with_capacity(4);
        for i in 0..4 {
            idx.insert(format!("k{}", i), Value::Int(i)).unwrap();
        }
        assert_eq!(
            idx.insert("extra".into(), Value::Int(9)),
            Err(IndexError::CapacityExceeded { capacity: 4 })
        );
        assert_eq!(idx.len(), 4);
    }

    #[test]
    fn full_table_still_updates_existing_keys() {
        let mut idx = Index::with_capacity(2);
        idx.insert("a".into(), Value::Int(1)).unwrap();
        idx.insert("b".into(), Value::Int(2)).unwrap();
        assert_eq!(idx.insert("a".into(), Value::Int(10)), Ok(Some(Value::Int(1))));
        assert_eq!(idx.get("a"), Some(&Value::Int(10)));
    }

    #[test]
    fn lookup_on_full_table_terminates() {
        let mut idx = Index::with_capacity(3);
        for i in 0..3 {
            idx.insert(format!("k{}", i), Value::Int(i)).unwrap();
        }
        assert!(idx.get("absent").is_none());
    }

    #[test]
    fn capacity_for_sizes() {
        assert_eq!(Index::capacity_for(0, MIN_CAPACITY), 16);
        assert_eq!(Index::capacity_for(8, MIN_CAPACITY), 16);
        assert_eq!(Index::capacity_for(9, MIN_CAPACITY), 32);
        assert_eq!(Index::capacity_for(100, 1), 256);
        assert_eq!(Index::capacity_for(0, 0), 1);
        assert_eq!(Index::capacity_for(3, 100), 128);
    }

    // -------------------- Build --------------------

    #[test]
    fn build_from_tokens() {
        let buf = b"screen_width 1920\nscreen_height 1080\nFOV 91.1\nname \"hero\"\n";
        let tokens: Vec<_> = tokenize(buf, Dialect::Permissive).collect();
        let idx = Index::build(&tokens, MIN_CAPACITY).unwrap();
        assert_eq!(idx.len(), 4);
        assert_eq!(idx.get("screen_width"), Some(&Value::Int(1920)));
        assert_eq!(idx.get("screen_height"), Some(&Value::Int(1080)));
        assert_eq!(idx.get("FOV"), Some(&Value::Float(91.1)));
        assert_eq!(idx.get("name"), Some(&Value::String("hero".into())));
    }

    #[test]
    fn build_duplicate_keys_keep_last() {
        let tokens: Vec<_> = tokenize(b"k 1\nk \"two\"\nk 3.5\n", Dialect::Permissive).collect();
        let idx = Index::build(&tokens, MIN_CAPACITY).unwrap();
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.get("k"), Some(&Value::Float(3.5)));
    }

    #[test]
    fn build_never_saturates() {
        let text: String = (0..1000).map(|i| format!("key{} {}\n", i, i)).collect();
        let tokens: Vec<_> = tokenize(text.as_bytes(), Dialect::Strict).collect();
        let idx = Index::build(&tokens, 1).unwrap();
        assert_eq!(idx.len(), 1000);
        assert!(idx.capacity() >= 2000);
        for i in 0..1000 {
            assert_eq!(idx.get(&format!("key{}", i)), Some(&Value::Int(i)));
        }
    }

    // -------------------- Iteration / clear --------------------

    #[test]
    fn iter_visits_every_entry_once() {
        let mut idx = Index::with_capacity(32);
        for i in 0..10 {
            idx.insert(format!("k{}", i), Value::Int(i)).unwrap();
        }
        let mut keys: Vec<_> = idx.iter().map(|e| e.key.clone()).collect();
        keys.sort();
        let mut expected: Vec<_> = (0..10).map(|i| format!("k{}", i)).collect();
        expected.sort();
        assert_eq!(keys, expected);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut idx = Index::with_capacity(8);
        idx.insert("a".into(), Value::Int(1)).unwrap();
        idx.clear();
        assert!(idx.is_empty());
        assert_eq!(idx.capacity(), 8);
        assert!(idx.get("a").is_none());
        idx.insert("a".into(), Value::Int(2)).unwrap();
        assert_eq!(idx.get("a"), Some(&Value::Int(2)));
    }
}
