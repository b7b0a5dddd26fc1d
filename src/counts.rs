//! Insertion-ordered occurrence counter.
//!
//! Both report sections list their rows in the order a key was first seen, so
//! a plain `HashMap` is not enough. Entries live in a `Vec` and a side index
//! maps each key to its slot.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct Counts<K> {
    index: HashMap<K, usize>,
    entries: Vec<(K, u64)>,
}

impl<K> Default for Counts<K> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Counts<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` occurrences of `key`, appending it if it was never seen.
    pub fn add(&mut self, key: K, n: u64) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += n,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    pub fn get(&self, key: &K) -> Option<u64> {
        self.index.get(key).map(|&slot| self.entries[slot].1)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, n)| (k, *n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}
