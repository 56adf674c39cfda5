use std::collections::HashMap;
use std::hash::Hash;

/// A keyed fetch that may miss.
pub trait Lookup {
    type Key: Eq + Hash + Clone;
    type Value: Clone;

    fn lookup(&mut self, key: &Self::Key) -> Option<Self::Value>;
}

/// Memoizing wrapper around a lookup.
///
/// Found values are served from memory on repeat fetches. A miss passes
/// through every time and is never cached, so a key that appears later in
/// the underlying lookup is still found. Counters track what was served
/// locally and what reached the inner lookup.
pub struct Memoized<L: Lookup> {
    inner: L,
    cache: HashMap<L::Key, L::Value>,
    hits: u64,
    misses: u64,
}

impl<L: Lookup> Memoized<L> {
    pub fn new(inner: L) -> Self {
        Memoized {
            inner,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Fetches served from memory.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Fetches that reached the inner lookup.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of values currently held.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: Lookup> Lookup for Memoized<L> {
    type Key = L::Key;
    type Value = L::Value;

    fn lookup(&mut self, key: &Self::Key) -> Option<Self::Value> {
        if let Some(value) = self.cache.get(key) {
            self.hits += 1;
            return Some(value.clone());
        }
        self.misses += 1;
        let value = self.inner.lookup(key)?;
        self.cache.insert(key.clone(), value.clone());
        Some(value)
    }
}
