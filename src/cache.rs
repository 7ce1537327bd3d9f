use crate::consts::MAX_PROBABILITY;
use crate::core_types::DictPos;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BigramKey {
    pub prev: Option<DictPos>,
    pub word: DictPos,
}

/// Per-session memo of contextual word probabilities.
///
/// Values are pure functions of the dictionary, so an entry is written
/// once and never replaced for the lifetime of the session.
#[derive(Debug, Default)]
pub struct BigramCostCache {
    entries: HashMap<BigramKey, i16>,
    hits: u64,
    misses: u64,
}

impl BigramCostCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached probability for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: BigramKey, compute: F) -> i16
    where
        F: FnOnce() -> i16,
    {
        if let Some(&value) = self.entries.get(&key) {
            self.hits += 1;
            return value;
        }
        self.misses += 1;
        let value = compute();
        debug_assert!(
            (0..=MAX_PROBABILITY as i16).contains(&value),
            "bigram probability {} out of range",
            value
        );
        self.entries.insert(key, value);
        value
    }

    pub fn get(&self, key: &BigramKey) -> Option<i16> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
