//! Top-N high scores persisted as a JSON array under a single key.

use std::collections::HashMap;

use tracing::warn;

use crate::error::FinderResult;

pub const HIGH_SCORES_KEY: &str = "highScores";

/// Opaque string key-value persistence (localStorage in the browser).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> FinderResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> FinderResult<()>;
}

/// In-memory store for native hosts, tests, and browsers without localStorage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> FinderResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> FinderResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

pub struct HighScoreStore<K> {
    store: K,
    capacity: usize,
}

impl<K: KeyValueStore> HighScoreStore<K> {
    pub fn new(store: K, capacity: usize) -> Self {
        Self { store, capacity }
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    /// Insert one score, keep the best `capacity`, persist.
    pub fn record(&mut self, score: u64) {
        let mut scores = self.load();
        scores.push(score);
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(self.capacity);
        match serde_json::to_string(&scores) {
            Ok(blob) => {
                if let Err(err) = self.store.set_item(HIGH_SCORES_KEY, &blob) {
                    warn!(%err, score, "failed to persist high scores");
                }
            }
            Err(err) => warn!(%err, "failed to serialize high scores"),
        }
    }

    /// Persisted list, best first; empty when nothing (valid) is stored.
    pub fn top_n(&self) -> Vec<u64> {
        let mut scores = self.load();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(self.capacity);
        scores
    }

    fn load(&self) -> Vec<u64> {
        let blob = match self.store.get_item(HIGH_SCORES_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(%err, "failed to read high scores");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<u64>>(&blob) {
            Ok(scores) => scores,
            Err(err) => {
                warn!(%err, "malformed high score data, starting fresh");
                Vec::new()
            }
        }
    }
}
