//! Accumulated reward counts keyed by canonical item key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::reward::{Rarity, RewardItem};

/// Reward counts for a batch, or for a player's whole history.
///
/// Keys are ordered so rendering and serialization are stable. Serializes as
/// a plain JSON object, e.g. `{"coins":2,"material_7":1}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewardTally {
    counts: BTreeMap<String, u64>,
}

impl RewardTally {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one generated item under its canonical key.
    pub fn add(&mut self, item: &RewardItem) {
        self.add_count(item.key(), item.amount());
    }

    /// Add `amount` to a raw key, inserting it if absent.
    pub fn add_count(&mut self, key: impl Into<String>, amount: u64) {
        let entry = self.counts.entry(key.into()).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Merge every count from `other` into this tally.
    pub fn merge(&mut self, other: &RewardTally) {
        for (key, amount) in &other.counts {
            self.add_count(key.as_str(), *amount);
        }
    }

    /// Count recorded for `key`, or 0.
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Iterate over `(key, count)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total_items(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of units of the given rarity.
    pub fn rarity_count(&self, rarity: Rarity) -> u64 {
        let prefix = format!("{rarity}_");
        self.counts
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(_, v)| *v)
            .sum()
    }

    /// Number of units of any rarity.
    pub fn unit_count(&self) -> u64 {
        Rarity::ALL.iter().map(|r| self.rarity_count(*r)).sum()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }
}

impl From<BTreeMap<String, u64>> for RewardTally {
    fn from(counts: BTreeMap<String, u64>) -> Self {
        Self { counts }
    }
}

impl std::fmt::Display for RewardTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
