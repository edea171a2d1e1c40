//! Engine tuning: base weights, pity thresholds, drift deltas, and payload ranges.
//!
//! A [`GachaConfig`] is plain data. It can be built from the presets in
//! [`preset`], adjusted with the `with_*` builders, or overridden by a JSON
//! document. Overrides are merged field by field onto a base configuration,
//! so a document only names what it changes:
//!
//! ```text
//! {
//!     "soft_pity": 30,
//!     "category_weights": { "unit": 5 },
//!     "up_rate_deltas": { "legendary": -0.15 }
//! }
//! ```

pub mod preset;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GachaError, GachaResult};
use crate::reward::{Category, Rarity};

/// Base weight for each prize category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    /// Material weight.
    pub material: f64,
    /// Candy weight.
    pub candy: f64,
    /// Ticket weight.
    pub ticket: f64,
    /// Coin weight.
    pub coin: f64,
    /// Unit weight. Never damped by the pity ramp.
    pub unit: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            material: 60.0,
            candy: 15.0,
            ticket: 15.0,
            coin: 7.0,
            unit: 3.0,
        }
    }
}

impl CategoryWeights {
    /// Weight for a single category.
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Material => self.material,
            Category::Candy => self.candy,
            Category::Ticket => self.ticket,
            Category::Coin => self.coin,
            Category::Unit => self.unit,
        }
    }

    /// Sum of all category weights.
    pub fn total(&self) -> f64 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// One value per unit rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerRarity<T> {
    /// Value for [`Rarity::Common`].
    pub common: T,
    /// Value for [`Rarity::Uncommon`].
    pub uncommon: T,
    /// Value for [`Rarity::Rare`].
    pub rare: T,
    /// Value for [`Rarity::Legendary`].
    pub legendary: T,
}

impl<T: Copy> PerRarity<T> {
    /// Build from values in [`Rarity::ALL`] order.
    pub const fn new(common: T, uncommon: T, rare: T, legendary: T) -> Self {
        Self {
            common,
            uncommon,
            rare,
            legendary,
        }
    }

    /// Value for a single rarity.
    pub fn get(&self, rarity: Rarity) -> T {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Legendary => self.legendary,
        }
    }
}

/// Base weights for unit rarities.
pub type RarityWeights = PerRarity<f64>;

/// Up-rate change applied when a unit of each rarity is obtained.
pub type RarityDeltas = PerRarity<f64>;

/// Number of distinct units per rarity.
pub type RarityCounts = PerRarity<u32>;

/// An inclusive integer range `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    /// Lowest value (inclusive).
    pub min: u32,
    /// Highest value (inclusive).
    pub max: u32,
}

impl CountRange {
    /// Create a range; `min` and `max` are both inclusive.
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Returns true if `min > max`.
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl std::fmt::Display for CountRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Ranges used when generating category payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadConfig {
    /// Material ids are drawn from `1..=material_ids`.
    pub material_ids: u32,
    /// Candy stack size.
    pub candy_amount: CountRange,
    /// Coins per coin reward.
    pub coin_amount: CountRange,
    /// Tickets per ticket reward.
    pub ticket_amount: CountRange,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            material_ids: 25,
            candy_amount: CountRange::new(3, 5),
            coin_amount: CountRange::new(1, 1),
            ticket_amount: CountRange::new(3, 15),
        }
    }
}

/// Complete tuning table for a [`crate::RewardEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GachaConfig {
    /// Pity at which non-unit categories start to be damped.
    pub soft_pity: u32,
    /// Pity at which non-unit categories reach zero weight.
    pub hard_pity: u32,
    /// Base prize category weights.
    pub category_weights: CategoryWeights,
    /// Base unit rarity weights.
    pub rarity_weights: RarityWeights,
    /// Up-rate change per unit rarity obtained.
    pub up_rate_deltas: RarityDeltas,
    /// Number of distinct units in each rarity.
    pub unit_pool_sizes: RarityCounts,
    /// Number of sub-draws per draw.
    pub sub_draws: CountRange,
    /// Payload generation ranges.
    pub payloads: PayloadConfig,
}

impl Default for GachaConfig {
    fn default() -> Self {
        preset::standard()
    }
}

impl GachaConfig {
    /// Parse overrides onto the standard preset and validate the result.
    pub fn from_json(json: &str) -> GachaResult<Self> {
        preset::standard().apply_json(json)
    }

    /// Load overrides from a file onto the standard preset.
    pub fn load(path: &Path) -> GachaResult<Self> {
        preset::standard().apply_file(path)
    }

    /// Merge a JSON override document onto this configuration and validate.
    ///
    /// Objects merge recursively; any other value replaces the field.
    pub fn apply_json(&self, json: &str) -> GachaResult<Self> {
        let overrides: Value = serde_json::from_str(json)?;
        if !overrides.is_object() {
            return Err(invalid("config document must be a JSON object"));
        }
        let mut merged = serde_json::to_value(self)?;
        merge_values(&mut merged, overrides);
        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge overrides read from a JSON file onto this configuration.
    pub fn apply_file(&self, path: &Path) -> GachaResult<Self> {
        let json = std::fs::read_to_string(path)?;
        self.apply_json(&json)
    }

    /// Set the soft pity threshold.
    pub fn with_soft_pity(mut self, soft_pity: u32) -> Self {
        self.soft_pity = soft_pity;
        self
    }

    /// Set the hard pity threshold.
    pub fn with_hard_pity(mut self, hard_pity: u32) -> Self {
        self.hard_pity = hard_pity;
        self
    }

    /// Replace the base category weights.
    pub fn with_category_weights(mut self, weights: CategoryWeights) -> Self {
        self.category_weights = weights;
        self
    }

    /// Replace the base rarity weights.
    pub fn with_rarity_weights(mut self, weights: RarityWeights) -> Self {
        self.rarity_weights = weights;
        self
    }

    /// Replace the per-rarity up-rate deltas.
    pub fn with_up_rate_deltas(mut self, deltas: RarityDeltas) -> Self {
        self.up_rate_deltas = deltas;
        self
    }

    /// Set the number of sub-draws per draw.
    pub fn with_sub_draws(mut self, min: u32, max: u32) -> Self {
        self.sub_draws = CountRange::new(min, max);
        self
    }

    /// Check that every table can be sampled at every pity and up-rate.
    pub fn validate(&self) -> GachaResult<()> {
        if self.soft_pity >= self.hard_pity {
            return Err(invalid(format!(
                "soft_pity ({}) must be below hard_pity ({})",
                self.soft_pity, self.hard_pity
            )));
        }

        for category in Category::ALL {
            check_weight(category.name(), self.category_weights.get(category))?;
        }
        if self.category_weights.total() <= 0.0 {
            return Err(invalid("category weights sum to zero"));
        }
        if self.category_weights.unit <= 0.0 {
            return Err(invalid(
                "unit weight must be positive, hard pity leaves only units selectable",
            ));
        }

        for rarity in Rarity::ALL {
            check_weight(rarity.name(), self.rarity_weights.get(rarity))?;
            let delta = self.up_rate_deltas.get(rarity);
            if !delta.is_finite() {
                return Err(invalid(format!("{rarity} up-rate delta is not finite")));
            }
            if self.unit_pool_sizes.get(rarity) == 0 {
                return Err(invalid(format!("{rarity} unit pool is empty")));
            }
        }
        let weights = &self.rarity_weights;
        if weights.common + weights.uncommon <= 0.0 {
            return Err(invalid(
                "common and uncommon weights sum to zero, up-rate 1.0 has no selectable rarity",
            ));
        }
        if weights.rare + weights.legendary <= 0.0 {
            return Err(invalid(
                "rare and legendary weights sum to zero, up-rate 0.0 has no selectable rarity",
            ));
        }

        check_range("sub_draws", self.sub_draws)?;
        if self.payloads.material_ids == 0 {
            return Err(invalid("material_ids must be at least 1"));
        }
        check_range("candy_amount", self.payloads.candy_amount)?;
        check_range("coin_amount", self.payloads.coin_amount)?;
        check_range("ticket_amount", self.payloads.ticket_amount)?;

        Ok(())
    }
}

fn merge_values(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn invalid(msg: impl Into<String>) -> GachaError {
    GachaError::InvalidConfig(msg.into())
}

fn check_weight(name: &str, weight: f64) -> GachaResult<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(invalid(format!(
            "{name} weight must be finite and non-negative, got {weight}"
        )));
    }
    Ok(())
}

fn check_range(name: &str, range: CountRange) -> GachaResult<()> {
    if range.is_inverted() {
        return Err(invalid(format!("{name} range {range} is empty")));
    }
    Ok(())
}
