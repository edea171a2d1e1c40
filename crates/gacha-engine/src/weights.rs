//! Weight tables and the pity/drift ramps applied to them.
//!
//! Tables are rebuilt from configuration for every draw and every sub-draw.
//! Ramping never mutates a table; [`WeightTable::scaled`] returns a new one.

use crate::config::GachaConfig;
use crate::reward::{Category, Rarity};

/// Up-rate at which neither rarity group is damped.
pub const NEUTRAL_UP_RATE: f64 = 0.5;

/// Linear interpolation between `a` and `b` by `w`.
pub fn lerp(a: f64, b: f64, w: f64) -> f64 {
    a + (b - a) * w
}

/// Damping factor for ramp progress `t`: 1.0 at `t <= 0`, 0.0 at `t >= 1`.
pub fn ramp_factor(t: f64) -> f64 {
    lerp(1.0, 0.0, t.clamp(0.0, 1.0))
}

/// An ordered list of `(label, weight)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable<L> {
    entries: Vec<(L, f64)>,
}

impl<L: Copy + PartialEq> WeightTable<L> {
    /// Build a table from entries in sampling order.
    pub fn new(entries: impl IntoIterator<Item = (L, f64)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// A copy of this table with every entry selected by `affects` multiplied by `factor`.
    pub fn scaled(&self, factor: f64, mut affects: impl FnMut(L) -> bool) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|&(label, weight)| {
                    if affects(label) {
                        (label, weight * factor)
                    } else {
                        (label, weight)
                    }
                })
                .collect(),
        }
    }

    /// Weight of `label`, or 0.0 if it is not in the table.
    pub fn weight(&self, label: L) -> f64 {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    /// Label at a sampling index.
    pub fn label_at(&self, index: usize) -> Option<L> {
        self.entries.get(index).map(|(l, _)| *l)
    }

    /// Weights in sampling order.
    pub fn weights(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, w)| *w).collect()
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Soft-pity damping applied to non-unit categories at `pity`.
pub fn pity_factor(config: &GachaConfig, pity: u32) -> f64 {
    if pity < config.soft_pity {
        return 1.0;
    }
    let span = config.hard_pity.saturating_sub(config.soft_pity);
    if span == 0 {
        return 0.0;
    }
    ramp_factor(f64::from(pity - config.soft_pity) / f64::from(span))
}

/// Category weights for one draw at the given pity.
pub fn category_table(config: &GachaConfig, pity: u32) -> WeightTable<Category> {
    let base = WeightTable::new(Category::ALL.map(|c| (c, config.category_weights.get(c))));
    if pity < config.soft_pity {
        return base;
    }
    base.scaled(pity_factor(config, pity), |c| c != Category::Unit)
}

/// Rarity weights for one sub-draw at the given up-rate.
///
/// Above neutral the high rarities are damped; at or below neutral the low
/// ones are. Exactly one group is scaled, by a factor of 1.0 at neutral.
pub fn rarity_table(config: &GachaConfig, up_rate: f64) -> WeightTable<Rarity> {
    let base = WeightTable::new(Rarity::ALL.map(|r| (r, config.rarity_weights.get(r))));
    if up_rate > NEUTRAL_UP_RATE {
        let factor = ramp_factor((up_rate - NEUTRAL_UP_RATE) / NEUTRAL_UP_RATE);
        base.scaled(factor, Rarity::is_high)
    } else {
        let factor = ramp_factor((NEUTRAL_UP_RATE - up_rate) / NEUTRAL_UP_RATE);
        base.scaled(factor, |r| !r.is_high())
    }
}
