//! Injectable randomness for the reward engine.
//!
//! Every random decision the engine makes goes through a [`DrawSource`]:
//! either a uniform integer or a weighted index. Any [`rand::Rng`] is a
//! source, and [`ScriptedSource`] replays a fixed list of outcomes so a
//! batch can be reproduced exactly.

use std::collections::VecDeque;

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::error::{GachaError, GachaResult};
use crate::reward::{CandyFlavor, Category, Rarity};

/// A source of the engine's random decisions.
pub trait DrawSource {
    /// A uniform integer in `low..=high`.
    fn uniform(&mut self, low: u32, high: u32) -> GachaResult<u32>;

    /// An index into `weights`, chosen with probability proportional to its weight.
    fn weighted(&mut self, weights: &[f64]) -> GachaResult<usize>;
}

impl<R: Rng> DrawSource for R {
    fn uniform(&mut self, low: u32, high: u32) -> GachaResult<u32> {
        if low > high {
            return Err(GachaError::InvalidConfig(format!(
                "empty range {low}..={high}"
            )));
        }
        Ok(self.random_range(low..=high))
    }

    fn weighted(&mut self, weights: &[f64]) -> GachaResult<usize> {
        let dist = WeightedIndex::new(weights)
            .map_err(|e| GachaError::InvalidConfig(format!("unsampleable weights: {e}")))?;
        Ok(dist.sample(self))
    }
}

/// Replays a fixed sequence of outcomes.
///
/// Each call to [`DrawSource::uniform`] or [`DrawSource::weighted`] consumes
/// one value. For `weighted` the value is the chosen index. The builder
/// methods push values in the order the engine consumes them:
///
/// ```
/// use gacha_engine::{Category, Rarity, ScriptedSource};
///
/// // One draw with two sub-draws: material #7, then a rare unit #3.
/// let script = ScriptedSource::new()
///     .sub_draws(2)
///     .category(Category::Material)
///     .value(7)
///     .category(Category::Unit)
///     .rarity(Rarity::Rare)
///     .value(3);
/// assert_eq!(script.remaining(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    outcomes: VecDeque<u32>,
}

impl ScriptedSource {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a script from raw outcome values.
    pub fn from_values(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            outcomes: values.into_iter().collect(),
        }
    }

    /// Push a raw outcome: a uniform value or a weighted index.
    pub fn value(mut self, value: u32) -> Self {
        self.outcomes.push_back(value);
        self
    }

    /// Push the number of sub-draws for the next draw.
    pub fn sub_draws(self, count: u32) -> Self {
        self.value(count)
    }

    /// Push a category pick.
    pub fn category(self, category: Category) -> Self {
        self.value(category.index() as u32)
    }

    /// Push a unit rarity pick.
    pub fn rarity(self, rarity: Rarity) -> Self {
        self.value(rarity.index() as u32)
    }

    /// Push a candy flavor pick.
    pub fn flavor(self, flavor: CandyFlavor) -> Self {
        self.value(flavor.index() as u32)
    }

    /// Number of outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true once every outcome has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn pop(&mut self) -> GachaResult<u32> {
        self.outcomes.pop_front().ok_or(GachaError::ScriptExhausted)
    }
}

impl DrawSource for ScriptedSource {
    fn uniform(&mut self, low: u32, high: u32) -> GachaResult<u32> {
        let value = self.pop()?;
        if !(low..=high).contains(&value) {
            return Err(GachaError::ScriptMismatch(format!(
                "{value} is outside {low}..={high}"
            )));
        }
        Ok(value)
    }

    fn weighted(&mut self, weights: &[f64]) -> GachaResult<usize> {
        let index = self.pop()? as usize;
        match weights.get(index) {
            Some(w) if *w > 0.0 => Ok(index),
            Some(_) => Err(GachaError::ScriptMismatch(format!(
                "index {index} has zero weight"
            ))),
            None => Err(GachaError::ScriptMismatch(format!(
                "index {index} is outside a table of {}",
                weights.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rng_uniform_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let v = rng.uniform(3, 15).unwrap();
            assert!((3..=15).contains(&v));
        }
        assert_eq!(rng.uniform(1, 1).unwrap(), 1);
        assert!(rng.uniform(5, 4).is_err());
    }

    #[test]
    fn rng_weighted_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let i = rng.weighted(&[0.0, 0.0, 0.0, 0.0, 3.0]).unwrap();
            assert_eq!(i, 4);
        }
    }

    #[test]
    fn rng_weighted_rejects_all_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = rng.weighted(&[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, GachaError::InvalidConfig(_)));
    }

    #[test]
    fn rng_deterministic_with_seed() {
        let weights = [60.0, 15.0, 15.0, 7.0, 3.0];
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            assert_eq!(a.weighted(&weights).unwrap(), b.weighted(&weights).unwrap());
            assert_eq!(a.uniform(1, 25).unwrap(), b.uniform(1, 25).unwrap());
        }
    }

    #[test]
    fn script_replays_in_order() {
        let mut script = ScriptedSource::new()
            .sub_draws(3)
            .category(Category::Coin)
            .flavor(CandyFlavor::C);
        assert_eq!(script.remaining(), 3);
        assert_eq!(script.uniform(2, 3).unwrap(), 3);
        assert_eq!(script.weighted(&[1.0; 5]).unwrap(), 3);
        assert_eq!(script.uniform(0, 4).unwrap(), 2);
        assert!(script.is_exhausted());
        assert!(matches!(
            script.uniform(0, 4),
            Err(GachaError::ScriptExhausted)
        ));
    }

    #[test]
    fn script_rejects_out_of_range() {
        let mut script = ScriptedSource::from_values([9]);
        assert!(matches!(
            script.uniform(2, 3),
            Err(GachaError::ScriptMismatch(_))
        ));
    }

    #[test]
    fn script_rejects_zero_weight_pick() {
        let mut script = ScriptedSource::new().category(Category::Material);
        let err = script.weighted(&[0.0, 0.0, 0.0, 0.0, 3.0]).unwrap_err();
        assert!(err.to_string().contains("zero weight"));

        let mut script = ScriptedSource::from_values([7]);
        assert!(script.weighted(&[1.0, 1.0]).is_err());
    }
}
