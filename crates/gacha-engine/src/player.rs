//! Host-side player ledger: tokens, counters, draw state, and inventory.
//!
//! A [`PlayerRecord`] is what the hosting service loads and stores around a
//! batch. Each draw costs one token. Storage and per-player locking stay with
//! the host; this type only guarantees that a pull either commits completely
//! or leaves the record untouched.

use serde::{Deserialize, Serialize};

use crate::engine::{BatchOutcome, RewardEngine};
use crate::error::{GachaError, GachaResult};
use crate::source::DrawSource;
use crate::state::DrawState;
use crate::tally::RewardTally;

/// Everything the host persists for one player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Pity and up-rate carried between batches.
    pub draw_state: DrawState,
    /// Draw tokens available.
    pub tokens: u64,
    /// Draws performed over the player's lifetime.
    pub total_draws: u64,
    /// Tokens spent over the player's lifetime.
    pub tokens_spent: u64,
    /// Every reward the player has received.
    pub inventory: RewardTally,
}

impl PlayerRecord {
    /// A fresh player holding `tokens`.
    pub fn with_tokens(tokens: u64) -> Self {
        Self {
            tokens,
            ..Self::default()
        }
    }

    /// Grant tokens. Granting zero does nothing.
    pub fn add_tokens(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        self.tokens = self.tokens.saturating_add(amount);
        log::debug!("granted {amount} tokens, balance {}", self.tokens);
    }

    /// Returns true if the player can pay for `count` draws.
    pub fn can_afford(&self, count: u32) -> bool {
        self.tokens >= u64::from(count)
    }

    /// Spend `count` tokens on a batch and commit its results.
    ///
    /// Rejects the pull before running the engine if the balance is too low.
    /// Returns the batch outcome; its tally has already been merged into
    /// [`PlayerRecord::inventory`].
    pub fn pull<S: DrawSource + ?Sized>(
        &mut self,
        engine: &RewardEngine,
        count: u32,
        source: &mut S,
    ) -> GachaResult<BatchOutcome> {
        if !self.can_afford(count) {
            return Err(GachaError::InsufficientTokens {
                requested: count,
                available: self.tokens,
            });
        }

        let outcome = engine.draw_batch(self.draw_state, count, source)?;

        let cost = u64::from(count);
        self.tokens -= cost;
        self.tokens_spent = self.tokens_spent.saturating_add(cost);
        self.total_draws = self.total_draws.saturating_add(cost);
        self.draw_state = outcome.state;
        self.inventory.merge(&outcome.tally);

        log::info!(
            "pulled {count}: {} units, {}, {} tokens left",
            outcome.summary.unit_hits,
            self.draw_state,
            self.tokens
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward::{Category, Rarity};
    use crate::source::ScriptedSource;

    fn rare_pull() -> ScriptedSource {
        ScriptedSource::new()
            .sub_draws(2)
            .category(Category::Material)
            .value(7)
            .category(Category::Unit)
            .rarity(Rarity::Rare)
            .value(3)
    }

    #[test]
    fn add_tokens_ignores_zero() {
        let mut p = PlayerRecord::default();
        p.add_tokens(0);
        assert_eq!(p.tokens, 0);
        p.add_tokens(5);
        p.add_tokens(3);
        assert_eq!(p.tokens, 8);
    }

    #[test]
    fn pull_commits_everything() {
        let engine = RewardEngine::default();
        let mut p = PlayerRecord::with_tokens(3);
        p.draw_state = DrawState::new(22, 0.5);

        let out = p.pull(&engine, 1, &mut rare_pull()).unwrap();

        assert_eq!(out.tally.get("rare_3"), 1);
        assert_eq!(p.tokens, 2);
        assert_eq!(p.tokens_spent, 1);
        assert_eq!(p.total_draws, 1);
        assert_eq!(p.draw_state.pity, 0);
        assert!((p.draw_state.up_rate - 0.4).abs() < 1e-9);
        assert_eq!(p.inventory.get("material_7"), 1);
    }

    #[test]
    fn inventory_accumulates_across_pulls() {
        let engine = RewardEngine::default();
        let mut p = PlayerRecord::with_tokens(2);
        p.pull(&engine, 1, &mut rare_pull()).unwrap();
        p.pull(&engine, 1, &mut rare_pull()).unwrap();
        assert_eq!(p.inventory.get("rare_3"), 2);
        assert_eq!(p.inventory.get("material_7"), 2);
        assert_eq!(p.tokens, 0);
        assert_eq!(p.total_draws, 2);
    }

    #[test]
    fn insufficient_tokens_rejected_untouched() {
        let engine = RewardEngine::default();
        let mut p = PlayerRecord::with_tokens(1);
        let before = p.clone();
        let err = p.pull(&engine, 2, &mut rare_pull()).unwrap_err();
        assert!(matches!(
            err,
            GachaError::InsufficientTokens {
                requested: 2,
                available: 1
            }
        ));
        assert_eq!(p, before);
    }

    #[test]
    fn engine_failure_leaves_record_untouched() {
        let engine = RewardEngine::default();
        let mut p = PlayerRecord::with_tokens(5);
        let before = p.clone();
        let mut short = ScriptedSource::new().sub_draws(2).category(Category::Coin);
        assert!(p.pull(&engine, 1, &mut short).is_err());
        assert_eq!(p, before);
    }

    #[test]
    fn zero_pull_is_free() {
        let engine = RewardEngine::default();
        let mut p = PlayerRecord::default();
        let out = p.pull(&engine, 0, &mut ScriptedSource::new()).unwrap();
        assert!(out.tally.is_empty());
        assert_eq!(p, PlayerRecord::default());
    }

    #[test]
    fn round_trip_serde() {
        let mut p = PlayerRecord::with_tokens(4);
        p.inventory.add_count("coins", 3);
        let json = serde_json::to_string(&p).unwrap();
        let back: PlayerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
