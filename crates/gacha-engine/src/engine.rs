//! The reward engine: draws, sub-draws, payloads, and pity/drift bookkeeping.
//!
//! A batch of `count` draws runs sequentially. Each draw samples its category
//! table once (ramped by pity) and then performs 2-3 sub-draws; each sub-draw
//! picks a category and generates its payload. Unit rewards pick a rarity from
//! a table ramped by the current up-rate and then shift the up-rate, so later
//! sub-draws in the same batch see the new drift. Pity moves once per draw.

use serde::{Deserialize, Serialize};

use crate::config::{CountRange, GachaConfig};
use crate::error::{GachaError, GachaResult};
use crate::reward::{CandyFlavor, Category, RewardItem};
use crate::source::DrawSource;
use crate::state::DrawState;
use crate::tally::RewardTally;
use crate::weights::{WeightTable, category_table, rarity_table};

/// Counters describing what happened during a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Draws performed; always the requested count.
    pub draws: u32,
    /// Sub-draws performed across all draws.
    pub sub_draws: u64,
    /// Unit rewards obtained. Equals the sum of unit keys in the tally.
    pub unit_hits: u64,
    /// Draws that contained at least one unit reward.
    pub draws_with_unit: u32,
    /// Highest pity held at any point in the batch, including the start.
    pub peak_pity: u32,
}

/// Everything a batch produces. The host persists `state` and `tally` together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Merged rewards for the batch.
    pub tally: RewardTally,
    /// State to persist for the next batch.
    pub state: DrawState,
    /// Batch counters.
    pub summary: BatchSummary,
}

impl BatchOutcome {
    /// Split into the tally and the state to persist.
    pub fn into_parts(self) -> (RewardTally, DrawState) {
        (self.tally, self.state)
    }
}

/// Computes reward batches from a validated [`GachaConfig`].
///
/// The engine holds no per-player state, so one instance can serve every
/// player. Callers must serialize batches for the same player so that two
/// batches never start from the same stored [`DrawState`].
#[derive(Debug, Clone, Default)]
pub struct RewardEngine {
    config: GachaConfig,
}

impl RewardEngine {
    /// Create an engine, rejecting configurations that could stall sampling.
    pub fn new(config: GachaConfig) -> GachaResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's tuning table.
    pub fn config(&self) -> &GachaConfig {
        &self.config
    }

    /// Run `count` draws starting from `state`.
    ///
    /// `count == 0` returns an empty tally and the state unchanged. On error
    /// nothing is returned, so the host never sees a tally without the state
    /// that goes with it.
    pub fn draw_batch<S: DrawSource + ?Sized>(
        &self,
        state: DrawState,
        count: u32,
        source: &mut S,
    ) -> GachaResult<BatchOutcome> {
        state.validate()?;

        let mut state = state;
        let mut tally = RewardTally::new();
        let mut summary = BatchSummary {
            peak_pity: state.pity,
            ..BatchSummary::default()
        };

        for _ in 0..count {
            self.draw(&mut state, &mut tally, &mut summary, source)?;
        }

        log::debug!(
            "batch of {count}: {} sub-draws, {} units, final {state}",
            summary.sub_draws,
            summary.unit_hits
        );

        Ok(BatchOutcome {
            tally,
            state,
            summary,
        })
    }

    fn draw<S: DrawSource + ?Sized>(
        &self,
        state: &mut DrawState,
        tally: &mut RewardTally,
        summary: &mut BatchSummary,
        source: &mut S,
    ) -> GachaResult<()> {
        let categories = category_table(&self.config, state.pity);
        let sub_draws = uniform_in(source, self.config.sub_draws)?;

        let mut got_unit = false;
        for _ in 0..sub_draws {
            let category = pick(&categories, "category", source)?;
            let item = self.generate(category, state.up_rate, source)?;
            log::trace!("{state}: {item}");

            tally.add(&item);
            summary.sub_draws += 1;

            if let RewardItem::Unit { rarity, .. } = item {
                got_unit = true;
                summary.unit_hits += 1;
                state.shift_up_rate(self.config.up_rate_deltas.get(rarity));
            }
        }

        summary.draws += 1;
        if got_unit {
            state.pity = 0;
            summary.draws_with_unit += 1;
        } else {
            state.pity = state.pity.saturating_add(1);
            summary.peak_pity = summary.peak_pity.max(state.pity);
        }
        Ok(())
    }

    /// Generate the payload for one sub-draw of `category`.
    fn generate<S: DrawSource + ?Sized>(
        &self,
        category: Category,
        up_rate: f64,
        source: &mut S,
    ) -> GachaResult<RewardItem> {
        let payloads = &self.config.payloads;
        let item = match category {
            Category::Material => RewardItem::Material {
                id: source.uniform(1, payloads.material_ids)?,
            },
            Category::Candy => {
                let last = (CandyFlavor::ALL.len() - 1) as u32;
                let index = source.uniform(0, last)? as usize;
                let flavor = CandyFlavor::ALL.get(index).copied().ok_or_else(|| {
                    GachaError::ScriptMismatch(format!("candy flavor {index} does not exist"))
                })?;
                RewardItem::Candy {
                    flavor,
                    amount: uniform_in(source, payloads.candy_amount)?,
                }
            }
            Category::Coin => RewardItem::Coin {
                amount: uniform_in(source, payloads.coin_amount)?,
            },
            Category::Ticket => RewardItem::Ticket {
                amount: uniform_in(source, payloads.ticket_amount)?,
            },
            Category::Unit => {
                let rarities = rarity_table(&self.config, up_rate);
                let rarity = pick(&rarities, "rarity", source)?;
                RewardItem::Unit {
                    rarity,
                    id: source.uniform(1, self.config.unit_pool_sizes.get(rarity))?,
                }
            }
        };
        Ok(item)
    }
}

/// Run a batch with the standard tuning.
pub fn draw_batch<S: DrawSource + ?Sized>(
    state: DrawState,
    count: u32,
    source: &mut S,
) -> GachaResult<BatchOutcome> {
    RewardEngine::default().draw_batch(state, count, source)
}

fn uniform_in<S: DrawSource + ?Sized>(source: &mut S, range: CountRange) -> GachaResult<u32> {
    source.uniform(range.min, range.max)
}

/// Weighted pick from a ramped table; fails fast if nothing is selectable.
fn pick<L, S>(table: &WeightTable<L>, name: &'static str, source: &mut S) -> GachaResult<L>
where
    L: Copy + PartialEq,
    S: DrawSource + ?Sized,
{
    let total = table.total();
    if total.is_nan() || total <= 0.0 {
        return Err(GachaError::DegenerateWeights { table: name });
    }
    let index = source.weighted(&table.weights())?;
    table.label_at(index).ok_or_else(|| {
        GachaError::ScriptMismatch(format!("index {index} is outside the {name} table"))
    })
}
