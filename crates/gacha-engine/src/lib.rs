//! Gacha reward engine.
//!
//! Turns a player's persisted [`DrawState`] and a requested number of draws
//! into a [`RewardTally`], evolving two pieces of hidden state on the way:
//! a pity counter that ramps unit odds up after a dry streak, and an up-rate
//! drift that tilts unit rarities after every unit obtained.
//!
//! The engine is a pure computation over an injected [`DrawSource`]. Seeded
//! [`rand`] generators give reproducible batches; [`ScriptedSource`] replays
//! exact outcomes.

pub mod config;
pub mod engine;
pub mod error;
pub mod player;
pub mod reward;
pub mod source;
pub mod state;
pub mod tally;
pub mod weights;

pub use config::{CategoryWeights, CountRange, GachaConfig, PayloadConfig, PerRarity, preset};
pub use engine::{BatchOutcome, BatchSummary, RewardEngine, draw_batch};
pub use error::{GachaError, GachaResult};
pub use player::PlayerRecord;
pub use reward::{CandyFlavor, Category, Rarity, RewardItem};
pub use source::{DrawSource, ScriptedSource};
pub use state::DrawState;
pub use tally::RewardTally;
