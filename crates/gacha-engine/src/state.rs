//! Persisted per-player draw state.
//!
//! The host loads a [`DrawState`] before a batch and stores the one the
//! engine returns. The engine never keeps state between calls.

use serde::{Deserialize, Serialize};

use crate::error::{GachaError, GachaResult};
use crate::weights::NEUTRAL_UP_RATE;

/// Hidden state that biases future draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawState {
    /// Consecutive draws since the last unit reward.
    pub pity: u32,
    /// Drift toward low (above 0.5) or high (below 0.5) unit rarities, in `[0, 1]`.
    pub up_rate: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            pity: 0,
            up_rate: NEUTRAL_UP_RATE,
        }
    }
}

impl DrawState {
    /// Create a state, clamping `up_rate` into `[0, 1]`.
    pub fn new(pity: u32, up_rate: f64) -> Self {
        Self {
            pity,
            up_rate: clamp_up_rate(up_rate),
        }
    }

    /// Reject states the engine cannot draw from.
    pub fn validate(&self) -> GachaResult<()> {
        if !(0.0..=1.0).contains(&self.up_rate) {
            return Err(GachaError::InvalidState(format!(
                "up_rate {} is outside [0, 1]",
                self.up_rate
            )));
        }
        Ok(())
    }

    /// Apply an up-rate delta, clamping the result into `[0, 1]`.
    pub fn shift_up_rate(&mut self, delta: f64) {
        self.up_rate = clamp_up_rate(self.up_rate + delta);
    }
}

/// Clamp into `[0, 1]`. NaN maps to neutral.
pub fn clamp_up_rate(up_rate: f64) -> f64 {
    if up_rate.is_nan() {
        return NEUTRAL_UP_RATE;
    }
    up_rate.clamp(0.0, 1.0)
}

impl std::fmt::Display for DrawState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pity {} / up-rate {:.2}", self.pity, self.up_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_neutral() {
        let s = DrawState::default();
        assert_eq!(s.pity, 0);
        assert!((s.up_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn new_clamps() {
        assert!((DrawState::new(0, 1.7).up_rate - 1.0).abs() < f64::EPSILON);
        assert!(DrawState::new(0, -0.3).up_rate.abs() < f64::EPSILON);
        assert!((DrawState::new(0, f64::NAN).up_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn shift_clamps_both_ends() {
        let mut s = DrawState::new(3, 0.05);
        s.shift_up_rate(-0.20);
        assert_eq!(s.up_rate, 0.0);
        let mut s = DrawState::new(3, 0.99);
        s.shift_up_rate(0.03);
        assert_eq!(s.up_rate, 1.0);
        assert_eq!(s.pity, 3);
    }

    #[test]
    fn validate_rejects_out_of_domain() {
        assert!(DrawState::default().validate().is_ok());
        let s = DrawState {
            pity: 0,
            up_rate: 1.5,
        };
        assert!(matches!(s.validate(), Err(GachaError::InvalidState(_))));
        let s = DrawState {
            pity: 0,
            up_rate: f64::NAN,
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(DrawState::new(12, 0.4).to_string(), "pity 12 / up-rate 0.40");
    }

    #[test]
    fn round_trip_serde() {
        let s = DrawState::new(41, 0.25);
        let json = serde_json::to_string(&s).unwrap();
        let back: DrawState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
