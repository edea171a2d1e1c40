//! Error types for the reward engine.

/// Errors that can occur while configuring or running the reward engine.
#[derive(Debug, thiserror::Error)]
pub enum GachaError {
    /// The engine configuration is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A weight table had no selectable entry when it was sampled.
    #[error("degenerate {table} weights: total weight is zero")]
    DegenerateWeights {
        /// Which table was being sampled ("category" or "rarity").
        table: &'static str,
    },

    /// The draw state handed to the engine is out of its domain.
    #[error("invalid draw state: {0}")]
    InvalidState(String),

    /// The player cannot pay for the requested number of draws.
    #[error("insufficient tokens: requested {requested}, available {available}")]
    InsufficientTokens {
        /// Number of draws requested.
        requested: u32,
        /// Tokens currently held.
        available: u64,
    },

    /// A scripted random source ran out of outcomes.
    #[error("scripted source exhausted")]
    ScriptExhausted,

    /// A scripted outcome does not fit the request it was consumed by.
    #[error("scripted outcome mismatch: {0}")]
    ScriptMismatch(String),

    /// Reading a configuration file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for reward engine operations.
pub type GachaResult<T> = Result<T, GachaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = GachaError::DegenerateWeights { table: "rarity" };
        assert_eq!(
            err.to_string(),
            "degenerate rarity weights: total weight is zero"
        );

        let err = GachaError::InsufficientTokens {
            requested: 10,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "insufficient tokens: requested 10, available 3"
        );
    }

    #[test]
    fn json_errors_convert() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: GachaError = parse.unwrap_err().into();
        assert!(matches!(err, GachaError::Json(_)));
    }
}
