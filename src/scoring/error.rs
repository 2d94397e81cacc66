use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    /// Every weight is zero, so no weighted average exists.
    #[error("invalid weights: at least one factor weight must be above zero")]
    InvalidWeights,

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("unknown factor '{0}'")]
    UnknownFactor(String),

    /// A record missing an identity field. Ranking skips these.
    #[error("malformed record at position {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("college '{0}' is not in the ranking")]
    UnknownCollege(String),
}
