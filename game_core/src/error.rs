use crate::Side;

/// Errors raised while setting up a match
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown AI difficulty: {0:?}")]
    UnknownDifficulty(String),
    #[error("malformed key binding: {0:?}")]
    MalformedKey(String),
    #[error("key {0:?} is bound more than once")]
    DuplicateKey(String),
    #[error("no controller configured for side {0:?}")]
    MissingSide(Side),
    #[error("side {0:?} is configured twice")]
    DuplicateSide(Side),
    #[error("side {0:?} does not exist in this mode")]
    UnexpectedSide(Side),
    #[error("invalid tuning value for {field}: {value}")]
    InvalidTuning { field: &'static str, value: f32 },
}
