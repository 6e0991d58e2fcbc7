use thiserror::Error;

/// Failure talking to the server. `Display` is what the user sees after
/// "due to".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("parsererror: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("an answer is required before moving to the next question")]
    AnswerRequired,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerParseError {
    #[error("not a point: {0:?}")]
    NotAPoint(String),
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
