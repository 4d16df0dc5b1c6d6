use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid request body: {0}")]
    MalformedBody(String),
    #[error("At most {max} indicators are allowed, got {actual}")]
    TooManyIndicators { max: usize, actual: usize },
    #[error("Indicator #{0} has an empty name")]
    EmptyName(usize),
    #[error("Indicator #{0} has a non-finite value")]
    NonFiniteValue(usize),
    #[error("deviation_threshold must be between 0 and 100, got {0}")]
    ThresholdOutOfRange(f64),
    #[error("rounding_limit must be a non-negative number, got {0}")]
    RoundingLimitOutOfRange(f64),
}
