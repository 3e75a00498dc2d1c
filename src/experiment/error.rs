use thiserror::Error;

/// Rejected experiment definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Experiment name must not be empty")]
    EmptyName,
    #[error("Must have at least two choices, got {0}")]
    TooFewChoices(usize),
    #[error("Length of weights ({weights}) must match choices ({choices})")]
    WeightCountMismatch { choices: usize, weights: usize },
    #[error("Weight at index {index} must be positive and finite, got {weight}")]
    InvalidWeight { index: usize, weight: f64 },
    #[error("Weight at index {index} must be a whole number, got {weight}")]
    FractionalWeight { index: usize, weight: f64 },
}

#[derive(Debug, Error)]
pub enum ExposureError {
    #[error("Malformed exposure log while reporting {experiment}: {source}")]
    MalformedLog {
        experiment: String,
        #[source]
        source: serde_json::Error,
    },
}
