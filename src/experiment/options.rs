use serde::{Deserialize, Serialize};

/// Cookie holding the anonymous id unless an experiment overrides it.
pub const DEFAULT_COOKIE_NAME: &str = "anonId";

/// Shape of an experiment: its choices, their weights and the identity
/// cookie. Loadable from JSON site configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentOptions<V> {
    pub choices: Vec<V>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
}

impl<V> ExperimentOptions<V> {
    pub fn new(choices: Vec<V>) -> Self {
        Self {
            choices,
            weights: None,
            cookie_name: None,
        }
    }

    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_cookie_name(mut self, cookie_name: impl Into<String>) -> Self {
        self.cookie_name = Some(cookie_name.into());
        self
    }
}

/// Options for an on/off experiment; choices are fixed to `[false, true]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BooleanOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
}

impl BooleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_cookie_name(mut self, cookie_name: impl Into<String>) -> Self {
        self.cookie_name = Some(cookie_name.into());
        self
    }
}

impl From<BooleanOptions> for ExperimentOptions<bool> {
    fn from(options: BooleanOptions) -> Self {
        ExperimentOptions {
            choices: vec![false, true],
            weights: options.weights,
            cookie_name: options.cookie_name,
        }
    }
}
