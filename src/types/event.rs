use serde::{Deserialize, Serialize};

use super::variant::Variant;

/// Name under which first exposures are reported.
pub const EXPOSURE_EVENT: &str = "marketing_experiment.triggered";

/// Payload reported the first time a visitor is exposed to an experiment.
/// Field order is part of the wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureEvent {
    pub experiment_name: String,
    pub assignment: Variant,
}

impl ExposureEvent {
    pub fn new(experiment_name: impl Into<String>, assignment: impl Into<Variant>) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            assignment: assignment.into(),
        }
    }
}
