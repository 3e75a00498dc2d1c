//! The experiment handle: construction, variant assignment and exposure
//! reporting.

pub mod error;
pub mod options;

use tracing::{debug, error, warn};

use crate::bucketing::{seed, seeded_fraction, select_index};
use crate::context::ExecutionContext;
use crate::exposure::{ExposureLog, ExposureLogError};
use crate::types::{AnonymousId, ExposureEvent, Variant, EXPOSURE_EVENT};

pub use error::{ConfigurationError, ExposureError};
pub use options::{BooleanOptions, ExperimentOptions, DEFAULT_COOKIE_NAME};

/// On/off experiment over `[false, true]`.
pub type BooleanExperiment = Experiment<bool>;

/// A named experiment bound to the context it is evaluated in.
///
/// The first choice is the control: it is what server rendering shows and
/// what assignment falls back to.
#[derive(Debug, Clone)]
pub struct Experiment<V> {
    name: String,
    choices: Vec<V>,
    weights: Vec<f64>,
    cookie_name: String,
    context: ExecutionContext,
}

impl<V> Experiment<V>
where
    V: Clone + Into<Variant>,
{
    pub fn new(
        name: impl Into<String>,
        options: ExperimentOptions<V>,
        context: impl Into<ExecutionContext>,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName);
        }

        let ExperimentOptions {
            choices,
            weights,
            cookie_name,
        } = options;

        if choices.len() < 2 {
            return Err(ConfigurationError::TooFewChoices(choices.len()));
        }

        let weights = match weights {
            Some(weights) => {
                if weights.len() != choices.len() {
                    return Err(ConfigurationError::WeightCountMismatch {
                        choices: choices.len(),
                        weights: weights.len(),
                    });
                }
                weights
            }
            None => vec![1.0; choices.len()],
        };

        // Zero weights would let a 0.0 draw fall through every choice.
        if let Some((index, &weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(ConfigurationError::InvalidWeight { index, weight });
        }

        // Selection draws an integer target, fractional weights can't consume it.
        if let Some((index, &weight)) = weights.iter().enumerate().find(|(_, w)| w.fract() != 0.0) {
            return Err(ConfigurationError::FractionalWeight { index, weight });
        }

        Ok(Self {
            name,
            choices,
            weights,
            cookie_name: cookie_name.unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string()),
            context: context.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn choices(&self) -> &[V] {
        &self.choices
    }

    /// Effective weights, uniform when none were configured.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// The control variant, `choices[0]`.
    pub fn default_variant(&self) -> &V {
        &self.choices[0]
    }

    /// Read the visitor's anonymous id, minting and persisting one on first
    /// access. `None` during server rendering.
    ///
    /// If the cookie cannot be written the generated id is still returned;
    /// the next call will mint a different one.
    pub fn anonymous_id(&self) -> Option<AnonymousId> {
        let browser = self.context.as_browser()?;

        match browser.cookies.get(&self.cookie_name) {
            Ok(Some(value)) if !value.is_empty() => return Some(AnonymousId::from_stored(value)),
            Ok(_) => {}
            Err(e) => debug!(cookie = %self.cookie_name, error = %e, "anonymous id cookie unreadable"),
        }

        let id = AnonymousId::generate();
        match browser.cookies.set(&self.cookie_name, id.as_str()) {
            Ok(()) => debug!(cookie = %self.cookie_name, id = %id, "created anonymous id"),
            Err(e) => warn!(cookie = %self.cookie_name, error = %e, "failed to persist anonymous id"),
        }
        Some(id)
    }

    /// Stable draw in `[0, 1]` for this visitor and experiment; `0.0` when
    /// there is no visitor, which pins server rendering to the control.
    pub fn deterministic_random_number(&self) -> f64 {
        match self.anonymous_id() {
            Some(id) => seeded_fraction(&seed(&self.name, id.as_str())),
            None => 0.0,
        }
    }

    /// Assign the visitor to a choice.
    pub fn variant(&self) -> V {
        let fraction = self.deterministic_random_number();

        select_index(&self.weights, fraction)
            .and_then(|index| self.choices.get(index))
            .unwrap_or_else(|| self.default_variant())
            .clone()
    }

    /// Report the visitor's assignment unless it was reported before.
    ///
    /// `assignment` defaults to [`Experiment::variant`]. Unavailable storage
    /// and failed log writes are skipped; a corrupt exposure log is an error.
    pub fn log_exposure(&self, assignment: Option<V>) -> Result<(), ExposureError> {
        let Some(browser) = self.context.as_browser() else {
            return Ok(());
        };

        let mut log = match ExposureLog::load(browser.local_storage.as_ref()) {
            Ok(log) => log,
            Err(ExposureLogError::Storage(e)) => {
                debug!(experiment = %self.name, error = %e, "exposure log unavailable, skipping");
                return Ok(());
            }
            Err(ExposureLogError::Malformed(source)) => {
                error!(experiment = %self.name, error = %source, "malformed exposure log");
                return Err(ExposureError::MalformedLog {
                    experiment: self.name.clone(),
                    source,
                });
            }
        };

        if log.contains(&self.name) {
            return Ok(());
        }

        let assignment = assignment.unwrap_or_else(|| self.variant());
        let event = ExposureEvent::new(self.name.clone(), assignment);
        browser.sink.emit(EXPOSURE_EVENT, &event);

        log.insert(self.name.clone());
        if let Err(e) = log.save(browser.local_storage.as_ref()) {
            warn!(experiment = %self.name, error = %e, "failed to persist exposure log");
        }
        Ok(())
    }

    /// Assign the visitor and report the exposure, the way a page consumes
    /// an experiment.
    pub fn resolve(&self) -> Result<V, ExposureError> {
        let variant = self.variant();
        self.log_exposure(Some(variant.clone()))?;
        Ok(variant)
    }
}

impl Experiment<bool> {
    pub fn boolean(
        name: impl Into<String>,
        options: BooleanOptions,
        context: impl Into<ExecutionContext>,
    ) -> Result<Self, ConfigurationError> {
        Experiment::new(name, options.into(), context)
    }
}
