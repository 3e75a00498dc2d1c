//! Deterministic A/B experiment bucketing for static marketing sites.
//!
//! `site-experiments` assigns an anonymous visitor to one of several weighted
//! choices and reports that exposure once. Assignment is a pure function of
//! the experiment name and the visitor's persisted id: identical inputs
//! always produce the same variant, on every page load and on every machine.
//!
//! Cookie storage, local storage and the analytics sink are injected through
//! an [`ExecutionContext`], so the same experiment definition runs during
//! server rendering (always the control variant) and in the browser.

pub mod bucketing;
pub mod context;
pub mod experiment;
pub mod exposure;
pub mod storage;
pub mod types;

pub use context::{BrowserContext, ExecutionContext};
pub use experiment::{
    BooleanExperiment, BooleanOptions, ConfigurationError, Experiment, ExperimentOptions,
    ExposureError,
};
pub use types::{AnonymousId, ExposureEvent, Variant};
