//! Exposure reporting: the persisted log of already-reported experiments and
//! the sinks exposure events are emitted to.

pub mod log;
pub mod sink;

pub use log::{ExposureLog, ExposureLogError, EXPOSURE_LOG_KEY};
pub use sink::{AnalyticsQueue, DataLayer, ExposureSink, FanoutSink, TrackedEvent, TracingSink};
