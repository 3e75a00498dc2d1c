use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tracing::info;

use crate::types::ExposureEvent;

/// Receiver of exposure events.
pub trait ExposureSink: Send + Sync {
    fn emit(&self, event_name: &str, payload: &ExposureEvent);
}

/// Tag-manager style queue: every exposure becomes a `gtmClick` entry
/// carrying the payload under `extraData`.
#[derive(Debug, Default)]
pub struct DataLayer {
    entries: Mutex<Vec<Value>>,
}

impl DataLayer {
    pub const EVENT: &'static str = "gtmClick";
    pub const CLICK_TEXT: &'static str = "Marketing Experiment Triggered";

    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of queued entries, oldest first.
    pub fn entries(&self) -> Vec<Value> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Remove and return everything queued so far.
    pub fn drain(&self) -> Vec<Value> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl ExposureSink for DataLayer {
    fn emit(&self, _event_name: &str, payload: &ExposureEvent) {
        let entry = json!({
            "event": Self::EVENT,
            "clickText": Self::CLICK_TEXT,
            "extraData": payload,
        });
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry);
    }
}

/// Event recorded by [`AnalyticsQueue`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEvent {
    pub name: String,
    pub payload: Value,
}

/// Named-event analytics queue. Exposures are anonymous, so the payload is
/// tagged with `user_id: -1` and `allow_no_schema: true`.
#[derive(Debug, Default)]
pub struct AnalyticsQueue {
    events: Mutex<Vec<TrackedEvent>>,
}

impl AnalyticsQueue {
    pub const ANONYMOUS_USER_ID: i64 = -1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn drain(&self) -> Vec<TrackedEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl ExposureSink for AnalyticsQueue {
    fn emit(&self, event_name: &str, payload: &ExposureEvent) {
        let payload = json!({
            "experiment_name": payload.experiment_name,
            "assignment": payload.assignment,
            "user_id": Self::ANONYMOUS_USER_ID,
            "allow_no_schema": true,
        });
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(TrackedEvent {
                name: event_name.to_string(),
                payload,
            });
    }
}

/// Writes exposures to the `tracing` pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ExposureSink for TracingSink {
    fn emit(&self, event_name: &str, payload: &ExposureEvent) {
        info!(
            event_name,
            experiment = %payload.experiment_name,
            assignment = %payload.assignment,
            "experiment exposure"
        );
    }
}

/// Forwards every event to each inner sink, in insertion order.
#[derive(Default, Clone)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn ExposureSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: Arc<dyn ExposureSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl ExposureSink for FanoutSink {
    fn emit(&self, event_name: &str, payload: &ExposureEvent) {
        for sink in &self.sinks {
            sink.emit(event_name, payload);
        }
    }
}
