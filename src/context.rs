use std::fmt;
use std::sync::Arc;

use crate::exposure::{DataLayer, ExposureSink};
use crate::storage::{KeyValueStore, MemoryStore};

/// Where an experiment is being evaluated.
///
/// During server rendering there is no visitor storage: every experiment
/// resolves to its control variant and nothing is reported, so pre-rendered
/// markup never varies between builds.
#[derive(Debug, Clone, Default)]
pub enum ExecutionContext {
    #[default]
    Server,
    Browser(BrowserContext),
}

impl ExecutionContext {
    pub fn browser(context: BrowserContext) -> Self {
        ExecutionContext::Browser(context)
    }

    pub fn is_server(&self) -> bool {
        matches!(self, ExecutionContext::Server)
    }

    pub fn as_browser(&self) -> Option<&BrowserContext> {
        match self {
            ExecutionContext::Server => None,
            ExecutionContext::Browser(context) => Some(context),
        }
    }
}

/// Capabilities of a visitor's page: cookie jar, local storage and the
/// analytics sink.
#[derive(Clone)]
pub struct BrowserContext {
    pub cookies: Arc<dyn KeyValueStore>,
    pub local_storage: Arc<dyn KeyValueStore>,
    pub sink: Arc<dyn ExposureSink>,
}

impl BrowserContext {
    pub fn new(
        cookies: Arc<dyn KeyValueStore>,
        local_storage: Arc<dyn KeyValueStore>,
        sink: Arc<dyn ExposureSink>,
    ) -> Self {
        Self {
            cookies,
            local_storage,
            sink,
        }
    }

    /// Fresh in-memory stores and an empty data layer.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(DataLayer::new()),
        )
    }

    pub fn with_cookies(mut self, cookies: Arc<dyn KeyValueStore>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_local_storage(mut self, local_storage: Arc<dyn KeyValueStore>) -> Self {
        self.local_storage = local_storage;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ExposureSink>) -> Self {
        self.sink = sink;
        self
    }
}

impl fmt::Debug for BrowserContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserContext").finish_non_exhaustive()
    }
}

impl From<BrowserContext> for ExecutionContext {
    fn from(context: BrowserContext) -> Self {
        ExecutionContext::Browser(context)
    }
}
