use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted visitor identifier used as the randomization unit.
///
/// Values minted here are lowercase UUID v4 strings
/// (`xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`). Values read back from a cookie
/// are taken verbatim: a visitor keeps whatever id the store already holds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnonymousId(String);

impl AnonymousId {
    /// Mint a fresh random id.
    pub fn generate() -> Self {
        AnonymousId(Uuid::new_v4().hyphenated().to_string())
    }

    /// Wrap a value read from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        AnonymousId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnonymousId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
