//! Element id generation.

use std::collections::HashMap;

/// How element ids are generated within a render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "deserialize",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum IdStrategy {
    /// Per-kind counters starting at zero: `tabs-0`, `tabs-1`.
    ///
    /// Output is deterministic for identical input.
    #[default]
    Sequential,
    /// Random UUID v4 suffixes: `tabs-3f2c...`.
    Uuid,
}

/// Generates ids for one render.
#[derive(Debug)]
pub struct IdGenerator {
    strategy: IdStrategy,
    prefix: String,
    counters: HashMap<String, usize>,
}

impl IdGenerator {
    /// Create a generator.
    #[must_use]
    pub fn new(strategy: IdStrategy, prefix: impl Into<String>) -> Self {
        Self {
            strategy,
            prefix: prefix.into(),
            counters: HashMap::new(),
        }
    }

    /// Next id for an element kind.
    pub fn next(&mut self, kind: &str) -> String {
        match self.strategy {
            IdStrategy::Sequential => {
                let counter = self.counters.entry(kind.to_owned()).or_insert(0);
                let id = format!("{}{kind}-{counter}", self.prefix);
                *counter += 1;
                id
            }
            IdStrategy::Uuid => {
                format!("{}{kind}-{}", self.prefix, uuid::Uuid::new_v4().simple())
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default(), "")
    }
}
