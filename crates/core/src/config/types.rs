use serde::{Deserialize, Serialize};

use crate::matching::MatchingConfig;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Batch execution options
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Match entries on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Batches smaller than this run sequentially even when `parallel` is set
    #[serde(default = "default_min_parallel_entries")]
    pub min_parallel_entries: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            min_parallel_entries: default_min_parallel_entries(),
        }
    }
}

fn default_parallel() -> bool {
    true
}

fn default_min_parallel_entries() -> usize {
    64
}
